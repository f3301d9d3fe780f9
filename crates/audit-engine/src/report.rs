//! Audit report rendering
//!
//! Formats an [`AuditRecord`] (and batch summaries) as human-readable text
//! or JSON, to stdout or a file.

use anyhow::Result;
use audit_types::AuditRecord;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use crate::compare::format_rate;
use crate::orchestrator::BatchSummary;

/// Output format for audit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render a single requisition's audit record.
    pub fn format_record(&self, record: &AuditRecord) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(render_record_text(record)),
            ReportFormat::Json => Ok(serde_json::to_string(record)?),
            ReportFormat::JsonPretty => Ok(serde_json::to_string_pretty(record)?),
        }
    }

    /// Render a batch summary.
    pub fn format_batch(&self, summary: &BatchSummary) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(render_batch_text(summary)),
            ReportFormat::Json => Ok(serde_json::to_string(summary)?),
            ReportFormat::JsonPretty => Ok(serde_json::to_string_pretty(summary)?),
        }
    }

    /// Print a record to stdout.
    pub fn report(&self, record: &AuditRecord) -> Result<()> {
        let output = self.format_record(record)?;
        print!("{}", output);
        io::stdout().flush()?;
        Ok(())
    }

    /// Write a record to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, record: &AuditRecord, path: P) -> Result<()> {
        fs::write(path, self.format_record(record)?)?;
        Ok(())
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(ReportFormat::default())
    }
}

fn render_record_text(record: &AuditRecord) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "REQUISITION AUDIT REPORT");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Requisition: {}", record.requisition_id);
    let _ = writeln!(out, "Recorded:    {}", record.recorded_at);
    let _ = writeln!(out);

    let gt = &record.ground_truth;
    let _ = writeln!(out, "GROUND TRUTH");
    let _ = writeln!(out, "  Business Unit: {}", gt.business_unit);
    let _ = writeln!(out, "  Facility:      {}", gt.facility);
    let _ = writeln!(out, "  Jurisdiction:  {}", gt.jurisdiction);
    let _ = writeln!(out, "  Min Pay Rate:  {}", format_rate(Some(gt.min_pay_rate)));
    let _ = writeln!(out, "  Max Pay Rate:  {}", format_rate(Some(gt.max_pay_rate)));
    let _ = writeln!(out);

    let ex = &record.extracted;
    let _ = writeln!(out, "EXTRACTED DATA");
    let _ = writeln!(out, "  Jurisdiction:  {}", ex.jurisdiction);
    let _ = writeln!(out, "  Min Pay Rate:  {}", format_rate(ex.min_pay_rate));
    let _ = writeln!(out, "  Max Pay Rate:  {}", format_rate(ex.max_pay_rate));
    let _ = writeln!(
        out,
        "  Template:      {}",
        if ex.template_present { "present" } else { "missing" }
    );
    let _ = writeln!(
        out,
        "  Dollar Signs:  {}",
        if ex.dollar_formatted { "yes" } else { "no" }
    );
    for (role, range) in &ex.role_rates {
        let _ = writeln!(out, "  Role {}: {}", role, range);
    }
    let _ = writeln!(out);

    let v = &record.validation;
    let _ = writeln!(out, "VALIDATION RESULTS");
    let _ = writeln!(out, "  Template Structure:  {}", v.template_structure);
    let _ = writeln!(out, "  Min Pay Rate:        {}", v.min_rate);
    let _ = writeln!(out, "  Max Pay Rate:        {}", v.max_rate);
    let _ = writeln!(out, "  Job Description:     {}", v.description_complete);
    let _ = writeln!(out, "  Dollar Formatting:   {}", v.dollar_formatting);
    let _ = writeln!(out);

    let _ = writeln!(out, "CORRECTIONS NEEDED ({})", v.corrections_needed.len());
    for (i, reason) in v.corrections_needed.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, reason);
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "CORRECTIONS APPLIED ({})",
        record.corrections_applied.len()
    );
    for (i, directive) in record.corrections_applied.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, directive.summary());
        let _ = writeln!(out, "     {}", directive.justification);
    }
    let _ = writeln!(out, "{}", rule);

    out
}

fn render_batch_text(summary: &BatchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "BATCH SUMMARY ({})", summary.started_at);
    let _ = writeln!(
        out,
        "  processed: {} / errored: {} / corrections applied: {}",
        summary.processed, summary.errored, summary.corrections_applied
    );
    for error in &summary.errors {
        let _ = writeln!(out, "  ERROR {}: {}", error.requisition_id, error.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_types::{
        CheckVerdict, CorrectionDirective, CorrectionReason, ExtractedFields, FieldTarget,
        GroundTruth, Priority, ValidationResult,
    };
    use std::collections::BTreeMap;

    fn sample_record() -> AuditRecord {
        let ground_truth = GroundTruth {
            requisition_id: "651640".to_string(),
            jurisdiction: "IL".to_string(),
            min_pay_rate: 14.75,
            max_pay_rate: 15.0,
            facility: "1148".to_string(),
            business_unit: "27R-Seattle".to_string(),
        };
        let extracted = ExtractedFields {
            requisition_id: "651640".to_string(),
            jurisdiction: "IL".to_string(),
            min_pay_rate: Some(12.50),
            max_pay_rate: Some(15.0),
            role_rates: BTreeMap::new(),
            template_present: true,
            disclosure_text: "text".to_string(),
            dollar_formatted: true,
        };
        let validation = ValidationResult {
            template_structure: CheckVerdict::Pass,
            min_rate: CheckVerdict::Fail,
            max_rate: CheckVerdict::Pass,
            description_complete: CheckVerdict::Pass,
            dollar_formatting: CheckVerdict::Pass,
            corrections_needed: vec![CorrectionReason::MinRateMismatch {
                found: 12.50,
                expected: 14.75,
            }],
            corrections_completed: vec!["[CRITICAL] minimum_pay_rate: '$12.50' -> '$14.75'"
                .to_string()],
        };
        let applied = vec![CorrectionDirective {
            target: FieldTarget::MinPayRate,
            current_value: "$12.50".to_string(),
            corrected_value: "$14.75".to_string(),
            priority: Priority::Critical,
            justification: "Minimum pay rate must match the tracker value of $14.75".to_string(),
        }];
        AuditRecord::new(ground_truth, extracted, validation, applied)
    }

    #[test]
    fn test_text_report_contains_sections() {
        let report = Reporter::new(ReportFormat::Text)
            .format_record(&sample_record())
            .unwrap();

        assert!(report.contains("REQUISITION AUDIT REPORT"));
        assert!(report.contains("GROUND TRUTH"));
        assert!(report.contains("EXTRACTED DATA"));
        assert!(report.contains("VALIDATION RESULTS"));
        assert!(report.contains("CORRECTIONS NEEDED (1)"));
        assert!(report.contains("CORRECTIONS APPLIED (1)"));
        assert!(report.contains("Min pay rate mismatch"));
    }

    #[test]
    fn test_json_report_roundtrips() {
        let record = sample_record();
        let json = Reporter::new(ReportFormat::Json)
            .format_record(&record)
            .unwrap();
        let restored = AuditRecord::from_json(&json).unwrap();
        assert_eq!(restored.requisition_id, record.requisition_id);
    }

    #[test]
    fn test_batch_text_counts() {
        let summary = BatchSummary {
            started_at: "2026-01-01T00:00:00Z".to_string(),
            processed: 2,
            errored: 1,
            corrections_applied: 3,
            outcomes: Vec::new(),
            errors: vec![crate::orchestrator::BatchError {
                requisition_id: "101".to_string(),
                message: "extraction failed".to_string(),
            }],
        };
        let text = Reporter::new(ReportFormat::Text)
            .format_batch(&summary)
            .unwrap();
        assert!(text.contains("processed: 2 / errored: 1 / corrections applied: 3"));
        assert!(text.contains("ERROR 101"));
    }
}
