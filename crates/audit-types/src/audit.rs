//! Write-once audit record of a completed requisition run

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CorrectionDirective, ExtractedFields, GroundTruth, ValidationResult};

/// Immutable snapshot of one requisition audit: inputs, verdicts, and the
/// corrections that were applied. The unit persisted and reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub record_id: String,
    pub requisition_id: String,
    pub ground_truth: GroundTruth,
    pub extracted: ExtractedFields,
    pub validation: ValidationResult,
    pub corrections_applied: Vec<CorrectionDirective>,
    pub recorded_at: String,
}

impl AuditRecord {
    /// Create a record, stamping it with the current time. There is no
    /// mutation API; a record is written exactly once per requisition.
    pub fn new(
        ground_truth: GroundTruth,
        extracted: ExtractedFields,
        validation: ValidationResult,
        corrections_applied: Vec<CorrectionDirective>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            requisition_id: ground_truth.requisition_id.clone(),
            ground_truth,
            extracted,
            validation,
            corrections_applied,
            recorded_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize audit record: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to deserialize audit record: {}", e))
    }

    /// One-line summary for log output.
    pub fn summary(&self) -> String {
        format!(
            "requisition {}: {} issue(s) found, {} correction(s) applied",
            self.requisition_id,
            self.validation.corrections_needed.len(),
            self.corrections_applied.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CheckVerdict;
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
            min_pay_rate: Some(14.75),
            max_pay_rate: Some(15.0),
            role_rates: BTreeMap::new(),
            template_present: true,
            disclosure_text: "Starting rates...".to_string(),
            dollar_formatted: true,
        };
        let validation = ValidationResult {
            template_structure: CheckVerdict::Pass,
            min_rate: CheckVerdict::Pass,
            max_rate: CheckVerdict::Pass,
            description_complete: CheckVerdict::Pass,
            dollar_formatting: CheckVerdict::Pass,
            corrections_needed: Vec::new(),
            corrections_completed: Vec::new(),
        };
        AuditRecord::new(ground_truth, extracted, validation, Vec::new())
    }

    #[test]
    fn test_record_ids_unique() {
        let a = sample_record();
        let b = sample_record();
        assert_ne!(a.record_id, b.record_id);
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = sample_record();
        let json = record.to_json().unwrap();
        let restored = AuditRecord::from_json(&json).unwrap();

        assert_eq!(record.record_id, restored.record_id);
        assert_eq!(record.requisition_id, restored.requisition_id);
        assert_eq!(record.recorded_at, restored.recorded_at);
    }

    #[test]
    fn test_summary_counts() {
        let record = sample_record();
        assert_eq!(
            record.summary(),
            "requisition 651640: 0 issue(s) found, 0 correction(s) applied"
        );
    }
}
