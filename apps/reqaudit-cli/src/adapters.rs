//! File-backed collaborator implementations
//!
//! Stand-ins for the production collaborators (LLM extraction, LLM
//! similarity scoring, tracker API, document editor) so the pipeline runs
//! end-to-end without network access. Documents are expected as
//! pre-extracted JSON field files.

use async_trait::async_trait;
use audit_engine::error::AuditError;
use audit_engine::ports::{DocumentWriter, Extractor, SectionTemplates, SimilarityScorer, TrackerSink};
use audit_types::{CorrectionDirective, ExtractedFields, ValidationResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads extracted fields from a JSON document file.
pub struct JsonExtractor;

#[async_trait]
impl Extractor for JsonExtractor {
    async fn extract(&self, document: &Path) -> Result<ExtractedFields, AuditError> {
        let content =
            tokio::fs::read_to_string(document)
                .await
                .map_err(|e| AuditError::Extraction {
                    requisition_id: file_stem(document),
                    message: format!("cannot read {}: {}", document.display(), e),
                })?;
        serde_json::from_str(&content).map_err(|e| AuditError::Extraction {
            requisition_id: file_stem(document),
            message: format!("malformed extracted fields: {}", e),
        })
    }
}

/// Deterministic token-overlap (Jaccard) similarity.
///
/// A pluggable stand-in for the semantic similarity oracle; any scorer
/// returning `[0, 1]` satisfies the validator's contract.
pub struct TokenOverlapScorer;

impl TokenOverlapScorer {
    fn tokens(text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect()
    }
}

#[async_trait]
impl SimilarityScorer for TokenOverlapScorer {
    async fn score(&self, candidate: &str, reference: &str) -> Result<f64, AuditError> {
        let a = Self::tokens(candidate);
        let b = Self::tokens(reference);
        if a.is_empty() && b.is_empty() {
            return Ok(1.0);
        }
        let intersection = a.intersection(&b).count() as f64;
        let union = a.union(&b).count() as f64;
        Ok(intersection / union)
    }
}

/// Appends validation results as JSON lines to a local tracker log.
pub struct JsonlTracker {
    path: PathBuf,
    // Serializes appends so concurrent requisitions never interleave lines.
    lock: Mutex<()>,
}

impl JsonlTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[derive(serde::Serialize)]
struct TrackerLine<'a> {
    requisition_id: &'a str,
    validation: &'a ValidationResult,
}

#[async_trait]
impl TrackerSink for JsonlTracker {
    async fn persist(
        &self,
        requisition_id: &str,
        result: &ValidationResult,
    ) -> Result<(), AuditError> {
        let line = serde_json::to_string(&TrackerLine {
            requisition_id,
            validation: result,
        })
        .map_err(|e| AuditError::Persistence {
            requisition_id: requisition_id.to_string(),
            message: e.to_string(),
        })?;

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AuditError::Persistence {
                requisition_id: requisition_id.to_string(),
                message: format!("cannot open {}: {}", self.path.display(), e),
            })?;
        file.write_all(format!("{}\n", line).as_bytes())
            .await
            .map_err(|e| AuditError::Persistence {
                requisition_id: requisition_id.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// Writes the ordered correction plan as a corrected-document JSON file.
pub struct JsonDocumentWriter {
    output_dir: PathBuf,
}

impl JsonDocumentWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[derive(serde::Serialize)]
struct CorrectedDocument<'a> {
    source_document: String,
    applied_in_order: &'a [CorrectionDirective],
}

#[async_trait]
impl DocumentWriter for JsonDocumentWriter {
    async fn apply(
        &self,
        document: &Path,
        directives: &[CorrectionDirective],
    ) -> Result<PathBuf, AuditError> {
        let requisition_id = file_stem(document);
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AuditError::DocumentWrite {
                requisition_id: requisition_id.clone(),
                message: format!("cannot create {}: {}", self.output_dir.display(), e),
            })?;

        let corrected = CorrectedDocument {
            source_document: document.display().to_string(),
            applied_in_order: directives,
        };
        let path = self
            .output_dir
            .join(format!("{}_corrected.json", requisition_id));
        let json = serde_json::to_string_pretty(&corrected).map_err(|e| {
            AuditError::DocumentWrite {
                requisition_id: requisition_id.clone(),
                message: e.to_string(),
            }
        })?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| AuditError::DocumentWrite {
                requisition_id,
                message: format!("cannot write {}: {}", path.display(), e),
            })?;
        Ok(path)
    }
}

/// Canonical job-description section used for structural corrections.
pub struct StandardSections;

const JOB_DESCRIPTION_SECTION: &str = "JOB DESCRIPTION\n\
A Day in the Life:\n\
Our sales and store support teams bring people together around the joys of food.\n\n\
What you bring to the table:\n\
- You take pride in the work you do\n\
- You agree that food is central to all our lives\n\n\
Why you will choose us:\n\
- Diverse and inclusive work culture\n\
- Competitive wages paid weekly";

impl SectionTemplates for StandardSections {
    fn job_description_section(&self) -> &str {
        JOB_DESCRIPTION_SECTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_types::CheckVerdict;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_token_overlap_identical_text_is_one() {
        let score = TokenOverlapScorer
            .score("Starting rates will vary", "Starting rates will vary")
            .await
            .unwrap();
        assert_eq!(score, 1.0);
    }

    #[tokio::test]
    async fn test_token_overlap_disjoint_text_is_zero() {
        let score = TokenOverlapScorer
            .score("alpha beta", "gamma delta")
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_token_overlap_ignores_case_and_punctuation() {
        let score = TokenOverlapScorer
            .score("Starting rates, will vary.", "starting RATES will vary")
            .await
            .unwrap();
        assert_eq!(score, 1.0);
    }

    #[tokio::test]
    async fn test_token_overlap_partial_between_zero_and_one() {
        let score = TokenOverlapScorer
            .score("alpha beta gamma", "alpha beta delta")
            .await
            .unwrap();
        assert!(score > 0.0 && score < 1.0);
    }

    #[tokio::test]
    async fn test_json_extractor_reads_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("651640.json");
        let json = r#"{
            "requisition_id": "651640",
            "jurisdiction": "IL",
            "min_pay_rate": 14.75,
            "max_pay_rate": null,
            "template_present": true,
            "disclosure_text": "Starting rates...",
            "dollar_formatted": true
        }"#;
        std::fs::write(&path, json).unwrap();

        let fields = JsonExtractor.extract(&path).await.unwrap();
        assert_eq!(fields.requisition_id, "651640");
        assert_eq!(fields.min_pay_rate, Some(14.75));
        assert_eq!(fields.max_pay_rate, None);
        assert!(fields.role_rates.is_empty());
    }

    #[tokio::test]
    async fn test_json_extractor_missing_file_is_extraction_error() {
        let err = JsonExtractor
            .extract(Path::new("/nonexistent/651640.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_json_extractor_malformed_json_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonExtractor.extract(&path).await.unwrap_err();
        assert!(matches!(err, AuditError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_jsonl_tracker_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("tracker.jsonl");
        let tracker = JsonlTracker::new(&log);

        let result = ValidationResult {
            template_structure: CheckVerdict::Pass,
            min_rate: CheckVerdict::Pass,
            max_rate: CheckVerdict::Pass,
            description_complete: CheckVerdict::Pass,
            dollar_formatting: CheckVerdict::Pass,
            corrections_needed: Vec::new(),
            corrections_completed: Vec::new(),
        };
        tracker.persist("100", &result).await.unwrap();
        tracker.persist("101", &result).await.unwrap();

        let content = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"requisition_id\":\"100\""));
        assert!(lines[1].contains("\"requisition_id\":\"101\""));
    }

    #[tokio::test]
    async fn test_document_writer_emits_corrected_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonDocumentWriter::new(dir.path().join("out"));

        let path = writer
            .apply(Path::new("651640.json"), &[])
            .await
            .unwrap();

        assert!(path.ends_with("651640_corrected.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("applied_in_order"));
    }

    #[test]
    fn test_standard_sections_nonempty() {
        let sections = StandardSections;
        assert!(sections
            .job_description_section()
            .contains("A Day in the Life"));
    }
}
