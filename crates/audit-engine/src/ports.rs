//! Collaborator ports
//!
//! The engine never talks to PDFs, LLMs, or tracker APIs directly — it
//! consumes these narrow interfaces. Implementations (and their retries,
//! timeouts, and backoff) live with the caller; tests swap in
//! deterministic fakes.

use async_trait::async_trait;
use audit_types::{CorrectionDirective, ExtractedFields, ValidationResult};
use std::path::{Path, PathBuf};

use crate::error::AuditError;

/// Extraction oracle: maps a raw document to structured fields.
///
/// Absent numeric fields must be represented as `None`, never coerced to
/// zero. Failure to locate required structure is an
/// [`AuditError::Extraction`].
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, document: &Path) -> Result<ExtractedFields, AuditError>;
}

/// Semantic text-equivalence oracle.
///
/// Returns a score in `[0, 1]` and must be pure with respect to its two
/// inputs for test purposes. Any equivalence scorer satisfies the
/// contract: edit distance, embedding cosine, exact match, or an LLM call.
#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    async fn score(&self, candidate: &str, reference: &str) -> Result<f64, AuditError>;
}

/// Tracker sink for validation results. Persistence failure is non-fatal
/// to the pipeline.
#[async_trait]
pub trait TrackerSink: Send + Sync {
    async fn persist(
        &self,
        requisition_id: &str,
        result: &ValidationResult,
    ) -> Result<(), AuditError>;
}

/// Document writer: the only component permitted to mutate document
/// content. Directives must be applied in the order given.
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    async fn apply(
        &self,
        document: &Path,
        directives: &[CorrectionDirective],
    ) -> Result<PathBuf, AuditError>;
}

/// Source of canonical template sections for structural corrections.
pub trait SectionTemplates: Send + Sync {
    /// The canonical job-description section inserted when the document's
    /// template structure is missing.
    fn job_description_section(&self) -> &str;
}
