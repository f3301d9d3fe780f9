//! Error taxonomy for the audit pipeline
//!
//! `RangeError` and `PlanningError` are standalone types because callers
//! match on them directly; `AuditError` is the umbrella the orchestrator
//! works with at the requisition boundary.

use thiserror::Error;

/// Invariant violation passed into a comparator: `low > high`.
///
/// This is a programmer error — fatal to the single call, never
/// caught-and-ignored inside the engine.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid range: low bound {low} exceeds high bound {high}")]
pub struct RangeError {
    pub low: f64,
    pub high: f64,
}

/// Ground truth and role-bound data are mutually inconsistent: clipping a
/// role's rates into the ground-truth range inverted it.
///
/// Requires human resolution; the planner never silently repairs this.
#[derive(Debug, Error, Clone, PartialEq)]
#[error(
    "cannot clip rates for role '{role}': clipped range ${clipped_min:.2}-${clipped_max:.2} is inverted"
)]
pub struct PlanningError {
    pub role: String,
    pub clipped_min: f64,
    pub clipped_max: f64,
}

/// Requisition-level errors surfaced to the orchestrator.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The extraction oracle failed to produce fields. The requisition is
    /// excluded from further pipeline stages.
    #[error("extraction failed for requisition {requisition_id}: {message}")]
    Extraction {
        requisition_id: String,
        message: String,
    },

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Planning(#[from] PlanningError),

    /// The similarity oracle failed or returned a score outside [0, 1].
    #[error("similarity oracle error: {0}")]
    Similarity(String),

    /// Tracker sink unreachable or rejected the update. Non-fatal to the
    /// pipeline: logged and surfaced in the batch summary.
    #[error("tracker persistence failed for requisition {requisition_id}: {message}")]
    Persistence {
        requisition_id: String,
        message: String,
    },

    /// The document writer could not apply the correction plan.
    #[error("document write failed for requisition {requisition_id}: {message}")]
    DocumentWrite {
        requisition_id: String,
        message: String,
    },
}
