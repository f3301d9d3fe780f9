pub mod audit;
pub mod types;

pub use audit::AuditRecord;
pub use types::{
    CheckVerdict, CorrectionDirective, CorrectionReason, ExtractedFields, FieldTarget,
    GroundTruth, Priority, RateRange, ValidationResult,
};
