//! Validation and correction pipeline for job-requisition audits
//!
//! Audits extracted requisition fields against authoritative ground truth
//! (pay rates, required disclosure text, template structure) and plans an
//! ordered, idempotent set of field-level corrections.
//!
//! Document parsing, the text-understanding oracle, and the tracker client
//! live behind the ports in [`ports`]; the engine itself is pure decision
//! logic plus orchestration.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use audit_engine::{AuditConfig, AuditOrchestrator, ReferenceTextStore};
//! # use audit_engine::ports::{Extractor, SimilarityScorer, TrackerSink, DocumentWriter, SectionTemplates};
//! # async fn example(
//! #     extractor: Arc<dyn Extractor>,
//! #     scorer: Arc<dyn SimilarityScorer>,
//! #     writer: Arc<dyn DocumentWriter>,
//! #     tracker: Arc<dyn TrackerSink>,
//! #     sections: Arc<dyn SectionTemplates>,
//! #     ground_truth: audit_types::GroundTruth,
//! # ) -> anyhow::Result<()> {
//! let config = AuditConfig::default();
//! let reference = Arc::new(ReferenceTextStore::from_file("reference_text.json")?);
//!
//! let orchestrator = AuditOrchestrator::new(
//!     config, extractor, scorer, writer, tracker, sections, reference,
//! );
//! let outcome = orchestrator
//!     .process_requisition("651640.json".as_ref(), &ground_truth)
//!     .await?;
//! println!("{}", outcome.record.summary());
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod planner;
pub mod ports;
pub mod reference;
pub mod report;
pub mod validator;

pub use config::AuditConfig;
pub use error::{AuditError, PlanningError, RangeError};
pub use orchestrator::{AuditOrchestrator, AuditStage, BatchItem, BatchSummary, RequisitionOutcome};
pub use planner::CorrectionPlanner;
pub use reference::ReferenceTextStore;
pub use report::{ReportFormat, Reporter};
pub use validator::Validator;
