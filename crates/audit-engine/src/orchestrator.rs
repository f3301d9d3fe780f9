//! Pipeline orchestration
//!
//! Sequences extraction -> validation -> correction -> persistence for a
//! single requisition, and fans that out across a batch with a bounded
//! worker count. Requisitions are independent: the only shared state is
//! the read-only reference text store, and one requisition's failure never
//! aborts the rest.

use audit_types::{AuditRecord, CorrectionDirective, GroundTruth};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::planner::CorrectionPlanner;
use crate::ports::{DocumentWriter, Extractor, SectionTemplates, SimilarityScorer, TrackerSink};
use crate::reference::ReferenceTextStore;
use crate::validator::Validator;

/// States of the per-requisition machine. Every requisition that reaches
/// extraction terminates in `Reported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStage {
    Extracted,
    Validated,
    Corrected,
    Skipped,
    Reported,
}

/// Result of one fully processed requisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequisitionOutcome {
    pub requisition_id: String,
    /// Terminal stage reached; `Reported` on every success path.
    pub stage: AuditStage,
    /// Path produced by the document writer, present iff the machine took
    /// the `Corrected` branch.
    pub corrected_document: Option<PathBuf>,
    /// Whether the tracker sink accepted the validation result.
    pub persisted: bool,
    pub record: AuditRecord,
}

impl RequisitionOutcome {
    pub fn was_corrected(&self) -> bool {
        self.corrected_document.is_some()
    }
}

/// One unit of batch work: a source document plus its ground truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub document: PathBuf,
    pub ground_truth: GroundTruth,
}

/// A requisition that errored during batch processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    pub requisition_id: String,
    pub message: String,
}

/// Aggregate result of a batch run. Outcome order is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub started_at: String,
    pub processed: usize,
    pub errored: usize,
    pub corrections_applied: usize,
    pub outcomes: Vec<RequisitionOutcome>,
    pub errors: Vec<BatchError>,
}

impl BatchSummary {
    /// True when every requisition in the run completed without error.
    pub fn is_clean(&self) -> bool {
        self.errored == 0
    }
}

pub struct AuditOrchestrator {
    config: AuditConfig,
    extractor: Arc<dyn Extractor>,
    writer: Arc<dyn DocumentWriter>,
    tracker: Arc<dyn TrackerSink>,
    reference: Arc<ReferenceTextStore>,
    validator: Validator,
    planner: CorrectionPlanner,
}

impl AuditOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: AuditConfig,
        extractor: Arc<dyn Extractor>,
        scorer: Arc<dyn SimilarityScorer>,
        writer: Arc<dyn DocumentWriter>,
        tracker: Arc<dyn TrackerSink>,
        sections: Arc<dyn SectionTemplates>,
        reference: Arc<ReferenceTextStore>,
    ) -> Self {
        let validator = Validator::new(config.clone(), scorer);
        let planner = CorrectionPlanner::new(config.clone(), sections);
        Self {
            config,
            extractor,
            writer,
            tracker,
            reference,
            validator,
            planner,
        }
    }

    /// Process a single requisition end to end.
    ///
    /// Collaborator failures (extraction, planning, document write) are
    /// fatal to this requisition and propagate to the caller; tracker
    /// persistence is best-effort and never rolls back prior stages.
    #[instrument(skip_all, fields(requisition = %ground_truth.requisition_id))]
    pub async fn process_requisition(
        &self,
        document: &Path,
        ground_truth: &GroundTruth,
    ) -> Result<RequisitionOutcome, AuditError> {
        let extracted = self.extractor.extract(document).await?;
        let mut stage = AuditStage::Extracted;
        debug!(?stage, "fields extracted");

        let mut validation = self
            .validator
            .validate(&extracted, ground_truth, &self.reference)
            .await?;
        stage = AuditStage::Validated;
        debug!(
            ?stage,
            issues = validation.corrections_needed.len(),
            "validation complete"
        );

        let mut corrected_document = None;
        let mut applied: Vec<CorrectionDirective> = Vec::new();

        if self.config.auto_correct && validation.needs_correction() {
            let plan =
                self.planner
                    .plan(&extracted, ground_truth, &validation, &self.reference)?;
            let path = self.writer.apply(document, &plan).await?;
            validation.corrections_completed = plan.iter().map(|d| d.summary()).collect();
            info!(
                corrections = plan.len(),
                output = %path.display(),
                "corrections applied"
            );
            applied = plan;
            corrected_document = Some(path);
            stage = AuditStage::Corrected;
        } else {
            stage = AuditStage::Skipped;
        }
        debug!(?stage, "correction stage resolved");

        let persisted = match self
            .tracker
            .persist(&ground_truth.requisition_id, &validation)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "tracker update failed; continuing");
                false
            }
        };

        let record = AuditRecord::new(ground_truth.clone(), extracted, validation, applied);
        stage = AuditStage::Reported;
        info!("{}", record.summary());

        Ok(RequisitionOutcome {
            requisition_id: ground_truth.requisition_id.clone(),
            stage,
            corrected_document,
            persisted,
            record,
        })
    }

    /// Process a batch of requisitions with bounded parallelism.
    ///
    /// Never fails as a whole: each erroring requisition becomes an entry
    /// in [`BatchSummary::errors`].
    #[instrument(skip_all, fields(count = items.len()))]
    pub async fn process_batch(&self, items: Vec<BatchItem>) -> BatchSummary {
        let started_at = Utc::now().to_rfc3339();
        let parallel = self.config.parallel_requisitions.max(1);
        let semaphore = Arc::new(Semaphore::new(parallel));

        let jobs: Vec<_> = items
            .into_iter()
            .map(|item| {
                let sem = semaphore.clone();
                async move {
                    let _permit = sem.acquire().await.expect("semaphore never closed");
                    let id = item.ground_truth.requisition_id.clone();
                    let result = self
                        .process_requisition(&item.document, &item.ground_truth)
                        .await;
                    (id, result)
                }
            })
            .collect();

        let results: Vec<(String, Result<RequisitionOutcome, AuditError>)> =
            stream::iter(jobs).buffer_unordered(parallel).collect().await;

        let mut outcomes = Vec::new();
        let mut errors = Vec::new();
        let mut corrections_applied = 0;

        for (requisition_id, result) in results {
            match result {
                Ok(outcome) => {
                    corrections_applied += outcome.record.corrections_applied.len();
                    outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(requisition = %requisition_id, error = %e, "requisition errored");
                    errors.push(BatchError {
                        requisition_id,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            processed = outcomes.len(),
            errored = errors.len(),
            corrections = corrections_applied,
            "batch complete"
        );

        BatchSummary {
            started_at,
            processed: outcomes.len(),
            errored: errors.len(),
            corrections_applied,
            outcomes,
            errors,
        }
    }
}
