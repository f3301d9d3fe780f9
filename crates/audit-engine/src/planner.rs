//! Correction planning
//!
//! Projects the validator's structured reasons into concrete field-level
//! directives. Pure over immutable snapshots: planning never mutates the
//! ground truth or the extracted fields, and re-planning an
//! already-corrected document yields an empty plan.

use audit_types::{CorrectionDirective, CorrectionReason, ExtractedFields, FieldTarget,
    GroundTruth, Priority, RateRange, ValidationResult};
use std::sync::Arc;
use tracing::instrument;

use crate::compare::format_rate;
use crate::config::AuditConfig;
use crate::error::PlanningError;
use crate::ports::SectionTemplates;
use crate::reference::ReferenceTextStore;

pub struct CorrectionPlanner {
    config: AuditConfig,
    sections: Arc<dyn SectionTemplates>,
}

impl CorrectionPlanner {
    pub fn new(config: AuditConfig, sections: Arc<dyn SectionTemplates>) -> Self {
        Self { config, sections }
    }

    /// Derive exactly one directive per correction reason, ordered
    /// CRITICAL first with ties kept in check order.
    ///
    /// # Errors
    ///
    /// [`PlanningError`] when clipping a role's rates into the ground-truth
    /// range would invert it — ground truth and role bounds are mutually
    /// inconsistent and must be resolved by a human.
    #[instrument(skip_all, fields(requisition = %ground_truth.requisition_id))]
    pub fn plan(
        &self,
        extracted: &ExtractedFields,
        ground_truth: &GroundTruth,
        validation: &ValidationResult,
        reference: &ReferenceTextStore,
    ) -> Result<Vec<CorrectionDirective>, PlanningError> {
        let mut directives = Vec::with_capacity(validation.corrections_needed.len());

        for reason in &validation.corrections_needed {
            directives.push(match reason {
                CorrectionReason::TemplateStructureMissing => CorrectionDirective {
                    target: FieldTarget::JobDescriptionSection,
                    current_value: "MISSING".to_string(),
                    corrected_value: self.sections.job_description_section().to_string(),
                    priority: Priority::Medium,
                    justification: "Requisition template requires the standard job-description \
                                    section with its subsections"
                        .to_string(),
                },
                CorrectionReason::MinRateMismatch { found, expected } => CorrectionDirective {
                    target: FieldTarget::MinPayRate,
                    current_value: format_rate(Some(*found)),
                    corrected_value: format_rate(Some(*expected)),
                    priority: Priority::Critical,
                    justification: format!(
                        "Minimum pay rate must match the tracker value of {}",
                        format_rate(Some(*expected))
                    ),
                },
                CorrectionReason::MaxRateMismatch { found, expected } => CorrectionDirective {
                    target: FieldTarget::MaxPayRate,
                    current_value: format_rate(Some(*found)),
                    corrected_value: format_rate(Some(*expected)),
                    priority: Priority::Critical,
                    justification: format!(
                        "Maximum pay rate must match the tracker value of {}",
                        format_rate(Some(*expected))
                    ),
                },
                CorrectionReason::DollarFormattingMissing => CorrectionDirective {
                    target: FieldTarget::AllRateFields,
                    current_value: "rates without $ formatting".to_string(),
                    corrected_value: "all rates formatted as $XX.XX".to_string(),
                    priority: Priority::High,
                    justification: "Pay rates must carry dollar-sign formatting uniformly"
                        .to_string(),
                },
                CorrectionReason::RoleRateOutOfRange {
                    role,
                    found,
                    allowed,
                } => {
                    let clipped = clip_role_range(role, *found, *allowed)?;
                    CorrectionDirective {
                        target: FieldTarget::RoleRate { role: role.clone() },
                        current_value: found.to_string(),
                        corrected_value: clipped.to_string(),
                        priority: Priority::Critical,
                        justification: format!(
                            "Role '{}' rates must fall within the approved range {}",
                            role, allowed
                        ),
                    }
                }
                CorrectionReason::DisclosureTextMismatch {
                    jurisdiction,
                    similarity,
                } => CorrectionDirective {
                    target: FieldTarget::DisclosureText,
                    current_value: extracted.disclosure_text.clone(),
                    corrected_value: reference.lookup(jurisdiction).to_string(),
                    priority: Priority::High,
                    justification: format!(
                        "Disclosure text similarity {:.2} is below the {:.2} threshold for \
                         jurisdiction {}",
                        similarity, self.config.similarity_threshold, jurisdiction
                    ),
                },
            });
        }

        // Stable sort keeps check order within each priority tier.
        directives.sort_by_key(|d| d.priority);
        Ok(directives)
    }
}

/// Clip a role's range into the allowed bounds.
fn clip_role_range(
    role: &str,
    found: RateRange,
    allowed: RateRange,
) -> Result<RateRange, PlanningError> {
    let clipped_min = found.min.max(allowed.min);
    let clipped_max = found.max.min(allowed.max);
    if clipped_min > clipped_max {
        return Err(PlanningError {
            role: role.to_string(),
            clipped_min,
            clipped_max,
        });
    }
    Ok(RateRange::new(clipped_min, clipped_max))
}
