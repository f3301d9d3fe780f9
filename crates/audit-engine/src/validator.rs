//! The fixed battery of validation checks
//!
//! Five named checks plus two contributors to `corrections_needed`
//! (role-rate containment, disclosure-text similarity). Everything here is
//! pure and deterministic except the disclosure check, which delegates to
//! the similarity oracle — tests pin that oracle with a fixed-score fake.

use audit_types::{CheckVerdict, CorrectionReason, ExtractedFields, GroundTruth, RateRange,
    ValidationResult};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::compare::{in_range, rates_equal};
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::ports::SimilarityScorer;
use crate::reference::ReferenceTextStore;

pub struct Validator {
    config: AuditConfig,
    scorer: Arc<dyn SimilarityScorer>,
}

impl Validator {
    pub fn new(config: AuditConfig, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { config, scorer }
    }

    /// Run every check against the extracted fields.
    ///
    /// Total over well-formed input: the only error paths are a ground
    /// truth whose own bounds are inverted ([`crate::error::RangeError`])
    /// and a misbehaving similarity oracle.
    #[instrument(skip_all, fields(requisition = %ground_truth.requisition_id))]
    pub async fn validate(
        &self,
        extracted: &ExtractedFields,
        ground_truth: &GroundTruth,
        reference: &ReferenceTextStore,
    ) -> Result<ValidationResult, AuditError> {
        let mut corrections_needed = Vec::new();

        // 1. Template structure
        let template_structure = if extracted.template_present {
            CheckVerdict::Pass
        } else {
            corrections_needed.push(CorrectionReason::TemplateStructureMissing);
            CheckVerdict::Fail
        };

        // 2. Minimum pay rate
        let min_rate = match extracted.min_pay_rate {
            None => CheckVerdict::NeedsReview,
            Some(found) => {
                if rates_equal(
                    Some(found),
                    Some(ground_truth.min_pay_rate),
                    self.config.rate_tolerance,
                ) {
                    CheckVerdict::Pass
                } else {
                    corrections_needed.push(CorrectionReason::MinRateMismatch {
                        found,
                        expected: ground_truth.min_pay_rate,
                    });
                    CheckVerdict::Fail
                }
            }
        };

        // 3. Maximum pay rate
        let max_rate = match extracted.max_pay_rate {
            None => CheckVerdict::NeedsReview,
            Some(found) => {
                if rates_equal(
                    Some(found),
                    Some(ground_truth.max_pay_rate),
                    self.config.rate_tolerance,
                ) {
                    CheckVerdict::Pass
                } else {
                    corrections_needed.push(CorrectionReason::MaxRateMismatch {
                        found,
                        expected: ground_truth.max_pay_rate,
                    });
                    CheckVerdict::Fail
                }
            }
        };

        // 4. Dollar-sign formatting
        let dollar_formatting = if extracted.dollar_formatted {
            CheckVerdict::Pass
        } else {
            corrections_needed.push(CorrectionReason::DollarFormattingMissing);
            CheckVerdict::Fail
        };

        // 5. Description completeness mirrors the template boolean; the two
        // are reported independently downstream but share one correction
        // reason so exactly one section insertion gets planned.
        let description_complete = if extracted.template_present {
            CheckVerdict::Pass
        } else {
            CheckVerdict::Fail
        };

        // Role-specific rates must fall inside the ground-truth range.
        let allowed = RateRange::new(ground_truth.min_pay_rate, ground_truth.max_pay_rate);
        for (role, range) in &extracted.role_rates {
            let min_ok = in_range(range.min, allowed.min, allowed.max)?;
            let max_ok = in_range(range.max, allowed.min, allowed.max)?;
            if !min_ok || !max_ok {
                corrections_needed.push(CorrectionReason::RoleRateOutOfRange {
                    role: role.clone(),
                    found: *range,
                    allowed,
                });
            }
        }

        // Disclosure text. Unmapped jurisdictions are skipped silently —
        // the fallback policy belongs to the reference store, not here.
        match reference.get(&extracted.jurisdiction) {
            Some(reference_text) => {
                let similarity = self
                    .scorer
                    .score(&extracted.disclosure_text, reference_text)
                    .await?;
                if !(0.0..=1.0).contains(&similarity) {
                    return Err(AuditError::Similarity(format!(
                        "score {} outside [0, 1]",
                        similarity
                    )));
                }
                if similarity < self.config.similarity_threshold {
                    corrections_needed.push(CorrectionReason::DisclosureTextMismatch {
                        jurisdiction: extracted.jurisdiction.clone(),
                        similarity,
                    });
                }
            }
            None => {
                debug!(
                    jurisdiction = %extracted.jurisdiction,
                    "no reference disclosure text; skipping similarity check"
                );
            }
        }

        Ok(ValidationResult {
            template_structure,
            min_rate,
            max_rate,
            description_complete,
            dollar_formatting,
            corrections_needed,
            corrections_completed: Vec::new(),
        })
    }
}
