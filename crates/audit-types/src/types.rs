use std::collections::BTreeMap;
use std::fmt;

/// Authoritative values for one requisition, sourced from the tracker.
///
/// Immutable for the lifetime of an audit run. `min_pay_rate` and
/// `max_pay_rate` are expected to satisfy `min <= max`; the validator
/// surfaces a `RangeError` if they do not.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GroundTruth {
    pub requisition_id: String,
    /// Jurisdiction code (e.g., two-letter state code) selecting the
    /// applicable disclosure text.
    pub jurisdiction: String,
    pub min_pay_rate: f64,
    pub max_pay_rate: f64,
    pub facility: String,
    pub business_unit: String,
}

/// An hourly rate range as it appears for a single role.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for RateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}-${:.2}", self.min, self.max)
    }
}

/// Fields extracted from a requisition document by the extraction oracle.
///
/// Absent numeric fields are `None`, never coerced to zero. Read-only input
/// to the validator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExtractedFields {
    pub requisition_id: String,
    pub jurisdiction: String,
    pub min_pay_rate: Option<f64>,
    pub max_pay_rate: Option<f64>,
    /// Role name -> published rate range. Role names are unique; the map
    /// keeps iteration deterministic for reproducible correction plans.
    #[serde(default)]
    pub role_rates: BTreeMap<String, RateRange>,
    /// Whether the standard job-description template structure was found.
    pub template_present: bool,
    /// The disclosure (pay transparency) text found in the document.
    pub disclosure_text: String,
    /// Whether pay rates carry `$XX.XX` formatting.
    pub dollar_formatted: bool,
}

/// Verdict for a single named validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckVerdict {
    Pass,
    Fail,
    /// The expected data point could not be located in the document.
    /// Distinct from a mismatch.
    NeedsReview,
    NotApplicable,
}

impl fmt::Display for CheckVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckVerdict::Pass => "PASS",
            CheckVerdict::Fail => "FAIL",
            CheckVerdict::NeedsReview => "NEEDS_REVIEW",
            CheckVerdict::NotApplicable => "NOT_APPLICABLE",
        };
        f.write_str(s)
    }
}

/// A structured reason a correction is needed, emitted by the validator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CorrectionReason {
    TemplateStructureMissing,
    MinRateMismatch {
        found: f64,
        expected: f64,
    },
    MaxRateMismatch {
        found: f64,
        expected: f64,
    },
    DollarFormattingMissing,
    RoleRateOutOfRange {
        role: String,
        found: RateRange,
        allowed: RateRange,
    },
    DisclosureTextMismatch {
        jurisdiction: String,
        similarity: f64,
    },
}

impl fmt::Display for CorrectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionReason::TemplateStructureMissing => {
                f.write_str("Job description section missing or incomplete")
            }
            CorrectionReason::MinRateMismatch { found, expected } => write!(
                f,
                "Min pay rate mismatch: document shows ${:.2}, should be ${:.2}",
                found, expected
            ),
            CorrectionReason::MaxRateMismatch { found, expected } => write!(
                f,
                "Max pay rate mismatch: document shows ${:.2}, should be ${:.2}",
                found, expected
            ),
            CorrectionReason::DollarFormattingMissing => {
                f.write_str("Pay rates missing dollar sign ($) formatting")
            }
            CorrectionReason::RoleRateOutOfRange {
                role,
                found,
                allowed,
            } => write!(
                f,
                "Role '{}' pay range {} falls outside allowed range {}",
                role, found, allowed
            ),
            CorrectionReason::DisclosureTextMismatch {
                jurisdiction,
                similarity,
            } => write!(
                f,
                "Disclosure text for jurisdiction {} does not match the reference template \
                 (similarity {:.2})",
                jurisdiction, similarity
            ),
        }
    }
}

/// One verdict per named check plus the correction bookkeeping.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    pub template_structure: CheckVerdict,
    pub min_rate: CheckVerdict,
    pub max_rate: CheckVerdict,
    pub description_complete: CheckVerdict,
    pub dollar_formatting: CheckVerdict,
    /// Non-empty iff a named check failed, a role rate fell outside the
    /// ground-truth range, or disclosure similarity was below threshold.
    pub corrections_needed: Vec<CorrectionReason>,
    /// Filled in after planning/application, one entry per applied directive.
    #[serde(default)]
    pub corrections_completed: Vec<String>,
}

impl ValidationResult {
    /// Whether any named check came back `Fail`.
    pub fn has_failures(&self) -> bool {
        [
            self.template_structure,
            self.min_rate,
            self.max_rate,
            self.description_complete,
            self.dollar_formatting,
        ]
        .iter()
        .any(|v| *v == CheckVerdict::Fail)
    }

    pub fn needs_correction(&self) -> bool {
        !self.corrections_needed.is_empty()
    }
}

/// Priority of a correction directive. Ordering places `Critical` first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        f.write_str(s)
    }
}

/// The document field a directive targets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldTarget {
    MinPayRate,
    MaxPayRate,
    /// Uniform formatting fix across every rate field in the document.
    AllRateFields,
    RoleRate { role: String },
    DisclosureText,
    JobDescriptionSection,
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTarget::MinPayRate => f.write_str("minimum_pay_rate"),
            FieldTarget::MaxPayRate => f.write_str("maximum_pay_rate"),
            FieldTarget::AllRateFields => f.write_str("all_rate_fields"),
            FieldTarget::RoleRate { role } => write!(f, "role_rate[{}]", role),
            FieldTarget::DisclosureText => f.write_str("disclosure_text"),
            FieldTarget::JobDescriptionSection => f.write_str("job_description_section"),
        }
    }
}

/// One planned field-level edit.
///
/// Directives are a projection over immutable inputs; only the external
/// document writer may apply them to document content.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorrectionDirective {
    pub target: FieldTarget,
    pub current_value: String,
    pub corrected_value: String,
    pub priority: Priority,
    pub justification: String,
}

impl CorrectionDirective {
    /// Single-line summary used for `corrections_completed` entries and
    /// report output.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {}: '{}' -> '{}'",
            self.priority, self.target, self.current_value, self.corrected_value
        )
    }
}
