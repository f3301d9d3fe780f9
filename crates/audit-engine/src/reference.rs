//! Jurisdiction-specific disclosure reference text
//!
//! Pure lookup with a fixed fallback. The fallback policy lives here, not
//! in the validator: an unmapped jurisdiction is `NotApplicable` during
//! validation, but a disclosure replacement directive always has text to
//! use.

use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Fallback disclosure text used when a jurisdiction has no entry.
pub const DEFAULT_DISCLOSURE_TEXT: &str = "Starting rates will be no less than the local \
minimum wage and may vary based on things like location, experience, qualifications, and the \
terms of any applicable collective bargaining agreement. Dependent on length of service, hours \
worked and any applicable collective bargaining agreement, benefits may include medical, \
dental, vision, disability and life insurance, sick pay, PTO/Vacation pay and retirement \
benefits (pension and/or 401(k) eligibility). This is an entry level position with advancement \
opportunity. Applications are accepted on an on-going basis.";

/// Mapping from jurisdiction code to the canonical disclosure text.
#[derive(Debug, Clone)]
pub struct ReferenceTextStore {
    entries: HashMap<String, String>,
    default_text: String,
}

impl ReferenceTextStore {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self {
            entries,
            default_text: DEFAULT_DISCLOSURE_TEXT.to_string(),
        }
    }

    /// Override the fallback text. The fallback must be non-empty.
    pub fn with_default_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "fallback disclosure text must be non-empty");
        self.default_text = text;
        self
    }

    /// Load the mapping from a JSON object file: `{"IL": "...", "WA": "..."}`.
    /// Jurisdiction codes are normalized to uppercase.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference text file: {}", path.display()))?;
        let raw: HashMap<String, String> =
            serde_json::from_str(&content).context("Failed to parse reference text JSON")?;
        let entries = raw
            .into_iter()
            .map(|(code, text)| (code.trim().to_uppercase(), text))
            .collect();
        Ok(Self::new(entries))
    }

    pub fn insert(&mut self, jurisdiction: impl Into<String>, text: impl Into<String>) {
        self.entries
            .insert(jurisdiction.into().trim().to_uppercase(), text.into());
    }

    /// Exact lookup; `None` when the jurisdiction is unmapped.
    pub fn get(&self, jurisdiction: &str) -> Option<&str> {
        self.entries
            .get(&jurisdiction.trim().to_uppercase())
            .map(String::as_str)
    }

    /// Lookup with the fixed fallback for unmapped jurisdictions.
    pub fn lookup(&self, jurisdiction: &str) -> &str {
        self.get(jurisdiction).unwrap_or(&self.default_text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReferenceTextStore {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}
