//! Pipeline configuration
//!
//! Thresholds and tolerances are passed explicitly into the validator,
//! planner, and orchestrator at construction — never read from ambient
//! global state.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one audit run, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Absolute dollar tolerance for rate equality (default: $0.01).
    #[serde(default = "default_rate_tolerance")]
    pub rate_tolerance: f64,
    /// Minimum similarity score for disclosure text to count as a match
    /// (default: 0.95).
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Whether correction plans are applied automatically (default: true).
    #[serde(default = "default_auto_correct")]
    pub auto_correct: bool,
    /// Bounded worker count for batch processing (default: 4).
    #[serde(default = "default_parallel_requisitions")]
    pub parallel_requisitions: usize,
}

fn default_rate_tolerance() -> f64 {
    0.01
}

fn default_similarity_threshold() -> f64 {
    0.95
}

fn default_auto_correct() -> bool {
    true
}

fn default_parallel_requisitions() -> usize {
    4
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            rate_tolerance: default_rate_tolerance(),
            similarity_threshold: default_similarity_threshold(),
            auto_correct: default_auto_correct(),
            parallel_requisitions: default_parallel_requisitions(),
        }
    }
}

impl AuditConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.rate_tolerance, 0.01);
        assert_eq!(config.similarity_threshold, 0.95);
        assert!(config.auto_correct);
        assert_eq!(config.parallel_requisitions, 4);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AuditConfig::from_toml("similarity_threshold = 0.9").unwrap();
        assert_eq!(config.similarity_threshold, 0.9);
        assert_eq!(config.rate_tolerance, 0.01);
        assert!(config.auto_correct);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            rate_tolerance = 0.05
            similarity_threshold = 0.8
            auto_correct = false
            parallel_requisitions = 8
        "#;
        let config = AuditConfig::from_toml(toml).unwrap();
        assert_eq!(config.rate_tolerance, 0.05);
        assert_eq!(config.similarity_threshold, 0.8);
        assert!(!config.auto_correct);
        assert_eq!(config.parallel_requisitions, 8);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(AuditConfig::from_toml("rate_tolerance = \"not a number\"").is_err());
    }
}
