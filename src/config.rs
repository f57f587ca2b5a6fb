//! Detector configuration
//!
//! Loaded from an optional TOML file, then overridden by CLI flags:
//!
//! ```toml
//! [classifier]
//! min_runs = 5
//! reference_run_count = 20
//! recent_window = 30
//!
//! [weights]
//! stable = 1.0
//! flaky = 0.5
//! failing = 0.0
//! ```

use crate::classify::ClassifierConfig;
use crate::error::Result;
use crate::health::HealthWeights;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full configuration surface of the detector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    pub classifier: ClassifierConfig,
    pub weights: HealthWeights,
}

impl DetectorConfig {
    /// Stricter evidence requirements, default weights
    pub fn strict() -> Self {
        Self {
            classifier: ClassifierConfig::strict(),
            weights: HealthWeights::default(),
        }
    }

    /// Looser evidence requirements, default weights
    pub fn permissive() -> Self {
        Self {
            classifier: ClassifierConfig::permissive(),
            weights: HealthWeights::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file {}", path_ref.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path_ref.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: DetectorConfig = toml::from_str(content).context("Failed to parse TOML")?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectorError;
    use std::io::Write;

    #[test]
    fn test_empty_toml_is_default() {
        let config = DetectorConfig::from_toml("").unwrap();
        assert_eq!(config, DetectorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DetectorConfig::from_toml(
            r#"
[classifier]
min_runs = 8

[weights]
flaky = 0.25
"#,
        )
        .unwrap();

        assert_eq!(config.classifier.min_runs, 8);
        assert_eq!(config.classifier.reference_run_count, 20);
        assert_eq!(config.weights.flaky, 0.25);
        assert_eq!(config.weights.stable, 1.0);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(DetectorConfig::from_toml("[thresholds]\nmin = 1\n").is_err());
    }

    #[test]
    fn test_misspelled_nested_keys_rejected() {
        let err = DetectorConfig::from_toml("[classifier]\nmin_run = 50\n").unwrap_err();
        assert!(format!("{:#}", err).contains("min_run"));

        assert!(DetectorConfig::from_toml("[weights]\nflakey = 0.2\n").is_err());
    }

    #[test]
    fn test_negative_min_runs_fails_to_parse() {
        assert!(DetectorConfig::from_toml("[classifier]\nmin_runs = -1\n").is_err());
    }

    #[test]
    fn test_zero_reference_runs_fails_validation() {
        let config =
            DetectorConfig::from_toml("[classifier]\nreference_run_count = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(DetectorError::InvalidConfig {
                field: "reference_run_count",
                ..
            })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[classifier]\nrecent_window = 10").unwrap();

        let config = DetectorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.classifier.recent_window, Some(10));
    }

    #[test]
    fn test_from_missing_file() {
        let err = DetectorConfig::from_file("/nonexistent/flakesift.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_presets() {
        assert!(DetectorConfig::strict().validate().is_ok());
        assert!(DetectorConfig::permissive().validate().is_ok());
    }
}
