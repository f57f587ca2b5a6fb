// Configuration for per-test classification
//
// Thresholds are explicit configuration so the classifier can be exercised
// against arbitrary values.

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the per-test classifier
///
/// # Example
/// ```
/// use flakesift::classify::ClassifierConfig;
///
/// let config = ClassifierConfig::default();
/// assert_eq!(config.min_runs, 5);
/// assert_eq!(config.reference_run_count, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Minimum number of observed runs before a test is labeled
    ///
    /// Tests with fewer runs are reported as insufficient data with zero
    /// confidence, whatever their pass rate.
    ///
    /// Default: 5
    pub min_runs: usize,

    /// Number of runs at which confidence saturates at 1.0
    ///
    /// confidence = min(total_runs / reference_run_count, 1.0)
    ///
    /// Default: 20
    pub reference_run_count: usize,

    /// Only classify the most recent N outcomes of each test
    ///
    /// Must be >= `min_runs` when set, otherwise no test could ever be
    /// labeled.
    ///
    /// Default: None (whole history)
    pub recent_window: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_runs: 5,
            reference_run_count: 20,
            recent_window: None,
        }
    }
}

impl ClassifierConfig {
    /// Demand more evidence before labeling a test
    pub fn strict() -> Self {
        Self {
            min_runs: 10,
            reference_run_count: 30,
            recent_window: None,
        }
    }

    /// Label tests from only a handful of runs
    pub fn permissive() -> Self {
        Self {
            min_runs: 3,
            reference_run_count: 10,
            recent_window: None,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_runs < 1 {
            return Err(DetectorError::invalid(
                "min_runs",
                format!("must be >= 1, got {}", self.min_runs),
            ));
        }

        if self.reference_run_count < 1 {
            return Err(DetectorError::invalid(
                "reference_run_count",
                format!("must be >= 1, got {}", self.reference_run_count),
            ));
        }

        if let Some(window) = self.recent_window {
            if window < self.min_runs {
                return Err(DetectorError::invalid(
                    "recent_window",
                    format!(
                        "must be >= min_runs ({}), got {}",
                        self.min_runs, window
                    ),
                ));
            }
        }

        Ok(())
    }
}
