// Per-test category assignment
//
// Ordered rule, first match wins:
// - fewer than min_runs observations -> InsufficientData (confidence 0.0)
// - every run passed                 -> Stable
// - every run failed                 -> ConsistentlyFailing
// - anything else                    -> Flaky

use crate::aggregate::TestHistory;
use crate::classify::config::ClassifierConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Failure messages kept per test as examples
pub const MAX_ERROR_SAMPLES: usize = 3;

/// Behavioral category of a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Passed in every observed run
    Stable,
    /// Outcomes were not unanimous
    Flaky,
    /// Failed in every observed run
    ConsistentlyFailing,
    /// Too few runs to say anything
    InsufficientData,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Stable,
        Category::Flaky,
        Category::ConsistentlyFailing,
        Category::InsufficientData,
    ];

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Flaky => "Flaky",
            Self::ConsistentlyFailing => "Consistently Failing",
            Self::InsufficientData => "Insufficient Data",
        }
    }

    /// Report ordering: most urgent first
    pub const fn priority(self) -> u8 {
        match self {
            Self::ConsistentlyFailing => 0,
            Self::Flaky => 1,
            Self::Stable => 2,
            Self::InsufficientData => 3,
        }
    }

    /// Whether a test in this category needs someone to look at it
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::ConsistentlyFailing | Self::Flaky)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of one test's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub test_id: String,
    pub category: Category,
    pub total_runs: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    /// pass_count / total_runs, 0.0 for an empty history
    pub pass_rate: f64,
    /// Sample-size trust in the label, in [0, 1]
    pub confidence: f64,
    /// Mean of the positive durations reported, in seconds
    pub avg_duration: Option<f64>,
    /// Number of distinct failure messages seen
    pub distinct_failure_messages: usize,
    /// First unique failure messages, in the order they were seen
    #[serde(default)]
    pub error_samples: Vec<String>,
    /// Runs in which the test was skipped; not part of `total_runs`
    #[serde(default)]
    pub skip_count: usize,
}

impl ClassificationResult {
    pub fn failure_rate(&self) -> f64 {
        if self.total_runs == 0 {
            0.0
        } else {
            self.fail_count as f64 / self.total_runs as f64
        }
    }
}

/// Confidence earned by `total_runs` observations
///
/// Monotonically non-decreasing in `total_runs`, exactly 1.0 once
/// `total_runs >= reference_run_count`.
pub fn confidence(total_runs: usize, reference_run_count: usize) -> f64 {
    let reference = reference_run_count.max(1);
    if total_runs >= reference {
        1.0
    } else {
        total_runs as f64 / reference as f64
    }
}

/// Classify a single test history
///
/// Pure function of its inputs. `config` is expected to have been validated;
/// see [`classify_all`].
///
/// # Example
/// ```
/// use flakesift::classify::{classify, Category, ClassifierConfig};
/// use flakesift::TestHistory;
///
/// let mut outcomes = vec![true; 12];
/// outcomes.extend(vec![false; 8]);
/// let history = TestHistory::from_outcomes("checkout", &outcomes);
///
/// let result = classify(&history, &ClassifierConfig::default());
/// assert_eq!(result.category, Category::Flaky);
/// assert_eq!(result.pass_rate, 0.6);
/// ```
pub fn classify(history: &TestHistory, config: &ClassifierConfig) -> ClassificationResult {
    let records = match config.recent_window {
        Some(window) => history.recent(window),
        None => history.records(),
    };

    let total_runs = records.len();
    let pass_count = records.iter().filter(|r| r.passed).count();
    let fail_count = total_runs - pass_count;

    let pass_rate = if total_runs == 0 {
        0.0
    } else {
        pass_count as f64 / total_runs as f64
    };

    let durations: Vec<f64> = records
        .iter()
        .filter_map(|r| r.duration)
        .filter(|d| *d > 0.0)
        .collect();
    let avg_duration = if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    let mut seen = HashSet::new();
    let mut error_samples = Vec::new();
    for message in records
        .iter()
        .filter(|r| !r.passed)
        .filter_map(|r| r.message.as_deref())
    {
        if seen.insert(message) && error_samples.len() < MAX_ERROR_SAMPLES {
            error_samples.push(message.to_string());
        }
    }
    let distinct_failure_messages = seen.len();

    // Decide on counts, not on the float pass_rate.
    let (category, confidence) = if total_runs == 0 || total_runs < config.min_runs {
        (Category::InsufficientData, 0.0)
    } else if fail_count == 0 {
        (Category::Stable, confidence(total_runs, config.reference_run_count))
    } else if pass_count == 0 {
        (
            Category::ConsistentlyFailing,
            confidence(total_runs, config.reference_run_count),
        )
    } else {
        (Category::Flaky, confidence(total_runs, config.reference_run_count))
    };

    tracing::debug!(
        test_id = history.test_id(),
        %category,
        total_runs,
        pass_count,
        confidence,
        "classified test"
    );

    ClassificationResult {
        test_id: history.test_id().to_string(),
        category,
        total_runs,
        pass_count,
        fail_count,
        pass_rate,
        confidence,
        avg_duration,
        distinct_failure_messages,
        error_samples,
        skip_count: 0,
    }
}

/// Classify every history independently
///
/// Results come back in test id order.
///
/// # Errors
/// Returns [`crate::DetectorError::InvalidConfig`] if `config` fails validation.
pub fn classify_all(
    histories: &BTreeMap<String, TestHistory>,
    config: &ClassifierConfig,
) -> Result<Vec<ClassificationResult>> {
    config.validate()?;

    let results: Vec<ClassificationResult> = histories
        .values()
        .map(|history| classify(history, config))
        .collect();

    tracing::info!(tests = results.len(), "classification complete");

    Ok(results)
}
