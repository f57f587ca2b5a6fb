//! Suite-wide health scoring
//!
//! Reduces per-test classifications to a single 0-100 score:
//!
//! ```text
//! score = 100 * (w_stable*stable + w_flaky*flaky + w_failing*failing) / scored
//! ```
//!
//! where `scored` excludes tests with insufficient data. With the default
//! weights (1.0, 0.5, 0.0) a flaky test earns half the credit of a stable
//! one and a failing test earns nothing.

use crate::classify::{Category, ClassificationResult};
use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Credit each category contributes to the health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthWeights {
    pub stable: f64,
    pub flaky: f64,
    pub failing: f64,
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            stable: 1.0,
            flaky: 0.5,
            failing: 0.0,
        }
    }
}

impl HealthWeights {
    /// Weight for a scored category (InsufficientData is never scored)
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Stable => self.stable,
            Category::Flaky => self.flaky,
            Category::ConsistentlyFailing => self.failing,
            Category::InsufficientData => 0.0,
        }
    }

    /// Weights must be finite and ordered `0 <= failing <= flaky <= stable <= 1`
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("weights.stable", self.stable),
            ("weights.flaky", self.flaky),
            ("weights.failing", self.failing),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DetectorError::invalid(
                    field,
                    format!("must be a finite number in [0, 1], got {}", value),
                ));
            }
        }

        if self.flaky > self.stable {
            return Err(DetectorError::invalid(
                "weights.flaky",
                format!(
                    "must not exceed weights.stable ({}), got {}",
                    self.stable, self.flaky
                ),
            ));
        }

        if self.failing > self.flaky {
            return Err(DetectorError::invalid(
                "weights.failing",
                format!(
                    "must not exceed weights.flaky ({}), got {}",
                    self.flaky, self.failing
                ),
            ));
        }

        Ok(())
    }
}

/// Qualitative bucket for a health score
///
/// Ranges: Excellent [90, 100], Good [75, 90), NeedsAttention [50, 75),
/// Critical [0, 50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 75.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::NeedsAttention
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs Attention",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Suite-wide health summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total_tests: usize,
    pub stable: usize,
    pub flaky: usize,
    pub consistently_failing: usize,
    pub insufficient_data: usize,
    /// Tests that entered the score (total minus insufficient data)
    pub scored_tests: usize,
    pub health_score: f64,
    /// No test had enough runs to be scored
    pub inconclusive: bool,
    pub tier: HealthTier,
}

impl HealthSummary {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Stable => self.stable,
            Category::Flaky => self.flaky,
            Category::ConsistentlyFailing => self.consistently_failing,
            Category::InsufficientData => self.insufficient_data,
        }
    }
}

/// Score a set of classification results
///
/// # Example
/// ```
/// use flakesift::health::{score, HealthWeights};
///
/// let summary = score(&[], &HealthWeights::default());
/// assert!(summary.inconclusive);
/// assert_eq!(summary.health_score, 0.0);
/// ```
pub fn score(results: &[ClassificationResult], weights: &HealthWeights) -> HealthSummary {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for result in results {
        *counts.entry(result.category).or_default() += 1;
    }
    let count = |c: Category| counts.get(&c).copied().unwrap_or(0);

    let insufficient_data = count(Category::InsufficientData);
    let scored_tests = results.len() - insufficient_data;

    let (health_score, inconclusive) = if scored_tests == 0 {
        (0.0, true)
    } else {
        let credit: f64 = [
            Category::Stable,
            Category::Flaky,
            Category::ConsistentlyFailing,
        ]
        .iter()
        .map(|&c| weights.weight(c) * count(c) as f64)
        .sum();
        let raw = 100.0 * credit / scored_tests as f64;
        (raw.clamp(0.0, 100.0), false)
    };

    if inconclusive {
        tracing::warn!(
            total_tests = results.len(),
            "no test has enough runs to score suite health"
        );
    } else {
        tracing::info!(health_score, scored_tests, "scored suite health");
    }

    HealthSummary {
        total_tests: results.len(),
        stable: count(Category::Stable),
        flaky: count(Category::Flaky),
        consistently_failing: count(Category::ConsistentlyFailing),
        insufficient_data,
        scored_tests,
        health_score,
        inconclusive,
        tier: HealthTier::from_score(health_score),
    }
}
