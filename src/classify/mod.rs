// Per-test flakiness classification
//
// Every test history is labeled independently of every other one:
// - Stable: passed in every observed run
// - ConsistentlyFailing: failed in every observed run
// - Flaky: any mix of passes and failures, however lopsided
// - InsufficientData: fewer than `min_runs` observations
//
// A confidence score in [0, 1] rides along with the label. It grows with the
// number of observed runs and saturates at `reference_run_count`; it never
// changes the label.

mod config;
mod verdict;

pub use config::ClassifierConfig;
pub use verdict::{
    classify, classify_all, confidence, Category, ClassificationResult, MAX_ERROR_SAMPLES,
};
