//! flakesift - Flaky test detection from repeated run reports
//!
//! Groups per-run test outcomes into per-test histories, labels each test as
//! stable, flaky, consistently failing or insufficient-data, and reduces the
//! labels to a suite-wide health score.
//!
//! ```
//! use flakesift::{aggregate, classify_all, score, ClassifierConfig, HealthWeights, OutcomeRecord};
//!
//! let records: Vec<OutcomeRecord> = (0..10)
//!     .map(|run| OutcomeRecord::passed("api.test_login", run.to_string()))
//!     .collect();
//!
//! let histories = aggregate(records).unwrap();
//! let results = classify_all(&histories, &ClassifierConfig::default()).unwrap();
//! let summary = score(&results, &HealthWeights::default());
//!
//! assert_eq!(summary.health_score, 100.0);
//! ```

pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod filter;
pub mod health;
pub mod ingest;
pub mod json_output;
pub mod record;
pub mod sample_data;
pub mod text_output;

pub use aggregate::{aggregate, TestHistory};
pub use classify::{classify, classify_all, Category, ClassificationResult, ClassifierConfig};
pub use config::DetectorConfig;
pub use error::DetectorError;
pub use health::{score, HealthSummary, HealthTier, HealthWeights};
pub use record::OutcomeRecord;
