//! Run report ingestion
//!
//! One JSON file per run:
//!
//! ```json
//! {
//!   "run_id": "nightly-2024-05-01",
//!   "tests": [
//!     {"test_id": "api.test_login", "status": "passed", "duration": 0.42},
//!     {"test_id": "api.test_upload", "status": "failed", "message": "HTTP 500"},
//!     {"test_id": "api.test_legacy", "status": "skipped"}
//!   ]
//! }
//! ```
//!
//! `run_id` falls back to the file stem. Skipped tests have no pass/fail
//! outcome, so they produce no record and are only counted per test id.

use crate::record::OutcomeRecord;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Status of a test case in a run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// One test case entry in a run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub test_id: String,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single run's report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub tests: Vec<TestCase>,
}

/// Outcome records extracted from a report plus what was left out
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub records: Vec<OutcomeRecord>,
    /// Skipped observations per test id
    pub skipped: BTreeMap<String, usize>,
}

impl Ingested {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    fn merge(&mut self, other: Ingested) {
        self.records.extend(other.records);
        for (test_id, count) in other.skipped {
            *self.skipped.entry(test_id).or_default() += count;
        }
    }
}

impl RunReport {
    /// Parse a report from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let report: RunReport = serde_json::from_str(content).context("Invalid run report JSON")?;

        if let Some(case) = report.tests.iter().find(|c| c.test_id.trim().is_empty()) {
            bail!(
                "Run report contains a test case with an empty test_id (status {:?})",
                case.status
            );
        }

        Ok(report)
    }

    /// Load a report from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            bail!("Run report not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read run report {}", path_ref.display()))?;

        Self::from_json(&contents).with_context(|| format!("In {}", path_ref.display()))
    }

    /// Convert into outcome records, using `fallback_run_id` when the report has none
    pub fn into_records(self, fallback_run_id: &str) -> Ingested {
        let run_id = self
            .run_id
            .unwrap_or_else(|| fallback_run_id.to_string());
        let mut ingested = Ingested::default();

        for case in self.tests {
            let passed = match case.status {
                TestStatus::Passed => true,
                TestStatus::Failed => false,
                TestStatus::Skipped => {
                    tracing::debug!(test_id = %case.test_id, %run_id, "skipped test has no outcome");
                    *ingested.skipped.entry(case.test_id).or_default() += 1;
                    continue;
                }
            };

            ingested.records.push(OutcomeRecord {
                test_id: case.test_id,
                run_id: run_id.clone(),
                passed,
                duration: case.duration,
                message: case.message.filter(|m| !m.is_empty()),
            });
        }

        ingested
    }
}

/// Load run reports in the given order and flatten them into outcome records
///
/// Input order defines run order.
pub fn load_runs<P: AsRef<Path>>(paths: &[P]) -> Result<Ingested> {
    let mut all = Ingested::default();

    for path in paths {
        let path = path.as_ref();
        let report = RunReport::from_file(path)?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let ingested = report.into_records(&fallback);
        tracing::info!(
            path = %path.display(),
            records = ingested.records.len(),
            skipped = ingested.skipped_total(),
            "loaded run report"
        );

        all.merge(ingested);
    }

    Ok(all)
}
