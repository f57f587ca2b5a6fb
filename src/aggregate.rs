//! Grouping of outcome records into per-test histories

use crate::error::{DetectorError, Result};
use crate::record::OutcomeRecord;
use std::collections::{BTreeMap, HashSet};

/// Ordered outcome history of a single test
#[derive(Debug, Clone, PartialEq)]
pub struct TestHistory {
    test_id: String,
    records: Vec<OutcomeRecord>,
}

impl TestHistory {
    /// Create an empty history for `test_id`
    pub fn new(test_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            records: Vec::new(),
        }
    }

    /// Build a history directly from pass/fail outcomes, numbering runs from 1
    pub fn from_outcomes(test_id: impl Into<String>, outcomes: &[bool]) -> Self {
        let mut history = Self::new(test_id);
        for (i, &passed) in outcomes.iter().enumerate() {
            history.records.push(OutcomeRecord {
                test_id: history.test_id.clone(),
                run_id: format!("run-{}", i + 1),
                passed,
                duration: None,
                message: None,
            });
        }
        history
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// Records in run order
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent `n` records (all of them if fewer exist)
    pub fn recent(&self, n: usize) -> &[OutcomeRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    fn push(&mut self, record: OutcomeRecord) {
        debug_assert_eq!(record.test_id, self.test_id);
        self.records.push(record);
    }
}

/// Group records by test id, keeping input order within each test
///
/// Duplicate (test_id, run_id) pairs are retained as separate observations.
///
/// # Errors
/// Returns [`DetectorError::NoData`] if `records` is empty.
///
/// # Example
/// ```
/// use flakesift::{aggregate, OutcomeRecord};
///
/// let histories = aggregate(vec![
///     OutcomeRecord::passed("login", "1"),
///     OutcomeRecord::failed("upload", "1"),
///     OutcomeRecord::failed("login", "2"),
/// ])
/// .unwrap();
///
/// assert_eq!(histories.len(), 2);
/// assert_eq!(histories["login"].len(), 2);
/// ```
pub fn aggregate<I>(records: I) -> Result<BTreeMap<String, TestHistory>>
where
    I: IntoIterator<Item = OutcomeRecord>,
{
    let mut histories: BTreeMap<String, TestHistory> = BTreeMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut total = 0usize;

    for record in records {
        total += 1;

        if !seen.insert((record.test_id.clone(), record.run_id.clone())) {
            tracing::warn!(
                test_id = %record.test_id,
                run_id = %record.run_id,
                "duplicate outcome for the same run, keeping both"
            );
        }

        histories
            .entry(record.test_id.clone())
            .or_insert_with(|| TestHistory::new(record.test_id.clone()))
            .push(record);
    }

    if total == 0 {
        return Err(DetectorError::NoData);
    }

    tracing::info!(
        records = total,
        tests = histories.len(),
        "aggregated outcome records"
    );

    Ok(histories)
}
