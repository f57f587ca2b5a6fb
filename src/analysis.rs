//! End-to-end analysis: filter → aggregate → classify → score

use crate::aggregate::aggregate;
use crate::classify::{classify_all, ClassificationResult};
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::filter::TestFilter;
use crate::health::{score, HealthSummary};
use crate::record::OutcomeRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Everything the renderers need
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Results in report order (see [`report_order`])
    pub results: Vec<ClassificationResult>,
    pub summary: HealthSummary,
    pub config: DetectorConfig,
    /// Outcome records that reached the aggregator
    pub records_analyzed: usize,
}

impl Analysis {
    /// Results for tests that are flaky or consistently failing
    pub fn needing_attention(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter().filter(|r| r.category.needs_attention())
    }
}

/// Report ordering: category priority, then lowest pass rate, then test id
pub fn report_order(a: &ClassificationResult, b: &ClassificationResult) -> Ordering {
    a.category
        .priority()
        .cmp(&b.category.priority())
        .then_with(|| a.pass_rate.total_cmp(&b.pass_rate))
        .then_with(|| a.test_id.cmp(&b.test_id))
}

/// Run the whole pipeline over one batch of records
///
/// The configuration is validated before anything else, and no
/// classification is attempted if aggregation fails.
///
/// # Errors
/// [`crate::DetectorError::InvalidConfig`] for a bad configuration,
/// [`crate::DetectorError::NoData`] if no record survives the filter.
pub fn analyze(
    records: Vec<OutcomeRecord>,
    filter: &TestFilter,
    config: &DetectorConfig,
) -> Result<Analysis> {
    analyze_with_skips(records, &BTreeMap::new(), filter, config)
}

/// Like [`analyze`], also attaching per-test skip counts to the results
///
/// Skips only annotate tests that have at least one outcome record; a test
/// that was skipped in every run has nothing to classify.
pub fn analyze_with_skips(
    records: Vec<OutcomeRecord>,
    skipped: &BTreeMap<String, usize>,
    filter: &TestFilter,
    config: &DetectorConfig,
) -> Result<Analysis> {
    config.validate()?;

    let before = records.len();
    let kept: Vec<OutcomeRecord> = records
        .into_iter()
        .filter(|r| filter.should_analyze(&r.test_id))
        .collect();
    if kept.len() != before {
        tracing::info!(kept = kept.len(), dropped = before - kept.len(), "applied test filter");
    }
    let records_analyzed = kept.len();

    let histories = aggregate(kept)?;
    let mut results = classify_all(&histories, &config.classifier)?;
    for result in &mut results {
        result.skip_count = skipped.get(&result.test_id).copied().unwrap_or(0);
    }
    let summary = score(&results, &config.weights);

    results.sort_by(report_order);

    Ok(Analysis {
        results,
        summary,
        config: config.clone(),
        records_analyzed,
    })
}
