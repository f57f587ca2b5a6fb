//! JSON output format for classification results

use crate::analysis::Analysis;
use crate::classify::ClassificationResult;
use crate::config::DetectorConfig;
use crate::health::HealthSummary;
use serde::{Deserialize, Serialize};

/// Machine-readable analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Tool version that produced the report
    pub version: String,
    /// Effective configuration after file and CLI overrides
    pub configuration: DetectorConfig,
    pub records_analyzed: usize,
    pub summary: HealthSummary,
    pub tests: Vec<ClassificationResult>,
}

impl JsonReport {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            configuration: analysis.config.clone(),
            records_analyzed: analysis.records_analyzed,
            summary: analysis.summary.clone(),
            tests: analysis.results.clone(),
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
