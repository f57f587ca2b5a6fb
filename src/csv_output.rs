//! CSV output format for classification results
//!
//! One row per test, in report order, for spreadsheet analysis.

use crate::analysis::Analysis;
use crate::classify::ClassificationResult;

const HEADER: &str = "test_id,category,failed_total,pass_count,fail_count,pass_rate,confidence,avg_duration_s,distinct_failures,skip_count,error_samples";

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<ClassificationResult>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Formatter pre-filled with every result of an analysis
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            rows: analysis.results.clone(),
        }
    }

    /// Add a result to the output
    pub fn add_result(&mut self, result: ClassificationResult) {
        self.rows.push(result);
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains(',')
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a result as CSV row
    fn format_result(result: &ClassificationResult) -> String {
        let avg = result
            .avg_duration
            .map(|d| format!("{:.3}", d))
            .unwrap_or_default();

        [
            Self::escape_field(&result.test_id),
            Self::escape_field(result.category.label()),
            format!("{}/{}", result.fail_count, result.total_runs),
            result.pass_count.to_string(),
            result.fail_count.to_string(),
            format!("{:.4}", result.pass_rate),
            format!("{:.4}", result.confidence),
            avg,
            result.distinct_failure_messages.to_string(),
            result.skip_count.to_string(),
            Self::escape_field(&result.error_samples.join(" | ")),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(HEADER);
        output.push('\n');

        for result in &self.rows {
            output.push_str(&Self::format_result(result));
            output.push('\n');
        }

        output
    }
}
