//! Human-readable analysis summary

use crate::analysis::Analysis;
use crate::classify::{Category, ClassificationResult};
use crate::health::HealthTier;

const RULE: &str = "─────────────────────────────────────────────────────────────";

/// Render the analysis as a text report
///
/// Tests needing attention are always listed, with their failure samples;
/// `show_all` lists every test.
pub fn to_report_string(analysis: &Analysis, show_all: bool) -> String {
    let summary = &analysis.summary;
    let mut report = String::new();

    report.push_str("=== Test Pattern Analysis ===\n");
    report.push_str(&format!(
        "Tests analyzed: {} ({} outcome records, min_runs={}, reference_runs={})\n",
        summary.total_tests,
        analysis.records_analyzed,
        analysis.config.classifier.min_runs,
        analysis.config.classifier.reference_run_count
    ));
    if let Some(window) = analysis.config.classifier.recent_window {
        report.push_str(&format!("Window: most recent {} runs per test\n", window));
    }
    report.push('\n');

    for (icon, category) in [
        ("✅", Category::Stable),
        ("⚠️ ", Category::Flaky),
        ("❌", Category::ConsistentlyFailing),
        ("ℹ️ ", Category::InsufficientData),
    ] {
        report.push_str(&format!(
            "  {} {:<22} {}\n",
            icon,
            format!("{}:", category.label()),
            summary.count(category)
        ));
    }
    report.push('\n');

    if summary.inconclusive {
        report.push_str("🏥 HEALTH SCORE: inconclusive (no test has enough runs)\n");
    } else {
        report.push_str(&format!(
            "🏥 HEALTH SCORE: {:.1}% ({})\n",
            summary.health_score, summary.tier
        ));
        report.push_str(tier_message(summary.tier));
        report.push('\n');
    }

    let attention: Vec<&ClassificationResult> = analysis.needing_attention().collect();
    if !attention.is_empty() {
        report.push_str(&format!(
            "\n🚨 Tests needing attention ({}):\n",
            attention.len()
        ));
        push_table(&mut report, attention.into_iter(), true);
    }

    if show_all && !analysis.results.is_empty() {
        report.push_str("\n📊 All tests:\n");
        push_table(&mut report, analysis.results.iter(), false);
    }

    report
}

fn tier_message(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::Excellent => "Your test suite is very healthy.",
        HealthTier::Good => "Good, but some tests need attention.",
        HealthTier::NeedsAttention => "Multiple problematic tests detected.",
        HealthTier::Critical => "Test suite needs immediate attention.",
    }
}

fn push_table<'a>(
    report: &mut String,
    rows: impl Iterator<Item = &'a ClassificationResult>,
    details: bool,
) {
    report.push_str(&format!(
        "  {:<22} {:>9} {:>9} {:>10}  test\n",
        "category", "failed", "pass %", "confidence"
    ));
    report.push_str(&format!("  {}\n", RULE));
    for r in rows {
        report.push_str(&format!(
            "  {:<22} {:>9} {:>8.1}% {:>9.0}%  {}\n",
            r.category.label(),
            format!("{}/{}", r.fail_count, r.total_runs),
            r.pass_rate * 100.0,
            r.confidence * 100.0,
            r.test_id
        ));
        if !details {
            continue;
        }
        if r.skip_count > 0 {
            report.push_str(&format!("      skipped in {} runs\n", r.skip_count));
        }
        for sample in &r.error_samples {
            report.push_str(&format!("      ↳ {}\n", sample));
        }
    }
}
