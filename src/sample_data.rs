//! Synthetic run reports for demos and smoke tests
//!
//! Writes one JSON run report per run, drawing each outcome from a fixed
//! per-test pass probability with a seeded RNG so output is reproducible.

use crate::ingest::{RunReport, TestCase, TestStatus};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

/// (test name, pass probability, base duration in seconds)
const SCENARIOS: &[(&str, f64, f64)] = &[
    ("auth.test_user_login", 1.0, 0.5),
    ("web.test_home_page_load", 1.0, 0.3),
    ("web.test_static_content", 1.0, 0.2),
    ("ops.test_health_check", 1.0, 0.1),
    ("api.test_api_integration", 0.6, 1.2),
    ("db.test_database_connection", 0.7, 0.8),
    ("cache.test_cache_invalidation", 0.5, 1.5),
    ("load.test_concurrent_users", 0.65, 2.0),
    ("files.test_file_upload", 0.95, 1.0),
    ("mail.test_email_notification", 0.97, 0.9),
    ("legacy.test_broken_feature", 0.0, 0.5),
    ("legacy.test_deprecated_api", 0.0, 0.7),
    ("svc.test_unstable_service", 0.1, 1.3),
    ("svc.test_memory_leak", 0.05, 2.5),
];

const FAILURE_MESSAGES: &[&str] = &[
    "AssertionError: Expected 200 but got 500",
    "TimeoutException: Request timed out after 30s",
    "NullPointerException: Object reference not set",
    "ConnectionRefusedError: Unable to connect to database",
    "ValidationError: Invalid input data",
];

/// Number of tests in every generated run
pub fn scenario_count() -> usize {
    SCENARIOS.len()
}

/// Generate a single run report
pub fn generate_run(rng: &mut StdRng, run_number: usize) -> RunReport {
    let tests = SCENARIOS
        .iter()
        .map(|&(name, pass_probability, base_duration)| {
            let passed = rng.gen::<f64>() < pass_probability;
            let duration = (base_duration + rng.gen_range(-0.1..0.1)).max(0.01);
            let message = if passed {
                None
            } else {
                let idx = rng.gen_range(0..FAILURE_MESSAGES.len());
                Some(FAILURE_MESSAGES[idx].to_string())
            };

            TestCase {
                test_id: name.to_string(),
                status: if passed {
                    TestStatus::Passed
                } else {
                    TestStatus::Failed
                },
                duration: Some(duration),
                message,
            }
        })
        .collect();

    RunReport {
        run_id: Some(format!("run_{:02}", run_number)),
        tests,
    }
}

/// Write `runs` reports into `output_dir`, returning their paths in run order
pub fn generate_sample_data(output_dir: &Path, runs: usize, seed: u64) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut paths = Vec::with_capacity(runs);

    for run in 1..=runs {
        let report = generate_run(&mut rng, run);
        let path = output_dir.join(format!("run_{:02}.json", run));
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize run")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote sample run");
        paths.push(path);
    }

    tracing::info!(runs, dir = %output_dir.display(), seed, "generated sample data");
    Ok(paths)
}
