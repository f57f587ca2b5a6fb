// CLI integration tests for `flakesift analyze` and `flakesift generate`

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `runs` run reports where each test follows its outcome pattern
fn write_runs(dir: &Path, tests: &[(&str, &[bool])]) -> Vec<PathBuf> {
    let runs = tests.iter().map(|(_, o)| o.len()).max().unwrap_or(0);
    let mut paths = Vec::new();

    for run in 0..runs {
        let cases: Vec<serde_json::Value> = tests
            .iter()
            .filter_map(|(id, outcomes)| {
                outcomes.get(run).map(|&passed| {
                    serde_json::json!({
                        "test_id": id,
                        "status": if passed { "passed" } else { "failed" },
                        "duration": 0.5,
                    })
                })
            })
            .collect();
        let report = serde_json::json!({ "run_id": format!("run-{}", run + 1), "tests": cases });
        let path = dir.join(format!("run_{:02}.json", run + 1));
        fs::write(&path, serde_json::to_string(&report).unwrap()).unwrap();
        paths.push(path);
    }

    paths
}

fn suite(dir: &Path) -> Vec<PathBuf> {
    let tests: [(&str, &[bool]); 4] = [
        ("api.test_login", &[true; 10]),
        ("api.test_export", &[false; 10]),
        (
            "db.test_pool",
            &[true, false, true, true, false, true, true, true, false, true],
        ),
        ("ui.test_new", &[true, true]),
    ];
    write_runs(dir, &tests)
}

fn flakesift() -> Command {
    Command::cargo_bin("flakesift").unwrap()
}

#[test]
fn test_text_summary() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Pattern Analysis"))
        .stdout(predicate::str::contains("HEALTH SCORE: 50.0%"))
        .stdout(predicate::str::contains("Tests needing attention (2)"))
        .stdout(predicate::str::contains("db.test_pool"))
        .stdout(predicate::str::contains("api.test_export"));
}

#[test]
fn test_json_output() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    let output = flakesift()
        .arg("analyze")
        .arg("--format")
        .arg("json")
        .args(&paths)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["total_tests"], 4);
    assert_eq!(value["summary"]["insufficient_data"], 1);
    assert_eq!(value["summary"]["health_score"], 50.0);
    assert_eq!(value["tests"][0]["test_id"], "api.test_export");
    assert_eq!(value["tests"][0]["category"], "consistently_failing");
    assert_eq!(value["tests"][1]["category"], "flaky");
    assert_eq!(value["tests"][1]["pass_rate"], 0.7);
}

#[test]
fn test_csv_output_to_file() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());
    let out = tmp.path().join("report.csv");

    flakesift()
        .arg("analyze")
        .arg("--format")
        .arg("csv")
        .arg("-o")
        .arg(&out)
        .args(&paths)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("test_id,category,"));
    assert!(lines[1].starts_with("api.test_export,Consistently Failing,10/10"));
    assert!(lines[4].starts_with("ui.test_new,Insufficient Data,0/2"));
}

#[test]
fn test_min_runs_override() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("--min-runs")
        .arg("2")
        .arg("--format")
        .arg("csv")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("ui.test_new,Stable,0/2"));
}

#[test]
fn test_strict_preset() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("--preset")
        .arg("strict")
        .arg("--format")
        .arg("csv")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "api.test_login,Stable,0/10,10,0,1.0000,0.3333",
        ));
}

#[test]
fn test_recent_window() {
    let tmp = TempDir::new().unwrap();
    let tests: [(&str, &[bool]); 1] = [(
        "suite.test_recovered",
        &[false, false, false, true, true, true, true, true],
    )];
    let paths = write_runs(tmp.path(), &tests);

    flakesift()
        .arg("analyze")
        .arg("--format")
        .arg("csv")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("suite.test_recovered,Flaky,3/8"));

    flakesift()
        .arg("analyze")
        .arg("--window")
        .arg("5")
        .arg("--format")
        .arg("csv")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("suite.test_recovered,Stable,0/5"));
}

#[test]
fn test_flaky_weight_override() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("--flaky-weight")
        .arg("0.25")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("HEALTH SCORE: 41.7%"));

    flakesift()
        .arg("analyze")
        .arg("--flaky-weight")
        .arg("1.5")
        .args(&paths)
        .assert()
        .failure()
        .stderr(predicate::str::contains("weights.flaky"));
}

#[test]
fn test_skips_and_error_samples_reported() {
    let tmp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for run in 1..=5 {
        let report = serde_json::json!({
            "tests": [
                {"test_id": "api.test_upload", "status": "failed", "message": "HTTP 500"},
                {"test_id": "api.test_legacy", "status": if run == 1 { "passed" } else { "skipped" }},
            ]
        });
        let path = tmp.path().join(format!("run_{:02}.json", run));
        fs::write(&path, serde_json::to_string(&report).unwrap()).unwrap();
        paths.push(path);
    }

    let output = flakesift()
        .arg("analyze")
        .arg("--format")
        .arg("json")
        .args(&paths)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tests = value["tests"].as_array().unwrap();
    let upload = tests.iter().find(|t| t["test_id"] == "api.test_upload").unwrap();
    assert_eq!(upload["error_samples"], serde_json::json!(["HTTP 500"]));
    assert_eq!(upload["skip_count"], 0);

    let legacy = tests.iter().find(|t| t["test_id"] == "api.test_legacy").unwrap();
    assert_eq!(legacy["skip_count"], 4);
    assert_eq!(legacy["total_runs"], 1);
}

#[test]
fn test_filter_expression() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("-e")
        .arg(r"re:^api\.,!api.test_export")
        .arg("--all")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("api.test_login"))
        .stdout(predicate::str::contains("api.test_export").not())
        .stdout(predicate::str::contains("db.test_pool").not());
}

#[test]
fn test_config_file() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());
    let config = tmp.path().join("flakesift.toml");
    fs::write(&config, "[weights]\nflaky = 0.0\n").unwrap();

    flakesift()
        .arg("analyze")
        .arg("--config")
        .arg(&config)
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("HEALTH SCORE: 33.3%"));
}

#[test]
fn test_invalid_config_rejected() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("--reference-runs")
        .arg("0")
        .args(&paths)
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference_run_count"));
}

#[test]
fn test_fail_under() {
    let tmp = TempDir::new().unwrap();
    let paths = suite(tmp.path());

    flakesift()
        .arg("analyze")
        .arg("--fail-under")
        .arg("80")
        .args(&paths)
        .assert()
        .failure()
        .stderr(predicate::str::contains("below --fail-under"));

    flakesift()
        .arg("analyze")
        .arg("--fail-under")
        .arg("40")
        .args(&paths)
        .assert()
        .success();
}

#[test]
fn test_empty_runs_report_no_data() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.json");
    fs::write(&path, r#"{"tests": []}"#).unwrap();

    flakesift()
        .arg("analyze")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No test outcome records supplied"));
}

#[test]
fn test_missing_report() {
    flakesift()
        .arg("analyze")
        .arg("/nonexistent/run.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run report not found"));
}

#[test]
fn test_generate_then_analyze() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("samples");

    flakesift()
        .arg("generate")
        .arg("--runs")
        .arg("12")
        .arg("--output-dir")
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 12 run reports"));

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    assert_eq!(paths.len(), 12);

    flakesift()
        .arg("analyze")
        .arg("--all")
        .args(&paths)
        .assert()
        .success()
        .stdout(predicate::str::contains("legacy.test_broken_feature"))
        .stdout(predicate::str::contains("Consistently Failing"));
}
