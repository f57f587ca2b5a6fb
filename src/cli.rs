//! CLI argument parsing for flakesift

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text summary (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Built-in threshold presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// min_runs=5, reference_runs=20
    Default,
    /// min_runs=10, reference_runs=30
    Strict,
    /// min_runs=3, reference_runs=10
    Permissive,
}

#[derive(Parser, Debug)]
#[command(name = "flakesift")]
#[command(version)]
#[command(about = "Classify tests as stable, flaky, or failing from repeated run reports", long_about = None)]
pub struct Cli {
    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify tests across a batch of run reports
    Analyze(AnalyzeArgs),
    /// Write synthetic run reports for trying the tool out
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Run report JSON files, one per run, in run order
    #[arg(required = true, value_name = "REPORT")]
    pub inputs: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Threshold preset (ignored when --config is given)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Minimum runs before a test is classified
    #[arg(long = "min-runs", value_name = "N")]
    pub min_runs: Option<usize>,

    /// Runs at which confidence reaches 100%
    #[arg(long = "reference-runs", value_name = "N")]
    pub reference_runs: Option<usize>,

    /// Only classify each test's most recent N outcomes
    #[arg(long, value_name = "N")]
    pub window: Option<usize>,

    /// Health credit for a flaky test (stable = 1.0, failing = 0.0 by default)
    #[arg(long = "flaky-weight", value_name = "WEIGHT")]
    pub flaky_weight: Option<f64>,

    /// Filter tests (e.g., -e 're:^api\.,!api.test_legacy')
    #[arg(short = 'e', long = "filter", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List every test in the text report, not only those needing attention
    #[arg(long)]
    pub all: bool,

    /// Exit with an error if the health score is below SCORE or inconclusive
    #[arg(long = "fail-under", value_name = "SCORE")]
    pub fail_under: Option<f64>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of runs to generate
    #[arg(long, default_value = "15")]
    pub runs: usize,

    /// Directory to write run reports into
    #[arg(short, long = "output-dir", default_value = "sample_data")]
    pub output_dir: PathBuf,

    /// RNG seed
    #[arg(long, default_value = "42")]
    pub seed: u64,
}
