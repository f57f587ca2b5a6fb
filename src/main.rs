use anyhow::{Context, Result};
use clap::Parser;
use flakesift::cli::{AnalyzeArgs, Cli, Commands, GenerateArgs, OutputFormat, Preset};
use flakesift::{
    analysis, csv_output::CsvOutput, filter::TestFilter, ingest, json_output::JsonReport,
    sample_data, text_output, DetectorConfig,
};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Build the effective configuration: preset or file, then flag overrides
fn build_config(args: &AnalyzeArgs) -> Result<DetectorConfig> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), _) => DetectorConfig::from_file(path)?,
        (None, Some(Preset::Strict)) => DetectorConfig::strict(),
        (None, Some(Preset::Permissive)) => DetectorConfig::permissive(),
        (None, Some(Preset::Default)) | (None, None) => DetectorConfig::default(),
    };

    if let Some(min_runs) = args.min_runs {
        config.classifier.min_runs = min_runs;
    }
    if let Some(reference) = args.reference_runs {
        config.classifier.reference_run_count = reference;
    }
    if let Some(window) = args.window {
        config.classifier.recent_window = Some(window);
    }
    if let Some(weight) = args.flaky_weight {
        config.weights.flaky = weight;
    }

    Ok(config)
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = build_config(&args)?;
    let filter = match &args.filter {
        Some(expr) => TestFilter::from_expr(expr)?,
        None => TestFilter::all(),
    };

    let ingested = ingest::load_runs(args.inputs.as_slice())?;
    let skipped = ingested.skipped_total();
    if skipped > 0 {
        tracing::info!(skipped, "skipped tests carry no outcome");
    }

    let analysis =
        analysis::analyze_with_skips(ingested.records, &ingested.skipped, &filter, &config)?;

    let rendered = match args.format {
        OutputFormat::Text => text_output::to_report_string(&analysis, args.all),
        OutputFormat::Json => JsonReport::from_analysis(&analysis)
            .to_json()
            .context("Failed to serialize JSON report")?,
        OutputFormat::Csv => CsvOutput::from_analysis(&analysis).to_csv(),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if let Some(threshold) = args.fail_under {
        let summary = &analysis.summary;
        if summary.inconclusive {
            anyhow::bail!(
                "Health score is inconclusive (no test reached {} runs); required >= {:.1}",
                config.classifier.min_runs,
                threshold
            );
        }
        if summary.health_score < threshold {
            anyhow::bail!(
                "Health score {:.1} is below --fail-under {:.1}",
                summary.health_score,
                threshold
            );
        }
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let paths = sample_data::generate_sample_data(&args.output_dir, args.runs, args.seed)?;
    println!(
        "Generated {} run reports ({} tests each) in {}",
        paths.len(),
        sample_data::scenario_count(),
        args.output_dir.display()
    );
    println!(
        "Analyze with: flakesift analyze {}/*.json",
        args.output_dir.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Generate(args) => run_generate(args),
    }
}
