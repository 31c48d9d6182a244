//! Parse command - rebuild tariff records from a single file.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use tarife_core::{ParseOutcome, ParseStats, SourceKind, TariffReader};

use super::config::load_config;
use crate::output::{OutputFormat, render};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF, or extracted text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Print line and record counts
    #[arg(long)]
    stats: bool,

    /// Start every page with fresh identifier state
    #[arg(long)]
    reset_per_page: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.reset_per_page {
        config.parser.reset_state_per_page = true;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if SourceKind::from_path(&args.input).is_none() {
        anyhow::bail!(
            "Unsupported file format: {} (expected .pdf or .txt)",
            args.input.display()
        );
    }

    info!("Parsing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}", args.input.display()));

    let reader = TariffReader::from_config(&config)?;
    let outcome = reader.read_file(&args.input)?;

    pb.finish_and_clear();

    report_warnings(&outcome);

    let content = render(
        &outcome.records,
        args.format,
        &config.output,
        args.output.is_some(),
    )?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        eprintln!(
            "{} {} records written to {}",
            style("✓").green(),
            outcome.records.len(),
            output_path.display()
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&content)?;
        stdout.flush()?;
    }

    if args.stats {
        print_stats(&outcome.stats, outcome.processing_time_ms);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn report_warnings(outcome: &ParseOutcome) {
    if outcome.warnings.is_empty() {
        return;
    }
    eprintln!(
        "{} {} warnings (run with -vv for details)",
        style("!").yellow(),
        outcome.warnings.len()
    );
}

fn print_stats(stats: &ParseStats, processing_time_ms: u64) {
    eprintln!();
    eprintln!("{}", style("Statistics:").bold());
    eprintln!("  Pages:          {}", stats.pages);
    eprintln!("  Lines:          {}", stats.lines);
    eprintln!("  Sections:       {}", stats.sections);
    eprintln!("  Detailed:       {}", stats.detailed_entries);
    eprintln!("  Continuations:  {}", stats.continuation_entries);
    eprintln!("  Noise:          {}", stats.noise_lines);
    eprintln!("  Records:        {}", stats.records);
    eprintln!("  Time:           {}ms", processing_time_ms);
}
