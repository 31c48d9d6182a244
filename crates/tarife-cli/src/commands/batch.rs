//! Batch command for multiple tariff files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use tarife_core::models::config::OutputConfig;
use tarife_core::{ParseOutcome, SourceKind, TariffReader};

use super::config::load_config;
use crate::output::{OutputFormat, render};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of documents parsed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    index: usize,
    path: PathBuf,
    outcome: Result<ParseOutcome, String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let reader = Arc::new(TariffReader::from_config(&config)?);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceKind::from_path(p).is_some())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let reader = Arc::clone(&reader);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let outcome = reader.read_file(&path).map_err(|e| e.to_string());
            FileResult {
                index,
                path,
                outcome,
            }
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let result = joined?;
        if let Err(message) = &result.outcome {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), message);
            } else {
                error!("Failed to process {}: {}", result.path.display(), message);
                tasks.abort_all();
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), message);
            }
        }
        pb.inc(1);
        results.push(result);
    }
    results.sort_by_key(|r| r.index);

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        let mut taken = HashSet::new();
        if args.summary {
            taken.insert("summary.csv".to_string());
        }
        for result in &results {
            if let Ok(outcome) = &result.outcome {
                let name = output_name(&result.path, args.format, &mut taken);
                write_output(&output_dir.join(name), outcome, args.format, &config.output)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.outcome.is_err()).collect();
    let records: usize = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .map(|o| o.records.len())
        .sum();

    eprintln!();
    eprintln!(
        "{} Processed {} files ({} records) in {:?}",
        style("✓").green(),
        results.len(),
        records,
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(message) = &result.outcome {
                eprintln!("  - {}: {}", result.path.display(), message);
            }
        }
    }

    Ok(())
}

/// Output file name for `input`: its stem, suffixed with `-2`, `-3`, ...
/// when an earlier input already claimed that name.
fn output_name(input: &Path, format: OutputFormat, taken: &mut HashSet<String>) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tarife");

    let mut name = format!("{}.{}", stem, format.extension());
    let mut n = 2;
    while taken.contains(&name) {
        name = format!("{}-{}.{}", stem, n, format.extension());
        n += 1;
    }
    if n > 2 {
        warn!("{} shares its name with another input, writing {}", input.display(), name);
    }
    taken.insert(name.clone());
    name
}

fn write_output(
    output_path: &Path,
    outcome: &ParseOutcome,
    format: OutputFormat,
    config: &OutputConfig,
) -> anyhow::Result<()> {
    let content = render(&outcome.records, format, config, true)?;
    fs::write(output_path, content)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "records", "warnings", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let (records, warnings, error) = match &result.outcome {
            Ok(outcome) => (
                outcome.records.len().to_string(),
                outcome.warnings.len().to_string(),
                String::new(),
            ),
            Err(message) => (String::new(), String::new(), message.clone()),
        };

        wtr.write_record([
            filename,
            records.as_str(),
            warnings.as_str(),
            error.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
