use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use pixprobe::{probe_file, ProbeReport};

#[derive(Parser)]
#[command(name = "pixprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect image type and pixel dimensions without decoding")]
struct Cli {
    /// Files to probe
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Emit one JSON object per file
    #[arg(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonReport {
    path: String,
    #[serde(flatten)]
    report: ProbeReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let results: Vec<(PathBuf, pixprobe::Result<ProbeReport>)> = cli
        .paths
        .par_iter()
        .map(|path| (path.clone(), probe_file(path)))
        .collect();

    let mut failures = 0usize;
    for (path, result) in results {
        match result {
            Ok(report) if cli.json => {
                let line = JsonReport {
                    path: path.display().to_string(),
                    report,
                };
                println!(
                    "{}",
                    serde_json::to_string(&line).context("Failed to serialize report")?
                );
            }
            Ok(report) => {
                println!(
                    "{}: {} {}",
                    style(path.display()).bold(),
                    style(report.image_type).green(),
                    report.size
                );
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: {}", style(path.display()).bold(), style(err).red());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
