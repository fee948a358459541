use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eki_navigator::collect::{RecordedSource, collect_line};
use eki_navigator::config::{DEFAULT_PRODUCT, ExportConfig};
use eki_navigator::export::write_outputs;
use eki_navigator::model::build_model;

/// Export one line's timetable as JSON and as an OuDiaSecond diagram.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// JSON capture of the scraped pages
    capture: PathBuf,

    /// Line page URL to export
    #[arg(long)]
    line_url: String,

    /// Timetable date (YYYYMMDD); must match the capture's `requestedDate` when it records one
    #[arg(long)]
    date: String,

    /// Directory receiving the output files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file name prefix
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    product: String,

    /// Write the JSON export without indentation
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ExportConfig::new(args.product, args.out_dir, !args.compact);

    let source = RecordedSource::from_path(&args.capture)
        .with_context(|| format!("failed to load capture {}", args.capture.display()))?;
    let line = collect_line(&source, &args.line_url, &args.date)
        .with_context(|| format!("failed to collect line {}", args.line_url))?;
    let model = build_model(&line);
    let paths = write_outputs(&model, &config, chrono::Local::now())?;

    println!("{}", paths.json.display());
    println!("{}", paths.diagram.display());
    Ok(())
}
