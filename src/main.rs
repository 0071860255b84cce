use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cancelkit::{init_logging, preprocessor_config, process_files, Config, ReducerKind};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

#[derive(Parser)]
#[command(name = "cancelkit")]
#[command(version = LONG_VERSION)]
#[command(about = "Add cancel-object markers to slicer G-code", long_about = None)]
struct Cli {
    /// G-code files to process
    #[arg(value_name = "GCODE", required = true)]
    files: Vec<PathBuf>,

    /// Write `<stem><SUFFIX>.<ext>` next to each input instead of overwriting it
    #[arg(short, long, value_name = "SUFFIX")]
    output_suffix: Option<String>,

    /// Use bounding boxes instead of convex hulls for object outlines
    #[arg(long)]
    disable_enhanced_hull: bool,

    /// Hull quantization grid size
    #[arg(long, value_name = "GRID")]
    precision: Option<f64>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::discover()?,
    };

    if let Some(suffix) = &cli.output_suffix {
        config.output.suffix = Some(suffix.clone());
    }
    if cli.disable_enhanced_hull {
        config.processing.reducer = ReducerKind::Basic;
    }
    if let Some(precision) = cli.precision {
        config.processing.precision = precision;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<bool> {
    init_logging(cli.verbose)?;

    let config = load_config(&cli)?;
    let summary = process_files(
        &cli.files,
        config.output.suffix.as_deref(),
        &preprocessor_config(&config.processing),
    );

    if !summary.success() {
        tracing::warn!(
            "{} of {} files failed",
            summary.failed.len(),
            cli.files.len()
        );
    }
    Ok(summary.success())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
