//! # cancelkit
//!
//! Adds cancel-object support to slicer G-code. Each printed object gets an
//! `EXCLUDE_OBJECT_DEFINE` with its footprint, and its moves are bracketed by
//! `EXCLUDE_OBJECT_START` / `EXCLUDE_OBJECT_END`, so firmware can skip a
//! single failed part mid-print.
//!
//! ## Architecture
//!
//! cancelkit is organized as a workspace with multiple crates:
//!
//! 1. **cancelkit-core** - Errors, point/hull geometry, reducers, object table
//! 2. **cancelkit-gcode** - Slicer detection, adapters, marker injection
//! 3. **cancelkit-settings** - Configuration files
//! 4. **cancelkit** - Command-line binary that integrates all crates
//!
//! ## Supported slicers
//!
//! - Slic3r, PrusaSlicer and SuperSlicer
//! - Cura
//! - ideaMaker
//! - Anything emitting firmware `M486` object commands

pub use cancelkit_core::{Error, GcodeError, GeometryError, ReducerKind, Result};
pub use cancelkit_gcode::{
    output_path, process_file, process_file_with, process_files, FileReport, Outcome,
    Preprocessor, PreprocessorConfig, RunSummary, SlicerKind,
};
pub use cancelkit_settings::{Config, ProcessingSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Pipeline options from the processing section of a config
pub fn preprocessor_config(settings: &ProcessingSettings) -> PreprocessorConfig {
    PreprocessorConfig {
        precision: settings.precision,
        reducer: settings.reducer,
        simplify_tolerance: settings.simplify_tolerance,
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays free
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` when `verbose`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_maps_to_pipeline() {
        let mut config = Config::new();
        config.processing.precision = 0.5;
        config.processing.reducer = ReducerKind::Basic;
        config.processing.simplify_tolerance = 0.1;

        let pipeline = preprocessor_config(&config.processing);
        assert_eq!(pipeline.precision, 0.5);
        assert_eq!(pipeline.reducer, ReducerKind::Basic);
        assert_eq!(pipeline.simplify_tolerance, 0.1);
    }

    #[test]
    fn test_default_config_matches_default_pipeline() {
        let pipeline = preprocessor_config(&Config::new().processing);
        assert_eq!(pipeline, PreprocessorConfig::default());
    }
}
