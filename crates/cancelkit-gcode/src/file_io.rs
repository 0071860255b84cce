//! File-level processing
//!
//! Output is written to a temporary file next to its destination and only
//! moved into place after the whole pipeline succeeded, so a failed run
//! never leaves a partial file behind or damages the input.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use cancelkit_core::{Error, Result};
use tempfile::NamedTempFile;

use crate::preprocessor::{Outcome, Preprocessor, PreprocessorConfig};
use crate::slicers::SlicerKind;

/// Buffer size for reading and writing large files (256 KB)
const IO_BUFFER_SIZE: usize = 256 * 1024;

/// Result of processing one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    /// Slicer the file was processed as, `None` if it was already processed
    pub fn slicer(&self) -> Option<SlicerKind> {
        match self.outcome {
            Outcome::Processed { slicer, .. } => Some(slicer),
            Outcome::AlreadyProcessed => None,
        }
    }

    /// Number of objects defined
    pub fn objects(&self) -> usize {
        match self.outcome {
            Outcome::Processed { objects, .. } => objects,
            Outcome::AlreadyProcessed => 0,
        }
    }
}

/// Destination for `input`
///
/// With a suffix the output sits next to the input as `<stem><suffix>.<ext>`;
/// without one the input is rewritten in place.
pub fn output_path(input: &Path, suffix: Option<&str>) -> PathBuf {
    let Some(suffix) = suffix.filter(|s| !s.is_empty()) else {
        return input.to_path_buf();
    };

    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(name)
}

/// Process a single file with the given pipeline options
pub fn process_file(
    path: &Path,
    suffix: Option<&str>,
    config: &PreprocessorConfig,
) -> Result<FileReport> {
    process_file_with(&Preprocessor::new(*config), path, suffix)
}

/// Process a single file with an existing preprocessor
pub fn process_file_with(
    preprocessor: &Preprocessor,
    path: &Path,
    suffix: Option<&str>,
) -> Result<FileReport> {
    let output = output_path(path, suffix);
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let permissions = fs::metadata(path)?.permissions();
    let mut reader = BufReader::with_capacity(IO_BUFFER_SIZE, File::open(path)?);
    let mut temp = NamedTempFile::new_in(&dir)?;

    let outcome = {
        let mut writer = BufWriter::with_capacity(IO_BUFFER_SIZE, temp.as_file_mut());
        let outcome = preprocessor.run(&mut reader, &mut writer)?;
        writer.flush()?;
        outcome
    };
    drop(reader);

    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(&output).map_err(|e| Error::Io(e.error))?;

    match outcome {
        Outcome::Processed { slicer, objects } => tracing::info!(
            "Processed {} ({}, {} objects) -> {}",
            path.display(),
            slicer,
            objects,
            output.display()
        ),
        Outcome::AlreadyProcessed => {
            tracing::info!("{} already processed, copied unchanged", path.display())
        }
    }

    Ok(FileReport {
        input: path.to_path_buf(),
        output,
        outcome,
    })
}

/// Per-file results of a batch run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub failed: Vec<(PathBuf, Error)>,
}

impl RunSummary {
    /// Check if every file was processed or already processed
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process files one after another, each with fresh state
///
/// A failing file is logged and recorded; the remaining files still run.
pub fn process_files(
    paths: &[PathBuf],
    suffix: Option<&str>,
    config: &PreprocessorConfig,
) -> RunSummary {
    let preprocessor = Preprocessor::new(*config);
    let mut summary = RunSummary::default();

    for path in paths {
        match process_file_with(&preprocessor, path, suffix) {
            Ok(report) => summary.reports.push(report),
            Err(e) => {
                tracing::warn!("Failed to process {}: {}", path.display(), e);
                summary.failed.push((path.clone(), e));
            }
        }
    }

    summary
}
