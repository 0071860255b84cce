//! # cancelkit G-code processing
//!
//! Rewrites slicer G-code so firmware can cancel individual objects.
//!
//! The pipeline detects which slicer produced a file, scans it for objects
//! and their extrusion footprints, and writes it back with
//! `EXCLUDE_OBJECT_DEFINE` definitions and `EXCLUDE_OBJECT_START` /
//! `EXCLUDE_OBJECT_END` brackets around each object's moves.

pub mod detect;
pub mod file_io;
pub mod lifecycle;
pub mod markers;
pub mod matcher;
pub mod preprocessor;
pub mod slicers;

use std::io::{self, BufRead};

pub use detect::{detect, Detection, PROCESSED_MARKERS};
pub use file_io::{output_path, process_file, process_file_with, process_files, FileReport, RunSummary};
pub use lifecycle::{Lifecycle, LifecycleState, Transition};
pub use markers::VERSION;
pub use matcher::{GcodeWords, LineMatcher};
pub use preprocessor::{Outcome, Preprocessor, PreprocessorConfig};
pub use slicers::{Action, SlicerAdapter, SlicerKind, SIGNATURES};

/// Read one raw line including its terminator into `buf`
///
/// Returns `false` at end of stream. Bytes are kept as-is so lines that are
/// not valid UTF-8 can be written back unchanged.
pub(crate) fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)? > 0)
}
