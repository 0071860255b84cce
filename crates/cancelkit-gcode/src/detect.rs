//! Slicer detection
//!
//! Reads the whole file once. A cancel-object marker anywhere means the file
//! was already processed; otherwise the first line carrying a slicer
//! signature decides the adapter.

use std::io::{BufRead, Seek};

use cancelkit_core::{GcodeError, Result};

use crate::markers::HEADER_MARKER;
use crate::slicers::{SlicerKind, SIGNATURES};
use crate::{read_line, LineMatcher};

/// Markers left by this tool or by firmware-aware slicers
pub const PROCESSED_MARKERS: &[&str] = &["EXCLUDE_OBJECT_DEFINE", "DEFINE_OBJECT", HEADER_MARKER];

/// Result of the detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The file already carries cancel-object markers
    AlreadyProcessed,
    /// The file was produced by this slicer
    Slicer(SlicerKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectEvent {
    Processed,
    Signature(SlicerKind),
}

fn detection_matcher() -> LineMatcher<DetectEvent> {
    let mut matcher = LineMatcher::new();
    for marker in PROCESSED_MARKERS {
        matcher.register_interest(*marker, DetectEvent::Processed);
    }
    for (signature, kind) in SIGNATURES {
        matcher.register_interest(*signature, DetectEvent::Signature(*kind));
    }
    matcher
}

/// Classify a stream, reading from its start
pub fn detect<R: BufRead + Seek>(input: &mut R) -> Result<Detection> {
    input.rewind()?;

    let matcher = detection_matcher();
    let mut slicer = None;
    let mut buf = Vec::new();

    while read_line(input, &mut buf)? {
        let line = String::from_utf8_lossy(&buf);
        match matcher.classify(&line) {
            Some(DetectEvent::Processed) => {
                tracing::info!("G-code already supports cancellation");
                return Ok(Detection::AlreadyProcessed);
            }
            Some(DetectEvent::Signature(kind)) if slicer.is_none() => {
                tracing::debug!("Identified slicer {}", kind);
                slicer = Some(kind);
            }
            _ => {}
        }
    }

    match slicer {
        Some(kind) => Ok(Detection::Slicer(kind)),
        None => {
            tracing::warn!("Could not identify slicer");
            Err(GcodeError::DetectionFailed.into())
        }
    }
}
