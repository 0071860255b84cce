//! Error handling for cancelkit
//!
//! Provides error types for the layers of the preprocessor:
//! - Geometry errors (hull precision, empty hulls, point conversion)
//! - G-Code errors (slicer detection, object lifecycle)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by [`Hull`](crate::Hull) and [`Point`](crate::Point) at their
/// boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Quantization grid size is zero, negative, or not finite
    #[error("Invalid hull precision {value}: must be a positive, finite number")]
    InvalidPrecision {
        /// The rejected precision.
        value: f64,
    },

    /// The hull has no recorded points
    #[error("Hull has no geometry")]
    NoGeometry,

    /// A value could not be interpreted as a point or point list
    #[error("Type mismatch: {reason}")]
    TypeMismatch {
        /// What was wrong with the value.
        reason: String,
    },
}

impl GeometryError {
    pub(crate) fn type_mismatch(reason: impl Into<String>) -> Self {
        Self::TypeMismatch {
            reason: reason.into(),
        }
    }
}

/// G-Code error type
///
/// Represents failures while classifying or rewriting a G-code file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcodeError {
    /// No slicer signature and no cancel-object marker in the whole file
    #[error("Could not identify the slicer that produced this file")]
    DetectionFailed,

    /// An adapter referenced an object the scan pass never defined
    #[error("Reference to unknown object '{id}'")]
    UnknownObjectReference {
        /// The slicer-native identifier that was not found.
        id: String,
    },
}

/// Main error type for cancelkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a slicer detection failure
    pub fn is_detection_failure(&self) -> bool {
        matches!(self, Error::Gcode(GcodeError::DetectionFailed))
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
