//! # cancelkit core
//!
//! Core types for cancelkit.
//! Provides error types, footprint geometry, and the per-file object table
//! shared by the G-code processing and settings crates.

pub mod error;
pub mod geometry;
pub mod objects;

pub use error::{Error, GcodeError, GeometryError, Result};

pub use geometry::{
    BasicReducer, BoundingBox, Footprint, Hull, HullReducer, Point, ReducerKind,
    DEFAULT_PRECISION, DEFAULT_SIMPLIFY_TOLERANCE,
};

#[cfg(feature = "enhanced-hull")]
pub use geometry::{convex_hull, simplify_ring, ConvexReducer};

pub use objects::{sanitize_name, KnownObject, ObjectHandle, ObjectTable};
