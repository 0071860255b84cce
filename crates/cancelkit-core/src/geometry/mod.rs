//! Footprint geometry for printed objects
//!
//! This module provides:
//! - [`Point`] and [`BoundingBox`]
//! - [`Hull`], the quantized per-object point set
//! - Reducers turning a point set into a center and outline polygon

mod bounding_box;
#[cfg(feature = "enhanced-hull")]
mod convex;
mod hull;
mod point;
mod reducer;

pub use bounding_box::BoundingBox;
pub use hull::{Hull, DEFAULT_PRECISION};
pub use point::Point;
pub use reducer::{
    BasicReducer, Footprint, HullReducer, ReducerKind, DEFAULT_SIMPLIFY_TOLERANCE,
};

#[cfg(feature = "enhanced-hull")]
pub use convex::{convex_hull, simplify_ring, ConvexReducer};
