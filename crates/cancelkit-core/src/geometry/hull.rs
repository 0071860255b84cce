//! Per-object point accumulator
//!
//! A [`Hull`] collects the XY positions of one object's extrusion moves.
//! Points are snapped to a grid before insertion so retraction jitter and
//! repeated perimeters collapse into a bounded set.

use std::collections::HashSet;

use serde_json::Value;

use super::{BoundingBox, Point};
use crate::error::GeometryError;

/// Default grid size, finer than any slicer's printed resolution
pub const DEFAULT_PRECISION: f64 = 1e-5;

/// Bit-exact key for a quantized point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridKey(u64, u64);

impl GridKey {
    fn of(p: Point) -> Self {
        // -0.0 and 0.0 are the same grid cell
        let norm = |v: f64| if v == 0.0 { 0.0_f64 } else { v };
        Self(norm(p.x).to_bits(), norm(p.y).to_bits())
    }

    fn point(self) -> Point {
        Point::new(f64::from_bits(self.0), f64::from_bits(self.1))
    }
}

/// Quantized point set of a single printed object
#[derive(Debug, Clone)]
pub struct Hull {
    precision: f64,
    points: HashSet<GridKey>,
}

impl Hull {
    /// Create an empty hull with [`DEFAULT_PRECISION`]
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            points: HashSet::new(),
        }
    }

    /// Create an empty hull with a specific grid size
    pub fn with_precision(precision: f64) -> Result<Self, GeometryError> {
        let mut hull = Self::new();
        hull.set_precision(precision)?;
        Ok(hull)
    }

    /// Grid size used for new insertions
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Change the grid size for subsequent insertions
    ///
    /// Points already stored keep the quantization they were inserted with.
    pub fn set_precision(&mut self, precision: f64) -> Result<(), GeometryError> {
        if !(precision.is_finite() && precision > 0.0) {
            return Err(GeometryError::InvalidPrecision { value: precision });
        }
        self.precision = precision;
        Ok(())
    }

    /// Insert a point after snapping it to the grid
    pub fn add_point(&mut self, point: Point) {
        self.points.insert(GridKey::of(point.quantized(self.precision)));
    }

    /// Number of distinct quantized points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if no points were recorded
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current point set, sorted by x then y
    pub fn points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self.points.iter().map(|k| k.point()).collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    /// Replace the point set wholesale
    pub fn set_points(&mut self, points: &[Point]) {
        self.points.clear();
        for p in points {
            self.add_point(*p);
        }
    }

    /// Replace the point set from a JSON array of `[x, y]` pairs
    ///
    /// The hull is left unchanged if any element is not a point.
    pub fn set_points_json(&mut self, value: &Value) -> Result<(), GeometryError> {
        let items = value.as_array().ok_or_else(|| {
            GeometryError::type_mismatch(format!("points must be a list of [x, y] pairs, got {}", value))
        })?;

        let points = items
            .iter()
            .map(Point::try_from)
            .collect::<Result<Vec<Point>, _>>()?;

        self.set_points(&points);
        Ok(())
    }

    /// Axis-aligned bounds of the recorded points
    pub fn bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        BoundingBox::from_points(self.points.iter().map(|k| k.point()))
            .ok_or(GeometryError::NoGeometry)
    }
}

impl Default for Hull {
    fn default() -> Self {
        Self::new()
    }
}
