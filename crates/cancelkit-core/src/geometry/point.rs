//! 2D point type

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeometryError;

/// A point on the print bed in slicer coordinates (usually millimeters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Snap both coordinates to a grid of size `precision`
    ///
    /// Each component becomes `round(v / precision) * precision`.
    #[inline]
    pub fn quantized(self, precision: f64) -> Self {
        Self {
            x: (self.x / precision).round() * precision,
            y: (self.y / precision).round() * precision,
        }
    }

    /// Both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// The point with each coordinate rounded to `decimals` places
    ///
    /// Negative zero comes out as `0.0`.
    pub fn rounded(self, decimals: i32) -> Self {
        let factor = 10_f64.powi(decimals);
        Self {
            x: (self.x * factor).round() / factor + 0.0,
            y: (self.y * factor).round() / factor + 0.0,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl TryFrom<&[f64]> for Point {
    type Error = GeometryError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match coords {
            [x, y] if x.is_finite() && y.is_finite() => Ok(Point::new(*x, *y)),
            [_, _] => Err(GeometryError::type_mismatch(
                "point coordinates must be finite",
            )),
            other => Err(GeometryError::type_mismatch(format!(
                "a point needs exactly 2 coordinates, got {}",
                other.len()
            ))),
        }
    }
}

impl TryFrom<&Value> for Point {
    type Error = GeometryError;

    /// Accepts `[x, y]` arrays of JSON numbers, the shape used by `POLYGON=`
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let items = value.as_array().ok_or_else(|| {
            GeometryError::type_mismatch(format!("expected an [x, y] pair, got {}", value))
        })?;

        let coords = items
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    GeometryError::type_mismatch(format!("coordinate {} is not a number", v))
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        Point::try_from(coords.as_slice())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
