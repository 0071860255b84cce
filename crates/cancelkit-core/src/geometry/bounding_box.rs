//! Axis-aligned bounding box

use serde::{Deserialize, Serialize};

use super::Point;

/// Axis-aligned bounding box as `(xmin, ymin, xmax, ymax)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of a point sequence, `None` when it is empty
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bb.min_x = bb.min_x.min(p.x);
            bb.min_y = bb.min_y.min(p.y);
            bb.max_x = bb.max_x.max(p.x);
            bb.max_y = bb.max_y.max(p.y);
        }
        Some(bb)
    }

    /// Box midpoint
    pub fn center(&self) -> Point {
        Point::new(self.min_x, self.min_y).midpoint(&Point::new(self.max_x, self.max_y))
    }

    /// Corners in the order `(xmin,ymin) → (xmin,ymax) → (xmax,ymax) → (xmax,ymin)`
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.min_x, self.max_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.max_x, self.min_y),
        ]
    }

    /// Check if a point lies inside or on the box
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }
}
