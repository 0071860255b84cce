//! Hull reducers
//!
//! A reducer turns the accumulated point set of a [`Hull`] into a
//! [`Footprint`]: a center and an ordered outline polygon. Two strategies
//! exist and are selected once per run through [`ReducerKind`].

use serde::{Deserialize, Serialize};

use super::{Hull, Point};

/// Vertex-reduction tolerance of the enhanced reducer, in slicer units
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.5;

/// Reduced geometry of one object
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Center used by firmware for on-screen selection
    pub center: Point,
    /// Outline vertices in boundary order
    pub polygon: Vec<Point>,
}

/// Strategy converting a hull into its footprint
pub trait HullReducer: Send + Sync {
    /// Get the name/identifier of this reducer
    fn name(&self) -> &str;

    /// Reduce a hull, `None` when it has no geometry
    fn reduce(&self, hull: &Hull) -> Option<Footprint>;
}

/// Bounding-box reducer
///
/// Center is the box midpoint and the polygon is the four box corners.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicReducer;

impl HullReducer for BasicReducer {
    fn name(&self) -> &str {
        "basic"
    }

    fn reduce(&self, hull: &Hull) -> Option<Footprint> {
        let bb = hull.bounding_box().ok()?;
        Some(Footprint {
            center: bb.center(),
            polygon: bb.corners().to_vec(),
        })
    }
}

/// Which reducer a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReducerKind {
    /// Axis-aligned bounding box
    Basic,
    /// Simplified convex hull, falling back to `Basic` when unavailable
    #[default]
    Enhanced,
}

impl ReducerKind {
    /// Check if the enhanced reducer was compiled in
    pub const fn enhanced_available() -> bool {
        cfg!(feature = "enhanced-hull")
    }

    /// Instantiate the reducer
    ///
    /// `tolerance` only applies to the enhanced reducer.
    pub fn build(self, tolerance: f64) -> Box<dyn HullReducer> {
        match self {
            ReducerKind::Basic => Box::new(BasicReducer),
            ReducerKind::Enhanced => Self::enhanced(tolerance),
        }
    }

    #[cfg(feature = "enhanced-hull")]
    fn enhanced(tolerance: f64) -> Box<dyn HullReducer> {
        Box::new(super::ConvexReducer::new(tolerance))
    }

    #[cfg(not(feature = "enhanced-hull"))]
    fn enhanced(_tolerance: f64) -> Box<dyn HullReducer> {
        tracing::info!("Convex hull support not compiled in, using bounding boxes");
        Box::new(BasicReducer)
    }
}

impl std::fmt::Display for ReducerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Enhanced => write!(f, "enhanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_reducer() {
        let mut hull = Hull::with_precision(0.5).unwrap();
        hull.set_points(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(2.0, 3.0),
        ]);

        let fp = BasicReducer.reduce(&hull).unwrap();
        assert_eq!(fp.center, Point::new(2.0, 1.5));
        assert_eq!(
            fp.polygon,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 3.0),
                Point::new(4.0, 3.0),
                Point::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_basic_reducer_empty() {
        assert!(BasicReducer.reduce(&Hull::new()).is_none());
    }

    #[test]
    fn test_build_basic() {
        assert_eq!(ReducerKind::Basic.build(0.5).name(), "basic");
    }

    #[test]
    fn test_build_enhanced_matches_availability() {
        let reducer = ReducerKind::Enhanced.build(0.5);
        if ReducerKind::enhanced_available() {
            assert_eq!(reducer.name(), "convex");
        } else {
            assert_eq!(reducer.name(), "basic");
        }
    }

    #[test]
    fn test_reducer_kind_serde() {
        let kind: ReducerKind = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(kind, ReducerKind::Basic);
        assert_eq!(serde_json::to_string(&ReducerKind::Enhanced).unwrap(), "\"enhanced\"");
    }
}
