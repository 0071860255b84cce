use cancelkit_core::{BasicReducer, Hull, HullReducer, Point, ReducerKind};

fn hull_of(points: &[(f64, f64)]) -> Hull {
    let mut hull = Hull::with_precision(0.25).unwrap();
    let points: Vec<Point> = points.iter().map(|&p| p.into()).collect();
    hull.set_points(&points);
    hull
}

#[test]
fn test_basic_single_point() {
    let fp = BasicReducer.reduce(&hull_of(&[(3.0, 4.0)])).unwrap();
    assert_eq!(fp.center, Point::new(3.0, 4.0));
    assert_eq!(fp.polygon, vec![Point::new(3.0, 4.0); 4]);
}

#[test]
fn test_reducer_kind_from_build() {
    let reducer = ReducerKind::Basic.build(0.5);
    let fp = reducer.reduce(&hull_of(&[(0.0, 0.0), (2.0, 2.0)])).unwrap();
    assert_eq!(fp.center, Point::new(1.0, 1.0));
}

#[test]
fn test_empty_hull_has_no_footprint() {
    assert!(ReducerKind::Basic.build(0.5).reduce(&Hull::new()).is_none());
    assert!(ReducerKind::Enhanced.build(0.5).reduce(&Hull::new()).is_none());
}

#[cfg(feature = "enhanced-hull")]
mod convex {
    use super::*;
    use cancelkit_core::{convex_hull, ConvexReducer};

    #[test]
    fn test_convex_contains_every_point() {
        let pts = [
            (0.0, 0.0),
            (8.0, 1.0),
            (9.0, 7.0),
            (3.0, 9.0),
            (-1.0, 5.0),
            (4.0, 4.0),
            (2.0, 6.0),
        ];
        let hull = hull_of(&pts);
        let fp = ConvexReducer::new(0.0).reduce(&hull).unwrap();
        let ring = &fp.polygon;

        // Clockwise ring: every point lies on or right of each edge
        for p in hull.points() {
            for i in 0..ring.len() {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
                assert!(cross <= 1e-9, "{} outside edge {} -> {}", p, a, b);
            }
        }
        assert_eq!(ring[0], Point::new(-1.0, 5.0));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let reducer = ConvexReducer::default();

        let fp = reducer.reduce(&hull_of(&[(1.0, 1.0)])).unwrap();
        assert_eq!(fp.polygon, vec![Point::new(1.0, 1.0)]);
        assert_eq!(fp.center, Point::new(1.0, 1.0));

        let fp = reducer
            .reduce(&hull_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]))
            .unwrap();
        assert_eq!(fp.polygon, vec![Point::new(0.0, 0.0), Point::new(3.0, 3.0)]);
        assert_eq!(fp.center, Point::new(1.5, 1.5));
    }

    #[test]
    fn test_tolerance_drops_near_collinear_vertices() {
        // An octagon-ish outline with one vertex barely off the bottom edge
        let pts = [(0.0, 0.0), (5.0, -0.25), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let hull = hull_of(&pts);

        assert_eq!(convex_hull(&hull.points()).len(), 5);
        let fp = ConvexReducer::default().reduce(&hull).unwrap();
        assert_eq!(
            fp.polygon,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
            ]
        );
        assert!((fp.center.x - 5.0).abs() < 1e-9);
        assert!((fp.center.y - 5.0).abs() < 1e-9);
    }
}
