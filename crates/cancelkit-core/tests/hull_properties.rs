use cancelkit_core::{Hull, Point};
use proptest::prelude::*;

proptest! {
    #[test]
    fn stored_points_sit_on_the_grid(
        exp in -4i32..=1,
        coords in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..64),
    ) {
        let precision = 2f64.powi(exp);
        let mut hull = Hull::with_precision(precision).unwrap();
        for (x, y) in &coords {
            hull.add_point(Point::new(*x, *y));
        }

        prop_assert!(hull.len() <= coords.len());
        for p in hull.points() {
            prop_assert_eq!(p, p.quantized(precision));
        }
    }

    #[test]
    fn adding_twice_is_idempotent(x in -1000.0f64..1000.0, y in -1000.0f64..1000.0) {
        let mut hull = Hull::new();
        hull.add_point(Point::new(x, y));
        let before = hull.points();
        hull.add_point(Point::new(x, y));
        prop_assert_eq!(hull.points(), before);
    }

    #[test]
    fn points_round_trip_through_setter(
        coords in prop::collection::vec((-100i32..100, -100i32..100), 0..32),
    ) {
        let mut hull = Hull::with_precision(0.5).unwrap();
        let points: Vec<Point> = coords
            .iter()
            .map(|(x, y)| Point::new(*x as f64 * 0.5, *y as f64 * 0.5))
            .collect();
        hull.set_points(&points);

        let mut other = Hull::with_precision(0.5).unwrap();
        other.set_points(&hull.points());
        prop_assert_eq!(other.points(), hull.points());
    }

    #[test]
    fn bounding_box_contains_every_point(
        coords in prop::collection::vec((-300.0f64..300.0, -300.0f64..300.0), 1..48),
    ) {
        let mut hull = Hull::new();
        for (x, y) in &coords {
            hull.add_point(Point::new(*x, *y));
        }
        let bb = hull.bounding_box().unwrap();
        for p in hull.points() {
            prop_assert!(bb.contains(&p));
        }
    }
}
