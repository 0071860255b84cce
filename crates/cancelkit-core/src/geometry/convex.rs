//! Convex hull reducer
//!
//! Builds the convex hull of an object's points with Andrew's monotone
//! chain, drops vertices that deviate less than a tolerance from the outline
//! (Douglas-Peucker on the closed ring), and reports the area centroid.

use super::{Footprint, Hull, HullReducer, Point};

const AREA_EPSILON: f64 = 1e-12;

/// Simplified convex hull reducer
#[derive(Debug, Clone, Copy)]
pub struct ConvexReducer {
    tolerance: f64,
}

impl ConvexReducer {
    /// Create a reducer with the given simplification tolerance
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }
}

impl Default for ConvexReducer {
    fn default() -> Self {
        Self::new(super::DEFAULT_SIMPLIFY_TOLERANCE)
    }
}

impl HullReducer for ConvexReducer {
    fn name(&self) -> &str {
        "convex"
    }

    fn reduce(&self, hull: &Hull) -> Option<Footprint> {
        let points = hull.points();
        if points.is_empty() {
            return None;
        }

        let ring = simplify_ring(&convex_hull(&points), self.tolerance);
        Some(Footprint {
            center: centroid(&ring),
            polygon: ring,
        })
    }
}

/// Cross product of vectors (a - o) and (b - o)
fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of a point set
///
/// Vertices are returned clockwise starting from the minimum-x (then
/// minimum-y) point, without repeating the first vertex. Collinear boundary
/// points are dropped. Inputs with fewer than three distinct points come back
/// deduplicated and sorted.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    // Counter-clockwise chain: lower hull left to right, upper hull back
    let mut ccw: Vec<Point> = Vec::with_capacity(sorted.len() + 1);
    for p in &sorted {
        while ccw.len() >= 2 && cross(&ccw[ccw.len() - 2], &ccw[ccw.len() - 1], p) <= 0.0 {
            ccw.pop();
        }
        ccw.push(*p);
    }
    let lower_len = ccw.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while ccw.len() >= lower_len && cross(&ccw[ccw.len() - 2], &ccw[ccw.len() - 1], p) <= 0.0
        {
            ccw.pop();
        }
        ccw.push(*p);
    }
    // Last point repeats the first
    ccw.pop();

    if ccw.len() < 3 {
        // All points collinear: only the two extremes survive
        return ccw;
    }

    let mut cw = Vec::with_capacity(ccw.len());
    cw.push(ccw[0]);
    cw.extend(ccw[1..].iter().rev());
    cw
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= AREA_EPSILON {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * dx, a.y + t * dy);
    ((p.x - proj.x).powi(2) + (p.y - proj.y).powi(2)).sqrt()
}

/// Douglas-Peucker over an open path, marking vertices to keep
fn douglas_peucker(path: &[Point], tolerance: f64, keep: &mut [bool]) {
    if path.len() < 2 {
        return;
    }
    keep[0] = true;
    keep[path.len() - 1] = true;

    let mut stack = vec![(0usize, path.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (max_idx, max_dist) = (start + 1..end)
            .map(|i| (i, segment_distance(&path[i], &path[start], &path[end])))
            .fold((start, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }
}

/// Simplify a closed ring, keeping its first vertex and orientation
///
/// The ring is split at the vertex farthest from the first one and each half
/// is simplified independently. Returns the input unchanged when it has three
/// or fewer vertices or when simplification would leave fewer than three.
pub fn simplify_ring(ring: &[Point], tolerance: f64) -> Vec<Point> {
    if ring.len() <= 3 || tolerance <= 0.0 {
        return ring.to_vec();
    }

    let anchor = ring[0];
    let far = (1..ring.len())
        .max_by(|&a, &b| {
            let da = (ring[a].x - anchor.x).powi(2) + (ring[a].y - anchor.y).powi(2);
            let db = (ring[b].x - anchor.x).powi(2) + (ring[b].y - anchor.y).powi(2);
            da.total_cmp(&db)
        })
        .unwrap_or(1);

    // Closed path: 0..=far then far..=len (with index len meaning 0 again)
    let mut path: Vec<Point> = ring.to_vec();
    path.push(anchor);

    let mut keep = vec![false; path.len()];
    douglas_peucker(&path[..=far], tolerance, &mut keep[..=far]);
    douglas_peucker(&path[far..], tolerance, &mut keep[far..]);

    let simplified: Vec<Point> = path[..ring.len()]
        .iter()
        .zip(&keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect();

    if simplified.len() < 3 {
        ring.to_vec()
    } else {
        simplified
    }
}

/// Area centroid of a polygon, vertex mean when it has no area
fn centroid(ring: &[Point]) -> Point {
    let n = ring.len();
    if n == 0 {
        return Point::default();
    }

    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let c = a.x * b.y - b.x * a.y;
        area2 += c;
        cx += (a.x + b.x) * c;
        cy += (a.y + b.y) * c;
    }

    if area2.abs() <= AREA_EPSILON {
        let sx: f64 = ring.iter().map(|p| p.x).sum();
        let sy: f64 = ring.iter().map(|p| p.y).sum();
        return Point::new(sx / n as f64, sy / n as f64);
    }

    Point::new(cx / (3.0 * area2), cy / (3.0 * area2))
}
