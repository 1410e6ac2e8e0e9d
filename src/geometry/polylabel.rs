//! Maximum inscribed circle (pole of inaccessibility) search
//!
//! Quad-tree branch and bound in the style of Mapbox's polylabel: square
//! probe cells are ranked by the best distance any point inside them could
//! possibly reach, and only cells that can still beat the current best are
//! subdivided.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::DVec2;

use super::polygon::{polygon_bounding_box, polygon_centroid, signed_distance_to_polygon};

/// Smallest precision accepted; guarantees the subdivision terminates
const MIN_EPSILON: f64 = 1e-9;

/// Center and radius of the largest circle found inside a polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InscribedCircle {
    pub center: DVec2,
    pub radius: f64,
}

/// Square probe cell
#[derive(Debug, Clone, Copy)]
struct ProbeCell {
    center: DVec2,
    half_size: f64,
    /// Signed distance from `center` to the polygon boundary
    distance: f64,
    /// Upper bound on the distance reachable anywhere in the cell
    potential: f64,
}

impl ProbeCell {
    fn new(center: DVec2, half_size: f64, polygon: &[DVec2]) -> Self {
        let distance = signed_distance_to_polygon(polygon, center);
        Self {
            center,
            half_size,
            distance,
            potential: distance + half_size * std::f64::consts::SQRT_2,
        }
    }
}

impl PartialEq for ProbeCell {
    fn eq(&self, other: &Self) -> bool {
        self.potential.total_cmp(&other.potential) == Ordering::Equal
    }
}

impl Eq for ProbeCell {}

impl PartialOrd for ProbeCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProbeCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.potential.total_cmp(&other.potential)
    }
}

/// Find an approximate maximum inscribed circle
///
/// The returned radius is within `epsilon` of the true optimum. Returns
/// `None` for polygons with fewer than three vertices or when no point with
/// a strictly positive distance to the boundary is found (degenerate or
/// vanishingly thin polygons).
///
/// # Example
///
/// ```
/// use rust_voronoi_layout::geometry::max_inscribed_circle;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(10.0, 0.0),
///     DVec2::new(10.0, 10.0),
///     DVec2::new(0.0, 10.0),
/// ];
/// let circle = max_inscribed_circle(&square, 0.01).unwrap();
/// assert!((circle.radius - 5.0).abs() <= 0.01);
/// ```
pub fn max_inscribed_circle(polygon: &[DVec2], epsilon: f64) -> Option<InscribedCircle> {
    if polygon.len() < 3 {
        return None;
    }
    let (min, max) = polygon_bounding_box(polygon)?;
    let size = max - min;
    if !(size.x.min(size.y) > 0.0) {
        return None;
    }
    let epsilon = if epsilon.is_finite() {
        epsilon.max(MIN_EPSILON)
    } else {
        MIN_EPSILON
    };

    // Seed cells never go below epsilon, so thin slivers stay cheap
    let cell_size = size.x.min(size.y).max(epsilon);

    let half = cell_size * 0.5;
    let mut queue = BinaryHeap::new();

    // Seed grid covering the bounding box
    let mut x = min.x;
    while x < max.x {
        let mut y = min.y;
        while y < max.y {
            queue.push(ProbeCell::new(DVec2::new(x + half, y + half), half, polygon));
            y += cell_size;
        }
        x += cell_size;
    }

    // Start from the better of the centroid and the box center
    let mut best = ProbeCell::new(polygon_centroid(polygon), 0.0, polygon);
    let box_cell = ProbeCell::new(min + size * 0.5, 0.0, polygon);
    if box_cell.distance > best.distance {
        best = box_cell;
    }

    while let Some(cell) = queue.pop() {
        if cell.distance > best.distance {
            best = cell;
        }

        // Heap order means no remaining cell can do better either
        if cell.potential - best.distance <= epsilon {
            break;
        }

        let quarter = cell.half_size * 0.5;
        if quarter < epsilon {
            continue;
        }

        for offset in [
            DVec2::new(-quarter, -quarter),
            DVec2::new(quarter, -quarter),
            DVec2::new(-quarter, quarter),
            DVec2::new(quarter, quarter),
        ] {
            let child = ProbeCell::new(cell.center + offset, quarter, polygon);
            if child.distance > best.distance {
                best = child;
            }
            if child.potential - best.distance > epsilon {
                queue.push(child);
            }
        }
    }

    (best.distance > 0.0).then_some(InscribedCircle {
        center: best.center,
        radius: best.distance,
    })
}
