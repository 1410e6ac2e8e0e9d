//! Poisson-disc sampling inside a polygon (Bridson's algorithm)

use glam::DVec2;
use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::TAU;

use super::polygon::{point_in_polygon, polygon_bounding_box};

/// Candidates tried around an active point before it is retired
pub const MAX_CANDIDATE_ATTEMPTS: usize = 30;

/// Tries at placing the very first point inside the polygon
const INITIAL_POINT_ATTEMPTS: usize = 100;

/// Sparse acceleration grid with at most one point per cell
///
/// Cells are `radius / sqrt(2)` wide, so a cell's diagonal equals the radius
/// and two accepted points can never share a cell. Only occupied cells are
/// stored, so memory grows with the number of points rather than with the
/// sampled area.
struct SampleGrid {
    origin: DVec2,
    cell_size: f64,
    cells: HashMap<(i64, i64), usize>,
}

impl SampleGrid {
    fn new(origin: DVec2, radius: f64) -> Self {
        Self {
            origin,
            cell_size: radius / std::f64::consts::SQRT_2,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, point: DVec2) -> (i64, i64) {
        let local = ((point - self.origin) / self.cell_size).floor();
        (local.x as i64, local.y as i64)
    }

    fn insert(&mut self, point: DVec2, index: usize) {
        let key = self.cell_of(point);
        self.cells.insert(key, index);
    }

    /// True if no stored point lies closer than `radius` to `candidate`
    fn is_far_enough(&self, candidate: DVec2, points: &[DVec2], radius: f64) -> bool {
        let (col, row) = self.cell_of(candidate);
        let radius_sq = radius * radius;

        // 5x5 neighborhood: two cells in each direction cover the full radius
        for r in row - 2..=row + 2 {
            for c in col - 2..=col + 2 {
                if let Some(&index) = self.cells.get(&(c, r)) {
                    if points[index].distance_squared(candidate) < radius_sq {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Generate points inside `polygon` that are pairwise at least `radius` apart
///
/// Starts from one random point inside the polygon, then repeatedly picks a
/// random active point and tries [`MAX_CANDIDATE_ATTEMPTS`] candidates in the
/// annulus `[radius, 2 * radius)` around it. Accepted candidates become
/// active; an active point with no accepted candidate is retired. Stops
/// when no active point is left or `max_points` points exist.
///
/// Returns an empty vector for degenerate input (fewer than three vertices,
/// a non-positive or non-finite radius, `max_points == 0`) or when no
/// starting point inside the polygon could be found.
pub fn poisson_disk_sampling<R: Rng>(
    polygon: &[DVec2],
    radius: f64,
    max_points: usize,
    rng: &mut R,
) -> Vec<DVec2> {
    if polygon.len() < 3 || max_points == 0 || !(radius > 0.0) || !radius.is_finite() {
        return Vec::new();
    }
    let Some((min, max)) = polygon_bounding_box(polygon) else {
        return Vec::new();
    };
    if !(max.x > min.x && max.y > min.y) {
        return Vec::new();
    }

    let Some(first) = (0..INITIAL_POINT_ATTEMPTS)
        .map(|_| DVec2::new(rng.gen_range(min.x..max.x), rng.gen_range(min.y..max.y)))
        .find(|&p| point_in_polygon(polygon, p))
    else {
        return Vec::new();
    };

    let mut grid = SampleGrid::new(min, radius);
    let mut points = vec![first];
    let mut active = vec![0usize];
    grid.insert(first, 0);

    while !active.is_empty() && points.len() < max_points {
        let slot = rng.gen_range(0..active.len());
        let center = points[active[slot]];

        let mut accepted = false;
        for _ in 0..MAX_CANDIDATE_ATTEMPTS {
            let angle = rng.gen::<f64>() * TAU;
            let distance = rng.gen_range(radius..radius * 2.0);
            let candidate = center + DVec2::from_angle(angle) * distance;

            if point_in_polygon(polygon, candidate) && grid.is_far_enough(candidate, &points, radius) {
                let index = points.len();
                points.push(candidate);
                active.push(index);
                grid.insert(candidate, index);
                accepted = true;
                break;
            }
        }

        if !accepted {
            active.swap_remove(slot);
        }
    }

    points
}
