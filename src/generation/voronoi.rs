//! Voronoi cell construction by half-plane clipping
//!
//! Every cell starts as the bounding rectangle and is clipped against the
//! bisector of its site and each other site. Neighbors are then found by
//! matching coincident vertices between cells.

use std::time::Instant;

use glam::DVec2;
use tracing::{debug, trace};

use crate::bounds::Bounds;
use crate::cell::VoronoiCell;
use crate::geometry::clip_polygon_by_half_plane;

/// Vertices closer than this are treated as the same point when matching edges
pub const SHARED_VERTEX_TOLERANCE: f64 = 0.01;

/// Vertices closer than this to a bounding edge make a cell a boundary cell
pub const BOUNDARY_TOLERANCE: f64 = 1e-4;

/// Build every cell, including neighbor lists
///
/// Cells are index-aligned with `sites`. O(N²) clips for N sites, plus an
/// O(N² · V²) neighbor pass.
pub fn compute_cells(sites: &[DVec2], bounds: &Bounds) -> Vec<VoronoiCell> {
    let start = Instant::now();

    let mut cells = compute_cell_geometry(sites, bounds);
    assign_neighbors(&mut cells);

    let valid = cells.iter().filter(|c| c.is_valid).count();
    let boundary = cells.iter().filter(|c| c.is_boundary).count();
    debug!(
        sites = sites.len(),
        valid,
        invalid = cells.len() - valid,
        boundary,
        elapsed = ?start.elapsed(),
        "built voronoi cells"
    );

    cells
}

/// Build every cell's polygon without computing neighbors
pub fn compute_cell_geometry(sites: &[DVec2], bounds: &Bounds) -> Vec<VoronoiCell> {
    (0..sites.len())
        .map(|index| compute_cell_for_site(index, sites, bounds))
        .collect()
}

/// Build the cell of `sites[index]`
///
/// Seeded with the bounding rectangle, then clipped once per other site.
/// The first clip that leaves fewer than three vertices makes the cell
/// invalid and ends processing for it.
pub fn compute_cell_for_site(index: usize, sites: &[DVec2], bounds: &Bounds) -> VoronoiCell {
    let site = sites[index];
    let mut vertices = bounds.corners().to_vec();

    for (other_index, &other) in sites.iter().enumerate() {
        if other_index == index {
            continue;
        }

        let (midpoint, normal) = bisector(site, other);
        match clip_polygon_by_half_plane(&vertices, midpoint, normal) {
            Some(clipped) => vertices = clipped,
            None => {
                trace!(cell = index, clipped_by = other_index, "cell clipped away");
                return VoronoiCell::invalid(index, site);
            }
        }
    }

    let is_boundary = vertices
        .iter()
        .any(|&v| bounds.is_on_edge(v, BOUNDARY_TOLERANCE));

    VoronoiCell::new(index, site, vertices, is_boundary)
}

/// Half-plane separating `site` from `other`
///
/// Returns the midpoint and the unit normal pointing toward `other`. With
/// the clip convention that the positive side is outside, clipping keeps the
/// half closer to `site`. Coincident sites yield a zero normal, which leaves
/// the polygon untouched.
#[inline]
pub fn bisector(site: DVec2, other: DVec2) -> (DVec2, DVec2) {
    ((site + other) * 0.5, (other - site).normalize_or_zero())
}

/// Vertices of `a` that coincide with some vertex of `b`
///
/// Each returned vertex is at least [`SHARED_VERTEX_TOLERANCE`] away from the
/// others, in the order they appear in `a`.
pub fn shared_vertices(a: &VoronoiCell, b: &VoronoiCell) -> Vec<DVec2> {
    let mut shared: Vec<DVec2> = Vec::new();

    for &va in &a.vertices {
        let coincident = b
            .vertices
            .iter()
            .any(|&vb| va.distance(vb) < SHARED_VERTEX_TOLERANCE);
        let already_seen = shared
            .iter()
            .any(|&s| va.distance(s) < SHARED_VERTEX_TOLERANCE);

        if coincident && !already_seen {
            shared.push(va);
        }
    }

    shared
}

/// Link every pair of valid cells that share at least two vertices
fn assign_neighbors(cells: &mut [VoronoiCell]) {
    let mut pairs = Vec::new();

    for i in 0..cells.len() {
        if !cells[i].is_valid {
            continue;
        }
        for j in (i + 1)..cells.len() {
            if cells[j].is_valid && shared_vertices(&cells[i], &cells[j]).len() >= 2 {
                pairs.push((i, j));
            }
        }
    }

    for (i, j) in pairs {
        cells[i].neighbors.push(j);
        cells[j].neighbors.push(i);
    }

    for cell in cells.iter_mut() {
        cell.neighbors.sort_unstable(); // Deterministic ordering
        cell.neighbors.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::sites::uniform_sites;
    use crate::geometry::polygon_signed_area;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square_bounds() -> Bounds {
        Bounds::from_size(100.0, 100.0)
    }

    /// Cross products of consecutive edges never change sign
    fn is_convex(vertices: &[DVec2]) -> bool {
        let n = vertices.len();
        let mut sign = 0.0f64;
        for i in 0..n {
            let ab = vertices[(i + 1) % n] - vertices[i];
            let bc = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            let cross = ab.perp_dot(bc);
            if cross.abs() < 1e-9 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    #[test]
    fn test_bisector_points_toward_other_site() {
        let (mid, normal) = bisector(DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0));
        assert_eq!(mid, DVec2::new(5.0, 0.0));
        assert_eq!(normal, DVec2::X);

        let (_, normal) = bisector(DVec2::ONE, DVec2::ONE);
        assert_eq!(normal, DVec2::ZERO);
    }

    #[test]
    fn test_site_stays_strictly_inside_after_every_clip() {
        let bounds = square_bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sites = uniform_sites(&bounds, 30, &mut rng);

        for (i, &site) in sites.iter().enumerate() {
            let mut vertices = bounds.corners().to_vec();
            for (j, &other) in sites.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (mid, normal) = bisector(site, other);
                assert!((site - mid).dot(normal) < 0.0);
                vertices = clip_polygon_by_half_plane(&vertices, mid, normal)
                    .expect("a site's own cell is never clipped away");
                assert!(crate::geometry::point_in_polygon(&vertices, site));
            }
        }
    }

    #[test]
    fn test_generate_cells() {
        let bounds = Bounds::new(DVec2::splat(-500.0), DVec2::splat(500.0));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sites = uniform_sites(&bounds, 50, &mut rng);
        let cells = compute_cells(&sites, &bounds);

        assert_eq!(cells.len(), 50);

        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.id, i);
            assert_eq!(cell.site, sites[i]);
            assert!(cell.is_valid);
            assert!(cell.vertices.len() >= 3, "Cell should have at least 3 vertices");
            assert!(is_convex(&cell.vertices), "Cell {} should be convex", i);
            assert!(polygon_signed_area(&cell.vertices) > 0.0, "Cell {} winding", i);
            assert!(cell.contains_point(cell.site));
            assert!(!cell.neighbors.is_empty(), "Cell should have neighbors");
        }
    }

    #[test]
    fn test_cells_tile_bounds() {
        let bounds = Bounds::new(DVec2::splat(-500.0), DVec2::splat(500.0));
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let sites = uniform_sites(&bounds, 20, &mut rng);
        let cells = compute_cells(&sites, &bounds);

        let total: f64 = cells.iter().filter(|c| c.is_valid).map(|c| c.area()).sum();
        assert!((total - bounds.area()).abs() < bounds.area() * 1e-9);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let bounds = square_bounds();
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let sites = uniform_sites(&bounds, 40, &mut rng);
        let cells = compute_cells(&sites, &bounds);

        // If A is a neighbor of B, then B should be a neighbor of A
        for cell in &cells {
            assert!(!cell.neighbors.contains(&cell.id));
            for &neighbor_id in &cell.neighbors {
                assert!(
                    cells[neighbor_id].is_neighbor_of(cell.id),
                    "Neighbor relationship should be symmetric"
                );
            }
        }
    }

    #[test]
    fn test_site_outside_bounds_yields_invalid_cell() {
        let bounds = square_bounds();
        let sites = [DVec2::new(-50.0, 50.0), DVec2::new(10.0, 50.0), DVec2::new(60.0, 50.0)];
        let cells = compute_cells(&sites, &bounds);

        assert!(!cells[0].is_valid);
        assert!(cells[0].vertices.is_empty());
        assert!(cells[0].neighbors.is_empty());

        assert!(cells[1].is_valid);
        assert!(cells[2].is_valid);
        assert_eq!(cells[1].neighbors, vec![2]);
        assert_eq!(cells[2].neighbors, vec![1]);
    }

    #[test]
    fn test_single_site_gets_whole_bounds() {
        let bounds = square_bounds();
        let cells = compute_cells(&[DVec2::new(30.0, 40.0)], &bounds);

        assert_eq!(cells.len(), 1);
        assert!(cells[0].is_valid);
        assert!(cells[0].is_boundary);
        assert_eq!(cells[0].vertices, bounds.corners().to_vec());
        assert!(cells[0].neighbors.is_empty());
    }

    #[test]
    fn test_interior_cell_is_not_boundary() {
        let bounds = square_bounds();
        let mut sites = vec![DVec2::new(50.0, 50.0)];
        for i in 0..8 {
            let angle = i as f64 * std::f64::consts::TAU / 8.0;
            sites.push(DVec2::new(50.0, 50.0) + DVec2::from_angle(angle) * 30.0);
        }
        let cells = compute_cells(&sites, &bounds);

        assert!(cells[0].is_valid);
        assert!(!cells[0].is_boundary);
        assert_eq!(cells[0].neighbor_count(), 8);
        assert!(cells[1..].iter().all(|c| c.is_boundary));
    }

    #[test]
    fn test_shared_vertices_corner_contact() {
        let bounds = square_bounds();
        let sites = [
            DVec2::new(25.0, 25.0),
            DVec2::new(75.0, 25.0),
            DVec2::new(25.0, 75.0),
            DVec2::new(75.0, 75.0),
        ];
        let cells = compute_cells(&sites, &bounds);

        // Diagonal cells only touch at the center
        assert_eq!(shared_vertices(&cells[0], &cells[3]), vec![DVec2::new(50.0, 50.0)]);
        assert_eq!(shared_vertices(&cells[0], &cells[1]).len(), 2);
        assert_eq!(cells[0].neighbors, vec![1, 2]);
        assert_eq!(cells[3].neighbors, vec![1, 2]);
    }
}
