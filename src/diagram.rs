//! VoronoiDiagram main structure and read-only queries

use glam::DVec2;

use crate::bounds::Bounds;
use crate::cell::VoronoiCell;
use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::generation::{
    compute_cells, generate_sites, generate_sites_with_sampler, shared_vertices, SiteSampler,
};
use crate::seed::RandomStream;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete bounded Voronoi diagram
///
/// Created atomically by one build pass and never mutated afterwards. Cells
/// are index-aligned with the sites: `cells()[i].site == sites()[i]`, and
/// cell IDs are stable for the lifetime of the diagram.
///
/// # Examples
///
/// ```
/// use rust_voronoi_layout::*;
///
/// let config = LayoutConfigBuilder::new()
///     .seed("village")
///     .bounds(Bounds::from_size(400.0, 300.0))
///     .unwrap()
///     .site_count(30)
///     .build()
///     .unwrap();
///
/// let diagram = VoronoiDiagram::generate(&config).unwrap();
/// println!("Generated {} cells", diagram.cell_count());
///
/// if let Some(index) = diagram.find_cell_containing_point(DVec2::new(200.0, 150.0)) {
///     println!("Center lies in cell {}", index);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    /// All cells (indexed by cell ID)
    cells: Vec<VoronoiCell>,

    /// Rectangle the cells were clipped to
    bounds: Bounds,

    /// Sites in the order they were supplied
    sites: Vec<DVec2>,

    /// Seed that produced the sites (empty if the sites were supplied directly)
    seed: String,

    /// Spatial index over the sites (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl VoronoiDiagram {
    /// Generate a diagram from a configuration
    ///
    /// Sites are placed according to the configured strategy using a random
    /// stream derived from the configuration's seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration's bounds are invalid,
    /// before any site is sampled.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_layout::*;
    ///
    /// let config = LayoutConfigBuilder::new()
    ///     .seed("TestSeed123")
    ///     .strategy(SiteStrategy::Relaxed)
    ///     .relaxation_iterations(2)
    ///     .site_count(15)
    ///     .build()
    ///     .unwrap();
    ///
    /// let diagram = VoronoiDiagram::generate(&config).unwrap();
    /// assert_eq!(diagram.seed(), "TestSeed123");
    /// ```
    pub fn generate(config: &LayoutConfig) -> Result<Self> {
        config.bounds.validate()?;
        let mut stream = RandomStream::new(&config.seed);
        let sites = generate_sites(config, &mut stream);
        Self::from_sites(sites, config.bounds, stream.seed())
    }

    /// Generate a diagram with a custom site sampler
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_layout::*;
    ///
    /// let config = LayoutConfigBuilder::new().seed("custom").site_count(10).build().unwrap();
    /// let sampler = PoissonDiscSampler::new(40.0);
    /// let diagram = VoronoiDiagram::generate_with_sampler(&config, &sampler).unwrap();
    /// assert!(diagram.cell_count() <= 10);
    /// ```
    pub fn generate_with_sampler<S>(config: &LayoutConfig, sampler: &S) -> Result<Self>
    where
        S: SiteSampler,
    {
        config.bounds.validate()?;
        let mut stream = RandomStream::new(&config.seed);
        let sites = generate_sites_with_sampler(config, sampler, &mut stream);
        Self::from_sites(sites, config.bounds, stream.seed())
    }

    /// Build a diagram from explicit sites
    ///
    /// Sites outside the bounds are accepted; their cells may come out
    /// invalid. Coincident sites produce identical, overlapping cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for invalid bounds and `InvalidSite` for a
    /// site with a non-finite coordinate.
    pub fn from_sites(sites: Vec<DVec2>, bounds: Bounds, seed: impl Into<String>) -> Result<Self> {
        bounds.validate()?;
        if let Some(index) = sites.iter().position(|s| !s.is_finite()) {
            return Err(LayoutError::InvalidSite {
                index,
                reason: format!("coordinates must be finite (got {:?})", sites[index]),
            });
        }

        let cells = compute_cells(&sites, &bounds);

        #[cfg(feature = "spatial-index")]
        let spatial_index = (!sites.is_empty()).then(|| SpatialIndex::new(&sites));

        Ok(Self {
            cells,
            bounds,
            sites,
            seed: seed.into(),
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    /// Seed the sites were generated from
    #[inline]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Get the number of cells, valid or not
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the number of valid cells
    pub fn valid_cell_count(&self) -> usize {
        self.valid_cells().count()
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// Get all cells as a slice
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Iterate over valid cells only
    pub fn valid_cells(&self) -> impl Iterator<Item = &VoronoiCell> + '_ {
        self.cells.iter().filter(|c| c.is_valid)
    }

    /// Get neighbor IDs for a cell
    ///
    /// Returns empty slice if cell ID is invalid.
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of the areas of all valid cells
    ///
    /// Equals the bounds area when every site lies strictly inside the bounds.
    pub fn total_area(&self) -> f64 {
        self.valid_cells().map(VoronoiCell::area).sum()
    }

    /// Find the cell containing a point
    ///
    /// Linear scan over valid cells in storage order; the first match wins.
    /// A point on an edge shared by two cells may be attributed to either,
    /// and a point outside the bounds is in no cell.
    pub fn find_cell_containing_point(&self, point: DVec2) -> Option<usize> {
        self.valid_cells()
            .find(|c| c.contains_point(point))
            .map(|c| c.id)
    }

    /// Find the cell whose site is nearest to a point
    ///
    /// Linear scan by squared distance; ties resolve to the lowest index.
    /// Returns `None` only for a diagram without sites.
    pub fn find_closest_cell_by_site(&self, point: DVec2) -> Option<usize> {
        self.sites
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, site)| {
                let d = point.distance_squared(*site);
                match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((i, d)),
                }
            })
            .map(|(i, _)| i)
    }

    /// Find the cell nearest to a position (requires spatial-index feature)
    ///
    /// Uses KD-tree spatial index for O(log n) nearest-site lookup. Agrees
    /// with [`VoronoiDiagram::find_closest_cell_by_site`] except possibly
    /// on exact ties.
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<usize> {
        self.spatial_index
            .as_ref()
            .map(|index| index.find_nearest(position))
    }

    /// Get the edge shared by two cells
    ///
    /// Returns the first two vertices of `cell_a` that coincide with vertices
    /// of `cell_b`. `None` if either ID is out of range or fewer than two
    /// vertices coincide (cells that only touch at a corner share no edge).
    pub fn get_shared_edge(&self, cell_a: usize, cell_b: usize) -> Option<(DVec2, DVec2)> {
        let a = self.cells.get(cell_a)?;
        let b = self.cells.get(cell_b)?;

        match shared_vertices(a, b).as_slice() {
            [start, end, ..] => Some((*start, *end)),
            _ => None,
        }
    }

    /// Find cells within a given hop count from a center cell (BFS)
    ///
    /// # Returns
    ///
    /// Cell IDs reachable within `hops` neighbor steps, including the center
    /// cell, sorted ascending. Empty if `center_id` is out of range or
    /// refers to an invalid cell.
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        match self.cells.get(center_id) {
            Some(cell) if cell.is_valid => {}
            _ => return vec![],
        }

        let mut visited = std::collections::HashSet::new();
        let mut current = vec![center_id];
        visited.insert(center_id);

        // BFS with hop limit
        for _ in 0..hops {
            let mut next = Vec::new();
            for &cell_id in &current {
                for &neighbor in self.get_neighbors(cell_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut cells: Vec<usize> = visited.into_iter().collect();
        cells.sort_unstable();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfigBuilder, SiteStrategy};
    use crate::generation::UniformSampler;

    fn square_bounds() -> Bounds {
        Bounds::from_size(100.0, 100.0)
    }

    fn grid_diagram() -> VoronoiDiagram {
        let sites = vec![
            DVec2::new(25.0, 25.0),
            DVec2::new(75.0, 25.0),
            DVec2::new(25.0, 75.0),
            DVec2::new(75.0, 75.0),
        ];
        VoronoiDiagram::from_sites(sites, square_bounds(), "").unwrap()
    }

    fn row_diagram() -> VoronoiDiagram {
        let sites = vec![
            DVec2::new(25.0, 50.0),
            DVec2::new(50.0, 50.0),
            DVec2::new(75.0, 50.0),
        ];
        VoronoiDiagram::from_sites(sites, square_bounds(), "").unwrap()
    }

    #[test]
    fn test_fixed_sites() {
        let diagram = grid_diagram();

        assert_eq!(diagram.cell_count(), 4);
        assert_eq!(diagram.sites().len(), 4);

        for (i, cell) in diagram.cells().iter().enumerate() {
            assert!(cell.is_valid);
            assert!(cell.vertex_count() >= 3);
            assert!(cell.is_boundary, "Corner cells should be boundary cells");
            assert_eq!(cell.site, diagram.sites()[i]);
            assert!(cell.contains_point(diagram.sites()[i]), "Site should be in its own cell");
        }
    }

    #[test]
    fn test_find_cell_containing_point() {
        let diagram = grid_diagram();

        assert_eq!(diagram.find_cell_containing_point(DVec2::new(20.0, 20.0)), Some(0));
        assert_eq!(diagram.find_cell_containing_point(DVec2::new(80.0, 20.0)), Some(1));
        assert_eq!(diagram.find_cell_containing_point(DVec2::new(20.0, 80.0)), Some(2));
        assert_eq!(diagram.find_cell_containing_point(DVec2::new(80.0, 80.0)), Some(3));
        assert_eq!(diagram.find_cell_containing_point(DVec2::new(-10.0, -10.0)), None);
    }

    #[test]
    fn test_neighbors() {
        let diagram = row_diagram();

        // Middle cell should have 2 neighbors
        assert_eq!(diagram.get_neighbors(1), &[0, 2]);

        // End cells should have 1 neighbor each
        assert_eq!(diagram.get_neighbors(0), &[1]);
        assert_eq!(diagram.get_neighbors(2), &[1]);
    }

    #[test]
    fn test_shared_edge() {
        let diagram = row_diagram();

        let (start, end) = diagram.get_shared_edge(0, 1).unwrap();
        assert!((start.x - 37.5).abs() < 1e-9);
        assert!((end.x - 37.5).abs() < 1e-9);
        assert!((start - end).length() > 99.0);

        assert!(diagram.get_shared_edge(1, 2).is_some());
        assert!(diagram.get_shared_edge(0, 2).is_none());
        assert!(diagram.get_shared_edge(0, 17).is_none());
    }

    #[test]
    fn test_neighbors_and_shared_edges_agree() {
        let config = LayoutConfigBuilder::new()
            .seed("edges")
            .site_count(40)
            .build()
            .unwrap();
        let diagram = VoronoiDiagram::generate(&config).unwrap();

        for a in 0..diagram.cell_count() {
            for b in 0..diagram.cell_count() {
                if a == b {
                    continue;
                }
                let adjacent = diagram.cells()[a].is_neighbor_of(b);
                assert_eq!(adjacent, diagram.get_shared_edge(a, b).is_some(), "cells {a} and {b}");
            }
        }
    }

    #[test]
    fn test_random_generation_tiles_bounds() {
        let config = LayoutConfigBuilder::new()
            .seed("TestSeed123")
            .site_count(20)
            .build()
            .unwrap();
        let diagram = VoronoiDiagram::generate(&config).unwrap();

        assert_eq!(diagram.cell_count(), 20);
        assert_eq!(diagram.valid_cell_count(), 20);

        let bounds_area = 1000.0 * 1000.0;
        assert!((diagram.total_area() - bounds_area).abs() < bounds_area * 1e-9);
    }

    #[test]
    fn test_generation_determinism() {
        let config = LayoutConfigBuilder::new()
            .seed("repeatable")
            .site_count(25)
            .strategy(SiteStrategy::Relaxed)
            .relaxation_iterations(2)
            .build()
            .unwrap();

        let a = VoronoiDiagram::generate(&config).unwrap();
        let b = VoronoiDiagram::generate(&config).unwrap();

        assert_eq!(a.sites(), b.sites());
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_every_site_in_own_cell() {
        for strategy in [SiteStrategy::Uniform, SiteStrategy::PoissonDisc, SiteStrategy::Relaxed] {
            let config = LayoutConfigBuilder::new()
                .seed("own-cell")
                .site_count(50)
                .strategy(strategy)
                .min_site_distance(30.0)
                .relaxation_iterations(3)
                .build()
                .unwrap();
            let diagram = VoronoiDiagram::generate(&config).unwrap();

            for cell in diagram.valid_cells() {
                assert!(cell.contains_point(cell.site));
                assert_eq!(diagram.find_cell_containing_point(cell.site), Some(cell.id));
            }
        }
    }

    #[test]
    fn test_find_closest_cell_by_site() {
        let diagram = grid_diagram();

        assert_eq!(diagram.find_closest_cell_by_site(DVec2::new(10.0, 10.0)), Some(0));
        assert_eq!(diagram.find_closest_cell_by_site(DVec2::new(90.0, 60.0)), Some(3));
        // Equidistant to all four sites: first index wins
        assert_eq!(diagram.find_closest_cell_by_site(DVec2::new(50.0, 50.0)), Some(0));
        // Works outside the bounds too
        assert_eq!(diagram.find_closest_cell_by_site(DVec2::new(500.0, -20.0)), Some(1));

        let empty = VoronoiDiagram::from_sites(vec![], square_bounds(), "").unwrap();
        assert_eq!(empty.find_closest_cell_by_site(DVec2::ZERO), None);
        assert_eq!(empty.find_cell_containing_point(DVec2::ZERO), None);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at_matches_linear_scan() {
        let config = LayoutConfigBuilder::new().seed("kd").site_count(60).build().unwrap();
        let diagram = VoronoiDiagram::generate(&config).unwrap();

        for i in 0..20 {
            let p = DVec2::new(-490.0 + i as f64 * 49.0, 470.0 - i as f64 * 47.0);
            assert_eq!(diagram.find_cell_at(p), diagram.find_closest_cell_by_site(p));
        }

        let empty = VoronoiDiagram::from_sites(vec![], square_bounds(), "").unwrap();
        assert_eq!(empty.find_cell_at(DVec2::ZERO), None);
    }

    #[test]
    fn test_find_cells_within_radius() {
        let diagram = row_diagram();

        assert_eq!(diagram.find_cells_within_radius(0, 0), vec![0]);
        assert_eq!(diagram.find_cells_within_radius(0, 1), vec![0, 1]);
        assert_eq!(diagram.find_cells_within_radius(0, 2), vec![0, 1, 2]);
        assert_eq!(diagram.find_cells_within_radius(1, 1), vec![0, 1, 2]);
        assert!(diagram.find_cells_within_radius(99, 3).is_empty());
    }

    #[test]
    fn test_invalid_cells_are_skipped() {
        let sites = vec![DVec2::new(-50.0, 50.0), DVec2::new(10.0, 50.0), DVec2::new(60.0, 50.0)];
        let diagram = VoronoiDiagram::from_sites(sites, square_bounds(), "").unwrap();

        assert_eq!(diagram.cell_count(), 3);
        assert_eq!(diagram.valid_cell_count(), 2);
        assert!(!diagram.get_cell(0).unwrap().is_valid);
        assert_eq!(diagram.find_cell_containing_point(DVec2::new(1.0, 50.0)), Some(1));
        assert!(diagram.get_shared_edge(0, 1).is_none());
        assert!(diagram.find_cells_within_radius(0, 2).is_empty());
        assert!((diagram.total_area() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_sites_rejects_bad_input() {
        let result = VoronoiDiagram::from_sites(
            vec![DVec2::new(1.0, 1.0), DVec2::new(f64::NAN, 2.0)],
            square_bounds(),
            "",
        );
        assert!(matches!(result, Err(LayoutError::InvalidSite { index: 1, .. })));

        let result = VoronoiDiagram::from_sites(vec![], Bounds::from_size(-1.0, 1.0), "");
        assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_generate_rejects_invalid_bounds() {
        let mut config = LayoutConfigBuilder::new().seed("flat").build().unwrap();
        config.bounds = Bounds::from_size(0.0, 10.0);

        assert!(matches!(
            VoronoiDiagram::generate(&config),
            Err(LayoutError::InvalidConfig(_))
        ));
        assert!(matches!(
            VoronoiDiagram::generate_with_sampler(&config, &UniformSampler),
            Err(LayoutError::InvalidConfig(_))
        ));

        config.bounds = Bounds::new(DVec2::new(0.0, f64::NAN), DVec2::splat(10.0));
        config.strategy = SiteStrategy::PoissonDisc;
        assert!(VoronoiDiagram::generate(&config).is_err());
    }

    #[test]
    fn test_get_cell() {
        let diagram = grid_diagram();
        assert!(diagram.get_cell(0).is_some());
        assert!(diagram.get_cell(diagram.cell_count()).is_none());
        assert!(diagram.get_neighbors(999_999).is_empty());
    }
}
