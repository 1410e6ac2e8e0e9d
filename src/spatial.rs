//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree over diagram sites
///
/// Provides O(log n) nearest-site lookups, which map a position to the
/// cell owning it without scanning every site.
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    len: usize,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len)
            .finish()
    }
}

impl SpatialIndex {
    /// Build spatial index from sites
    ///
    /// The item stored for each point is its index in `sites`, which is also
    /// the cell ID.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_layout::*;
    ///
    /// let sites = vec![
    ///     DVec2::new(10.0, 10.0),
    ///     DVec2::new(90.0, 10.0),
    ///     DVec2::new(50.0, 90.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(15.0, 5.0)), 0);
    /// ```
    pub fn new(sites: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
            len: points.len(),
        }
    }

    /// Find the index of the site nearest to a position
    ///
    /// The index must have been built from at least one site.
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }

    /// Number of indexed sites
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
