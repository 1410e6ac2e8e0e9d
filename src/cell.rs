//! Voronoi Cell Structure
//!
//! Represents an individual convex cell of a bounded 2D Voronoi diagram.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{
    distance_to_polygon_boundary, max_inscribed_circle, point_in_polygon, polygon_area,
    polygon_centroid, InscribedCircle,
};

/// A single cell of a Voronoi diagram
///
/// Each cell represents the region of the bounding rectangle that is closer
/// to its site than to any other site:
/// - An `id` equal to the index of its site in the diagram
/// - The `site` that generated it
/// - A convex, consistently wound vertex loop
/// - Neighbor connectivity for graph traversal
///
/// # Validity
///
/// A cell whose polygon was clipped away entirely is marked invalid and
/// keeps no vertices. Invalid cells never appear in neighbor lists and are
/// skipped by every diagram query.
///
/// # Winding
///
/// Vertices follow the winding of the bounding rectangle corners, which is
/// counter-clockwise in y-up coordinates (clockwise on a y-down screen).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of this cell, equal to the index of its site
    pub id: usize,

    /// Site location this cell was built around
    pub site: DVec2,

    /// Boundary polygon; at least three vertices when `is_valid`
    pub vertices: Vec<DVec2>,

    /// IDs of adjacent cells, sorted and unique
    ///
    /// Cells are neighbors if they share an edge. Touching at a single
    /// corner does not count.
    pub neighbors: Vec<usize>,

    /// False when clipping left fewer than three vertices
    pub is_valid: bool,

    /// True if any vertex lies on the bounding rectangle
    pub is_boundary: bool,
}

impl VoronoiCell {
    /// Create a valid cell from an already clipped polygon
    ///
    /// This is typically called during diagram generation, not by user code.
    pub fn new(id: usize, site: DVec2, vertices: Vec<DVec2>, is_boundary: bool) -> Self {
        Self {
            id,
            site,
            is_valid: vertices.len() >= 3,
            vertices,
            neighbors: Vec::new(),
            is_boundary,
        }
    }

    /// Create an invalid cell with no geometry
    pub fn invalid(id: usize, site: DVec2) -> Self {
        Self {
            id,
            site,
            vertices: Vec::new(),
            neighbors: Vec::new(),
            is_valid: false,
            is_boundary: false,
        }
    }

    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this cell is a neighbor of another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.binary_search(&other_cell_id).is_ok()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Area of the cell polygon; zero for invalid cells
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    /// Area-weighted centroid of the cell polygon
    ///
    /// Falls back to the vertex mean for a degenerate polygon and to the
    /// origin for a cell without vertices.
    pub fn centroid(&self) -> DVec2 {
        polygon_centroid(&self.vertices)
    }

    /// Check whether a point lies inside the cell
    ///
    /// Always false for invalid cells. Points exactly on an edge shared with
    /// a neighbor may be reported in either cell.
    pub fn contains_point(&self, point: DVec2) -> bool {
        self.is_valid && point_in_polygon(&self.vertices, point)
    }

    /// Distance from a point to the nearest edge of the cell
    pub fn distance_to_boundary(&self, point: DVec2) -> f64 {
        distance_to_polygon_boundary(&self.vertices, point)
    }

    /// Largest circle that fits inside the cell, within `epsilon`
    ///
    /// Handy for placing content that must not overlap the cell edges.
    pub fn max_inscribed_circle(&self, epsilon: f64) -> Option<InscribedCircle> {
        if !self.is_valid {
            return None;
        }
        max_inscribed_circle(&self.vertices, epsilon)
    }

    /// Euclidean distance between the sites of two cells
    pub fn distance_to(&self, other: &VoronoiCell) -> f64 {
        self.site.distance(other.site)
    }
}
