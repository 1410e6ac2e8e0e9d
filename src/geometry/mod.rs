//! Stateless polygon algorithms
//!
//! Polygons are slices of `DVec2` vertices in order; the closing edge from
//! the last vertex back to the first is implicit.

mod clip;
mod poisson;
mod polygon;
mod polylabel;

pub use clip::clip_polygon_by_half_plane;
pub use poisson::{poisson_disk_sampling, MAX_CANDIDATE_ATTEMPTS};
pub use polygon::{
    distance_to_polygon_boundary, distance_to_segment, point_in_polygon, polygon_area,
    polygon_bounding_box, polygon_centroid, polygon_signed_area, signed_distance_to_polygon,
    sort_vertices_by_angle,
};
pub use polylabel::{max_inscribed_circle, InscribedCircle};
