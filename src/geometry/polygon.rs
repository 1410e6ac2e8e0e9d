//! Area, centroid, containment and distance queries on simple polygons

use glam::DVec2;

/// Below this magnitude the shoelace sum is treated as zero (collinear polygon)
const DEGENERATE_AREA_EPSILON: f64 = 1e-10;

/// Signed shoelace area; positive for counter-clockwise winding in y-up coordinates
pub fn polygon_signed_area(polygon: &[DVec2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    edges(polygon).map(|(a, b)| a.perp_dot(b)).sum::<f64>() * 0.5
}

/// Unsigned area
pub fn polygon_area(polygon: &[DVec2]) -> f64 {
    polygon_signed_area(polygon).abs()
}

/// Area-weighted centroid
///
/// Falls back to the arithmetic mean of the vertices when the signed area is
/// numerically zero. An empty polygon has its centroid at the origin.
pub fn polygon_centroid(polygon: &[DVec2]) -> DVec2 {
    if polygon.is_empty() {
        return DVec2::ZERO;
    }

    let mut twice_area = 0.0;
    let mut weighted = DVec2::ZERO;
    for (a, b) in edges(polygon) {
        let cross = a.perp_dot(b);
        twice_area += cross;
        weighted += (a + b) * cross;
    }

    if twice_area.abs() > DEGENERATE_AREA_EPSILON {
        weighted / (3.0 * twice_area)
    } else {
        polygon.iter().copied().sum::<DVec2>() / polygon.len() as f64
    }
}

/// Winding-number containment test
///
/// Works for either winding direction. Points exactly on an edge may be
/// reported inside or outside depending on which edge they sit on and on
/// floating-point rounding. Callers that need a definite answer on the
/// boundary must apply their own tolerance.
pub fn point_in_polygon(polygon: &[DVec2], point: DVec2) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut winding = 0i32;
    for (a, b) in edges(polygon) {
        let side = (b - a).perp_dot(point - a);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Minimum distance from `point` to any edge of the polygon
///
/// Returns `f64::INFINITY` for an empty polygon.
pub fn distance_to_polygon_boundary(polygon: &[DVec2], point: DVec2) -> f64 {
    edges(polygon)
        .map(|(a, b)| distance_to_segment(point, a, b))
        .fold(f64::INFINITY, f64::min)
}

/// Distance to the boundary, positive inside the polygon and negative outside
pub fn signed_distance_to_polygon(polygon: &[DVec2], point: DVec2) -> f64 {
    let distance = distance_to_polygon_boundary(polygon, point);
    if point_in_polygon(polygon, point) {
        distance
    } else {
        -distance
    }
}

/// Axis-aligned bounding box `(min, max)`, or `None` for an empty polygon
pub fn polygon_bounding_box(polygon: &[DVec2]) -> Option<(DVec2, DVec2)> {
    let first = *polygon.first()?;
    Some(
        polygon
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}

/// Order vertices counter-clockwise by angle around their mean
///
/// Useful for turning an unordered vertex set of a convex polygon into a
/// proper loop. Fewer than three vertices are returned as given.
pub fn sort_vertices_by_angle(vertices: &[DVec2]) -> Vec<DVec2> {
    if vertices.len() < 3 {
        return vertices.to_vec();
    }

    let mean = vertices.iter().copied().sum::<DVec2>() / vertices.len() as f64;

    let mut with_angles: Vec<(DVec2, f64)> = vertices
        .iter()
        .map(|&v| {
            let to_v = v - mean;
            (v, to_v.y.atan2(to_v.x))
        })
        .collect();

    with_angles.sort_by(|a, b| a.1.total_cmp(&b.1));

    with_angles.into_iter().map(|(v, _)| v).collect()
}

/// Iterate the polygon's edges including the closing edge
fn edges(polygon: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}
