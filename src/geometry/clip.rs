//! Half-plane clipping (Sutherland-Hodgman against a single plane)

use glam::DVec2;

/// Clip a polygon against a half-plane
///
/// Removes the part of `polygon` on the positive side of the line through
/// `plane_point` with normal `plane_normal`: a vertex `v` is outside when
/// `dot(v - plane_point, plane_normal) > 0`. Vertices exactly on the line
/// are kept, and are never emitted twice when an edge leaves or enters the
/// half-plane through them.
///
/// Returns `None` when fewer than three vertices survive; the polygon was
/// clipped away.
///
/// A zero normal classifies every vertex as inside, so the polygon comes
/// back unchanged.
pub fn clip_polygon_by_half_plane(
    polygon: &[DVec2],
    plane_point: DVec2,
    plane_normal: DVec2,
) -> Option<Vec<DVec2>> {
    let mut prev = *polygon.last()?;
    let mut prev_side = (prev - plane_point).dot(plane_normal);

    let mut result = Vec::with_capacity(polygon.len() + 1);

    for &curr in polygon {
        let curr_side = (curr - plane_point).dot(plane_normal);

        match (prev_side <= 0.0, curr_side <= 0.0) {
            (true, true) => result.push(curr),
            (true, false) => {
                // Leaving. A previous vertex on the line was already emitted.
                if prev_side < 0.0 {
                    result.push(intersect(prev, curr, prev_side, curr_side));
                }
            }
            (false, true) => {
                // Entering. A current vertex on the line is its own intersection.
                if curr_side < 0.0 {
                    result.push(intersect(prev, curr, prev_side, curr_side));
                }
                result.push(curr);
            }
            (false, false) => {}
        }

        prev = curr;
        prev_side = curr_side;
    }

    (result.len() >= 3).then_some(result)
}

#[inline]
fn intersect(a: DVec2, b: DVec2, side_a: f64, side_b: f64) -> DVec2 {
    a.lerp(b, side_a / (side_a - side_b))
}
