//! Geometry helpers for vertex placement

use glam::Vec2;

/// Squared distance from `p` to the segment `a`-`b`.
///
/// Projects `p` onto the infinite line through `a` and `b` and clamps
/// the projection parameter to `[0, 1]`. A zero-length segment clamps
/// to `t = 0`, i.e. the segment is treated as the point `a`. Squared
/// distance is enough for edge scoring, where only the ordering
/// matters.
pub fn distance_squared_point_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let ap = p - a;

    let ab2 = ab.dot(ab);
    let t = if ab2 > 0.0 {
        (ap.dot(ab) / ab2).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = a + ab * t;
    (p - closest).length_squared()
}
