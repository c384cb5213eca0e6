//! Circle collision and footprint geometry.
//!
//! Units use circular hitboxes. Hazard footprints are either circles
//! (rocket blasts) or oriented rectangles (lazer beams).

use glam::Vec2;

/// Euclidean length of a vector.
pub fn norm(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// True iff the two circles overlap. Touching circles do not penetrate.
pub fn penetrates(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    norm(pos_a - pos_b) < radius_a + radius_b
}

/// Vector to subtract from `pos_a` so that circle A no longer overlaps circle B.
///
/// The magnitude is the overlap depth, zero when the circles do not penetrate.
/// Subtracting it moves A away from B along `pos_a - pos_b`. Coincident centers
/// separate along +X.
pub fn penetration_vector(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Vec2 {
    let delta = pos_a - pos_b;
    let distance = norm(delta);
    let overlap = (radius_a + radius_b) - distance;
    if overlap <= 0.0 {
        return Vec2::ZERO;
    }

    let separation = if distance > 0.0 {
        delta / distance
    } else {
        Vec2::X
    };
    -separation * overlap
}

/// Circle vs. rectangle of `rect_size` centered at `rect_center`, rotated by `angle` radians.
pub fn circle_intersects_oriented_rect(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
    angle: f32,
) -> bool {
    // Move the circle into the rectangle's local frame.
    let local = Vec2::from_angle(-angle).rotate(center - rect_center);
    let half = rect_size / 2.0;
    let closest = local.clamp(-half, half);
    norm(local - closest) < radius
}

/// Half extents of the axis-aligned box enclosing a rotated rectangle.
pub fn rotated_half_extents(size: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let half = size / 2.0;
    Vec2::new(
        half.x * cos.abs() + half.y * sin.abs(),
        half.x * sin.abs() + half.y * cos.abs(),
    )
}

/// Whether advancing the clock from `t0` to `t1` crosses a multiple of `interval`.
pub fn crosses_interval(t0: f32, t1: f32, interval: f32) -> bool {
    debug_assert!(interval > 0.0, "interval must be positive");
    (t0 / interval).floor() != (t1 / interval).floor()
}
