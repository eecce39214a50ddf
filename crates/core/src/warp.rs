//! Warp functions for displacement-field generation.
//!
//! A [`Warp`] maps a normalized coordinate `(u, v)` in `[0, 1]²` to the
//! normalized coordinate the compositor should sample instead. Warps are plain
//! function values so fields can store and re-run them on resize.

use glam::DVec2;

/// Normalized-coordinate warp used to build a [`DisplacementField`](crate::DisplacementField).
pub type Warp = fn(DVec2) -> DVec2;

/// Cubic Hermite interpolation of `t` between edges `a` and `b`, clamped to [0, 1].
///
/// `a > b` is allowed and produces a falling curve.
pub fn smooth_step(a: f64, b: f64, t: f64) -> f64 {
    let t = ((t - a) / (b - a)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Signed distance from `p` to a rounded rectangle centred at the origin
/// with half extents `half` and corner radius `radius`.
pub fn rounded_rect_sdf(p: DVec2, half: DVec2, radius: f64) -> f64 {
    let q = p.abs() - half + DVec2::splat(radius);
    q.max_element().min(0.0) + q.max(DVec2::ZERO).length() - radius
}

/// Circular lens: pixels near the centre barely move, pixels towards the rim
/// are pulled inwards, everything at or beyond radius 0.5 samples the centre.
pub fn liquid_glass(uv: DVec2) -> DVec2 {
    let centered = uv - DVec2::splat(0.5);
    let displacement = smooth_step(0.5, 0.0, centered.length());
    let scaled = smooth_step(0.0, 1.0, displacement * 0.85);
    centered * scaled + DVec2::splat(0.5)
}

/// Pill-shaped lens for rectangular glass panels.
pub fn rounded_rect(uv: DVec2) -> DVec2 {
    let centered = uv - DVec2::splat(0.5);
    let distance = rounded_rect_sdf(centered, DVec2::new(0.3, 0.2), 0.6);
    let displacement = smooth_step(0.8, 0.0, distance - 0.15);
    let scaled = smooth_step(0.0, 1.0, displacement);
    centered * scaled + DVec2::splat(0.5)
}

/// No-op warp. Generating a field from it always fails as degenerate.
pub fn identity(uv: DVec2) -> DVec2 {
    uv
}
