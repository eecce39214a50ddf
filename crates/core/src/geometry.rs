//! Viewport extent and per-frame input shared by every effect.

use glam::DVec2;

use crate::error::FxError;

/// Visible area of the page in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport, rejecting non-positive or non-finite extents.
    pub fn new(width: f64, height: f64) -> Result<Self, FxError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(FxError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Viewport extent as a vector.
    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Largest top-left position a square body of `size` can take without
    /// leaving the viewport. Floored at zero when the body is larger than
    /// the viewport.
    pub fn max_position(&self, size: f64) -> DVec2 {
        (self.extent() - DVec2::splat(size)).max(DVec2::ZERO)
    }

    /// Clamps a top-left position so a body of `size` stays inside.
    pub fn clamp_position(&self, position: DVec2, size: f64) -> DVec2 {
        position.clamp(DVec2::ZERO, self.max_position(size))
    }

    /// Top-left position that centres a body of `size`.
    pub fn centered(&self, size: f64) -> DVec2 {
        (self.extent() - DVec2::splat(size)) * 0.5
    }
}

/// Input handed to an effect on every animation frame.
///
/// `pointer` is `None` until the first pointer event arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub pointer: Option<DVec2>,
}

impl Frame {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: DVec2) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_and_negative_extents() {
        assert!(Viewport::new(0.0, 100.0).is_err());
        assert!(Viewport::new(100.0, -1.0).is_err());
        assert!(Viewport::new(f64::NAN, 100.0).is_err());
        assert!(Viewport::new(f64::INFINITY, 100.0).is_err());
    }

    #[test]
    fn max_position_subtracts_body_size() {
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        assert_eq!(vp.max_position(120.0), DVec2::new(880.0, 680.0));
    }

    #[test]
    fn max_position_floors_at_zero_for_oversized_body() {
        let vp = Viewport::new(100.0, 300.0).unwrap();
        assert_eq!(vp.max_position(120.0), DVec2::new(0.0, 180.0));
    }

    #[test]
    fn clamp_position_keeps_body_inside() {
        let vp = Viewport::new(500.0, 400.0).unwrap();
        let p = vp.clamp_position(DVec2::new(-20.0, 900.0), 100.0);
        assert_eq!(p, DVec2::new(0.0, 300.0));
    }

    #[test]
    fn centered_places_body_in_middle() {
        let vp = Viewport::new(1000.0, 800.0).unwrap();
        assert_eq!(vp.centered(120.0), DVec2::new(440.0, 340.0));
    }

    #[test]
    fn frame_with_pointer_sets_pointer() {
        let vp = Viewport::new(10.0, 10.0).unwrap();
        let frame = Frame::new(vp);
        assert!(frame.pointer.is_none());
        let frame = frame.with_pointer(DVec2::new(3.0, 4.0));
        assert_eq!(frame.pointer, Some(DVec2::new(3.0, 4.0)));
    }
}
