//! The `Effect` trait every animated page effect implements.
//!
//! The trait is object-safe so the bindings and the CLI can hold a mix of
//! effects as `dyn Effect` and drive them from one frame loop.

use glam::DVec2;
use serde_json::Value;

use crate::error::FxError;
use crate::geometry::{Frame, Viewport};

/// A per-frame animated effect that positions one element.
pub trait Effect {
    /// Advance by one animation frame.
    fn tick(&mut self, frame: &Frame) -> Result<(), FxError>;

    /// Translation to apply to the effect's element after the last tick.
    fn position(&self) -> DVec2;

    /// Called when the viewport changes size.
    fn resize(&mut self, _viewport: Viewport) {}

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Parameter names, types, ranges and defaults.
    fn param_schema(&self) -> Value;

    /// Square footprint in pixels when the effect carries a glass
    /// displacement filter sized to its element.
    ///
    /// `None` by default.
    fn glass_footprint(&self) -> Option<usize> {
        None
    }
}
