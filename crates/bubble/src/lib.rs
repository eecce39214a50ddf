#![deny(unsafe_code)]
//! Glass bubble motion.
//!
//! A bubble is a square element of fixed `size` whose top-left corner moves
//! inside the viewport. Two interchangeable motion policies drive it:
//!
//! - [`BouncingBubble`]: constant-speed elastic wall bounce with a little
//!   random jitter on every bounce so the orbit never settles into a loop.
//! - [`FloatingBubble`]: eases towards a target that drifts around the
//!   viewport centre and is pushed away from the pointer.
//!
//! Both implement [`Effect`](glass_fx_core::Effect) and report a glass
//! footprint so the host can attach a displacement filter sized to the
//! element.

pub mod bounce;
pub mod float;

pub use bounce::{BounceParams, BouncingBubble};
pub use float::{FloatParams, FloatingBubble};

use glam::DVec2;

/// Position and velocity of a square body inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBody {
    /// Top-left corner in pixels.
    pub position: DVec2,
    /// Pixels per tick.
    pub velocity: DVec2,
    /// Edge length in pixels.
    pub size: f64,
    /// Magnitude the velocity is renormalized to after each tick.
    pub speed: f64,
    /// Multiplier applied to the velocity component that bounced.
    pub restitution: f64,
}

impl MotionBody {
    /// Centre of the body in viewport coordinates.
    pub fn center(&self) -> DVec2 {
        self.position + DVec2::splat(self.size * 0.5)
    }
}
