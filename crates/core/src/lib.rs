#![deny(unsafe_code)]
//! Core types and traits for glass-fx, a set of decorative page effects.
//!
//! Provides the `Effect` trait, `Viewport`/`Frame` inputs, the
//! `DisplacementField` generator and its warps, the `FrameLoop` scheduler with
//! `CancelToken`, the `Xorshift64` PRNG, `Scene`, and parameter helpers.

pub mod displacement;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod params;
pub mod prng;
pub mod scene;
pub mod schedule;
pub mod warp;

pub use displacement::{DisplacementField, EncodedMap};
pub use effect::Effect;
pub use error::FxError;
pub use geometry::{Frame, Viewport};
pub use prng::Xorshift64;
pub use scene::Scene;
pub use schedule::{CancelToken, FrameLoop};
pub use warp::Warp;
