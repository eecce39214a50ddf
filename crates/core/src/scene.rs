//! Reproducible description of an offline effect run.
//!
//! A [`Scene`] records everything needed to replay a simulation: effect
//! name, viewport, parameter overrides, PRNG seed, tick count and an optional
//! fixed pointer position.

use serde::{Deserialize, Serialize};

use crate::error::FxError;
use crate::geometry::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub ticks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<[f64; 2]>,
}

impl Scene {
    /// Creates a scene with empty params, zero ticks and no pointer.
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            ticks: 0,
            pointer: None,
        }
    }

    /// Checks that the viewport is non-empty and `width * height` fits.
    pub fn validate(&self) -> Result<(), FxError> {
        if self.width == 0 || self.height == 0 {
            return Err(FxError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(FxError::InvalidDimensions)?;
        Ok(())
    }

    /// The scene's viewport, after validation.
    pub fn viewport(&self) -> Result<Viewport, FxError> {
        self.validate()?;
        Viewport::new(self.width as f64, self.height as f64)
    }
}
