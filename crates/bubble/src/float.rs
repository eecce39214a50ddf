//! Seek-and-repel motion policy.
//!
//! There is no velocity: every tick the bubble computes a target (viewport
//! centre + a slow Lissajous drift + a push away from a nearby pointer),
//! clamps it into the viewport and covers a fixed fraction of the remaining
//! distance. That is a first-order low-pass towards the target, not physics.

use glam::DVec2;
use glass_fx_core::error::FxError;
use glass_fx_core::geometry::{Frame, Viewport};
use glass_fx_core::params::param_f64_in;
use glass_fx_core::Effect;
use serde_json::{json, Value};

const DEFAULT_SIZE: f64 = 120.0;
/// Fraction of the remaining distance covered per tick.
const DEFAULT_EASE: f64 = 0.05;
/// Pointer distance (from the bubble centre) below which repulsion applies.
const DEFAULT_REPEL_RADIUS: f64 = 200.0;
/// Repulsion at zero distance, in pixels.
const DEFAULT_REPEL_STRENGTH: f64 = 150.0;
const DEFAULT_AMPLITUDE_X: f64 = 80.0;
const DEFAULT_AMPLITUDE_Y: f64 = 50.0;
/// Drift angular frequencies in radians per second of simulated time.
const DEFAULT_FREQUENCY_X: f64 = 0.8;
const DEFAULT_FREQUENCY_Y: f64 = 0.6;
/// Simulated seconds per tick.
const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Tunables for [`FloatingBubble`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    pub size: f64,
    pub ease: f64,
    pub repel_radius: f64,
    pub repel_strength: f64,
    pub amplitude: DVec2,
    pub frequency: DVec2,
    pub time_step: f64,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            ease: DEFAULT_EASE,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_strength: DEFAULT_REPEL_STRENGTH,
            amplitude: DVec2::new(DEFAULT_AMPLITUDE_X, DEFAULT_AMPLITUDE_Y),
            frequency: DVec2::new(DEFAULT_FREQUENCY_X, DEFAULT_FREQUENCY_Y),
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl FloatParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            size: param_f64_in(params, "size", DEFAULT_SIZE, 1.0, 2048.0),
            ease: param_f64_in(params, "ease", DEFAULT_EASE, 0.0, 1.0),
            repel_radius: param_f64_in(params, "repel_radius", DEFAULT_REPEL_RADIUS, 0.0, 4096.0),
            repel_strength: param_f64_in(
                params,
                "repel_strength",
                DEFAULT_REPEL_STRENGTH,
                0.0,
                4096.0,
            ),
            amplitude: DVec2::new(
                param_f64_in(params, "amplitude_x", DEFAULT_AMPLITUDE_X, 0.0, 4096.0),
                param_f64_in(params, "amplitude_y", DEFAULT_AMPLITUDE_Y, 0.0, 4096.0),
            ),
            frequency: DVec2::new(
                param_f64_in(params, "frequency_x", DEFAULT_FREQUENCY_X, 0.0, 100.0),
                param_f64_in(params, "frequency_y", DEFAULT_FREQUENCY_Y, 0.0, 100.0),
            ),
            time_step: param_f64_in(params, "time_step", DEFAULT_TIME_STEP, 0.0, 1.0),
        }
    }
}

/// A bubble that hovers around the viewport centre and shies away from the
/// pointer.
pub struct FloatingBubble {
    position: DVec2,
    time: f64,
    params: FloatParams,
}

impl FloatingBubble {
    /// Starts centred in `viewport` at time zero.
    pub fn new(viewport: Viewport, params: FloatParams) -> Self {
        Self {
            position: viewport.clamp_position(viewport.centered(params.size), params.size),
            time: 0.0,
            params,
        }
    }

    pub fn from_json(viewport: Viewport, params: &Value) -> Self {
        Self::new(viewport, FloatParams::from_json(params))
    }

    pub fn size(&self) -> f64 {
        self.params.size
    }

    /// Accumulated simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Viewport centre plus the drift offset at the current time, unclamped.
    pub fn floating_center(&self, viewport: Viewport) -> DVec2 {
        let phase = self.params.frequency * self.time;
        let drift = DVec2::new(phase.x.sin(), phase.y.cos()) * self.params.amplitude;
        viewport.centered(self.params.size) + drift
    }

    /// Push away from `pointer`, falling off linearly from
    /// `repel_strength` at the bubble centre to zero at `repel_radius`.
    pub fn repel_offset(&self, pointer: Option<DVec2>) -> DVec2 {
        let Some(pointer) = pointer else {
            return DVec2::ZERO;
        };
        let center = self.position + DVec2::splat(self.params.size * 0.5);
        let delta = pointer - center;
        let distance = delta.length();
        if distance <= 0.0 || distance >= self.params.repel_radius {
            return DVec2::ZERO;
        }
        let force = self.params.repel_strength * (1.0 - distance / self.params.repel_radius);
        -delta / distance * force
    }

    /// Where the bubble is heading this tick, clamped into the viewport.
    pub fn target(&self, viewport: Viewport, pointer: Option<DVec2>) -> DVec2 {
        let target = self.floating_center(viewport) + self.repel_offset(pointer);
        viewport.clamp_position(target, self.params.size)
    }
}

impl Effect for FloatingBubble {
    fn tick(&mut self, frame: &Frame) -> Result<(), FxError> {
        self.time += self.params.time_step;
        let target = self.target(frame.viewport, frame.pointer);
        self.position += (target - self.position) * self.params.ease;
        Ok(())
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn resize(&mut self, viewport: Viewport) {
        self.position = viewport.clamp_position(self.position, self.params.size);
    }

    fn params(&self) -> Value {
        json!({
            "size": self.params.size,
            "ease": self.params.ease,
            "repel_radius": self.params.repel_radius,
            "repel_strength": self.params.repel_strength,
            "amplitude_x": self.params.amplitude.x,
            "amplitude_y": self.params.amplitude.y,
            "frequency_x": self.params.frequency.x,
            "frequency_y": self.params.frequency.y,
            "time_step": self.params.time_step,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "size": {
                "type": "number", "default": DEFAULT_SIZE, "min": 1.0, "max": 2048.0,
                "description": "Bubble edge length in pixels"
            },
            "ease": {
                "type": "number", "default": DEFAULT_EASE, "min": 0.0, "max": 1.0,
                "description": "Fraction of the distance to the target covered per frame"
            },
            "repel_radius": {
                "type": "number", "default": DEFAULT_REPEL_RADIUS, "min": 0.0, "max": 4096.0,
                "description": "Pointer distance below which the bubble is pushed away"
            },
            "repel_strength": {
                "type": "number", "default": DEFAULT_REPEL_STRENGTH, "min": 0.0, "max": 4096.0,
                "description": "Push in pixels when the pointer is at the bubble centre"
            },
            "amplitude_x": {
                "type": "number", "default": DEFAULT_AMPLITUDE_X, "min": 0.0, "max": 4096.0,
                "description": "Horizontal drift amplitude in pixels"
            },
            "amplitude_y": {
                "type": "number", "default": DEFAULT_AMPLITUDE_Y, "min": 0.0, "max": 4096.0,
                "description": "Vertical drift amplitude in pixels"
            },
            "frequency_x": {
                "type": "number", "default": DEFAULT_FREQUENCY_X, "min": 0.0, "max": 100.0,
                "description": "Horizontal drift frequency in radians per second"
            },
            "frequency_y": {
                "type": "number", "default": DEFAULT_FREQUENCY_Y, "min": 0.0, "max": 100.0,
                "description": "Vertical drift frequency in radians per second"
            },
            "time_step": {
                "type": "number", "default": DEFAULT_TIME_STEP, "min": 0.0, "max": 1.0,
                "description": "Simulated seconds per frame"
            }
        })
    }

    fn glass_footprint(&self) -> Option<usize> {
        Some(self.params.size.round() as usize)
    }
}
