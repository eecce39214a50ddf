//! Elastic-bounce motion policy.

use glam::DVec2;
use glass_fx_core::error::FxError;
use glass_fx_core::geometry::{Frame, Viewport};
use glass_fx_core::params::param_f64_in;
use glass_fx_core::prng::Xorshift64;
use glass_fx_core::Effect;
use serde_json::{json, Value};

use crate::MotionBody;

/// Default bubble edge length in pixels.
const DEFAULT_SIZE: f64 = 120.0;
/// Default constant speed in pixels per tick.
const DEFAULT_SPEED: f64 = 3.0;
/// Default fraction of the bounced component kept after hitting a wall.
const DEFAULT_RESTITUTION: f64 = 0.95;
/// Default half-width of the uniform jitter added on each bounce.
const DEFAULT_JITTER: f64 = 0.25;
/// Initial velocity components are drawn from ±this.
const INITIAL_VELOCITY: f64 = 3.0;

/// Tunables for [`BouncingBubble`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParams {
    pub size: f64,
    pub speed: f64,
    pub restitution: f64,
    pub jitter: f64,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            speed: DEFAULT_SPEED,
            restitution: DEFAULT_RESTITUTION,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl BounceParams {
    /// Extracts parameters from a JSON object, falling back to defaults and
    /// clamping into the ranges advertised by the schema.
    pub fn from_json(params: &Value) -> Self {
        Self {
            size: param_f64_in(params, "size", DEFAULT_SIZE, 1.0, 2048.0),
            speed: param_f64_in(params, "speed", DEFAULT_SPEED, 0.0, 100.0),
            restitution: param_f64_in(params, "restitution", DEFAULT_RESTITUTION, 0.0, 1.0),
            jitter: param_f64_in(params, "jitter", DEFAULT_JITTER, 0.0, 10.0),
        }
    }
}

/// A bubble that bounces off the viewport edges at constant speed.
pub struct BouncingBubble {
    body: MotionBody,
    jitter: f64,
    rng: Xorshift64,
}

impl BouncingBubble {
    /// Spawns a bubble at a random position inside `viewport` with a random
    /// initial velocity, both drawn from `seed`.
    pub fn new(viewport: Viewport, seed: u64, params: BounceParams) -> Self {
        let mut rng = Xorshift64::new(seed);
        let max = viewport.max_position(params.size);
        let position = DVec2::new(rng.next_range(0.0, max.x), rng.next_range(0.0, max.y));
        let velocity = DVec2::new(
            rng.next_signed(INITIAL_VELOCITY),
            rng.next_signed(INITIAL_VELOCITY),
        );
        Self {
            body: MotionBody {
                position,
                velocity,
                size: params.size,
                speed: params.speed,
                restitution: params.restitution,
            },
            jitter: params.jitter,
            rng,
        }
    }

    pub fn from_json(viewport: Viewport, seed: u64, params: &Value) -> Self {
        Self::new(viewport, seed, BounceParams::from_json(params))
    }

    pub fn body(&self) -> &MotionBody {
        &self.body
    }

    /// Overrides position and velocity, e.g. to restore a saved state.
    pub fn set_state(&mut self, position: DVec2, velocity: DVec2) {
        self.body.position = position;
        self.body.velocity = velocity;
    }
}

/// Advances `body` one tick under the elastic-bounce policy.
///
/// Moves by the velocity, then per axis: clamps to the wall it crossed,
/// reflects that component away from the wall scaled by restitution, and
/// jitters both components by up to ±`jitter`. Finally the velocity is
/// renormalized to `body.speed`. Returns whether any wall was hit.
pub fn bounce_step(
    body: &mut MotionBody,
    viewport: Viewport,
    rng: &mut Xorshift64,
    jitter: f64,
) -> bool {
    body.position += body.velocity;
    let max = viewport.max_position(body.size);
    let mut bounced = false;

    for axis in 0..2 {
        if body.position[axis] <= 0.0 {
            body.position[axis] = 0.0;
            body.velocity[axis] = body.velocity[axis].abs() * body.restitution;
        } else if body.position[axis] >= max[axis] {
            body.position[axis] = max[axis];
            body.velocity[axis] = -body.velocity[axis].abs() * body.restitution;
        } else {
            continue;
        }
        body.velocity += DVec2::new(rng.next_signed(jitter), rng.next_signed(jitter));
        bounced = true;
    }

    let magnitude = body.velocity.length();
    if magnitude > 0.0 && magnitude.is_finite() {
        body.velocity *= body.speed / magnitude;
    } else {
        body.velocity = DVec2::new(body.speed, 0.0);
    }
    bounced
}

impl Effect for BouncingBubble {
    fn tick(&mut self, frame: &Frame) -> Result<(), FxError> {
        bounce_step(&mut self.body, frame.viewport, &mut self.rng, self.jitter);
        Ok(())
    }

    fn position(&self) -> DVec2 {
        self.body.position
    }

    fn resize(&mut self, viewport: Viewport) {
        let clamped = viewport.clamp_position(self.body.position, self.body.size);
        if clamped != self.body.position {
            log::debug!(
                "bubble moved from {} to {} after resize",
                self.body.position,
                clamped
            );
            self.body.position = clamped;
        }
    }

    fn params(&self) -> Value {
        json!({
            "size": self.body.size,
            "speed": self.body.speed,
            "restitution": self.body.restitution,
            "jitter": self.jitter,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "size": {
                "type": "number",
                "default": DEFAULT_SIZE,
                "min": 1.0,
                "max": 2048.0,
                "description": "Bubble edge length in pixels"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 100.0,
                "description": "Constant speed in pixels per frame"
            },
            "restitution": {
                "type": "number",
                "default": DEFAULT_RESTITUTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Fraction of the bounced velocity component kept"
            },
            "jitter": {
                "type": "number",
                "default": DEFAULT_JITTER,
                "min": 0.0,
                "max": 10.0,
                "description": "Random velocity jitter added on each bounce"
            }
        })
    }

    fn glass_footprint(&self) -> Option<usize> {
        Some(self.body.size.round() as usize)
    }
}
