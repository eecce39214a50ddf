//! Scroll-triggered reveal: elements fade in the first time they scroll into
//! view and then stay revealed.

use glass_fx_core::params::{param_f64_in, param_string};
use serde_json::Value;

const DEFAULT_THRESHOLD: f64 = 0.1;
const DEFAULT_ROOT_MARGIN: &str = "0px 0px -50px 0px";

#[derive(Debug, Clone, PartialEq)]
pub struct RevealParams {
    /// Visible fraction of the element needed to reveal it.
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_owned(),
        }
    }
}

impl RevealParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            threshold: param_f64_in(params, "threshold", DEFAULT_THRESHOLD, 0.0, 1.0),
            root_margin: param_string(params, "root_margin", DEFAULT_ROOT_MARGIN),
        }
    }
}

/// Reveal state for one element.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    threshold: f64,
    revealed: bool,
}

impl Reveal {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            revealed: false,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feeds one intersection observation. Returns true exactly once: the
    /// first time the element intersects with at least `threshold` visible.
    pub fn observe(&mut self, ratio: f64, intersecting: bool) -> bool {
        if self.revealed || !intersecting || ratio < self.threshold {
            return false;
        }
        self.revealed = true;
        true
    }
}

/// Fraction of an element (vertical extent `top..top + height`, in viewport
/// coordinates) that lies inside `0..viewport_height`.
pub fn visible_ratio(top: f64, height: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let visible = (top + height).min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}
