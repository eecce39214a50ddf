//! Custom cursor with a lagging follower ring.
//!
//! The dot tracks the pointer exactly; the follower closes a fixed fraction
//! of the gap every frame, so it trails behind fast movements and settles on
//! the pointer when it stops.

use glam::DVec2;
use glass_fx_core::error::FxError;
use glass_fx_core::geometry::Frame;
use glass_fx_core::params::param_f64_in;
use glass_fx_core::Effect;
use serde_json::{json, Value};

/// Default fraction of the pointer/follower gap closed per frame.
const DEFAULT_LAG: f64 = 0.15;

/// Tunables for [`CursorFollower`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorParams {
    pub lag: f64,
}

impl Default for CursorParams {
    fn default() -> Self {
        Self { lag: DEFAULT_LAG }
    }
}

impl CursorParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            lag: param_f64_in(params, "lag", DEFAULT_LAG, 0.0, 1.0),
        }
    }
}

/// Pointer position, smoothed follower position and hover state.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    pointer: DVec2,
    follower: DVec2,
    expanded: bool,
    params: CursorParams,
}

impl CursorFollower {
    /// Both dot and follower start at the page origin.
    pub fn new(params: CursorParams) -> Self {
        Self {
            pointer: DVec2::ZERO,
            follower: DVec2::ZERO,
            expanded: false,
            params,
        }
    }

    pub fn from_json(params: &Value) -> Self {
        Self::new(CursorParams::from_json(params))
    }

    /// Records a pointer move. The dot is drawn here immediately.
    pub fn move_pointer(&mut self, pointer: DVec2) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn follower(&self) -> DVec2 {
        self.follower
    }

    /// Sets the hover state; returns true if it changed.
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        let changed = self.expanded != expanded;
        self.expanded = expanded;
        changed
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }
}

impl Effect for CursorFollower {
    fn tick(&mut self, frame: &Frame) -> Result<(), FxError> {
        if let Some(pointer) = frame.pointer {
            self.pointer = pointer;
        }
        self.follower += (self.pointer - self.follower) * self.params.lag;
        Ok(())
    }

    fn position(&self) -> DVec2 {
        self.follower
    }

    fn params(&self) -> Value {
        json!({ "lag": self.params.lag })
    }

    fn param_schema(&self) -> Value {
        json!({
            "lag": {
                "type": "number",
                "default": DEFAULT_LAG,
                "min": 0.0,
                "max": 1.0,
                "description": "Fraction of the distance to the pointer the follower covers per frame"
            }
        })
    }
}

/// Whether a custom cursor makes sense: touch devices have no hover pointer.
pub fn cursor_supported(has_touch_events: bool, max_touch_points: i32) -> bool {
    !has_touch_events && max_touch_points <= 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glass_fx_core::Viewport;

    fn frame() -> Frame {
        Frame::new(Viewport::new(800.0, 600.0).unwrap())
    }

    #[test]
    fn first_tick_covers_lag_fraction() {
        let mut cursor = CursorFollower::new(CursorParams::default());
        cursor.move_pointer(DVec2::new(100.0, 200.0));
        cursor.tick(&frame()).unwrap();
        assert!((cursor.follower() - DVec2::new(15.0, 30.0)).length() < 1e-12);
        assert_eq!(cursor.pointer(), DVec2::new(100.0, 200.0));
    }

    #[test]
    fn frame_pointer_overrides_stored_pointer() {
        let mut cursor = CursorFollower::new(CursorParams::default());
        cursor.move_pointer(DVec2::new(100.0, 100.0));
        cursor
            .tick(&frame().with_pointer(DVec2::new(200.0, 0.0)))
            .unwrap();
        assert_eq!(cursor.pointer(), DVec2::new(200.0, 0.0));
        assert!((cursor.position() - DVec2::new(30.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn follower_converges_on_still_pointer() {
        let mut cursor = CursorFollower::new(CursorParams::default());
        cursor.move_pointer(DVec2::new(640.0, 360.0));
        for _ in 0..200 {
            cursor.tick(&frame()).unwrap();
        }
        assert!((cursor.follower() - DVec2::new(640.0, 360.0)).length() < 1e-6);
    }

    #[test]
    fn zero_lag_never_moves() {
        let mut cursor = CursorFollower::from_json(&json!({"lag": 0.0}));
        cursor.move_pointer(DVec2::new(50.0, 50.0));
        cursor.tick(&frame()).unwrap();
        assert_eq!(cursor.follower(), DVec2::ZERO);
    }

    #[test]
    fn set_expanded_reports_changes_only() {
        let mut cursor = CursorFollower::new(CursorParams::default());
        assert!(cursor.set_expanded(true));
        assert!(!cursor.set_expanded(true));
        assert!(cursor.expanded());
        assert!(cursor.set_expanded(false));
    }

    #[test]
    fn touch_devices_skip_custom_cursor() {
        assert!(cursor_supported(false, 0));
        assert!(!cursor_supported(true, 0));
        assert!(!cursor_supported(false, 5));
    }

    #[test]
    fn from_json_clamps_lag() {
        assert_eq!(CursorParams::from_json(&json!({"lag": 3})).lag, 1.0);
        assert_eq!(CursorParams::from_json(&json!({})).lag, DEFAULT_LAG);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gap_never_grows(
                px in -2000.0_f64..2000.0,
                py in -2000.0_f64..2000.0,
                lag in 0.0_f64..=1.0,
            ) {
                let mut cursor = CursorFollower::new(CursorParams { lag });
                cursor.move_pointer(DVec2::new(px, py));
                let mut gap = (cursor.pointer() - cursor.follower()).length();
                for _ in 0..20 {
                    cursor.tick(&frame()).unwrap();
                    let next = (cursor.pointer() - cursor.follower()).length();
                    prop_assert!(next <= gap + 1e-9, "gap grew from {gap} to {next}");
                    gap = next;
                }
            }
        }
    }
}
