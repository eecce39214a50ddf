//! Decorative grid drawn on a full-viewport background canvas.

use glam::DVec2;
use glass_fx_core::geometry::Viewport;
use glass_fx_core::params::{param_f64_in, param_string};
use serde_json::Value;

const DEFAULT_SPACING: f64 = 50.0;
const DEFAULT_LINE_WIDTH: f64 = 1.0;
const DEFAULT_COLOR: &str = "rgba(255, 255, 255, 0.05)";

#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    pub spacing: f64,
    pub line_width: f64,
    /// Any CSS colour string; passed straight to the canvas stroke style.
    pub color: String,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            line_width: DEFAULT_LINE_WIDTH,
            color: DEFAULT_COLOR.to_owned(),
        }
    }
}

impl GridParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            spacing: param_f64_in(params, "spacing", DEFAULT_SPACING, 4.0, 1024.0),
            line_width: param_f64_in(params, "line_width", DEFAULT_LINE_WIDTH, 0.1, 16.0),
            color: param_string(params, "color", DEFAULT_COLOR),
        }
    }
}

/// One straight segment to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: DVec2,
    pub to: DVec2,
}

/// Grid layout plus the size it was last drawn at.
#[derive(Debug, Clone)]
pub struct GridBackground {
    params: GridParams,
    drawn_at: Option<Viewport>,
}

impl GridBackground {
    pub fn new(params: GridParams) -> Self {
        Self {
            params,
            drawn_at: None,
        }
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// True before the first draw and whenever the viewport size changed.
    pub fn needs_redraw(&self, viewport: Viewport) -> bool {
        self.drawn_at != Some(viewport)
    }

    pub fn mark_drawn(&mut self, viewport: Viewport) {
        self.drawn_at = Some(viewport);
    }

    /// Vertical lines left to right, then horizontal lines top to bottom,
    /// every `spacing` pixels starting at the origin.
    pub fn lines(&self, viewport: Viewport) -> Vec<GridLine> {
        let spacing = self.params.spacing;
        let columns = (viewport.width / spacing).floor() as usize;
        let rows = (viewport.height / spacing).floor() as usize;

        let vertical = (0..=columns).map(|i| {
            let x = i as f64 * spacing;
            GridLine {
                from: DVec2::new(x, 0.0),
                to: DVec2::new(x, viewport.height),
            }
        });
        let horizontal = (0..=rows).map(|j| {
            let y = j as f64 * spacing;
            GridLine {
                from: DVec2::new(0.0, y),
                to: DVec2::new(viewport.width, y),
            }
        });
        vertical.chain(horizontal).collect()
    }
}
