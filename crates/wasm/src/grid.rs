//! Background grid canvas, redrawn when the viewport size changes.

use std::cell::RefCell;
use std::rc::Rc;

use glass_fx_core::{FxError, Viewport};
use glass_fx_page::{GridBackground, GridParams};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::dom::{self, Guards, Listener};
use crate::glass::context_2d;
use crate::Env;

const GRID_SELECTOR: &str = "canvas[data-grid]";

struct GridCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    grid: GridBackground,
}

impl GridCanvas {
    fn redraw(&mut self, viewport: Viewport) {
        if !self.grid.needs_redraw(viewport) {
            return;
        }
        // Canvas sizes are whole pixels.
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);

        let ctx = &self.ctx;
        let params = self.grid.params();
        ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        ctx.set_stroke_style_str(&params.color);
        ctx.set_line_width(params.line_width);
        ctx.begin_path();
        for line in self.grid.lines(viewport) {
            ctx.move_to(line.from.x, line.from.y);
            ctx.line_to(line.to.x, line.to.y);
        }
        ctx.stroke();
        self.grid.mark_drawn(viewport);
    }

    fn redraw_for(&mut self, window: &Window) {
        match dom::viewport(window) {
            Ok(viewport) => self.redraw(viewport),
            Err(e) => log::debug!("grid not redrawn: {e}"),
        }
    }
}

pub(crate) fn mount(env: &Env) -> Result<Guards, FxError> {
    let canvas: HtmlCanvasElement = dom::query(&env.document, GRID_SELECTOR)?
        .dyn_into()
        .map_err(|_| FxError::MissingAnchor(GRID_SELECTOR.to_string()))?;
    let params = GridParams::from_json(&dom::read_params(&canvas));
    let ctx = context_2d(&canvas)?;
    let grid = Rc::new(RefCell::new(GridCanvas {
        canvas,
        ctx,
        grid: GridBackground::new(params),
    }));
    grid.borrow_mut().redraw_for(&env.window);

    let window = env.window.clone();
    let mut guards = Guards::default();
    guards.push(Listener::new(&env.window, "resize", move |_| {
        grid.borrow_mut().redraw_for(&window);
    })?);
    Ok(guards)
}
