//! Custom cursor dot plus lagging follower ring.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use glass_fx_core::{Effect, Frame, FxError};
use glass_fx_page::{cursor_supported, CursorFollower};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, Window};

use crate::dom::{self, Guards, Listener, Task};
use crate::Env;

const DOT_SELECTOR: &str = "[data-cursor]";
const FOLLOWER_SELECTOR: &str = "[data-cursor-follower]";
const HOVER_SELECTOR: &str = "a, button, [data-cursor-text]";
const EXPAND_CLASS: &str = "expand";

fn is_touch_device(window: &Window) -> bool {
    let has_touch_events =
        js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false);
    let max_touch_points = window.navigator().max_touch_points();
    !cursor_supported(has_touch_events, max_touch_points)
}

fn place(element: &HtmlElement, p: DVec2) {
    dom::set_style(element, "left", &dom::px(p.x));
    dom::set_style(element, "top", &dom::px(p.y));
}

pub(crate) fn mount(env: &Env) -> Result<Guards, FxError> {
    let mut guards = Guards::default();
    if is_touch_device(&env.window) {
        log::debug!("touch device, custom cursor disabled");
        return Ok(guards);
    }
    let dot = dom::query(&env.document, DOT_SELECTOR)?;
    let ring = dom::query(&env.document, FOLLOWER_SELECTOR)?;
    let cursor = Rc::new(RefCell::new(CursorFollower::from_json(&dom::read_params(&ring))));

    let moved = Rc::clone(&cursor);
    guards.push(Listener::new(&env.document, "mousemove", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let p = DVec2::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
        moved.borrow_mut().move_pointer(p);
        place(&dot, p);
    })?);

    for target in dom::query_all(&env.document, HOVER_SELECTOR)? {
        for (kind, expanded) in [("mouseenter", true), ("mouseleave", false)] {
            let hovered = Rc::clone(&cursor);
            let ring = ring.clone();
            guards.push(Listener::new(&target, kind, move |_| {
                if hovered.borrow_mut().set_expanded(expanded) {
                    dom::set_class(&ring, EXPAND_CLASS, expanded);
                }
            })?);
        }
    }

    let window = env.window.clone();
    let token = env.frames.borrow_mut().spawn(move |_timestamp| {
        let Ok(viewport) = dom::viewport(&window) else {
            return;
        };
        let mut cursor = cursor.borrow_mut();
        if cursor.tick(&Frame::new(viewport)).is_ok() {
            place(&ring, cursor.position());
        }
    });
    guards.push(Task(token));
    Ok(guards)
}
