//! Slide-out navigation overlay.

use std::cell::Cell;
use std::rc::Rc;

use glass_fx_core::FxError;
use glass_fx_page::{NavOverlay, NavTransition};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom::{self, Guards, Listener};
use crate::Env;

const TOGGLE_SELECTOR: &str = "[data-nav-toggle]";
const OVERLAY_SELECTOR: &str = "[data-nav-overlay]";
const OPEN_CLASS: &str = "open";
const BODY_OPEN_CLASS: &str = "nav-open";

struct NavDom {
    toggle: Element,
    overlay: Element,
    body: HtmlElement,
}

impl NavDom {
    /// Mirrors `nav` into the DOM after `transition`, if it changed anything.
    fn apply(&self, nav: &NavOverlay, transition: NavTransition) {
        if !transition.changed {
            return;
        }
        dom::set_class(&self.toggle, OPEN_CLASS, nav.is_open());
        dom::set_class(&self.overlay, OPEN_CLASS, nav.is_open());
        dom::set_class(&self.body, BODY_OPEN_CLASS, nav.is_open());
        if nav.scroll_locked() {
            dom::set_style(&self.body, "overflow", "hidden");
        } else if let Err(e) = self.body.style().remove_property("overflow") {
            log::warn!("failed to unlock scroll: {e:?}");
        }
    }
}

pub(crate) fn mount(env: &Env) -> Result<Guards, FxError> {
    let toggle = dom::query(&env.document, TOGGLE_SELECTOR)?;
    let overlay = dom::query(&env.document, OVERLAY_SELECTOR)?;
    let view = Rc::new(NavDom {
        toggle: toggle.clone().into(),
        overlay: overlay.clone().into(),
        body: dom::body(&env.document)?,
    });
    let state = Rc::new(Cell::new(NavOverlay::new()));

    let mut guards = Guards::default();
    {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        guards.push(Listener::new(&toggle, "click", move |_| {
            let mut nav = state.get();
            let transition = nav.toggle();
            view.apply(&nav, transition);
            state.set(nav);
        })?);
    }
    for link in dom::query_all(&env.document, &format!("{OVERLAY_SELECTOR} a"))? {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        guards.push(Listener::new(&link, "click", move |_| {
            let mut nav = state.get();
            let transition = nav.link_clicked();
            view.apply(&nav, transition);
            state.set(nav);
        })?);
    }
    guards.push(Listener::new(&env.document, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let mut nav = state.get();
        let transition = nav.key_pressed(&key);
        view.apply(&nav, transition);
        state.set(nav);
    })?);
    Ok(guards)
}
