//! Smooth in-page anchor scrolling and scroll-triggered reveals.

use std::cell::RefCell;
use std::rc::Rc;

use glass_fx_core::FxError;
use glass_fx_page::{visible_ratio, Reveal, RevealParams, ScrollRequest};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::dom::{self, Guards, Listener};
use crate::Env;

const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const REVEAL_SELECTOR: &str = "[data-reveal]";
const REVEALED_CLASS: &str = "revealed";

pub(crate) fn mount_anchors(env: &Env) -> Result<Guards, FxError> {
    let mut guards = Guards::default();
    for anchor in dom::query_all(&env.document, ANCHOR_SELECTOR)? {
        let document = env.document.clone();
        let link = anchor.clone();
        guards.push(Listener::new(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(request) = ScrollRequest::for_href(&href) else {
                return;
            };
            match document.get_element_by_id(&request.target_id) {
                Some(target) => scroll_to(&target, &request),
                None => log::debug!("no element #{} to scroll to", request.target_id),
            }
        })?);
    }
    Ok(guards)
}

fn scroll_to(target: &Element, request: &ScrollRequest) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(if request.smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    options.set_block(if request.align_start {
        ScrollLogicalPosition::Start
    } else {
        ScrollLogicalPosition::Nearest
    });
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Observer that disconnects on drop.
struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

type RevealStates = Rc<RefCell<Vec<(Element, Reveal)>>>;

pub(crate) fn mount_reveal(env: &Env) -> Result<Guards, FxError> {
    let elements = dom::query_all(&env.document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Err(FxError::MissingAnchor(REVEAL_SELECTOR.to_string()));
    }
    // One observer serves every target, so the first target's params apply to all.
    let params = elements
        .first()
        .map(|el| RevealParams::from_json(&dom::read_params(el)))
        .unwrap_or_default();

    let states: RevealStates = Rc::new(RefCell::new(
        elements
            .iter()
            .map(|el| (el.clone(), Reveal::new(params.threshold)))
            .collect(),
    ));

    let observed = Rc::clone(&states);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let mut states = observed.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some((_, reveal)) = states.iter_mut().find(|(el, _)| *el == target) else {
                    continue;
                };
                if reveal.observe(entry.intersection_ratio(), entry.is_intersecting()) {
                    dom::set_class(&target, REVEALED_CLASS, true);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(params.threshold));
    init.set_root_margin(&params.root_margin);
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::info!("IntersectionObserver unavailable ({e:?}), revealing on scroll");
                return mount_scroll_reveal(env, states);
            }
        };
    for el in &elements {
        observer.observe(el);
    }

    let mut guards = Guards::default();
    guards.push(Observer {
        observer,
        _callback: callback,
    });
    log::debug!("observing {} reveal targets", elements.len());
    Ok(guards)
}

/// Fallback for browsers without `IntersectionObserver`: measures every
/// pending target on scroll and resize.
fn mount_scroll_reveal(env: &Env, states: RevealStates) -> Result<Guards, FxError> {
    reveal_visible(&env.window, &states);
    let mut guards = Guards::default();
    for kind in ["scroll", "resize"] {
        let (window, states) = (env.window.clone(), Rc::clone(&states));
        guards.push(Listener::new(&env.window, kind, move |_| {
            reveal_visible(&window, &states);
        })?);
    }
    Ok(guards)
}

fn reveal_visible(window: &Window, states: &RevealStates) {
    let Some(viewport_height) = window.inner_height().ok().and_then(|h| h.as_f64()) else {
        return;
    };
    for (el, reveal) in states.borrow_mut().iter_mut() {
        if reveal.is_revealed() {
            continue;
        }
        let rect = el.get_bounding_client_rect();
        let ratio = visible_ratio(rect.top(), rect.height(), viewport_height);
        if reveal.observe(ratio, ratio > 0.0) {
            dom::set_class(el, REVEALED_CLASS, true);
        }
    }
}
