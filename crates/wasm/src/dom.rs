//! DOM lookups and the guards that own listeners, timers and frame tasks.
//!
//! Every guard detaches what it registered when dropped, so unmounting is
//! just dropping the guards.

use std::any::Any;

use glam::DVec2;
use glass_fx_core::{CancelToken, FxError, Viewport};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

/// Attribute holding per-anchor JSON params.
pub(crate) const PARAMS_ATTR: &str = "data-fx-params";

pub(crate) fn env_err(what: &str) -> impl FnOnce(JsValue) -> FxError + '_ {
    move |e| FxError::EnvironmentUnavailable(format!("{what}: {e:?}"))
}

pub(crate) fn window() -> Result<Window, FxError> {
    web_sys::window().ok_or_else(|| FxError::EnvironmentUnavailable("window".into()))
}

pub(crate) fn document(window: &Window) -> Result<Document, FxError> {
    window
        .document()
        .ok_or_else(|| FxError::EnvironmentUnavailable("document".into()))
}

pub(crate) fn body(document: &Document) -> Result<HtmlElement, FxError> {
    document
        .body()
        .ok_or_else(|| FxError::EnvironmentUnavailable("document.body".into()))
}

/// Current layout viewport in CSS pixels.
pub(crate) fn viewport(window: &Window) -> Result<Viewport, FxError> {
    let width = window
        .inner_width()
        .map_err(env_err("innerWidth"))?
        .as_f64()
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .map_err(env_err("innerHeight"))?
        .as_f64()
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

/// First element matching `selector`, or `FxError::MissingAnchor`.
pub(crate) fn query(document: &Document, selector: &str) -> Result<HtmlElement, FxError> {
    document
        .query_selector(selector)
        .map_err(env_err(selector))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| FxError::MissingAnchor(selector.to_string()))
}

/// Every element matching `selector`; empty when nothing matches.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, FxError> {
    let list = document
        .query_selector_all(selector)
        .map_err(env_err(selector))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// JSON params from the element's `data-fx-params`, or an empty object.
pub(crate) fn read_params(element: &Element) -> Value {
    let Some(raw) = element.get_attribute(PARAMS_ATTR) else {
        return Value::Object(Default::default());
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("ignoring malformed {PARAMS_ATTR}: {e}");
        Value::Object(Default::default())
    })
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("failed to set {property}: {e:?}");
    }
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = result {
        log::warn!("failed to toggle class {class}: {e:?}");
    }
}

pub(crate) fn px(value: f64) -> String {
    format!("{value:.2}px")
}

pub(crate) fn translate(p: DVec2) -> String {
    format!("translate({}, {})", px(p.x), px(p.y))
}

/// A fresh seed for effects that draw random numbers.
pub(crate) fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

/// Owns whatever a mounted component registered; dropping it detaches all.
#[derive(Default)]
pub(crate) struct Guards(Vec<Box<dyn Any>>);

impl Guards {
    pub(crate) fn push<T: 'static>(&mut self, guard: T) {
        self.0.push(Box::new(guard));
    }

    pub(crate) fn extend(&mut self, other: Guards) {
        self.0.extend(other.0);
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// An event listener that is removed again on drop.
pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, FxError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(env_err(kind))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// A `setInterval` timer that is cleared on drop.
pub(crate) struct Interval {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub(crate) fn new(
        window: &Window,
        period_ms: u32,
        tick: impl FnMut() + 'static,
    ) -> Result<Self, FxError> {
        let callback = Closure::<dyn FnMut()>::new(tick);
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(env_err("setInterval"))?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}

/// A frame-loop task that is cancelled on drop.
pub(crate) struct Task(pub(crate) CancelToken);

impl Drop for Task {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

/// An element inserted by the bindings, removed again on drop.
pub(crate) struct Inserted(pub(crate) Element);

impl Drop for Inserted {
    fn drop(&mut self) {
        self.0.remove();
    }
}
