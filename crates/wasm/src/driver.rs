//! `requestAnimationFrame` driver for a [`FrameLoop`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glass_fx_core::{CancelToken, FrameLoop, FxError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::dom::env_err;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Runs the shared frame loop once per animation frame. Stops rearming once
/// the loop is idle or the driver is dropped.
pub(crate) struct FrameDriver {
    window: Window,
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameDriver {
    pub(crate) fn start(window: &Window, frames: Rc<RefCell<FrameLoop>>) -> Result<Self, FxError> {
        let token = CancelToken::new();
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let rearm = Rc::clone(&callback);
        let win = window.clone();
        let cancelled = token.clone();
        let handle = Rc::clone(&pending);
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            handle.set(None);
            if cancelled.is_cancelled() {
                return;
            }
            let idle = {
                let mut frames = frames.borrow_mut();
                frames.run_frame(timestamp);
                frames.is_idle()
            };
            if idle {
                log::debug!("frame loop idle, driver stopped");
                return;
            }
            if let Some(cb) = rearm.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle.set(Some(id)),
                    Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }));

        let first = callback
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()
            .map_err(env_err("requestAnimationFrame"))?;
        pending.set(first);

        Ok(Self {
            window: window.clone(),
            token,
            pending,
            callback,
        })
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // The closure holds a handle to its own slot; clearing it breaks the cycle.
        self.callback.borrow_mut().take();
    }
}
