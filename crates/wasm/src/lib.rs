//! Browser bindings for glass-fx.
//!
//! `mount()` looks up each component's anchor in the page, wires it up and
//! starts one animation-frame driver for everything that moves. Components
//! whose anchors are missing are skipped. `unmount()` drops every listener,
//! timer, observer, inserted node and frame task again.

mod cursor;
mod dom;
mod driver;
mod glass;
mod grid;
mod motion;
mod nav;
mod scroll;
mod slideshow;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use glass_fx_core::{FrameLoop, FxError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use dom::{Guards, Listener};
use driver::FrameDriver;

/// Shared inputs handed to every component while mounting.
pub(crate) struct Env {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) frames: Rc<RefCell<FrameLoop>>,
    /// Last pointer position in viewport coordinates, written on `mousemove`.
    pub(crate) pointer: Rc<Cell<Option<DVec2>>>,
}

/// Everything one `mount()` created. Field order is drop order: the driver
/// stops before the tasks and listeners go away.
struct Mounted {
    _driver: Option<FrameDriver>,
    frames: Rc<RefCell<FrameLoop>>,
    _guards: Guards,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        let mut frames = self.frames.borrow_mut();
        frames.cancel_all();
        log::debug!("frame loop stopped after {} frames", frames.frames());
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

type Component = (&'static str, fn(&Env) -> Result<Guards, FxError>);

const COMPONENTS: &[Component] = &[
    ("bouncing bubble", motion::mount_bouncing),
    ("floating bubble", motion::mount_floating),
    ("cursor", cursor::mount),
    ("slideshow", slideshow::mount),
    ("anchor scroll", scroll::mount_anchors),
    ("nav overlay", nav::mount),
    ("grid", grid::mount),
    ("reveal", scroll::mount_reveal),
];

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

/// Mounts every component whose anchor exists. Mounting again first
/// unmounts the previous instance.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    unmount();
    let mounted = mount_all().map_err(|e| JsValue::from_str(&e.to_string()))?;
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
    Ok(())
}

/// Tears down everything `mount()` created. Safe to call when nothing is
/// mounted.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|slot| slot.borrow_mut().take());
    if previous.is_some() {
        log::debug!("unmounting glass-fx");
    }
    drop(previous);
}

fn mount_all() -> Result<Mounted, FxError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let env = Env {
        window,
        document,
        frames: Rc::new(RefCell::new(FrameLoop::new())),
        pointer: Rc::new(Cell::new(None)),
    };

    let mut guards = Guards::default();
    let pointer = Rc::clone(&env.pointer);
    guards.push(Listener::new(&env.document, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            pointer.set(Some(DVec2::new(
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            )));
        }
    })?);

    for (name, mount_component) in COMPONENTS {
        match mount_component(&env) {
            Ok(component) => guards.extend(component),
            Err(FxError::MissingAnchor(selector)) => {
                log::debug!("{name} skipped: no {selector}");
            }
            Err(e) => log::warn!("{name} skipped: {e}"),
        }
    }

    let driver = if env.frames.borrow().is_idle() {
        None
    } else {
        Some(FrameDriver::start(&env.window, Rc::clone(&env.frames))?)
    };
    log::info!(
        "glass-fx mounted: {} frame tasks, {} guards",
        env.frames.borrow().live_tasks(),
        guards.len()
    );

    Ok(Mounted {
        _driver: driver,
        frames: env.frames,
        _guards: guards,
    })
}
