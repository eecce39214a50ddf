//! Bubbles: a motion effect moving an element by `transform`, optionally
//! with glass refraction behind it.

use glass_fx_core::params::{param_bool, param_string};
use glass_fx_core::{Effect, Frame, FxError, Viewport};
use glass_fx_effects::{warp_by_name, EffectKind};
use serde_json::Value;
use web_sys::HtmlElement;

use crate::dom::{self, Guards, Task};
use crate::glass::Glass;
use crate::Env;

const BOUNCING_SELECTOR: &str = ".bouncing-bubble";
const FLOATING_SELECTOR: &str = "[data-floating-bubble]";

pub(crate) fn mount_bouncing(env: &Env) -> Result<Guards, FxError> {
    mount_bubble(env, BOUNCING_SELECTOR, "bubble")
}

pub(crate) fn mount_floating(env: &Env) -> Result<Guards, FxError> {
    mount_bubble(env, FLOATING_SELECTOR, "floating-bubble")
}

fn mount_bubble(env: &Env, selector: &str, effect_name: &str) -> Result<Guards, FxError> {
    let element = dom::query(&env.document, selector)?;
    let params = dom::read_params(&element);
    let viewport = dom::viewport(&env.window)?;
    let effect = EffectKind::from_name(effect_name, viewport, dom::random_seed(), &params)?;

    let mut guards = Guards::default();
    if let Some(size) = effect.glass_footprint() {
        let side = dom::px(size as f64);
        dom::set_style(&element, "width", &side);
        dom::set_style(&element, "height", &side);
        if let Some(glass) = attach_glass(env, &element, size, &params) {
            guards.push(glass);
        }
    }
    guards.push(spawn_motion(env, element, effect, viewport));
    log::debug!("mounted {effect_name} on {selector}");
    Ok(guards)
}

/// Glass is on unless params say `"glass": false`; failures only cost the
/// refraction, never the motion.
fn attach_glass(env: &Env, element: &HtmlElement, size: usize, params: &Value) -> Option<Glass> {
    if !param_bool(params, "glass", true) {
        return None;
    }
    let warp_name = param_string(params, "warp", "liquid-glass");
    let attached = warp_by_name(&warp_name)
        .and_then(|warp| Glass::attach(&env.window, &env.document, element, (size, size), warp));
    match attached {
        Ok(glass) => Some(glass),
        Err(e) => {
            log::warn!("glass disabled: {e}");
            None
        }
    }
}

/// Per frame: pick up viewport changes, tick, then write the transform.
fn spawn_motion(env: &Env, element: HtmlElement, mut effect: EffectKind, viewport: Viewport) -> Task {
    let window = env.window.clone();
    let pointer = env.pointer.clone();
    let mut last = viewport;
    let token = env.frames.borrow_mut().spawn(move |_timestamp| {
        let viewport = match dom::viewport(&window) {
            Ok(v) => v,
            Err(e) => {
                log::debug!("skipping frame: {e}");
                return;
            }
        };
        if viewport != last {
            effect.resize(viewport);
            last = viewport;
        }
        let frame = match pointer.get() {
            Some(p) => Frame::new(viewport).with_pointer(p),
            None => Frame::new(viewport),
        };
        if let Err(e) = effect.tick(&frame) {
            log::warn!("tick failed: {e}");
            return;
        }
        dom::set_style(&element, "transform", &dom::translate(effect.position()));
    });
    Task(token)
}
