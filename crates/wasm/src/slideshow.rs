//! Hero background slideshow on `.hero`.

use glass_fx_core::FxError;
use glass_fx_page::{css_url, Slideshow};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom::{self, env_err, Guards, Inserted, Interval};
use crate::Env;

const HERO_SELECTOR: &str = ".hero";
const LAYER_CLASS: &str = "hero-bg-layer";
const ACTIVE_CLASS: &str = "active";

pub(crate) fn mount(env: &Env) -> Result<Guards, FxError> {
    let hero = dom::query(&env.document, HERO_SELECTOR)?;
    let mut show = Slideshow::from_json(&dom::read_params(&hero))?;

    let mut guards = Guards::default();
    let mut layers: Vec<HtmlElement> = Vec::with_capacity(show.images().len());
    // Layers go in front of existing hero content, keeping image order.
    let first_child = hero.first_child();
    for (index, url) in show.images().iter().enumerate() {
        let layer: HtmlElement = env
            .document
            .create_element("div")
            .map_err(env_err("createElement"))
            .and_then(|el| {
                el.dyn_into()
                    .map_err(|_| FxError::EnvironmentUnavailable("div element".into()))
            })?;
        dom::set_class(&layer, LAYER_CLASS, true);
        dom::set_class(&layer, ACTIVE_CLASS, show.is_active(index));
        dom::set_style(&layer, "background-image", &css_url(url));
        hero.insert_before(&layer, first_child.as_ref())
            .map_err(env_err("insertBefore"))?;
        guards.push(Inserted(layer.clone().into()));
        layers.push(layer);
    }

    let count = layers.len();
    guards.push(Interval::new(&env.window, show.interval_ms(), move || {
        let change = show.advance();
        dom::set_class(&layers[change.previous], ACTIVE_CLASS, false);
        dom::set_class(&layers[change.current], ACTIVE_CLASS, true);
    })?);
    log::debug!("slideshow mounted with {count} layers");
    Ok(guards)
}
