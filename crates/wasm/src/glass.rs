//! Glass refraction behind an element.
//!
//! Generates a displacement map for the element's footprint, hands it to the
//! browser as a PNG data URL inside an SVG filter, and points the element's
//! `backdrop-filter` at that filter. The map is regenerated when the element
//! changes size.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glass_fx_core::{DisplacementField, EncodedMap, FxError, Warp};
use glass_fx_effects::filter::GlassFilter;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, ImageData};

use crate::dom::{self, env_err, Listener};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

struct GlassState {
    document: Document,
    target: HtmlElement,
    holder: Element,
    id: String,
    field: DisplacementField,
}

impl GlassState {
    fn render(&self) -> Result<(), FxError> {
        let map = self.field.encode();
        let href = data_url(&self.document, &map)?;
        let filter = GlassFilter::for_map(&self.id, &map);
        self.holder.set_inner_html(&filter.svg_markup(&href));

        let css = filter.backdrop_css();
        dom::set_style(&self.target, "backdrop-filter", &css);
        dom::set_style(&self.target, "-webkit-backdrop-filter", &css);
        Ok(())
    }

    /// Follows the element's laid-out size; a zero size keeps the old map.
    fn refit(&mut self) -> Result<(), FxError> {
        let (w, h) = (self.target.offset_width(), self.target.offset_height());
        let (Ok(w), Ok(h)) = (usize::try_from(w), usize::try_from(h)) else {
            return Ok(());
        };
        if w == 0 || h == 0 || (w, h) == (self.field.width(), self.field.height()) {
            return Ok(());
        }
        self.field.regenerate(w, h)?;
        log::debug!("glass {} regenerated at {w}x{h}", self.id);
        self.render()
    }
}

impl Drop for GlassState {
    fn drop(&mut self) {
        self.holder.remove();
        let style = self.target.style();
        let _ = style.remove_property("backdrop-filter");
        let _ = style.remove_property("-webkit-backdrop-filter");
    }
}

/// Live glass filter on one element. Dropping it removes the SVG and the
/// backdrop treatment.
pub(crate) struct Glass {
    _state: Rc<RefCell<GlassState>>,
    _resize: Listener,
}

impl Glass {
    pub(crate) fn attach(
        window: &web_sys::Window,
        document: &Document,
        target: &HtmlElement,
        size: (usize, usize),
        warp: Warp,
    ) -> Result<Self, FxError> {
        let field = DisplacementField::generate(size.0, size.1, warp)?;
        let holder = document.create_element("div").map_err(env_err("createElement"))?;
        dom::body(document)?
            .append_child(&holder)
            .map_err(env_err("appendChild"))?;

        let id = format!("glass-fx-{}", NEXT_ID.fetch_add(1, Ordering::Relaxed));
        let state = GlassState {
            document: document.clone(),
            target: target.clone(),
            holder,
            id,
            field,
        };
        state.render()?;
        let state = Rc::new(RefCell::new(state));

        let on_resize = Rc::clone(&state);
        let resize = Listener::new(window, "resize", move |_| {
            if let Err(e) = on_resize.borrow_mut().refit() {
                log::warn!("glass refit failed: {e}");
            }
        })?;

        Ok(Self {
            _state: state,
            _resize: resize,
        })
    }
}

/// Encodes `map` as a PNG data URL through an offscreen canvas.
fn data_url(document: &Document, map: &EncodedMap) -> Result<String, FxError> {
    let w = u32::try_from(map.width).map_err(|_| FxError::InvalidDimensions)?;
    let h = u32::try_from(map.height).map_err(|_| FxError::InvalidDimensions)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(env_err("createElement"))?
        .dyn_into()
        .map_err(|_| FxError::EnvironmentUnavailable("canvas element".into()))?;
    canvas.set_width(w);
    canvas.set_height(h);

    let ctx = context_2d(&canvas)?;
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&map.rgba), w, h)
        .map_err(env_err("ImageData"))?;
    ctx.put_image_data(&image, 0.0, 0.0)
        .map_err(env_err("putImageData"))?;
    canvas.to_data_url().map_err(env_err("toDataURL"))
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FxError> {
    canvas
        .get_context("2d")
        .map_err(env_err("getContext"))?
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or_else(|| FxError::EnvironmentUnavailable("2d context".into()))
}
