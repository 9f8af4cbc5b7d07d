use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, HtmlElement, HtmlImageElement, WebGlContextAttributes,
    WebGlRenderingContext as GL,
};

use crate::error::WaterError;

/// Context ids tried in order; older engines only know the prefixed one.
const CONTEXT_IDS: [&str; 2] = ["webgl", "experimental-webgl"];

pub(crate) fn js_error(err: JsValue) -> WaterError {
    WaterError::Browser(format!("{err:?}"))
}

/// Obtains a WebGL context with an alpha channel and straight (non-premultiplied) alpha.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<GL, WaterError> {
    let attrs = WebGlContextAttributes::new();
    attrs.set_alpha(true);
    attrs.set_premultiplied_alpha(false);

    for id in CONTEXT_IDS {
        match canvas.get_context_with_context_options(id, &attrs) {
            Ok(Some(ctx)) => {
                return ctx.dyn_into::<GL>().map_err(|_| WaterError::ContextUnavailable);
            }
            Ok(None) => {}
            Err(err) => log::debug!("{id} context refused: {err:?}"),
        }
    }
    Err(WaterError::ContextUnavailable)
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::error!("cannot set {property}: {err:?}");
    }
}

/// Leaves the photograph as the only visible content.
pub fn show_fallback(canvas: &HtmlCanvasElement, image: &HtmlImageElement) {
    set_style(canvas, "display", "none");
    set_style(image, "opacity", "1");
}

/// The canvas now draws the photograph itself.
pub fn hide_source_image(image: &HtmlImageElement) {
    set_style(image, "opacity", "0");
}
