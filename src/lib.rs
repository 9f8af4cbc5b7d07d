#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod debounce;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod scheduler;
pub mod shaders;
pub mod viewport;

pub use config::{EffectConfig, ResumePolicy};
pub use error::{ShaderStage, WaterError};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod probe;
    mod program;
    mod quad;
    mod render;
    mod texture;

    pub use render::{mount, WaterHandle};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Failures are logged and answered with the static image; nothing is
        // thrown at the page.
        if let Err(err) = mount(&window, &document, &crate::EffectConfig::default()) {
            log::error!("water effect failed: {err}");
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, WaterHandle};
