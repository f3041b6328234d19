//! Bein Bergen page behavior.
//!
//! Built as a `cdylib` for the browser, where the module's start function boots the site on
//! the loaded page. Native builds only re-export the widget layer.

pub use site::{Site, SiteConfig};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        platform::run().map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
