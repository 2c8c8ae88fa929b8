//! Browser bindings of the experimentum web GUI.
//!
//! The page bootstrap imports the generated module and calls
//! `attachLogStream(streamUrl, plotUrl)` on a result page or
//! `new MigrationList("#migrations")` on the dashboard.

mod dom;
mod http;
mod migrations;
mod stream;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

pub use dom::WebDom;
pub use http::GlooHttp;
pub use migrations::MigrationListHandle;
pub use stream::{attach_log_stream, generate_plots_js, EventSourceChannel};

#[wasm_bindgen(start)]
pub fn start() {
    let debug_enabled = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("debug_enabled").ok().flatten())
        .is_some_and(|v| v == "true");

    let level = if debug_enabled {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Options passed from JavaScript; `undefined` and `null` mean defaults.
fn options_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}
