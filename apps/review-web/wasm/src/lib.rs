//! Browser bindings for the document review front end

use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod api_client;
pub mod checks_list;
pub mod commentary_panel;
pub mod document_list;
pub mod pdf_viewer;
pub mod storage;
pub mod viewer_session;

pub use api_client::ApiClient;
pub use checks_list::{ChecksPage, RunChecksPage};
pub use document_list::DocumentListPage;
pub use pdf_viewer::{init_pdf_js, PdfSurface};
pub use storage::LocalStorageSelection;
pub use viewer_session::ReviewSession;

/// Convert to a plain JS value. Maps and flattened structs become objects, not `Map`s.
pub(crate) fn to_plain_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Review viewer WASM initialized".into());
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Resolve a browser path to the canonical route path; unknown paths map to `/`.
#[wasm_bindgen(js_name = resolveRoute)]
pub fn resolve_route(path: &str) -> String {
    review_core::Route::parse(path).path()
}

/// Render scale for a pane and page width in pixels; pass no width if unknown.
#[wasm_bindgen(js_name = computeScale)]
pub fn compute_scale(pane_width: f64, page_width: Option<f64>) -> f64 {
    review_core::compute_scale(pane_width, page_width)
}
