//! pdf.js-backed render surface
//!
//! Pages are painted into one canvas each, wrapped in a `div` with id
//! `page-N` and a `data-page-number` attribute so the coordinator's scroll
//! directives can find them.
//!
//! Page count and scale sit in `Cell`s so every method takes `&self`: a
//! session can keep painting while clicks and resizes arrive.

use std::cell::Cell;

use js_sys::{Reflect, Uint8Array};
use review_core::surface::{page_element_id, LOADING_TEXT, PLACEHOLDER_TEXT};
use review_core::{RenderEvent, RenderSurface, ReviewError, ScrollDirective};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

// External JavaScript functions from pdf-bridge.js
#[wasm_bindgen(module = "/www/js/pdf-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = initPdfJs)]
    async fn init_pdf_js_internal(worker_src: &str) -> JsValue;

    #[wasm_bindgen(js_name = loadDocument)]
    async fn load_document_internal(data: Uint8Array) -> JsValue;

    #[wasm_bindgen(js_name = renderPage)]
    async fn render_page_internal(page_num: u32, canvas: &HtmlCanvasElement, scale: f64)
        -> JsValue;

    #[wasm_bindgen(js_name = getPageDimensions)]
    async fn get_page_dimensions_internal(page_num: u32) -> JsValue;
}

/// Point pdf.js at its worker script. Call once before loading documents.
#[wasm_bindgen(js_name = initPdfJs)]
pub async fn init_pdf_js(worker_src: &str) -> Result<(), JsValue> {
    let ready = init_pdf_js_internal(worker_src).await;
    if ready.as_bool() == Some(true) {
        Ok(())
    } else {
        Err(JsValue::from_str("pdf.js is not available"))
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

/// Smoothly scroll the element with `element_id` to the top of its scroller.
///
/// Returns `false` when the element does not exist.
pub fn scroll_to_element(element_id: &str) -> Result<bool, JsValue> {
    let Some(element) = document()?.get_element_by_id(element_id) else {
        return Ok(false);
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(true)
}

pub struct PdfSurface {
    container: Element,
    page_count: Cell<u32>,
    scale: Cell<f64>,
}

impl PdfSurface {
    /// Take over the element with `container_id` and show the placeholder.
    pub fn attach(container_id: &str) -> Result<Self, JsValue> {
        let container = document()?
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("Container not found: {}", container_id)))?;

        let surface = Self {
            container,
            page_count: Cell::new(0),
            scale: Cell::new(1.0),
        };
        surface.show_message(PLACEHOLDER_TEXT)?;
        Ok(surface)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn page_count(&self) -> u32 {
        self.page_count.get()
    }

    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    /// Scale used by the next [`PdfSurface::render_page`] call.
    pub fn use_scale(&self, scale: f64) {
        self.scale.set(scale);
    }

    /// Drop all pages and show the placeholder.
    pub fn reset(&self) {
        self.page_count.set(0);
        if let Err(e) = self.show_message(PLACEHOLDER_TEXT) {
            web_sys::console::error_1(&e);
        }
    }

    fn show_message(&self, text: &str) -> Result<(), JsValue> {
        self.container.set_inner_html("");
        let message = document()?.create_element("div")?;
        message.set_class_name("pdf-placeholder");
        message.set_text_content(Some(text));
        self.container.append_child(&message)?;
        Ok(())
    }

    /// Hand the file bytes to pdf.js and lay out one empty page per PDF page.
    pub async fn load(&self, bytes: &[u8]) -> Result<RenderEvent, JsValue> {
        self.show_message(LOADING_TEXT)?;

        let data = Uint8Array::new_with_length(bytes.len() as u32);
        data.copy_from(bytes);
        let result = load_document_internal(data).await;

        if result.is_undefined() || result.is_null() {
            self.reset();
            return Err(JsValue::from_str("Failed to load PDF document"));
        }

        let page_count = Reflect::get(&result, &JsValue::from_str("numPages"))
            .ok()
            .and_then(|n| n.as_f64())
            .unwrap_or(0.0) as u32;
        if page_count == 0 {
            self.reset();
            return Err(JsValue::from_str(&ReviewError::EmptyDocument.to_string()));
        }

        self.build_pages(page_count)?;
        self.page_count.set(page_count);
        Ok(RenderEvent::DocumentParsed { page_count })
    }

    fn build_pages(&self, page_count: u32) -> Result<(), JsValue> {
        let document = document()?;
        self.container.set_inner_html("");

        for page in 1..=page_count {
            let wrapper = document.create_element("div")?;
            wrapper.set_id(&page_element_id(page));
            wrapper.set_class_name("pdf-page");
            wrapper.set_attribute("data-page-number", &page.to_string())?;
            if let Some(el) = wrapper.dyn_ref::<HtmlElement>() {
                el.style().set_property("margin-bottom", "8px")?;
            }

            let canvas = document.create_element("canvas")?;
            wrapper.append_child(&canvas)?;
            self.container.append_child(&wrapper)?;
        }
        Ok(())
    }

    fn canvas(&self, page: u32) -> Result<HtmlCanvasElement, JsValue> {
        let wrapper = document()?
            .get_element_by_id(&page_element_id(page))
            .ok_or_else(|| JsValue::from_str(&format!("Page {} is not mounted", page)))?;
        wrapper
            .query_selector("canvas")?
            .ok_or_else(|| JsValue::from_str("Page has no canvas"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Page canvas is not a canvas element"))
    }

    /// Paint one page at the current scale.
    pub async fn render_page(&self, page: u32) -> Result<RenderEvent, JsValue> {
        let total = self.page_count();
        if page < 1 || page > total {
            let err = ReviewError::PageOutOfRange { page, total };
            return Err(JsValue::from_str(&err.to_string()));
        }

        let canvas = self.canvas(page)?;
        render_page_internal(page, &canvas, self.scale()).await;

        let dimensions = get_page_dimensions_internal(page).await;
        let intrinsic_width = Reflect::get(&dimensions, &JsValue::from_str("width"))
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);

        Ok(RenderEvent::PageRendered {
            page,
            intrinsic_width,
        })
    }
}

impl RenderSurface for PdfSurface {
    fn set_scale(&mut self, scale: f64) -> review_core::Result<()> {
        self.use_scale(scale);
        Ok(())
    }

    fn scroll_to_page(&mut self, directive: &ScrollDirective) -> review_core::Result<()> {
        scroll_to_element(&directive.element_id)
            .map(|_| ())
            .map_err(|e| ReviewError::Render(format!("{:?}", e)))
    }

    fn clear(&mut self) {
        self.reset();
    }
}
