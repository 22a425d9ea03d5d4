//! Browser session for the review viewer
//!
//! Wires the layout coordinator to the pdf.js surface, the commentary panel
//! DOM and the fallback scroll timer. All decisions live in
//! [`review_core::ReviewViewer`]; this module only moves events in and
//! applies directives out.
//!
//! Every export takes `&self` and returns without holding a borrow. Painting
//! runs on `spawn_local`, so panel clicks and resizes are handled while pages
//! are still arriving.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::{Function, Object, Promise, Reflect, Uint8Array};
use review_core::{
    sample, CommentaryPanel, FileHandle, MountOutcome, RenderEvent, ReviewError, ReviewViewer,
    Route, ViewerConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{Element, File};

use crate::commentary_panel::{event_for_target, render_into};
use crate::pdf_viewer::{scroll_to_element, PdfSurface};
use crate::storage::LocalStorageSelection;

fn to_js(e: ReviewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn scroll_or_log(element_id: &str) {
    if let Err(e) = scroll_to_element(element_id) {
        web_sys::console::error_1(&e);
    }
}

/// Error value telling the page to navigate elsewhere instead of mounting.
fn redirect_to(route: &Route) -> JsValue {
    let obj = Object::new();
    let _ = Reflect::set(&obj, &"redirect".into(), &route.path().into());
    obj.into()
}

struct SessionState {
    viewer: ReviewViewer,
    panel: CommentaryPanel,
}

/// A pending one-shot `setTimeout`; the closure must outlive the timer.
struct FallbackTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

struct Shared {
    state: RefCell<SessionState>,
    surface: PdfSurface,
    /// The split container holding both panes; its width drives the scale.
    layout_container: Option<Element>,
    panel_container: Element,
    timer: RefCell<Option<FallbackTimer>>,
    /// Bumped whenever painting starts over; older loops stop at their next page.
    paint_generation: Cell<u32>,
    painting: Cell<bool>,
    alert_handler: RefCell<Option<Function>>,
}

impl Shared {
    fn alert(&self, message: &str) -> Result<(), JsValue> {
        let handler = self.alert_handler.borrow().clone();
        match handler {
            Some(handler) => handler
                .call1(&JsValue::NULL, &JsValue::from_str(message))
                .map(|_| ()),
            None => web_sys::window()
                .ok_or("No window")?
                .alert_with_message(message),
        }
    }

    /// Feed the layout container's current width to the coordinator.
    fn measure_container(&self) -> f64 {
        let width = self
            .layout_container
            .as_ref()
            .map_or(0, |el| el.client_width());
        self.state
            .borrow_mut()
            .viewer
            .container_resized(f64::from(width))
    }

    fn is_current(&self, generation: u32) -> bool {
        self.paint_generation.get() == generation && !self.state.borrow().viewer.is_closed()
    }

    fn apply_render_event(&self, event: RenderEvent) -> Result<(), JsValue> {
        let directive = self
            .state
            .borrow_mut()
            .viewer
            .handle_render_event(event)
            .map_err(to_js)?;
        if let Some(directive) = directive {
            self.cancel_fallback();
            scroll_or_log(&directive.element_id);
        }
        Ok(())
    }

    fn start_paint(self: &Rc<Self>, load: bool) {
        let generation = self.paint_generation.get().wrapping_add(1);
        self.paint_generation.set(generation);
        self.painting.set(true);

        let shared = Rc::clone(self);
        spawn_local(async move {
            let result = shared.paint(generation, load).await;
            if shared.paint_generation.get() != generation {
                return;
            }
            shared.painting.set(false);
            if let Err(e) = result {
                web_sys::console::error_1(&e);
            }
        });
    }

    /// Paint every page, starting over if a page changes the scale.
    async fn paint(&self, generation: u32, load: bool) -> Result<(), JsValue> {
        if load {
            let bytes = match self.state.borrow().viewer.file() {
                Some(file) => file.bytes.clone(),
                None => return Ok(()),
            };
            let parsed = self.surface.load(&bytes).await?;
            if !self.is_current(generation) {
                return Ok(());
            }
            self.apply_render_event(parsed)?;
        }

        'paint: loop {
            let scale = self.state.borrow().viewer.scale();
            self.surface.use_scale(scale);

            for page in 1..=self.surface.page_count() {
                let event = self.surface.render_page(page).await?;
                if !self.is_current(generation) {
                    return Ok(());
                }
                self.apply_render_event(event)?;
                if self.state.borrow().viewer.scale() != scale {
                    continue 'paint;
                }
            }
            return Ok(());
        }
    }

    fn render_panel(&self) -> Result<(), JsValue> {
        let view = {
            let state = self.state.borrow();
            state.panel.render(state.viewer.sections())
        };
        render_into(&self.panel_container, &view)
    }

    fn schedule_fallback(self: &Rc<Self>) -> Result<(), JsValue> {
        self.cancel_fallback();

        let weak: Weak<Self> = Rc::downgrade(self);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let directive = shared.state.borrow_mut().viewer.fallback_scroll();
            if let Some(directive) = directive {
                scroll_or_log(&directive.element_id);
            }
        });

        let delay = i32::try_from(self.state.borrow().viewer.scroll_delay_ms()).unwrap_or(i32::MAX);
        let window = web_sys::window().ok_or("No window")?;
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        )?;
        *self.timer.borrow_mut() = Some(FallbackTimer {
            handle,
            _callback: callback,
        });
        Ok(())
    }

    fn cancel_fallback(&self) {
        let timer = self.timer.borrow_mut().take();
        if let Some(timer) = timer {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer.handle);
            }
        }
    }

    fn close(&self) {
        self.paint_generation
            .set(self.paint_generation.get().wrapping_add(1));
        self.painting.set(false);
        self.cancel_fallback();
        self.state.borrow_mut().viewer.close();
    }
}

#[wasm_bindgen]
pub struct ReviewSession {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl ReviewSession {
    /// Open the viewer for the selected document.
    ///
    /// The PDF container's parent is taken as the split container and
    /// measured right away. Rejects with `{ redirect: "/" }` when nothing
    /// usable is selected.
    pub fn mount(
        pdf_container_id: &str,
        panel_container_id: &str,
        path: &str,
        config_json: Option<String>,
    ) -> Result<ReviewSession, JsValue> {
        let config = match config_json {
            Some(json) => ViewerConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid viewer config: {:#}", e)))?,
            None => ViewerConfig::default(),
        };

        let store = LocalStorageSelection::open()?;
        let route = Route::parse(path);
        let viewer = match ReviewViewer::mount(config, &store, &route, sample::sections())
            .map_err(to_js)?
        {
            MountOutcome::Ready(viewer) => *viewer,
            MountOutcome::Redirect(route) => return Err(redirect_to(&route)),
        };

        let surface = PdfSurface::attach(pdf_container_id)?;
        let panel_container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(panel_container_id))
            .ok_or_else(|| {
                JsValue::from_str(&format!("Container not found: {}", panel_container_id))
            })?;

        web_sys::console::log_1(
            &format!("Review viewer mounted for {}", viewer.document().document_name).into(),
        );

        let shared = Rc::new(Shared {
            state: RefCell::new(SessionState {
                viewer,
                panel: CommentaryPanel::new(),
            }),
            layout_container: surface.container().parent_element(),
            surface,
            panel_container,
            timer: RefCell::new(None),
            paint_generation: Cell::new(0),
            painting: Cell::new(false),
            alert_handler: RefCell::new(None),
        });
        shared.measure_container();
        shared.render_panel()?;
        Ok(ReviewSession { shared })
    }

    /// Route user-facing messages to `handler` instead of `window.alert`.
    #[wasm_bindgen(js_name = setAlertHandler)]
    pub fn set_alert_handler(&self, handler: Option<Function>) {
        *self.shared.alert_handler.borrow_mut() = handler;
    }

    /// Load a file picked by the user.
    ///
    /// Resolves to `false` after showing a single alert when the file is not
    /// a PDF; the current document stays on screen. Resolves to `true` once
    /// the file is accepted, with pages painting in the background.
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&self, file: File) -> Promise {
        let name = file.name();
        let mime_type = file.type_();

        if let Err(e) = FileHandle::new(name.clone(), mime_type.clone(), Vec::new()).ensure_pdf() {
            return match self.shared.alert(&e.to_string()) {
                Ok(()) => Promise::resolve(&JsValue::from_bool(false)),
                Err(alert_err) => Promise::reject(&alert_err),
            };
        }

        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            let buffer = JsFuture::from(file.array_buffer()).await?;
            let bytes = Uint8Array::new(&buffer).to_vec();

            shared.cancel_fallback();
            let selected = shared
                .state
                .borrow_mut()
                .viewer
                .select_file(FileHandle::new(name, mime_type, bytes));
            if let Err(e) = selected {
                shared.alert(&e.to_string())?;
                return Ok(JsValue::from_bool(false));
            }

            shared.measure_container();
            shared.start_paint(true);
            Ok(JsValue::from_bool(true))
        })
    }

    /// Re-paint at the current scale after a resize.
    ///
    /// A paint already in progress picks up the new scale by itself.
    pub fn rerender(&self) {
        let shared = &self.shared;
        if shared.painting.get()
            || shared.surface.page_count() == 0
            || shared.surface.scale() == self.scale()
        {
            return;
        }
        shared.start_paint(false);
    }

    /// Split-pane drag callback. Returns the new scale.
    #[wasm_bindgen(js_name = resizePanes)]
    pub fn resize_panes(&self, left: f64, right: f64) -> Result<f64, JsValue> {
        self.shared
            .state
            .borrow_mut()
            .viewer
            .pane_resized(&[left, right])
            .map_err(to_js)
    }

    /// Window resize callback. Pass the split container's width in pixels,
    /// or nothing to have it measured. Returns the new scale.
    #[wasm_bindgen(js_name = resizeContainer)]
    pub fn resize_container(&self, width: Option<f64>) -> f64 {
        match width {
            Some(width) => self.shared.state.borrow_mut().viewer.container_resized(width),
            None => self.shared.measure_container(),
        }
    }

    /// Delegated click handler for the commentary panel container.
    #[wasm_bindgen(js_name = handlePanelClick)]
    pub fn handle_panel_click(&self, target: Element) -> Result<(), JsValue> {
        let Some(event) = event_for_target(&target)? else {
            return Ok(());
        };

        let (directive, pending) = {
            let mut state = self.shared.state.borrow_mut();
            let SessionState { viewer, panel } = &mut *state;
            let directive = viewer.handle_panel_event(panel, event).map_err(to_js)?;
            (directive, viewer.pending_scroll().is_some())
        };

        match directive {
            Some(directive) => {
                self.shared.cancel_fallback();
                scroll_or_log(&directive.element_id);
            }
            None if pending => self.shared.schedule_fallback()?,
            None => {}
        }
        self.shared.render_panel()
    }

    /// Plain-data snapshot of the commentary panel.
    #[wasm_bindgen(js_name = panelView)]
    pub fn panel_view(&self) -> Result<JsValue, JsValue> {
        let state = self.shared.state.borrow();
        crate::to_plain_value(&state.panel.render(state.viewer.sections()))
    }

    pub fn document(&self) -> Result<JsValue, JsValue> {
        crate::to_plain_value(self.shared.state.borrow().viewer.document())
    }

    #[wasm_bindgen(js_name = statusLine)]
    pub fn status_line(&self) -> String {
        self.shared.state.borrow().viewer.status_line()
    }

    #[wasm_bindgen(js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.shared.state.borrow().viewer.current_page()
    }

    #[wasm_bindgen(js_name = totalPages)]
    pub fn total_pages(&self) -> Option<u32> {
        self.shared.state.borrow().viewer.total_pages()
    }

    #[wasm_bindgen(js_name = containerWidth)]
    pub fn container_width(&self) -> f64 {
        self.shared.state.borrow().viewer.container_width()
    }

    pub fn scale(&self) -> f64 {
        self.shared.state.borrow().viewer.scale()
    }

    /// Tear down: stop painting, cancel the fallback timer and ignore late
    /// page renders.
    pub fn close(&self) {
        self.shared.close();
    }
}

impl Drop for ReviewSession {
    fn drop(&mut self) {
        self.shared.close();
    }
}
