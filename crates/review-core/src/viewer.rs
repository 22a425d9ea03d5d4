//! Layout coordinator for the side-by-side PDF and commentary view
//!
//! `ReviewViewer` owns everything the two panes share: the selected file,
//! the page count, the current page, the render scale, the captured page
//! width, the split position and the review sections. Render surfaces and the
//! commentary panel only report events to it and receive directives back.
//!
//! ## Scroll synchronization
//!
//! Activating a check sets the current page and asks for a scroll. The scroll
//! is released as soon as the target page has acknowledged mounting (its
//! [`RenderEvent::PageRendered`]), either immediately or when that event
//! arrives later. Browser hosts additionally arm a one-shot timer of
//! [`ReviewViewer::scroll_delay_ms`] and call
//! [`ReviewViewer::fallback_scroll`] when it fires; after
//! [`ReviewViewer::close`] both paths yield nothing.

use std::collections::BTreeSet;

use review_types::{Document, Feedback, Section};
use tracing::{debug, info, warn};

use crate::commentary::{CommentaryPanel, PanelAction, PanelEvent};
use crate::config::ViewerConfig;
use crate::error::{Result, ReviewError};
use crate::routes::Route;
use crate::scale::{compute_scale_with, pane_width_px, scale_percent};
use crate::selection::{load_selection, SelectionStore};
use crate::surface::{RenderEvent, ScrollDirective};
use crate::upload::FileHandle;

/// Tolerance when checking that split-pane percentages add up to 100.
const PANE_SUM_TOLERANCE: f64 = 0.5;

/// Result of opening the viewer.
#[derive(Debug)]
pub enum MountOutcome {
    Ready(Box<ReviewViewer>),
    /// Nothing usable is selected; navigate here instead.
    Redirect(Route),
}

#[derive(Debug)]
pub struct ReviewViewer {
    config: ViewerConfig,
    document: Document,
    sections: Vec<Section>,
    file: Option<FileHandle>,
    total_pages: Option<u32>,
    current_page: u32,
    scale: f64,
    intrinsic_width: Option<f64>,
    left_pane_percent: f64,
    container_width: f64,
    mounted_pages: BTreeSet<u32>,
    pending_scroll: Option<u32>,
    closed: bool,
}

impl ReviewViewer {
    /// Build a viewer for `document`. Fails if `config` does not validate.
    pub fn new(config: ViewerConfig, document: Document, sections: Vec<Section>) -> Result<Self> {
        config.validate()?;
        let left_pane_percent = config.default_left_pane_percent;
        Ok(Self {
            config,
            document,
            sections,
            file: None,
            total_pages: None,
            current_page: 1,
            scale: 1.0,
            intrinsic_width: None,
            left_pane_percent,
            container_width: 0.0,
            mounted_pages: BTreeSet::new(),
            pending_scroll: None,
            closed: false,
        })
    }

    /// Open the viewer for the document recorded in `store`.
    ///
    /// Redirects to the document list when nothing is selected, or when the
    /// route names a different document than the one selected.
    pub fn mount<S: SelectionStore + ?Sized>(
        config: ViewerConfig,
        store: &S,
        route: &Route,
        sections: Vec<Section>,
    ) -> Result<MountOutcome> {
        let Some(document) = load_selection(store, &config.selection_key)? else {
            debug!("no selected document, redirecting to list");
            return Ok(MountOutcome::Redirect(Route::DocumentList));
        };

        if let Some(route_id) = route.document_id() {
            if route_id != document.document_id {
                warn!(
                    route_id,
                    selected = %document.document_id,
                    "route does not match selected document"
                );
                return Ok(MountOutcome::Redirect(Route::DocumentList));
            }
        }

        info!(document = %document.document_name, "viewer mounted");
        Ok(MountOutcome::Ready(Box::new(Self::new(config, document, sections)?)))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn intrinsic_width(&self) -> Option<f64> {
        self.intrinsic_width
    }

    pub fn left_pane_percent(&self) -> f64 {
        self.left_pane_percent
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn scroll_delay_ms(&self) -> u32 {
        self.config.scroll_delay_ms
    }

    pub fn pending_scroll(&self) -> Option<u32> {
        self.pending_scroll
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Accept a newly picked file.
    ///
    /// Non-PDF input is rejected with [`ReviewError::InvalidFileType`] and
    /// leaves every piece of state untouched.
    pub fn select_file(&mut self, file: FileHandle) -> Result<()> {
        if let Err(e) = file.ensure_pdf() {
            warn!(file = %file.name, mime = %file.mime_type, "rejected non-PDF file");
            return Err(e);
        }

        info!(file = %file.name, size = file.size(), "file selected");
        self.file = Some(file);
        self.intrinsic_width = None;
        self.total_pages = None;
        self.current_page = 1;
        self.mounted_pages.clear();
        self.pending_scroll = None;
        Ok(())
    }

    /// Record the page count reported once the document parses.
    pub fn document_loaded(&mut self, page_count: u32) -> Result<()> {
        if page_count == 0 {
            return Err(ReviewError::EmptyDocument);
        }
        self.total_pages = Some(page_count);
        self.current_page = self.current_page.clamp(1, page_count);
        if let Some(target) = self.pending_scroll {
            self.pending_scroll = Some(target.clamp(1, page_count));
        }
        info!(page_count, "document loaded");
        Ok(())
    }

    /// Record that `page` finished painting with the given unscaled width.
    ///
    /// Only the first report after a file selection sets the captured width.
    /// Returns the held scroll if it was waiting on this page.
    pub fn page_rendered(&mut self, page: u32, intrinsic_width: f64) -> Option<ScrollDirective> {
        if self.closed {
            return None;
        }
        self.mounted_pages.insert(page);

        if self.intrinsic_width.is_none() && intrinsic_width.is_finite() && intrinsic_width > 0.0 {
            self.intrinsic_width = Some(intrinsic_width);
            self.recompute_scale();
            debug!(page, intrinsic_width, scale = self.scale, "captured page width");
        }

        if self.pending_scroll == Some(page) {
            self.pending_scroll = None;
            return Some(ScrollDirective::to_page(page));
        }
        None
    }

    /// Feed one render surface event through the matching transition.
    pub fn handle_render_event(&mut self, event: RenderEvent) -> Result<Option<ScrollDirective>> {
        match event {
            RenderEvent::DocumentParsed { page_count } => {
                self.document_loaded(page_count)?;
                Ok(None)
            }
            RenderEvent::PageRendered {
                page,
                intrinsic_width,
            } => Ok(self.page_rendered(page, intrinsic_width)),
        }
    }

    /// Apply the split-pane layout, given as `[left, right]` percentages.
    ///
    /// Neither pane goes below the configured minimum share. Returns the new
    /// render scale.
    pub fn pane_resized(&mut self, sizes: &[f64]) -> Result<f64> {
        let [left, right] = sizes else {
            return Err(ReviewError::Validation(format!(
                "expected two pane sizes, got {}",
                sizes.len()
            )));
        };
        let valid = |p: f64| p.is_finite() && (0.0..=100.0).contains(&p);
        if !valid(*left) || !valid(*right) || (left + right - 100.0).abs() > PANE_SUM_TOLERANCE {
            return Err(ReviewError::Validation(format!(
                "pane sizes must be percentages summing to 100, got {} and {}",
                left, right
            )));
        }

        let min = self.config.min_pane_percent;
        self.left_pane_percent = left.clamp(min, 100.0 - min);
        self.recompute_scale();
        debug!(left = self.left_pane_percent, scale = self.scale, "pane resized");
        Ok(self.scale)
    }

    /// Apply a new container width in pixels. Returns the new render scale.
    pub fn container_resized(&mut self, width_px: f64) -> f64 {
        if width_px.is_finite() && width_px >= 0.0 {
            self.container_width = width_px;
            self.recompute_scale();
        }
        self.scale
    }

    fn recompute_scale(&mut self) {
        let pane = pane_width_px(self.container_width, self.left_pane_percent);
        self.scale = compute_scale_with(&self.config.scale, pane, self.intrinsic_width);
    }

    /// Navigate to `page` in response to a section or check activation.
    ///
    /// Returns a scroll directive right away when the page is already
    /// mounted; otherwise the scroll is held until it is.
    pub fn activate_page(&mut self, page: u32) -> Option<ScrollDirective> {
        if self.closed {
            return None;
        }

        let target = match self.total_pages {
            Some(total) => page.clamp(1, total),
            None => page.max(1),
        };
        self.current_page = target;
        debug!(requested = page, target, "page activated");

        if self.mounted_pages.contains(&target) {
            self.pending_scroll = None;
            Some(ScrollDirective::to_page(target))
        } else {
            self.pending_scroll = Some(target);
            None
        }
    }

    /// Release a held scroll when the fallback timer fires.
    pub fn fallback_scroll(&mut self) -> Option<ScrollDirective> {
        if self.closed {
            return None;
        }
        self.pending_scroll.take().map(ScrollDirective::to_page)
    }

    /// Set the feedback of one check to an already-toggled value.
    pub fn set_feedback(
        &mut self,
        section_id: &str,
        check_id: &str,
        feedback: Option<Feedback>,
    ) -> Result<()> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| ReviewError::UnknownSection(section_id.to_string()))?;
        let check = section
            .check_mut(check_id)
            .ok_or_else(|| ReviewError::UnknownCheck {
                section_id: section_id.to_string(),
                check_id: check_id.to_string(),
            })?;
        check.check_feedback = feedback;
        debug!(section_id, check_id, ?feedback, "feedback updated");
        Ok(())
    }

    pub fn apply_panel_action(&mut self, action: PanelAction) -> Result<Option<ScrollDirective>> {
        match action {
            PanelAction::NavigateToPage(page) => Ok(self.activate_page(page)),
            PanelAction::SetFeedback {
                section_id,
                check_id,
                feedback,
            } => {
                self.set_feedback(&section_id, &check_id, feedback)?;
                Ok(None)
            }
            PanelAction::ExpansionChanged { .. } => Ok(None),
        }
    }

    /// Route a commentary panel click through the panel and apply the result.
    pub fn handle_panel_event(
        &mut self,
        panel: &mut CommentaryPanel,
        event: PanelEvent,
    ) -> Result<Option<ScrollDirective>> {
        let action = panel.handle(&self.sections, event)?;
        self.apply_panel_action(action)
    }

    /// Footer text.
    pub fn status_line(&self) -> String {
        if self.file.is_none() {
            return "No PDF file selected".to_string();
        }
        let total = self
            .total_pages
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "Page {} of {} • Scale: {}%",
            self.current_page,
            total,
            scale_percent(self.scale)
        )
    }

    /// Tear the viewer down. Held scrolls and late acknowledgments become no-ops.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending_scroll = None;
        debug!("viewer closed");
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::sample;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Nav {
        Activate(u32),
        Rendered(u32),
        Fallback,
        Resize(f64),
    }

    fn nav() -> impl Strategy<Value = Nav> {
        prop_oneof![
            (0u32..50).prop_map(Nav::Activate),
            (1u32..50).prop_map(Nav::Rendered),
            Just(Nav::Fallback),
            (30.0f64..70.0).prop_map(Nav::Resize),
        ]
    }

    proptest! {
        /// Property: current page stays in [1, total] and scale in [0.5, 2.0]
        #[test]
        fn navigation_keeps_page_in_bounds(
            total in 1u32..30,
            container in 0.0f64..4000.0,
            events in prop::collection::vec(nav(), 0..40),
        ) {
            let mut v = ReviewViewer::new(
                ViewerConfig::default(),
                sample::documents().remove(0),
                sample::sections(),
            )
            .unwrap();
            v.select_file(FileHandle::new("a.pdf", "application/pdf", vec![])).unwrap();
            v.document_loaded(total).unwrap();
            v.container_resized(container);

            for event in events {
                match event {
                    Nav::Activate(p) => { v.activate_page(p); }
                    Nav::Rendered(p) => { v.page_rendered(p, 612.0); }
                    Nav::Fallback => { v.fallback_scroll(); }
                    Nav::Resize(left) => { v.pane_resized(&[left, 100.0 - left]).unwrap(); }
                }
                prop_assert!((1..=total).contains(&v.current_page()));
                prop_assert!(v.scale() == 1.0 || (0.5..=2.0).contains(&v.scale()));
            }
        }
    }
}
