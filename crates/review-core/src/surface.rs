//! Render surface contract
//!
//! A render surface paints the pages of one PDF at a given scale. It reports
//! back through [`RenderEvent`]s: the page count once the document parses,
//! then one event per page as that page finishes painting. Page containers
//! are addressed by 1-based page number through [`page_element_id`].

use tracing::debug;

use crate::error::{Result, ReviewError};
use crate::pdf_info::{page_geometry, PageGeometry};
use crate::upload::FileHandle;

/// Shown in place of any page content while no file is selected.
pub const PLACEHOLDER_TEXT: &str = "Upload a PDF file to view";

/// Shown while the document is being parsed.
pub const LOADING_TEXT: &str = "Loading PDF...";

/// DOM id of the container wrapping page `page`.
pub fn page_element_id(page: u32) -> String {
    format!("page-{}", page)
}

/// Selector matching the container wrapping page `page`.
pub fn page_selector(page: u32) -> String {
    format!("[data-page-number=\"{}\"]", page)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderEvent {
    /// The document parsed; emitted once per loaded file.
    DocumentParsed { page_count: u32 },
    /// A page finished painting. Doubles as the page's mount acknowledgment.
    PageRendered { page: u32, intrinsic_width: f64 },
}

/// Instruction to bring a page into view: smooth, aligned to the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollDirective {
    pub page: u32,
    pub element_id: String,
}

impl ScrollDirective {
    pub fn to_page(page: u32) -> Self {
        Self {
            page,
            element_id: page_element_id(page),
        }
    }
}

/// Directives the layout coordinator sends to a surface.
///
/// Painting itself is surface-specific (synchronous here, asynchronous in the
/// browser); both feed the resulting events back to the coordinator.
pub trait RenderSurface {
    /// Re-paint every page at a new scale.
    fn set_scale(&mut self, scale: f64) -> Result<()>;

    /// Bring a page into view. Unknown pages are ignored.
    fn scroll_to_page(&mut self, directive: &ScrollDirective) -> Result<()>;

    /// Drop all pages and show the placeholder.
    fn clear(&mut self);
}

/// Headless surface backed by `lopdf` page geometry.
///
/// It "paints" by recording which pages exist and at what scale, which is
/// enough to drive the coordinator natively and in tests.
#[derive(Debug, Default)]
pub struct LopdfSurface {
    pages: Vec<PageGeometry>,
    scale: f64,
    scrolled_to: Vec<u32>,
}

impl LopdfSurface {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Self::default()
        }
    }

    /// Parse and paint `file`, returning the events in the order a browser
    /// renderer would emit them.
    pub fn render(&mut self, file: &FileHandle, scale: f64) -> Result<Vec<RenderEvent>> {
        self.clear();
        let pages = page_geometry(&file.bytes)?;
        let page_count = u32::try_from(pages.len())
            .map_err(|_| ReviewError::PdfParse("too many pages".to_string()))?;

        let mut events = Vec::with_capacity(pages.len() + 1);
        events.push(RenderEvent::DocumentParsed { page_count });
        events.extend(pages.iter().map(|p| RenderEvent::PageRendered {
            page: p.page,
            intrinsic_width: p.width,
        }));

        debug!(file = %file.name, page_count, "rendered document");
        self.pages = pages;
        self.scale = scale;
        Ok(events)
    }

    /// Pages are numbered from 1 without gaps, so the last number is the count.
    pub fn page_count(&self) -> u32 {
        self.pages.last().map_or(0, |p| p.page)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pages scrolled to, oldest first.
    pub fn scroll_history(&self) -> &[u32] {
        &self.scrolled_to
    }

    /// What the surface would display: the placeholder or one id per page.
    pub fn page_ids(&self) -> Vec<String> {
        self.pages.iter().map(|p| page_element_id(p.page)).collect()
    }

    pub fn is_showing_placeholder(&self) -> bool {
        self.pages.is_empty()
    }

    /// Painted width of page `page` at the current scale.
    pub fn rendered_width(&self, page: u32) -> Option<f64> {
        self.pages
            .iter()
            .find(|p| p.page == page)
            .map(|p| p.width * self.scale)
    }
}

impl RenderSurface for LopdfSurface {
    fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.scale = scale;
        Ok(())
    }

    fn scroll_to_page(&mut self, directive: &ScrollDirective) -> Result<()> {
        if self.pages.iter().any(|p| p.page == directive.page) {
            self.scrolled_to.push(directive.page);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.pages.clear();
        self.scrolled_to.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf_info::test_pdf;

    fn pdf(sizes: &[(i64, i64)]) -> FileHandle {
        FileHandle::new("doc.pdf", "application/pdf", test_pdf::with_pages(sizes))
    }

    #[test]
    fn test_page_ids_are_one_based() {
        assert_eq!(page_element_id(1), "page-1");
        assert_eq!(page_selector(3), "[data-page-number=\"3\"]");
        assert_eq!(ScrollDirective::to_page(7).element_id, "page-7");
    }

    #[test]
    fn test_render_emits_parse_then_each_page() {
        let mut surface = LopdfSurface::new();
        let events = surface.render(&pdf(&[(612, 792), (842, 595)]), 1.25).unwrap();
        assert_eq!(
            events,
            vec![
                RenderEvent::DocumentParsed { page_count: 2 },
                RenderEvent::PageRendered {
                    page: 1,
                    intrinsic_width: 612.0
                },
                RenderEvent::PageRendered {
                    page: 2,
                    intrinsic_width: 842.0
                },
            ]
        );
        assert_eq!(surface.page_ids(), vec!["page-1", "page-2"]);
        assert_eq!(surface.rendered_width(1), Some(765.0));
    }

    #[test]
    fn test_page_count_follows_rendered_pages() {
        let mut surface = LopdfSurface::new();
        assert_eq!(surface.page_count(), 0);
        surface
            .render(&pdf(&[(612, 792), (612, 792), (842, 595)]), 1.0)
            .unwrap();
        assert_eq!(surface.page_count(), 3);
        surface.clear();
        assert_eq!(surface.page_count(), 0);
    }

    #[test]
    fn test_placeholder_until_rendered() {
        let mut surface = LopdfSurface::new();
        assert!(surface.is_showing_placeholder());
        surface.render(&pdf(&[(612, 792)]), 1.0).unwrap();
        assert!(!surface.is_showing_placeholder());
        surface.clear();
        assert!(surface.is_showing_placeholder());
    }

    #[test]
    fn test_scroll_ignores_missing_pages() {
        let mut surface = LopdfSurface::new();
        surface.render(&pdf(&[(612, 792), (612, 792)]), 1.0).unwrap();
        surface.scroll_to_page(&ScrollDirective::to_page(2)).unwrap();
        surface.scroll_to_page(&ScrollDirective::to_page(9)).unwrap();
        assert_eq!(surface.scroll_history(), &[2]);
    }

    #[test]
    fn test_failed_render_leaves_placeholder() {
        let mut surface = LopdfSurface::new();
        let bad = FileHandle::new("bad.pdf", "application/pdf", b"garbage".to_vec());
        assert!(surface.render(&bad, 1.0).is_err());
        assert!(surface.is_showing_placeholder());
    }
}
