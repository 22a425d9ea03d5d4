//! Document review viewer core
//!
//! All viewer state lives here as plain Rust so it can be driven from the
//! browser bindings and exercised natively in tests:
//!
//! - [`scale`] maps pane width and page width to a render scale
//! - [`viewer`] is the layout coordinator owning page, scale and pane state
//! - [`commentary`] is the view model for the review sections panel
//! - [`surface`] is the contract with whatever paints PDF pages
//! - [`selection`] carries the chosen document from the list to the viewer
//!
//! The remaining modules back the pages around the viewer: the document
//! list, the upload dialog, the check catalog and the route table.

pub mod catalog;
pub mod commentary;
pub mod config;
pub mod documents;
pub mod error;
pub mod pdf_info;
pub mod routes;
pub mod sample;
pub mod scale;
pub mod selection;
pub mod surface;
pub mod upload;
pub mod viewer;

pub use catalog::{CheckCatalog, CheckDraft, CheckForm, RunChecks};
pub use commentary::{CommentaryPanel, PanelAction, PanelEvent};
pub use config::{ScaleConfig, ViewerConfig};
pub use documents::{DateRange, DocumentFilter, DocumentList};
pub use error::{Result, ReviewError};
pub use routes::Route;
pub use scale::{compute_scale, compute_scale_with};
pub use selection::{MemorySelectionStore, SelectionStore};
pub use surface::{LopdfSurface, RenderEvent, RenderSurface, ScrollDirective};
pub use upload::{FileHandle, UploadDialog, UploadRequest};
pub use viewer::{MountOutcome, ReviewViewer};
