use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    /// Shown verbatim in the blocking alert when a non-PDF file is chosen.
    #[error("Please upload a valid PDF file")]
    InvalidFileType { name: String, mime_type: String },

    #[error("PDF has no pages")]
    EmptyDocument,

    #[error("Page {page} is out of range (1-{total})")]
    PageOutOfRange { page: u32, total: u32 },

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown check {check_id} in section {section_id}")]
    UnknownCheck {
        section_id: String,
        check_id: String,
    },

    #[error("Unknown check definition: {0}")]
    UnknownDefinition(String),

    #[error("Failed to parse PDF: {0}")]
    PdfParse(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("HTTP error! status: {0}")]
    Http(u16),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
