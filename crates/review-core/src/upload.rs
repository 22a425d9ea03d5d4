//! Files picked by the user and the upload dialog around them

use std::fmt;

use crate::error::{Result, ReviewError};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Document types offered by the upload dialog.
pub const DOCUMENT_TYPES: [&str; 5] = ["Annual", "Quarterly", "Monthly", "Adhoc", "Semi-Annual"];

/// A file as handed over by the browser file picker.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// The picker's reported MIME type decides, not the extension.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Fail with [`ReviewError::InvalidFileType`] unless this is a PDF.
    pub fn ensure_pdf(&self) -> Result<()> {
        if self.is_pdf() {
            Ok(())
        } else {
            Err(ReviewError::InvalidFileType {
                name: self.name.clone(),
                mime_type: self.mime_type.clone(),
            })
        }
    }
}

// Bytes are left out so logs stay readable.
impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// What the upload dialog hands to the document list on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: FileHandle,
    pub document_type: String,
}

/// State of the "Upload Document" dialog.
#[derive(Debug, Default)]
pub struct UploadDialog {
    open: bool,
    selected_file: Option<FileHandle>,
    document_type: Option<String>,
}

impl UploadDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing keeps the current selection, as cancelling does in the page.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn select_file(&mut self, file: FileHandle) {
        self.selected_file = Some(file);
    }

    pub fn selected_file(&self) -> Option<&FileHandle> {
        self.selected_file.as_ref()
    }

    pub fn set_document_type(&mut self, document_type: &str) -> Result<()> {
        let known = DOCUMENT_TYPES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(document_type.trim()))
            .ok_or_else(|| {
                ReviewError::Validation(format!("Unknown document type: {}", document_type))
            })?;
        self.document_type = Some((*known).to_string());
        Ok(())
    }

    pub fn document_type(&self) -> Option<&str> {
        self.document_type.as_deref()
    }

    /// Text shown in the drop zone.
    pub fn drop_zone_label(&self) -> &str {
        match &self.selected_file {
            Some(file) => &file.name,
            None => "Drag and drop your file here or click to browse",
        }
    }

    pub fn can_upload(&self) -> bool {
        self.selected_file.is_some() && self.document_type.is_some()
    }

    /// Take the selection, reset the dialog and close it.
    pub fn submit(&mut self) -> Result<UploadRequest> {
        if !self.can_upload() {
            return Err(ReviewError::Validation(
                "Select a file and a document type before uploading".to_string(),
            ));
        }
        let file = self
            .selected_file
            .take()
            .ok_or_else(|| ReviewError::Validation("No file selected".to_string()))?;
        let document_type = self.document_type.take().unwrap_or_default();
        self.open = false;
        tracing::info!(file = %file.name, %document_type, "upload submitted");
        Ok(UploadRequest {
            file,
            document_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf() -> FileHandle {
        FileHandle::new("report.pdf", "application/pdf", b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_mime_type_decides_pdf() {
        assert!(pdf().is_pdf());
        assert!(FileHandle::new("x", "APPLICATION/PDF", vec![]).is_pdf());
        assert!(!FileHandle::new("notes.pdf", "text/plain", vec![]).is_pdf());
    }

    #[test]
    fn test_ensure_pdf_reports_file() {
        let err = FileHandle::new("notes.txt", "text/plain", vec![])
            .ensure_pdf()
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload a valid PDF file");
        assert!(
            matches!(err, ReviewError::InvalidFileType { ref name, .. } if name == "notes.txt")
        );
    }

    #[test]
    fn test_debug_hides_bytes() {
        let debug = format!("{:?}", pdf());
        assert!(debug.contains("size: 8"));
        assert!(!debug.contains("37"));
    }

    #[test]
    fn test_upload_requires_file_and_type() {
        let mut dialog = UploadDialog::new();
        dialog.open();
        assert!(!dialog.can_upload());

        dialog.select_file(pdf());
        assert!(!dialog.can_upload());
        assert!(dialog.submit().is_err());

        dialog.set_document_type("Quarterly").unwrap();
        assert!(dialog.can_upload());

        let request = dialog.submit().unwrap();
        assert_eq!(request.document_type, "Quarterly");
        assert_eq!(request.file.name, "report.pdf");
        assert!(!dialog.is_open());
        assert!(dialog.selected_file().is_none());
        assert!(dialog.document_type().is_none());
    }

    #[test]
    fn test_unknown_document_type() {
        let mut dialog = UploadDialog::new();
        assert!(dialog.set_document_type("Weekly").is_err());
        dialog.set_document_type("semi-annual").unwrap();
        assert_eq!(dialog.document_type(), Some("Semi-Annual"));
    }

    #[test]
    fn test_drop_zone_label() {
        let mut dialog = UploadDialog::new();
        assert_eq!(
            dialog.drop_zone_label(),
            "Drag and drop your file here or click to browse"
        );
        dialog.select_file(pdf());
        assert_eq!(dialog.drop_zone_label(), "report.pdf");
    }
}
