//! The selected-document record shared by the document list and the viewer
//!
//! The list writes the record when the user opens a document and the viewer
//! reads it once when it mounts. The value is the document serialized as
//! JSON; a record that does not parse reads as "nothing selected".

use std::collections::HashMap;

use review_types::Document;
use tracing::warn;

use crate::error::Result;

/// Key/value backing for the selection record.
pub trait SelectionStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn set_raw(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_raw(&mut self, key: &str) -> Result<()>;
}

/// Read the selected document, if any.
pub fn load_selection<S: SelectionStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<Document>> {
    let Some(raw) = store.get_raw(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => {
            warn!(%key, error = %e, "ignoring unreadable selection record");
            Ok(None)
        }
    }
}

/// Replace the selected document.
pub fn save_selection<S: SelectionStore + ?Sized>(
    store: &mut S,
    key: &str,
    document: &Document,
) -> Result<()> {
    let json = serde_json::to_string(document)?;
    store.set_raw(key, &json)
}

pub fn clear_selection<S: SelectionStore + ?Sized>(store: &mut S, key: &str) -> Result<()> {
    store.remove_raw(key)
}

/// In-process store, used natively and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySelectionStore {
    entries: HashMap<String, String>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemorySelectionStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_raw(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
