//! localStorage backing for the selected-document record

use review_core::{ReviewError, SelectionStore};
use wasm_bindgen::JsValue;

fn storage_error(e: JsValue) -> ReviewError {
    ReviewError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

pub struct LocalStorageSelection {
    storage: web_sys::Storage,
}

impl LocalStorageSelection {
    pub fn open() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let storage = window.local_storage()?.ok_or("No localStorage")?;
        Ok(Self { storage })
    }
}

impl SelectionStore for LocalStorageSelection {
    fn get_raw(&self, key: &str) -> review_core::Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set_raw(&mut self, key: &str, value: &str) -> review_core::Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove_raw(&mut self, key: &str) -> review_core::Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}
