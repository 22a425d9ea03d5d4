//! Document list page and its upload dialog

use std::str::FromStr;

use chrono::NaiveDate;
use js_sys::{Array, Uint8Array};
use review_core::upload::DOCUMENT_TYPES;
use review_core::{
    sample, DateRange, DocumentList, FileHandle, ReviewError, UploadDialog, ViewerConfig,
};
use review_types::{Document, DocumentStatus};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData};

use crate::api_client::ApiClient;
use crate::storage::LocalStorageSelection;
use crate::to_plain_value;

const DOCUMENTS_PATH: &str = "/documents";
const UPLOAD_PATH: &str = "/documents/upload";

fn to_js(e: ReviewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Local calendar date from the browser clock.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Treat an empty select value as "all".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Serialize)]
struct DocumentRow<'a> {
    #[serde(flatten)]
    document: &'a Document,
    can_view: bool,
}

#[wasm_bindgen]
pub struct DocumentListPage {
    list: DocumentList,
    upload: UploadDialog,
    api: Option<ApiClient>,
}

#[wasm_bindgen]
impl DocumentListPage {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<DocumentListPage, JsValue> {
        let config = match config_json {
            Some(json) => ViewerConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid viewer config: {:#}", e)))?,
            None => ViewerConfig::default(),
        };
        let api = (!config.api_base_url.is_empty()).then(|| ApiClient::new(&config.api_base_url));
        Ok(Self {
            list: DocumentList::new(sample::documents(), config.selection_key),
            upload: UploadDialog::new(),
            api,
        })
    }

    /// Filtered rows, each with a `can_view` flag.
    pub fn rows(&self) -> Result<JsValue, JsValue> {
        let rows: Vec<DocumentRow> = self
            .list
            .filtered(today())
            .into_iter()
            .map(|document| DocumentRow {
                document,
                can_view: DocumentList::can_view(document),
            })
            .collect();
        to_plain_value(&rows)
    }

    pub fn clients(&self) -> Result<JsValue, JsValue> {
        to_plain_value(&self.list.clients())
    }

    pub fn statuses(&self) -> Vec<String> {
        self.list
            .statuses()
            .iter()
            .map(|s| s.label().to_string())
            .collect()
    }

    #[wasm_bindgen(js_name = setClient)]
    pub fn set_client(&mut self, client: Option<String>) {
        self.list.filter.client = non_empty(client);
    }

    #[wasm_bindgen(js_name = setStatus)]
    pub fn set_status(&mut self, status: Option<String>) -> Result<(), JsValue> {
        self.list.filter.status = match non_empty(status) {
            Some(s) => Some(
                DocumentStatus::from_str(&s).map_err(|e| JsValue::from_str(&e.to_string()))?,
            ),
            None => None,
        };
        Ok(())
    }

    #[wasm_bindgen(js_name = setDateRange)]
    pub fn set_date_range(&mut self, days: Option<String>) -> Result<(), JsValue> {
        self.list.filter.date_range = match non_empty(days) {
            Some(d) => Some(DateRange::from_days(&d).map_err(to_js)?),
            None => None,
        };
        Ok(())
    }

    /// Row click. Returns the path to navigate to.
    pub fn open(&self, document_id: &str) -> Result<String, JsValue> {
        let mut store = LocalStorageSelection::open()?;
        self.list
            .open(&mut store, document_id)
            .map(|r| r.path())
            .map_err(to_js)
    }

    pub fn view(&self, document_id: &str) -> Result<String, JsValue> {
        let mut store = LocalStorageSelection::open()?;
        self.list
            .view(&mut store, document_id)
            .map(|r| r.path())
            .map_err(to_js)
    }

    pub fn edit(&self, document_id: &str) -> Result<String, JsValue> {
        let mut store = LocalStorageSelection::open()?;
        self.list
            .edit(&mut store, document_id)
            .map(|r| r.path())
            .map_err(to_js)
    }

    pub fn download(&self, document_id: &str) -> Result<(), JsValue> {
        self.list.download(document_id).map_err(to_js)?;
        web_sys::console::log_1(&format!("Downloading document {}", document_id).into());
        Ok(())
    }

    /// Reload rows from the document service, or the built-in set without one.
    pub async fn refresh(&mut self) -> Result<(), JsValue> {
        let documents = match &self.api {
            Some(api) => {
                let value = api.get(DOCUMENTS_PATH).await?;
                serde_wasm_bindgen::from_value::<Vec<Document>>(value)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => sample::documents(),
        };
        self.list.refresh(documents);
        Ok(())
    }

    #[wasm_bindgen(js_name = documentTypes)]
    pub fn document_types(&self) -> Vec<String> {
        DOCUMENT_TYPES.iter().map(|t| t.to_string()).collect()
    }

    #[wasm_bindgen(js_name = openUpload)]
    pub fn open_upload(&mut self) {
        self.upload.open();
    }

    #[wasm_bindgen(js_name = closeUpload)]
    pub fn close_upload(&mut self) {
        self.upload.close();
    }

    #[wasm_bindgen(js_name = isUploadOpen)]
    pub fn is_upload_open(&self) -> bool {
        self.upload.is_open()
    }

    #[wasm_bindgen(js_name = chooseFile)]
    pub async fn choose_file(&mut self, file: File) -> Result<(), JsValue> {
        let buffer = JsFuture::from(file.array_buffer()).await?;
        let bytes = Uint8Array::new(&buffer).to_vec();
        self.upload
            .select_file(FileHandle::new(file.name(), file.type_(), bytes));
        Ok(())
    }

    #[wasm_bindgen(js_name = setDocumentType)]
    pub fn set_document_type(&mut self, document_type: &str) -> Result<(), JsValue> {
        self.upload.set_document_type(document_type).map_err(to_js)
    }

    #[wasm_bindgen(js_name = dropZoneLabel)]
    pub fn drop_zone_label(&self) -> String {
        self.upload.drop_zone_label().to_string()
    }

    #[wasm_bindgen(js_name = canUpload)]
    pub fn can_upload(&self) -> bool {
        self.upload.can_upload()
    }

    /// Submit the dialog. Posts the file when a document service is configured.
    #[wasm_bindgen(js_name = submitUpload)]
    pub async fn submit_upload(&mut self) -> Result<(), JsValue> {
        let request = self.upload.submit().map_err(to_js)?;
        web_sys::console::log_1(
            &format!(
                "Uploading {} ({})",
                request.file.name, request.document_type
            )
            .into(),
        );

        let Some(api) = &self.api else {
            return Ok(());
        };
        let parts = Array::of1(&Uint8Array::from(request.file.bytes.as_slice()));
        let blob = Blob::new_with_u8_array_sequence(&parts)?;
        let form = FormData::new()?;
        form.append_with_blob_and_filename("file", &blob, &request.file.name)?;
        form.append_with_str("document_type", &request.document_type)?;
        api.upload(UPLOAD_PATH, form).await?;
        Ok(())
    }
}
