//! JSON-over-fetch client for the document service

use review_core::ReviewError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&JsValue>,
    ) -> Result<JsValue, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(body);
        }

        let request = Request::new_with_str_and_init(&self.url(path), &opts)?;
        // The browser sets its own multipart boundary for form uploads.
        if !body.is_some_and(|b| b.is_instance_of::<FormData>()) {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window().ok_or("No window")?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        if !response.ok() {
            return Err(JsValue::from_str(&ReviewError::Http(response.status()).to_string()));
        }

        JsFuture::from(response.json()?).await
    }

    async fn send_json(
        &self,
        method: &str,
        path: &str,
        data: &JsValue,
    ) -> Result<JsValue, JsValue> {
        if data.is_undefined() || data.is_null() {
            return self.send(method, path, None).await;
        }
        let body = js_sys::JSON::stringify(data)?;
        self.send(method, path, Some(&body.into())).await
    }
}

#[wasm_bindgen]
impl ApiClient {
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[wasm_bindgen(getter, js_name = baseUrl)]
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub async fn get(&self, path: &str) -> Result<JsValue, JsValue> {
        self.send("GET", path, None).await
    }

    pub async fn post(&self, path: &str, data: JsValue) -> Result<JsValue, JsValue> {
        self.send_json("POST", path, &data).await
    }

    pub async fn put(&self, path: &str, data: JsValue) -> Result<JsValue, JsValue> {
        self.send_json("PUT", path, &data).await
    }

    pub async fn delete(&self, path: &str) -> Result<JsValue, JsValue> {
        self.send("DELETE", path, None).await
    }

    /// POST a multipart form without a JSON content type.
    pub async fn upload(&self, path: &str, form: FormData) -> Result<JsValue, JsValue> {
        self.send("POST", path, Some(form.as_ref())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new("https://api.example.com/");
        assert_eq!(client.url("/documents"), "https://api.example.com/documents");
        assert_eq!(ApiClient::default().url("/documents"), "/documents");
    }

    #[test]
    fn test_http_error_message() {
        assert_eq!(ReviewError::Http(404).to_string(), "HTTP error! status: 404");
    }
}
