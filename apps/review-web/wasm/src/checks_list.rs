//! Check catalog page, its add/edit form and the per-document run page

use review_core::catalog::AVAILABLE_SECTIONS;
use review_core::{sample, CheckCatalog, CheckForm, ReviewError, RunChecks};
use wasm_bindgen::prelude::*;

use crate::document_list::today;
use crate::to_plain_value;

fn to_js(e: ReviewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct ChecksPage {
    catalog: CheckCatalog,
    form: Option<CheckForm>,
}

impl Default for ChecksPage {
    fn default() -> Self {
        Self {
            catalog: CheckCatalog::new(sample::check_definitions()),
            form: None,
        }
    }
}

impl ChecksPage {
    fn form_mut(&mut self) -> Result<&mut CheckForm, JsValue> {
        self.form
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Check form is not open"))
    }
}

#[wasm_bindgen]
impl ChecksPage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definitions(&self) -> Result<JsValue, JsValue> {
        to_plain_value(self.catalog.definitions())
    }

    #[wasm_bindgen(js_name = availableSections)]
    pub fn available_sections(&self) -> Vec<String> {
        AVAILABLE_SECTIONS.iter().map(|s| s.to_string()).collect()
    }

    /// Open a blank form.
    #[wasm_bindgen(js_name = beginAdd)]
    pub fn begin_add(&mut self) {
        self.form = Some(CheckForm::for_new());
    }

    /// Open the form prefilled from definition `id`.
    #[wasm_bindgen(js_name = beginEdit)]
    pub fn begin_edit(&mut self, id: &str) -> Result<(), JsValue> {
        let definition = self
            .catalog
            .get(id)
            .ok_or_else(|| to_js(ReviewError::UnknownDefinition(id.to_string())))?;
        self.form = Some(CheckForm::for_edit(definition));
        Ok(())
    }

    #[wasm_bindgen(js_name = cancelForm)]
    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    #[wasm_bindgen(js_name = isFormOpen)]
    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    /// Update the text fields of the open form.
    #[wasm_bindgen(js_name = setFields)]
    pub fn set_fields(
        &mut self,
        name: &str,
        description: &str,
        prompt: &str,
    ) -> Result<(), JsValue> {
        let draft = self.form_mut()?.draft_mut();
        draft.check_name = name.to_string();
        draft.check_description = description.to_string();
        draft.detailed_prompt = prompt.to_string();
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleSection)]
    pub fn toggle_section(&mut self, section: &str) -> Result<(), JsValue> {
        self.form_mut()?.toggle_section(section).map_err(to_js)
    }

    #[wasm_bindgen(js_name = selectedSections)]
    pub fn selected_sections(&self) -> Vec<String> {
        self.form
            .as_ref()
            .map(|f| f.draft().associated_sections.clone())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = canSave)]
    pub fn can_save(&self) -> bool {
        self.form.as_ref().is_some_and(CheckForm::can_save)
    }

    /// Save the open form and close it. Returns the saved definition's id.
    pub fn save(&mut self) -> Result<String, JsValue> {
        let form = self
            .form
            .take()
            .ok_or_else(|| JsValue::from_str("Check form is not open"))?;
        let saved = form.save(&mut self.catalog, today()).map_err(to_js)?;
        Ok(saved.id.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), JsValue> {
        self.catalog.delete(id).map(|_| ()).map_err(to_js)
    }
}

#[wasm_bindgen]
pub struct RunChecksPage {
    runs: RunChecks,
}

#[wasm_bindgen]
impl RunChecksPage {
    #[wasm_bindgen(constructor)]
    pub fn new(document_id: &str) -> Self {
        Self {
            runs: RunChecks::new(document_id, sample::check_mappings()),
        }
    }

    pub fn rows(&self) -> Result<JsValue, JsValue> {
        to_plain_value(self.runs.rows())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), JsValue> {
        self.runs.delete(id).map_err(to_js)
    }

    pub fn run(&self) -> Result<JsValue, JsValue> {
        let rows = self.runs.run();
        web_sys::console::log_1(&format!("Running {} checks", rows.len()).into());
        to_plain_value(rows)
    }

    /// Path of the viewer showing this document's results.
    #[wasm_bindgen(js_name = viewResults)]
    pub fn view_results(&self) -> String {
        self.runs.view_results().path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lifecycle() {
        let mut page = ChecksPage::new();
        assert!(!page.is_form_open());
        assert!(!page.can_save());

        page.begin_edit("1").unwrap();
        assert_eq!(
            page.selected_sections(),
            vec!["Document Formatting", "Page Layout"]
        );
        page.toggle_section("Page Layout").unwrap();
        assert_eq!(page.selected_sections(), vec!["Document Formatting"]);
        assert!(page.can_save());

        page.cancel_form();
        assert!(page.selected_sections().is_empty());
    }

    #[test]
    fn test_run_page_paths() {
        let mut page = RunChecksPage::new("5");
        page.delete("1").unwrap();
        assert_eq!(page.runs.rows().len(), 2);
        assert_eq!(page.view_results(), "/viewer/5");
    }
}
