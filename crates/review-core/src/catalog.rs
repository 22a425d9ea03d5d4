//! Check definitions and the per-document check runs

use chrono::NaiveDate;
use review_types::{CheckDefinition, CheckMapping};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ReviewError};
use crate::routes::Route;

pub const AVAILABLE_SECTIONS: [&str; 8] = [
    "Document Formatting",
    "Page Layout",
    "Content Review",
    "Document Structure",
    "Data Validation",
    "Legal Compliance",
    "Technical Specifications",
    "Quality Assurance",
];

/// The user-editable part of a check definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckDraft {
    pub check_name: String,
    pub check_description: String,
    pub detailed_prompt: String,
    pub associated_sections: Vec<String>,
}

/// Add/edit dialog state.
#[derive(Debug, Default)]
pub struct CheckForm {
    draft: CheckDraft,
    editing: Option<String>,
}

impl CheckForm {
    /// Blank form for a new check.
    pub fn for_new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing definition.
    pub fn for_edit(definition: &CheckDefinition) -> Self {
        Self {
            draft: CheckDraft {
                check_name: definition.check_name.clone(),
                check_description: definition.check_description.clone(),
                detailed_prompt: definition.detailed_prompt.clone(),
                associated_sections: definition.associated_sections.clone(),
            },
            editing: Some(definition.id.clone()),
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn draft(&self) -> &CheckDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CheckDraft {
        &mut self.draft
    }

    /// Add the section if absent, remove it if present.
    pub fn toggle_section(&mut self, section: &str) -> Result<()> {
        if !AVAILABLE_SECTIONS.contains(&section) {
            return Err(ReviewError::Validation(format!(
                "unknown section: {}",
                section
            )));
        }
        let sections = &mut self.draft.associated_sections;
        match sections.iter().position(|s| s == section) {
            Some(i) => {
                sections.remove(i);
            }
            None => sections.push(section.to_string()),
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        let d = &self.draft;
        !d.check_name.is_empty()
            && !d.check_description.is_empty()
            && !d.detailed_prompt.is_empty()
            && !d.associated_sections.is_empty()
    }

    /// Commit the form into the catalog.
    pub fn save(self, catalog: &mut CheckCatalog, today: NaiveDate) -> Result<&CheckDefinition> {
        if !self.can_save() {
            return Err(ReviewError::Validation(
                "name, description, prompt and at least one section are required".to_string(),
            ));
        }
        match self.editing {
            Some(id) => catalog.edit(&id, self.draft, today),
            None => Ok(catalog.add(self.draft, today)),
        }
    }
}

#[derive(Debug, Default)]
pub struct CheckCatalog {
    definitions: Vec<CheckDefinition>,
}

impl CheckCatalog {
    pub fn new(definitions: Vec<CheckDefinition>) -> Self {
        Self { definitions }
    }

    pub fn definitions(&self) -> &[CheckDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&CheckDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn add(&mut self, draft: CheckDraft, today: NaiveDate) -> &CheckDefinition {
        let definition = CheckDefinition {
            id: Uuid::new_v4().to_string(),
            check_name: draft.check_name,
            check_description: draft.check_description,
            detailed_prompt: draft.detailed_prompt,
            associated_sections: draft.associated_sections,
            last_updated_date: today,
        };
        info!(id = %definition.id, name = %definition.check_name, "check added");
        let index = self.definitions.len();
        self.definitions.push(definition);
        &self.definitions[index]
    }

    pub fn edit(
        &mut self,
        id: &str,
        draft: CheckDraft,
        today: NaiveDate,
    ) -> Result<&CheckDefinition> {
        let definition = self
            .definitions
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ReviewError::UnknownDefinition(id.to_string()))?;
        definition.check_name = draft.check_name;
        definition.check_description = draft.check_description;
        definition.detailed_prompt = draft.detailed_prompt;
        definition.associated_sections = draft.associated_sections;
        definition.last_updated_date = today;
        info!(id, "check updated");
        Ok(definition)
    }

    pub fn delete(&mut self, id: &str) -> Result<CheckDefinition> {
        let index = self
            .definitions
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| ReviewError::UnknownDefinition(id.to_string()))?;
        info!(id, "check deleted");
        Ok(self.definitions.remove(index))
    }
}

/// Section-to-check mappings queued for one document.
#[derive(Debug)]
pub struct RunChecks {
    document_id: String,
    rows: Vec<CheckMapping>,
}

impl RunChecks {
    pub fn new(document_id: impl Into<String>, rows: Vec<CheckMapping>) -> Self {
        Self {
            document_id: document_id.into(),
            rows,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn rows(&self) -> &[CheckMapping] {
        &self.rows
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        if self.rows.len() == before {
            return Err(ReviewError::Validation(format!("unknown mapping: {}", id)));
        }
        Ok(())
    }

    /// Start a run over the remaining rows.
    pub fn run(&self) -> &[CheckMapping] {
        info!(
            document_id = %self.document_id,
            checks = self.rows.len(),
            "running checks"
        );
        &self.rows
    }

    pub fn view_results(&self) -> Route {
        Route::Viewer {
            document_id: self.document_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    fn filled_form() -> CheckForm {
        let mut form = CheckForm::for_new();
        let draft = form.draft_mut();
        draft.check_name = "Signature Block".to_string();
        draft.check_description = "Signatures are present".to_string();
        draft.detailed_prompt = "Look for signature lines on the last page".to_string();
        form.toggle_section("Legal Compliance").unwrap();
        form
    }

    #[test]
    fn test_add_assigns_fresh_id_and_date() {
        let mut catalog = CheckCatalog::new(sample::check_definitions());
        let added = filled_form().save(&mut catalog, today()).unwrap().clone();
        assert_eq!(catalog.definitions().len(), 6);
        assert_eq!(added.last_updated_date, today());
        assert!(sample::check_definitions().iter().all(|d| d.id != added.id));

        let second = filled_form().save(&mut catalog, today()).unwrap().id.clone();
        assert_ne!(second, added.id);
    }

    #[test]
    fn test_edit_keeps_id_and_refreshes_date() {
        let mut catalog = CheckCatalog::new(sample::check_definitions());
        let mut form = CheckForm::for_edit(catalog.get("3").unwrap());
        assert_eq!(form.editing(), Some("3"));
        assert_eq!(form.draft().check_name, "Financial Data");

        form.draft_mut().check_name = "Financial Figures".to_string();
        let edited = form.save(&mut catalog, today()).unwrap();
        assert_eq!(edited.id, "3");
        assert_eq!(edited.check_name, "Financial Figures");
        assert_eq!(edited.last_updated_date, today());
        assert_eq!(catalog.definitions().len(), 5);
    }

    #[test]
    fn test_toggle_section() {
        let mut form = CheckForm::for_new();
        form.toggle_section("Page Layout").unwrap();
        form.toggle_section("Data Validation").unwrap();
        form.toggle_section("Page Layout").unwrap();
        assert_eq!(form.draft().associated_sections, vec!["Data Validation"]);
        assert!(form.toggle_section("Cover Art").is_err());
    }

    #[test]
    fn test_incomplete_form_cannot_save() {
        let mut catalog = CheckCatalog::default();
        let mut form = filled_form();
        form.toggle_section("Legal Compliance").unwrap();
        assert!(!form.can_save());
        assert!(form.save(&mut catalog, today()).is_err());
        assert!(catalog.definitions().is_empty());
    }

    #[test]
    fn test_delete() {
        let mut catalog = CheckCatalog::new(sample::check_definitions());
        assert_eq!(catalog.delete("2").unwrap().check_name, "Executive Summary");
        assert!(catalog.get("2").is_none());
        assert!(matches!(
            catalog.delete("2"),
            Err(ReviewError::UnknownDefinition(_))
        ));
    }

    #[test]
    fn test_run_checks_rows() {
        let mut runs = RunChecks::new("1", sample::check_mappings());
        runs.delete("2").unwrap();
        assert!(runs.delete("2").is_err());
        let names: Vec<_> = runs.run().iter().map(|r| r.associated_check.as_str()).collect();
        assert_eq!(names, vec!["Page Margins", "Financial Data"]);
        assert_eq!(runs.view_results().path(), "/viewer/1");
    }
}
