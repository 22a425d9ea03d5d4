//! Document list page: filters, row actions and the hand-off to the viewer

use chrono::NaiveDate;
use review_types::{Document, DocumentStatus};
use tracing::info;

use crate::error::{Result, ReviewError};
use crate::routes::Route;
use crate::selection::{save_selection, SelectionStore};

/// "Last N days" filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [
        DateRange::Last7Days,
        DateRange::Last30Days,
        DateRange::Last90Days,
    ];

    pub fn days(&self) -> i64 {
        match self {
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last90Days => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Last7Days => "Last 7 Days",
            DateRange::Last30Days => "Last 30 Days",
            DateRange::Last90Days => "Last 90 Days",
        }
    }

    /// Parse the select value ("7", "30" or "90").
    pub fn from_days(value: &str) -> Result<Self> {
        match value.trim() {
            "7" => Ok(DateRange::Last7Days),
            "30" => Ok(DateRange::Last30Days),
            "90" => Ok(DateRange::Last90Days),
            other => Err(ReviewError::Validation(format!(
                "unknown date range: {}",
                other
            ))),
        }
    }

    /// Whether a document updated on `updated` falls inside the range.
    pub fn contains(&self, updated: NaiveDate, today: NaiveDate) -> bool {
        (today - updated).num_days() <= self.days()
    }
}

/// Active filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    pub client: Option<String>,
    pub status: Option<DocumentStatus>,
    pub date_range: Option<DateRange>,
}

impl DocumentFilter {
    pub fn matches(&self, doc: &Document, today: NaiveDate) -> bool {
        let client = self
            .client
            .as_deref()
            .map_or(true, |c| doc.client_name == c);
        let status = self.status.map_or(true, |s| doc.status == s);
        let date = self
            .date_range
            .map_or(true, |r| r.contains(doc.last_updated_date, today));
        client && status && date
    }
}

#[derive(Debug)]
pub struct DocumentList {
    documents: Vec<Document>,
    pub filter: DocumentFilter,
    selection_key: String,
}

impl DocumentList {
    pub fn new(documents: Vec<Document>, selection_key: impl Into<String>) -> Self {
        Self {
            documents,
            filter: DocumentFilter::default(),
            selection_key: selection_key.into(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Client names in first-seen order, without duplicates.
    pub fn clients(&self) -> Vec<&str> {
        let mut clients: Vec<&str> = Vec::new();
        for doc in &self.documents {
            if !clients.contains(&doc.client_name.as_str()) {
                clients.push(&doc.client_name);
            }
        }
        clients
    }

    pub fn statuses(&self) -> &'static [DocumentStatus] {
        &DocumentStatus::ALL
    }

    pub fn filtered(&self, today: NaiveDate) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| self.filter.matches(doc, today))
            .collect()
    }

    /// The view action is only offered once checks have finished.
    pub fn can_view(doc: &Document) -> bool {
        doc.status == DocumentStatus::ChecksComplete
    }

    fn find(&self, document_id: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.document_id == document_id)
            .ok_or_else(|| ReviewError::Validation(format!("unknown document: {}", document_id)))
    }

    fn select<S: SelectionStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
    ) -> Result<&Document> {
        let doc = self.find(document_id)?;
        save_selection(store, &self.selection_key, doc)?;
        Ok(doc)
    }

    /// Row click: select the document and open the viewer.
    pub fn open<S: SelectionStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
    ) -> Result<Route> {
        let doc = self.select(store, document_id)?;
        info!(document = %doc.document_name, "opening document");
        Ok(Route::Viewer {
            document_id: doc.document_id.clone(),
        })
    }

    /// View button. Rejected unless checks are complete.
    pub fn view<S: SelectionStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
    ) -> Result<Route> {
        let doc = self.find(document_id)?;
        if !Self::can_view(doc) {
            return Err(ReviewError::Validation(format!(
                "{} is not ready to view ({})",
                doc.document_name, doc.status
            )));
        }
        self.open(store, document_id)
    }

    /// Edit button: select the document and go to its check runs.
    pub fn edit<S: SelectionStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
    ) -> Result<Route> {
        let doc = self.select(store, document_id)?;
        Ok(Route::RunChecks {
            document_id: doc.document_id.clone(),
        })
    }

    pub fn download(&self, document_id: &str) -> Result<()> {
        let doc = self.find(document_id)?;
        info!(document = %doc.document_name, "downloading document");
        Ok(())
    }

    /// Replace the rows with a fresh listing. Filters are kept.
    pub fn refresh(&mut self, documents: Vec<Document>) {
        info!(count = documents.len(), "refreshing document list");
        self.documents = documents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::selection::{load_selection, MemorySelectionStore};
    use pretty_assertions::assert_eq;

    const KEY: &str = "selectedDocument";

    fn list() -> DocumentList {
        DocumentList::new(sample::documents(), KEY)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 22).unwrap()
    }

    fn ids(docs: Vec<&Document>) -> Vec<&str> {
        docs.into_iter().map(|d| d.document_id.as_str()).collect()
    }

    #[test]
    fn test_no_filter_lists_everything() {
        assert_eq!(list().filtered(today()).len(), 5);
    }

    #[test]
    fn test_unique_clients_in_order() {
        assert_eq!(list().clients(), vec!["Acme Corp", "Tech Corp", "Global Inc"]);
    }

    #[test]
    fn test_client_and_status_filters_combine() {
        let mut list = list();
        list.filter.client = Some("Acme Corp".to_string());
        assert_eq!(ids(list.filtered(today())), vec!["1", "3", "5"]);

        list.filter.status = Some(DocumentStatus::ChecksInProgress);
        assert_eq!(ids(list.filtered(today())), vec!["3"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut list = list();
        list.filter.date_range = Some(DateRange::Last7Days);
        // 2024-03-15 is exactly seven days before today
        assert_eq!(ids(list.filtered(today())), vec!["1", "2", "3"]);

        list.filter.date_range = Some(DateRange::Last30Days);
        assert_eq!(list.filtered(today()).len(), 5);
    }

    #[test]
    fn test_date_range_parsing() {
        assert_eq!(DateRange::from_days("30").unwrap(), DateRange::Last30Days);
        assert!(DateRange::from_days("14").is_err());
        assert_eq!(DateRange::Last90Days.label(), "Last 90 Days");
    }

    #[test]
    fn test_open_writes_selection() {
        let list = list();
        let mut store = MemorySelectionStore::new();
        let route = list.open(&mut store, "2").unwrap();
        assert_eq!(route.path(), "/viewer/2");
        let selected = load_selection(&store, KEY).unwrap().unwrap();
        assert_eq!(selected.document_name, "Financial Report Q1");
    }

    #[test]
    fn test_view_requires_complete_checks() {
        let list = list();
        let mut store = MemorySelectionStore::new();
        assert!(list.view(&mut store, "3").is_err());
        assert!(load_selection(&store, KEY).unwrap().is_none());
        assert_eq!(list.view(&mut store, "1").unwrap().path(), "/viewer/1");
    }

    #[test]
    fn test_edit_routes_to_run_checks() {
        let list = list();
        let mut store = MemorySelectionStore::new();
        assert_eq!(list.edit(&mut store, "4").unwrap().path(), "/run-checks/4");
        assert_eq!(
            load_selection(&store, KEY).unwrap().map(|d| d.document_id),
            Some("4".to_string())
        );
    }

    #[test]
    fn test_refresh_keeps_filters() {
        let mut list = list();
        list.filter.client = Some("Tech Corp".to_string());
        let mut docs = sample::documents();
        docs.truncate(1);
        list.refresh(docs);
        assert!(list.filtered(today()).is_empty());
        assert_eq!(list.clients(), vec!["Acme Corp"]);
    }

    #[test]
    fn test_unknown_document() {
        let mut store = MemorySelectionStore::new();
        assert!(list().open(&mut store, "99").is_err());
        assert!(list().download("99").is_err());
    }
}
