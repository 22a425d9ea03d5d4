use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Lifecycle of an uploaded document. Transitions happen outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "FILE UPLOADED")]
    FileUploaded,
    #[serde(rename = "EXTRACTION IN PROGRESS")]
    ExtractionInProgress,
    #[serde(rename = "EXTRACTION COMPLETED")]
    ExtractionCompleted,
    #[serde(rename = "CHECKS IN PROGRESS")]
    ChecksInProgress,
    #[serde(rename = "CHECKS COMPLETE")]
    ChecksComplete,
}

impl DocumentStatus {
    /// Every status in lifecycle order, as offered by the status filter.
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::FileUploaded,
        DocumentStatus::ExtractionInProgress,
        DocumentStatus::ExtractionCompleted,
        DocumentStatus::ChecksInProgress,
        DocumentStatus::ChecksComplete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::FileUploaded => "FILE UPLOADED",
            DocumentStatus::ExtractionInProgress => "EXTRACTION IN PROGRESS",
            DocumentStatus::ExtractionCompleted => "EXTRACTION COMPLETED",
            DocumentStatus::ChecksInProgress => "CHECKS IN PROGRESS",
            DocumentStatus::ChecksComplete => "CHECKS COMPLETE",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// A document record as shown in the document list and persisted as the
/// current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub document_id: String,
    pub document_name: String,
    pub document_type: String,
    pub client_name: String,
    pub last_updated_by: String,
    pub last_updated_date: NaiveDate, // Serialized as "YYYY-MM-DD"
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckStatus::Pass)
    }
}

impl FromStr for CheckStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(CheckStatus::Pass),
            "fail" => Ok(CheckStatus::Fail),
            _ => Err(ParseError::UnknownCheckStatus(s.to_string())),
        }
    }
}

/// Reviewer feedback on a single check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Negative,
}

impl Feedback {
    /// Tri-state toggle: clicking the value already set clears it, clicking
    /// the other value replaces it.
    pub fn toggle(current: Option<Feedback>, clicked: Feedback) -> Option<Feedback> {
        if current == Some(clicked) {
            None
        } else {
            Some(clicked)
        }
    }
}

impl FromStr for Feedback {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "helpful" => Ok(Feedback::Positive),
            "negative" | "not-helpful" | "not_helpful" => Ok(Feedback::Negative),
            _ => Err(ParseError::UnknownFeedback(s.to_string())),
        }
    }
}

/// A single pass/fail evaluation shown in the commentary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub check_id: String,
    pub check_short_name: String,
    pub details: Vec<String>,
    pub check_status: CheckStatus,
    #[serde(default)]
    pub check_feedback: Option<Feedback>,
}

impl Check {
    /// Apply a feedback click and return the resulting value.
    pub fn apply_feedback(&mut self, clicked: Feedback) -> Option<Feedback> {
        self.check_feedback = Feedback::toggle(self.check_feedback, clicked);
        self.check_feedback
    }
}

/// A review topic tied to one document page. Checks carry no page of their
/// own; activating any of them navigates to the section's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub section_title: String,
    pub page_number: u32,
    pub checks: Vec<Check>,
}

impl Section {
    pub fn check(&self, check_id: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.check_id == check_id)
    }

    pub fn check_mut(&mut self, check_id: &str) -> Option<&mut Check> {
        self.checks.iter_mut().find(|c| c.check_id == check_id)
    }

    pub fn failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| !c.check_status.is_pass())
            .count()
    }
}

/// A reusable check definition from the control-check catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub id: String,
    pub check_name: String,
    pub check_description: String,
    pub detailed_prompt: String,
    pub associated_sections: Vec<String>,
    pub last_updated_date: NaiveDate,
}

/// Links a section of an uploaded document to a catalog check before a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckMapping {
    pub id: String,
    pub document_section: String,
    pub associated_section: String,
    pub associated_check: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(feedback: Option<Feedback>) -> Check {
        Check {
            check_id: "format-1".to_string(),
            check_short_name: "Page Margins".to_string(),
            details: vec!["Verify that all pages have consistent margins".to_string()],
            check_status: CheckStatus::Fail,
            check_feedback: feedback,
        }
    }

    #[test]
    fn test_status_labels_round_trip_through_from_str() {
        for status in DocumentStatus::ALL {
            assert_eq!(status.label().parse::<DocumentStatus>(), Ok(status));
        }
        assert!("ARCHIVED".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_document_json_uses_labels_and_iso_dates() {
        let doc = Document {
            document_id: "1".to_string(),
            document_name: "Contract 2024".to_string(),
            document_type: "PDF".to_string(),
            client_name: "Acme Corp".to_string(),
            last_updated_by: "John Doe".to_string(),
            last_updated_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            status: DocumentStatus::ChecksComplete,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"status\":\"CHECKS COMPLETE\""));
        assert!(json.contains("\"last_updated_date\":\"2024-03-20\""));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_check_feedback_defaults_to_unset() {
        let json = r#"{
            "check_id": "qa-1",
            "check_short_name": "Testing Procedures",
            "details": [],
            "check_status": "fail"
        }"#;
        let parsed: Check = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.check_feedback, None);
        assert_eq!(parsed.check_status, CheckStatus::Fail);
    }

    #[test]
    fn test_helpful_twice_then_not_helpful() {
        let mut c = check(Some(Feedback::Positive));
        assert_eq!(c.apply_feedback(Feedback::Positive), None);
        assert_eq!(c.apply_feedback(Feedback::Negative), Some(Feedback::Negative));
    }

    #[test]
    fn test_switching_feedback_overwrites() {
        let mut c = check(Some(Feedback::Negative));
        assert_eq!(c.apply_feedback(Feedback::Positive), Some(Feedback::Positive));
    }

    #[test]
    fn test_feedback_parses_ui_aliases() {
        assert_eq!("helpful".parse::<Feedback>(), Ok(Feedback::Positive));
        assert_eq!("not-helpful".parse::<Feedback>(), Ok(Feedback::Negative));
        assert!("meh".parse::<Feedback>().is_err());
    }
}
