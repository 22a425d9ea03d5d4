//! Commentary panel view model
//!
//! The panel renders review sections it does not own. Clicks come in as
//! [`PanelEvent`]s and go out as [`PanelAction`]s for the layout coordinator
//! to apply; the only state kept here is which sections are collapsed.

use std::collections::HashSet;

use review_types::{Check, CheckStatus, Feedback, Section};
use serde::Serialize;

use crate::error::{Result, ReviewError};

pub const PASS_COLOR: &str = "#4caf50";
pub const FAIL_COLOR: &str = "#f44336";
/// Highlight for an active "helpful" button
pub const HELPFUL_COLOR: &str = "#2e7d32";
/// Highlight for an active "not helpful" button
pub const NOT_HELPFUL_COLOR: &str = "#d32f2f";
pub const EMPTY_TEXT: &str = "No sections available for review.";

pub fn status_color(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => PASS_COLOR,
        CheckStatus::Fail => FAIL_COLOR,
    }
}

pub fn feedback_color(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Positive => HELPFUL_COLOR,
        Feedback::Negative => NOT_HELPFUL_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Click on a section header outside the expand caret
    HeaderClicked { section_id: String },
    /// Click on the expand caret
    CaretClicked { section_id: String },
    /// Click anywhere on a check card that is not a button
    CheckClicked { section_id: String, check_id: String },
    /// Click on a card's navigate arrow
    NavigateClicked { section_id: String, check_id: String },
    /// Click on a card's helpful / not-helpful button
    FeedbackClicked {
        section_id: String,
        check_id: String,
        feedback: Feedback,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    NavigateToPage(u32),
    /// Feedback already toggled against the current value
    SetFeedback {
        section_id: String,
        check_id: String,
        feedback: Option<Feedback>,
    },
    ExpansionChanged { section_id: String, expanded: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckCard {
    pub check_id: String,
    pub name: String,
    pub details: Vec<String>,
    pub status_color: &'static str,
    pub helpful_active: bool,
    pub not_helpful_active: bool,
}

impl CheckCard {
    fn from_check(check: &Check) -> Self {
        Self {
            check_id: check.check_id.clone(),
            name: check.check_short_name.clone(),
            details: check.details.clone(),
            status_color: status_color(check.check_status),
            helpful_active: check.check_feedback == Some(Feedback::Positive),
            not_helpful_active: check.check_feedback == Some(Feedback::Negative),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub id: String,
    pub title: String,
    pub page_number: u32,
    /// "Page N" chip, absent when the section has no page
    pub page_label: Option<String>,
    pub expanded: bool,
    pub checks: Vec<CheckCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub sections: Vec<SectionView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct CommentaryPanel {
    collapsed: HashSet<String>,
}

impl CommentaryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections start expanded.
    pub fn is_expanded(&self, section_id: &str) -> bool {
        !self.collapsed.contains(section_id)
    }

    pub fn render(&self, sections: &[Section]) -> PanelView {
        if sections.is_empty() {
            return PanelView {
                sections: Vec::new(),
                empty_message: Some(EMPTY_TEXT),
            };
        }

        let sections = sections
            .iter()
            .map(|section| SectionView {
                id: section.id.clone(),
                title: section.section_title.clone(),
                page_number: section.page_number,
                page_label: (section.page_number > 0)
                    .then(|| format!("Page {}", section.page_number)),
                expanded: self.is_expanded(&section.id),
                checks: section.checks.iter().map(CheckCard::from_check).collect(),
            })
            .collect();

        PanelView {
            sections,
            empty_message: None,
        }
    }

    /// Translate a click into the action the coordinator should apply.
    pub fn handle(&mut self, sections: &[Section], event: PanelEvent) -> Result<PanelAction> {
        match event {
            PanelEvent::HeaderClicked { section_id } => {
                let section = find_section(sections, &section_id)?;
                Ok(PanelAction::NavigateToPage(section.page_number))
            }
            PanelEvent::CheckClicked {
                section_id,
                check_id,
            }
            | PanelEvent::NavigateClicked {
                section_id,
                check_id,
            } => {
                let section = find_section(sections, &section_id)?;
                find_check(section, &check_id)?;
                Ok(PanelAction::NavigateToPage(section.page_number))
            }
            PanelEvent::CaretClicked { section_id } => {
                find_section(sections, &section_id)?;
                let expanded = if self.collapsed.remove(&section_id) {
                    true
                } else {
                    self.collapsed.insert(section_id.clone());
                    false
                };
                Ok(PanelAction::ExpansionChanged {
                    section_id,
                    expanded,
                })
            }
            PanelEvent::FeedbackClicked {
                section_id,
                check_id,
                feedback,
            } => {
                let section = find_section(sections, &section_id)?;
                let check = find_check(section, &check_id)?;
                Ok(PanelAction::SetFeedback {
                    feedback: Feedback::toggle(check.check_feedback, feedback),
                    section_id,
                    check_id,
                })
            }
        }
    }
}

fn find_section<'a>(sections: &'a [Section], section_id: &str) -> Result<&'a Section> {
    sections
        .iter()
        .find(|s| s.id == section_id)
        .ok_or_else(|| ReviewError::UnknownSection(section_id.to_string()))
}

fn find_check<'a>(section: &'a Section, check_id: &str) -> Result<&'a Check> {
    section.check(check_id).ok_or_else(|| ReviewError::UnknownCheck {
        section_id: section.id.clone(),
        check_id: check_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use pretty_assertions::assert_eq;

    fn feedback_click(section: &str, check: &str, feedback: Feedback) -> PanelEvent {
        PanelEvent::FeedbackClicked {
            section_id: section.to_string(),
            check_id: check.to_string(),
            feedback,
        }
    }

    #[test]
    fn test_header_and_cards_navigate_to_section_page() {
        let sections = sample::sections();
        let mut panel = CommentaryPanel::new();

        let header = panel
            .handle(
                &sections,
                PanelEvent::HeaderClicked {
                    section_id: "legal".to_string(),
                },
            )
            .unwrap();
        let card = panel
            .handle(
                &sections,
                PanelEvent::CheckClicked {
                    section_id: "legal".to_string(),
                    check_id: "legal-2".to_string(),
                },
            )
            .unwrap();
        let arrow = panel
            .handle(
                &sections,
                PanelEvent::NavigateClicked {
                    section_id: "legal".to_string(),
                    check_id: "legal-1".to_string(),
                },
            )
            .unwrap();

        assert_eq!(header, PanelAction::NavigateToPage(5));
        assert_eq!(card, header);
        assert_eq!(arrow, header);
    }

    #[test]
    fn test_caret_toggles_without_navigating() {
        let sections = sample::sections();
        let mut panel = CommentaryPanel::new();
        assert!(panel.is_expanded("content"));

        let caret = PanelEvent::CaretClicked {
            section_id: "content".to_string(),
        };
        assert_eq!(
            panel.handle(&sections, caret.clone()).unwrap(),
            PanelAction::ExpansionChanged {
                section_id: "content".to_string(),
                expanded: false
            }
        );
        assert!(!panel.is_expanded("content"));
        assert!(panel.is_expanded("legal"));

        panel.handle(&sections, caret).unwrap();
        assert!(panel.is_expanded("content"));
    }

    #[test]
    fn test_feedback_click_produces_toggled_value() {
        let mut sections = sample::sections();
        let mut panel = CommentaryPanel::new();

        let action = panel
            .handle(&sections, feedback_click("formatting", "format-1", Feedback::Positive))
            .unwrap();
        assert_eq!(
            action,
            PanelAction::SetFeedback {
                section_id: "formatting".to_string(),
                check_id: "format-1".to_string(),
                feedback: Some(Feedback::Positive),
            }
        );

        sections[0].checks[0].check_feedback = Some(Feedback::Positive);
        let action = panel
            .handle(&sections, feedback_click("formatting", "format-1", Feedback::Positive))
            .unwrap();
        assert!(matches!(action, PanelAction::SetFeedback { feedback: None, .. }));
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let sections = sample::sections();
        let mut panel = CommentaryPanel::new();
        let err = panel
            .handle(
                &sections,
                PanelEvent::HeaderClicked {
                    section_id: "missing".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ReviewError::UnknownSection(_)));

        let err = panel
            .handle(&sections, feedback_click("legal", "format-1", Feedback::Negative))
            .unwrap_err();
        assert!(matches!(err, ReviewError::UnknownCheck { .. }));
    }

    #[test]
    fn test_render_maps_status_and_feedback() {
        let mut sections = sample::sections();
        sections[0].checks[1].check_feedback = Some(Feedback::Negative);
        let view = CommentaryPanel::new().render(&sections);

        assert_eq!(view.empty_message, None);
        assert_eq!(view.sections.len(), 5);
        let formatting = &view.sections[0];
        assert_eq!(formatting.page_label.as_deref(), Some("Page 1"));
        assert!(formatting.expanded);
        assert_eq!(formatting.checks[0].status_color, FAIL_COLOR);
        assert_eq!(formatting.checks[1].status_color, PASS_COLOR);
        assert!(formatting.checks[1].not_helpful_active);
        assert!(!formatting.checks[1].helpful_active);
        assert_eq!(formatting.checks[0].details.len(), 3);
    }

    #[test]
    fn test_feedback_colors() {
        assert_eq!(feedback_color(Feedback::Positive), HELPFUL_COLOR);
        assert_eq!(feedback_color(Feedback::Negative), NOT_HELPFUL_COLOR);
        assert_eq!(status_color(CheckStatus::Pass), PASS_COLOR);
    }

    #[test]
    fn test_render_empty() {
        let view = CommentaryPanel::new().render(&[]);
        assert!(view.sections.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_TEXT));
    }

    #[test]
    fn test_page_zero_has_no_chip() {
        let mut sections = sample::sections();
        sections[0].page_number = 0;
        let view = CommentaryPanel::new().render(&sections);
        assert_eq!(view.sections[0].page_label, None);
    }
}
