//! DOM rendering for the commentary panel
//!
//! Every clickable element carries `data-action`, `data-section-id` and,
//! for cards, `data-check-id`. A single delegated click listener passes the
//! click target to [`event_for_target`], which walks up to the nearest
//! annotated element. Buttons sit inside cards and cards inside sections, so
//! the innermost annotation wins and a button click never also counts as a
//! card click.

use review_core::commentary::{feedback_color, CheckCard, PanelView, SectionView};
use review_core::PanelEvent;
use review_types::Feedback;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const ACTION_HEADER: &str = "header";
pub const ACTION_CARET: &str = "caret";
pub const ACTION_CHECK: &str = "check";
pub const ACTION_NAVIGATE: &str = "navigate";
pub const ACTION_HELPFUL: &str = "helpful";
pub const ACTION_NOT_HELPFUL: &str = "not-helpful";

/// Decode the data attributes of a clicked element.
pub fn event_from_attrs(
    action: &str,
    section_id: &str,
    check_id: Option<&str>,
) -> Option<PanelEvent> {
    let section_id = section_id.to_string();
    let check = || check_id.map(str::to_string);

    let event = match action {
        ACTION_HEADER => PanelEvent::HeaderClicked { section_id },
        ACTION_CARET => PanelEvent::CaretClicked { section_id },
        ACTION_CHECK => PanelEvent::CheckClicked {
            section_id,
            check_id: check()?,
        },
        ACTION_NAVIGATE => PanelEvent::NavigateClicked {
            section_id,
            check_id: check()?,
        },
        ACTION_HELPFUL | ACTION_NOT_HELPFUL => PanelEvent::FeedbackClicked {
            section_id,
            check_id: check()?,
            feedback: if action == ACTION_HELPFUL {
                Feedback::Positive
            } else {
                Feedback::Negative
            },
        },
        _ => return None,
    };
    Some(event)
}

/// Resolve a click target to a panel event, if it landed on anything clickable.
pub fn event_for_target(target: &Element) -> Result<Option<PanelEvent>, JsValue> {
    let Some(el) = target.closest("[data-action]")? else {
        return Ok(None);
    };
    let (Some(action), Some(section_id)) =
        (el.get_attribute("data-action"), el.get_attribute("data-section-id"))
    else {
        return Ok(None);
    };
    let check_id = el.get_attribute("data-check-id");
    Ok(event_from_attrs(&action, &section_id, check_id.as_deref()))
}

fn element(
    document: &Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

fn annotate(
    el: &Element,
    action: &str,
    section_id: &str,
    check_id: Option<&str>,
) -> Result<(), JsValue> {
    el.set_attribute("data-action", action)?;
    el.set_attribute("data-section-id", section_id)?;
    if let Some(check_id) = check_id {
        el.set_attribute("data-check-id", check_id)?;
    }
    Ok(())
}

fn feedback_button(
    document: &Document,
    feedback: Feedback,
    active: bool,
    section_id: &str,
    check_id: &str,
) -> Result<Element, JsValue> {
    let (label, action) = match feedback {
        Feedback::Positive => ("Helpful", ACTION_HELPFUL),
        Feedback::Negative => ("Not helpful", ACTION_NOT_HELPFUL),
    };
    let class = if active {
        "feedback-button active"
    } else {
        "feedback-button"
    };
    let button = element(document, "button", class, Some(label))?;
    button.set_attribute("aria-pressed", if active { "true" } else { "false" })?;
    if active {
        if let Some(html) = button.dyn_ref::<HtmlElement>() {
            html.style().set_property("color", feedback_color(feedback))?;
        }
    }
    annotate(&button, action, section_id, Some(check_id))?;
    Ok(button)
}

fn render_card(
    document: &Document,
    section_id: &str,
    card: &CheckCard,
) -> Result<Element, JsValue> {
    let el = element(document, "div", "check-card", None)?;
    annotate(&el, ACTION_CHECK, section_id, Some(&card.check_id))?;
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style()
            .set_property("border-left", &format!("4px solid {}", card.status_color))?;
    }

    let header = element(document, "div", "check-card-header", None)?;
    let name = element(document, "span", "check-name", Some(&card.name))?;
    header.append_child(&name)?;
    let arrow = element(document, "button", "check-navigate", Some("\u{2192}"))?;
    arrow.set_attribute("title", "Go to page")?;
    annotate(&arrow, ACTION_NAVIGATE, section_id, Some(&card.check_id))?;
    header.append_child(&arrow)?;
    el.append_child(&header)?;

    let details = element(document, "ul", "check-details", None)?;
    for line in &card.details {
        let item = element(document, "li", "", Some(line))?;
        details.append_child(&item)?;
    }
    el.append_child(&details)?;

    let actions = element(document, "div", "check-feedback", None)?;
    let helpful = feedback_button(
        document,
        Feedback::Positive,
        card.helpful_active,
        section_id,
        &card.check_id,
    )?;
    actions.append_child(&helpful)?;
    let not_helpful = feedback_button(
        document,
        Feedback::Negative,
        card.not_helpful_active,
        section_id,
        &card.check_id,
    )?;
    actions.append_child(&not_helpful)?;
    el.append_child(&actions)?;

    Ok(el)
}

fn render_section(document: &Document, section: &SectionView) -> Result<Element, JsValue> {
    let el = element(document, "div", "review-section", None)?;
    el.set_id(&format!("section-{}", section.id));

    let header = element(document, "div", "review-section-header", None)?;
    annotate(&header, ACTION_HEADER, &section.id, None)?;
    let title = element(document, "span", "section-title", Some(&section.title))?;
    header.append_child(&title)?;
    if let Some(label) = &section.page_label {
        let chip = element(document, "span", "page-chip", Some(label))?;
        header.append_child(&chip)?;
    }
    let caret = element(
        document,
        "button",
        "section-caret",
        Some(if section.expanded { "\u{25B2}" } else { "\u{25BC}" }),
    )?;
    caret.set_attribute("aria-expanded", if section.expanded { "true" } else { "false" })?;
    annotate(&caret, ACTION_CARET, &section.id, None)?;
    header.append_child(&caret)?;
    el.append_child(&header)?;

    if section.expanded {
        let body = element(document, "div", "review-section-body", None)?;
        for card in &section.checks {
            let card = render_card(document, &section.id, card)?;
            body.append_child(&card)?;
        }
        el.append_child(&body)?;
    }

    Ok(el)
}

/// Replace the contents of `container` with the rendered panel.
pub fn render_into(container: &Element, view: &PanelView) -> Result<(), JsValue> {
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("Container is not attached to a document"))?;
    container.set_inner_html("");

    if let Some(message) = view.empty_message {
        let empty = element(&document, "div", "review-empty", Some(message))?;
        container.append_child(&empty)?;
        return Ok(());
    }

    for section in &view.sections {
        let rendered = render_section(&document, section)?;
        container.append_child(&rendered)?;
    }
    Ok(())
}
