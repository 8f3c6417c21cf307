//! Input validation for untrusted request bodies.
//!
//! Each validator collects every problem it finds so the client gets the
//! full list in one response.

use std::collections::HashSet;

use cardcraft_core::card::CardDocument;
use cardcraft_core::storage::{CardUpdate, NewCard, NewFeedback};
use thiserror::Error;

/// Maximum length for titles and feedback subjects.
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} too long (max {MAX_TITLE_LEN} chars)")]
    TooLong(&'static str),
    #[error("dimensions must be positive, got {width}x{height}")]
    Dimensions { width: u32, height: u32 },
    #[error("duplicate element id `{0}`")]
    DuplicateElementId(String),
    #[error("element `{0}` has a non-finite position or size")]
    NonFiniteGeometry(String),
    #[error("invalid email address `{0}`")]
    Email(String),
}

pub fn validate_new_card(card: &NewCard) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_title(&card.title, "title", &mut errors);
    if card.template_id.trim().is_empty() {
        errors.push(ValidationError::Empty("templateId"));
    }
    check_document(&card.content, &mut errors);
    finish(errors)
}

pub fn validate_card_update(update: &CardUpdate) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if let Some(title) = &update.title {
        check_title(title, "title", &mut errors);
    }
    if update.template_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
        errors.push(ValidationError::Empty("templateId"));
    }
    if let Some(content) = &update.content {
        check_document(content, &mut errors);
    }
    finish(errors)
}

pub fn validate_feedback(feedback: &NewFeedback) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_title(&feedback.subject, "subject", &mut errors);
    if feedback.description.trim().is_empty() {
        errors.push(ValidationError::Empty("description"));
    }
    if let Some(email) = feedback.email.as_deref().filter(|email| !email.is_empty()) {
        if !is_valid_email(email) {
            errors.push(ValidationError::Email(email.to_string()));
        }
    }
    finish(errors)
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

fn check_title(value: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Empty(field));
    } else if value.chars().count() > MAX_TITLE_LEN {
        errors.push(ValidationError::TooLong(field));
    }
}

fn check_document(document: &CardDocument, errors: &mut Vec<ValidationError>) {
    if !document.dimensions.is_valid() {
        errors.push(ValidationError::Dimensions {
            width: document.dimensions.width,
            height: document.dimensions.height,
        });
    }
    let mut seen = HashSet::new();
    for element in &document.elements {
        if !seen.insert(element.id.as_str()) {
            errors.push(ValidationError::DuplicateElementId(element.id.clone()));
        }
        let bounds = element.bounds();
        if ![bounds.x0, bounds.y0, bounds.x1, bounds.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            errors.push(ValidationError::NonFiniteGeometry(element.id.clone()));
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardcraft_core::card::{CardElement, Dimensions};
    use cardcraft_core::storage::FeedbackKind;
    use kurbo::{Point, Size};

    fn new_card(content: CardDocument) -> NewCard {
        NewCard {
            title: "Launch".to_string(),
            content,
            template_id: "clean-quote".to_string(),
            user_id: None,
            is_public: None,
        }
    }

    fn feedback(email: Option<&str>) -> NewFeedback {
        NewFeedback {
            kind: FeedbackKind::Bug,
            subject: "Export".to_string(),
            description: "The export button does nothing".to_string(),
            email: email.map(str::to_string),
            user_agent: None,
            url: None,
        }
    }

    #[test]
    fn test_valid_card() {
        let doc = CardDocument::default().with_elements(vec![
            CardElement::text("a", Point::new(0.0, 0.0), Size::new(10.0, 10.0)).with_id("a"),
            CardElement::text("b", Point::new(5.0, 5.0), Size::new(10.0, 10.0)).with_id("b"),
        ]);
        assert_eq!(validate_new_card(&new_card(doc)), Ok(()));
    }

    #[test]
    fn test_card_collects_all_errors() {
        let doc = CardDocument::new(Dimensions::new(0, 300)).with_elements(vec![
            CardElement::text("a", Point::new(0.0, 0.0), Size::new(10.0, 10.0)).with_id("x"),
            CardElement::text("b", Point::new(f64::NAN, 0.0), Size::new(10.0, 10.0)).with_id("x"),
        ]);
        let mut card = new_card(doc);
        card.title = "   ".to_string();
        let errors = validate_new_card(&card).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Empty("title"),
                ValidationError::Dimensions { width: 0, height: 300 },
                ValidationError::DuplicateElementId("x".to_string()),
                ValidationError::NonFiniteGeometry("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_partial_update() {
        assert_eq!(validate_card_update(&CardUpdate::default()), Ok(()));
        let update = CardUpdate {
            template_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validate_card_update(&update),
            Err(vec![ValidationError::Empty("templateId")])
        );
    }

    #[test]
    fn test_feedback_email() {
        assert_eq!(validate_feedback(&feedback(None)), Ok(()));
        assert_eq!(validate_feedback(&feedback(Some(""))), Ok(()));
        assert_eq!(validate_feedback(&feedback(Some("me@example.com"))), Ok(()));
        assert_eq!(
            validate_feedback(&feedback(Some("not-an-email"))),
            Err(vec![ValidationError::Email("not-an-email".to_string())])
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a.b@sub.example.org"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("me@example"));
        assert!(!is_valid_email("me@.com"));
        assert!(!is_valid_email("me@example."));
        assert!(!is_valid_email("me @example.com"));
        assert!(!is_valid_email("me@a@b.com"));
    }
}
