//! Constraint validation for forms.
//!
//! Mirrors the browser's built-in checks closely enough for the portfolio's
//! contact form:
//!
//! | Constraint | Failure |
//! |------------|---------|
//! | `required` | empty value, unchecked box, no radio of the group checked |
//! | `type="email"` | value is not an address |
//! | `type="url"` | value is not an absolute URL |
//! | `minlength` / `maxlength` | value length out of range |
//! | `pattern` | value does not match the whole pattern |
//!
//! Optional controls with an empty value pass every check. Disabled controls
//! and button-like inputs are never validated.

use crate::config::FormsConfig;
use crate::dom::{Document, NodeId};
use quick_xml::escape::escape;
use regex::Regex;
use std::sync::LazyLock;

/// Valid e-mail address as defined for `<input type="email">`.
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Input types that never take part in validation.
const BARRED_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Why a control is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    ValueMissing,
    TypeMismatch,
    TooShort,
    TooLong,
    PatternMismatch,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Allowed,
    /// Submission was blocked; lists each invalid control with its first violation.
    Prevented(Vec<(NodeId, Violation)>),
}

#[derive(Debug, Default)]
pub struct FormValidator {
    forms: Vec<NodeId>,
}

impl FormValidator {
    /// Start gating every form currently in the document.
    pub fn attach(doc: &Document) -> Self {
        let forms = doc
            .elements()
            .into_iter()
            .filter(|&n| doc.tag(n) == Some("form"))
            .collect();
        Self { forms }
    }

    pub fn forms(&self) -> &[NodeId] {
        &self.forms
    }

    /// Handle a submit of `form`; unknown forms submit unchecked.
    pub fn on_submit(&self, doc: &mut Document, config: &FormsConfig, form: NodeId) -> SubmitOutcome {
        if !self.forms.contains(&form) {
            return SubmitOutcome::Allowed;
        }
        let invalid = check_validity(doc, form);
        doc.add_class(form, &config.validated_class);
        if invalid.is_empty() {
            SubmitOutcome::Allowed
        } else {
            SubmitOutcome::Prevented(invalid)
        }
    }
}

/// Every invalid control of `form` in document order.
pub fn check_validity(doc: &Document, form: NodeId) -> Vec<(NodeId, Violation)> {
    doc.find_within(form, is_validatable)
        .into_iter()
        .filter_map(|control| validate_control(doc, form, control).map(|v| (control, v)))
        .collect()
}

fn is_validatable(doc: &Document, node: NodeId) -> bool {
    if doc.has_attr(node, "disabled") {
        return false;
    }
    match doc.tag(node) {
        Some("input") => !BARRED_TYPES.contains(&input_type(doc, node).as_str()),
        Some("select" | "textarea") => true,
        _ => false,
    }
}

fn input_type(doc: &Document, node: NodeId) -> String {
    doc.attr(node, "type")
        .unwrap_or("text")
        .trim()
        .to_ascii_lowercase()
}

/// First violated constraint of `control`, if any.
pub fn validate_control(doc: &Document, form: NodeId, control: NodeId) -> Option<Violation> {
    let required = doc.has_attr(control, "required");

    if doc.tag(control) == Some("input") {
        match input_type(doc, control).as_str() {
            "checkbox" => {
                return (required && !doc.has_attr(control, "checked"))
                    .then_some(Violation::ValueMissing);
            }
            "radio" => {
                return (required && !radio_group_checked(doc, form, control))
                    .then_some(Violation::ValueMissing);
            }
            _ => {}
        }
    }

    let value = control_value(doc, control);
    if value.is_empty() {
        return required.then_some(Violation::ValueMissing);
    }

    if doc.tag(control) == Some("input") {
        let mismatch = match input_type(doc, control).as_str() {
            "email" => !RE_EMAIL.is_match(&value),
            "url" => url::Url::parse(&value).is_err(),
            _ => false,
        };
        if mismatch {
            return Some(Violation::TypeMismatch);
        }
    }

    let length = value.chars().count();
    if parse_length(doc, control, "minlength").is_some_and(|min| length < min) {
        return Some(Violation::TooShort);
    }
    if parse_length(doc, control, "maxlength").is_some_and(|max| length > max) {
        return Some(Violation::TooLong);
    }

    if doc.tag(control) == Some("input")
        && let Some(pattern) = doc.attr(control, "pattern")
        && let Ok(re) = Regex::new(&format!("^(?:{pattern})$"))
        && !re.is_match(&value)
    {
        return Some(Violation::PatternMismatch);
    }
    None
}

fn parse_length(doc: &Document, control: NodeId, name: &str) -> Option<usize> {
    doc.attr(control, name)?.trim().parse().ok()
}

fn radio_group_checked(doc: &Document, form: NodeId, control: NodeId) -> bool {
    let Some(name) = doc.attr(control, "name") else {
        return doc.has_attr(control, "checked");
    };
    doc.find_within(form, |d, n| {
        d.tag(n) == Some("input")
            && input_type(d, n) == "radio"
            && d.attr(n, "name") == Some(name)
            && d.has_attr(n, "checked")
    })
    .into_iter()
    .next()
    .is_some()
}

/// Current value of a form control.
pub fn control_value(doc: &Document, control: NodeId) -> String {
    match doc.tag(control) {
        Some("textarea") => doc.text_content(control),
        Some("select") => {
            let options = doc.find_within(control, |d, n| d.tag(n) == Some("option"));
            options
                .iter()
                .copied()
                .find(|&o| doc.has_attr(o, "selected"))
                .or_else(|| options.first().copied())
                .map(|o| option_value(doc, o))
                .unwrap_or_default()
        }
        _ => doc.attr(control, "value").unwrap_or_default().to_owned(),
    }
}

fn option_value(doc: &Document, option: NodeId) -> String {
    match doc.attr(option, "value") {
        Some(value) => value.to_owned(),
        None => doc.text_content(option).trim().to_owned(),
    }
}

/// Apply user input to a control.
///
/// For checkboxes and radios any non-empty value checks the control.
pub fn set_value(doc: &mut Document, control: NodeId, value: &str) {
    match doc.tag(control) {
        Some("textarea") => {
            // escaped text always parses
            doc.set_inner_html(control, &escape(value)).ok();
        }
        Some("select") => {
            for option in doc.find_within(control, |d, n| d.tag(n) == Some("option")) {
                if option_value(doc, option) == value {
                    doc.set_attr(option, "selected", "");
                } else {
                    doc.remove_attr(option, "selected");
                }
            }
        }
        Some("input") => match input_type(doc, control).as_str() {
            "checkbox" | "radio" if value.is_empty() => doc.remove_attr(control, "checked"),
            "checkbox" | "radio" => doc.set_attr(control, "checked", ""),
            _ => doc.set_attr(control, "value", value),
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = r#"<form id="contact">
<input id="name" name="name" required minlength="2" maxlength="20">
<input id="email" type="email" name="email" required>
<input id="site" type="url" name="site">
<input id="zip" name="zip" pattern="[0-9]{5}">
<input id="broken" name="broken" pattern="([" value="anything">
<select id="topic" required><option value="">Pick one</option><option value="work">Work</option></select>
<textarea id="message" required></textarea>
<input id="terms" type="checkbox" required>
<input type="submit" value="Send">
<input id="off" disabled required>
</form>"#;

    fn doc() -> Document {
        Document::parse(CONTACT).unwrap()
    }

    fn id(doc: &Document, id: &str) -> NodeId {
        doc.element_by_id(id).unwrap()
    }

    fn fill(doc: &mut Document) {
        for (control, value) in [
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("topic", "work"),
            ("message", "Hello <there> & bye"),
            ("terms", "on"),
        ] {
            let node = id(doc, control);
            set_value(doc, node, value);
        }
    }

    #[test]
    fn test_empty_form_reports_required_controls() {
        let doc = doc();
        let form = id(&doc, "contact");
        let invalid: Vec<_> = check_validity(&doc, form)
            .into_iter()
            .map(|(n, v)| (doc.attr(n, "id").unwrap().to_owned(), v))
            .collect();

        assert_eq!(
            invalid,
            [
                ("name".to_owned(), Violation::ValueMissing),
                ("email".to_owned(), Violation::ValueMissing),
                ("topic".to_owned(), Violation::ValueMissing),
                ("message".to_owned(), Violation::ValueMissing),
                ("terms".to_owned(), Violation::ValueMissing),
            ]
        );
    }

    #[test]
    fn test_filled_form_is_valid() {
        let mut doc = doc();
        fill(&mut doc);
        let form = id(&doc, "contact");
        assert!(check_validity(&doc, form).is_empty());

        let message = id(&doc, "message");
        assert_eq!(control_value(&doc, message), "Hello <there> & bye");
    }

    #[test]
    fn test_type_and_length_rules() {
        let mut doc = doc();
        fill(&mut doc);
        let form = id(&doc, "contact");
        let (email, name, site, zip) = (id(&doc, "email"), id(&doc, "name"), id(&doc, "site"), id(&doc, "zip"));

        set_value(&mut doc, email, "not-an-address");
        assert_eq!(validate_control(&doc, form, email), Some(Violation::TypeMismatch));

        set_value(&mut doc, name, "A");
        assert_eq!(validate_control(&doc, form, name), Some(Violation::TooShort));
        set_value(&mut doc, name, "A very long name indeed");
        assert_eq!(validate_control(&doc, form, name), Some(Violation::TooLong));

        set_value(&mut doc, site, "example.com");
        assert_eq!(validate_control(&doc, form, site), Some(Violation::TypeMismatch));
        set_value(&mut doc, site, "https://example.com");
        assert_eq!(validate_control(&doc, form, site), None);

        set_value(&mut doc, zip, "1234a");
        assert_eq!(validate_control(&doc, form, zip), Some(Violation::PatternMismatch));
        set_value(&mut doc, zip, "12345");
        assert_eq!(validate_control(&doc, form, zip), None);
    }

    #[test]
    fn test_invalid_pattern_is_ignored() {
        let doc = doc();
        let form = id(&doc, "contact");
        let broken = id(&doc, "broken");
        assert_eq!(validate_control(&doc, form, broken), None);
    }

    #[test]
    fn test_required_radio_group() {
        let mut doc = Document::parse(
            r#"<form><input type="radio" name="c" id="r1" required><input type="radio" name="c" id="r2"></form>"#,
        )
        .unwrap();
        let form = doc.query("form").unwrap()[0];
        assert_eq!(check_validity(&doc, form).len(), 1);

        let r2 = id(&doc, "r2");
        set_value(&mut doc, r2, "on");
        assert!(check_validity(&doc, form).is_empty());
    }

    #[test]
    fn test_submit_gating() {
        let mut doc = doc();
        let config = FormsConfig::default();
        let validator = FormValidator::attach(&doc);
        let form = id(&doc, "contact");
        assert_eq!(validator.forms(), [form]);

        let outcome = validator.on_submit(&mut doc, &config, form);
        assert!(matches!(outcome, SubmitOutcome::Prevented(ref v) if v.len() == 5));
        assert!(doc.has_class(form, "was-validated"));

        fill(&mut doc);
        assert_eq!(validator.on_submit(&mut doc, &config, form), SubmitOutcome::Allowed);
        assert!(doc.has_class(form, "was-validated"));
    }
}
