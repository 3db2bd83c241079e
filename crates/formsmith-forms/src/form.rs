//! The public (shared) form.
//!
//! [`PublicForm`] renders an ordered field list, typically the materialized
//! layout of a form view, binds submitted data, and cleans it into a JSON
//! record payload.

use std::collections::{BTreeMap, HashMap};

use formsmith_core::{FormsmithError, FormsmithResult, ValidationError};
use formsmith_schema::{DataType, Field};

use crate::fields::{clean_value, CleanedValue};
use crate::widgets::{escape_html, render_field};

/// An ordered set of fields bound to submitted values.
#[derive(Debug, Clone)]
pub struct PublicForm {
    fields: Vec<Field>,
    values: HashMap<String, String>,
    bound: bool,
    errors: BTreeMap<String, Vec<String>>,
    cleaned_data: BTreeMap<String, CleanedValue>,
}

impl PublicForm {
    /// Creates an unbound form. Initial values come from field defaults.
    pub fn new(fields: Vec<Field>) -> Self {
        let values = fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone().unwrap_or_default()))
            .collect();
        Self {
            fields,
            values,
            bound: false,
            errors: BTreeMap::new(),
            cleaned_data: BTreeMap::new(),
        }
    }

    /// Returns the form's fields in render order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the current raw value of a field.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Binds submitted data.
    ///
    /// Fields absent from `data` become empty; an unchecked checkbox is
    /// simply not submitted by browsers, so absence means unchecked.
    pub fn bind(&mut self, data: &HashMap<String, String>) {
        for field in &self.fields {
            let raw = data.get(&field.name).cloned().unwrap_or_default();
            self.values.insert(field.name.clone(), raw);
        }
        self.bound = true;
        self.errors.clear();
        self.cleaned_data.clear();
    }

    /// Returns `true` once [`bind`](Self::bind) has been called.
    pub const fn is_bound(&self) -> bool {
        self.bound
    }

    /// Cleans every bound value. Returns `true` if all fields are valid.
    ///
    /// An unbound form is never valid.
    pub fn is_valid(&mut self) -> bool {
        if !self.bound {
            return false;
        }
        self.errors.clear();
        self.cleaned_data.clear();
        for field in &self.fields {
            match clean_value(field, self.values.get(&field.name).map(String::as_str)) {
                Ok(value) => {
                    self.cleaned_data.insert(field.name.clone(), value);
                }
                Err(messages) => {
                    self.errors.insert(field.name.clone(), messages);
                }
            }
        }
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "public form failed validation");
        }
        self.errors.is_empty()
    }

    /// Validates and returns the record payload, or the collected errors.
    pub fn clean(&mut self) -> FormsmithResult<serde_json::Map<String, serde_json::Value>> {
        if !self.bound {
            return Err(FormsmithError::InvalidState(
                "cannot clean an unbound form".to_string(),
            ));
        }
        if self.is_valid() {
            Ok(self.to_record())
        } else {
            Err(self
                .validation_error()
                .unwrap_or_else(|| ValidationError::new("Invalid form", "invalid"))
                .into())
        }
    }

    /// Returns per-field error messages from the last validation.
    pub const fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Returns the cleaned values from the last successful validation.
    pub const fn cleaned_data(&self) -> &BTreeMap<String, CleanedValue> {
        &self.cleaned_data
    }

    /// Returns the cleaned values as a JSON record payload.
    ///
    /// Repeating groups have no input here and are left out.
    pub fn to_record(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .filter(|f| f.data_type != DataType::RepeatingGroup)
            .filter_map(|f| {
                self.cleaned_data.get(&f.name).map(|v| {
                    (
                        f.name.clone(),
                        serde_json::to_value(v).unwrap_or(serde_json::Value::Null),
                    )
                })
            })
            .collect()
    }

    /// Converts the current errors into a [`ValidationError`].
    pub fn validation_error(&self) -> Option<ValidationError> {
        if self.errors.is_empty() {
            return None;
        }
        let field_errors = self
            .errors
            .iter()
            .map(|(name, messages)| {
                (
                    name.clone(),
                    messages
                        .iter()
                        .map(|m| ValidationError::new(m.clone(), "invalid"))
                        .collect(),
                )
            })
            .collect();
        Some(ValidationError::with_field_errors(field_errors))
    }

    /// Renders the form as HTML with one block per field and a submit button.
    pub fn render_html(&self, submit_label: &str) -> String {
        let mut html = String::from(r#"<form method="post" class="public-form">"#);
        for field in &self.fields {
            html.push_str(&render_field(field, self.value(&field.name)));
            if let Some(messages) = self.errors.get(&field.name) {
                html.push_str(r#"<ul class="errorlist">"#);
                for message in messages {
                    html.push_str(&format!("<li>{}</li>", escape_html(message)));
                }
                html.push_str("</ul>");
            }
        }
        html.push_str(&format!(
            r#"<button type="submit">{}</button></form>"#,
            escape_html(submit_label)
        ));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_form() -> PublicForm {
        PublicForm::new(vec![
            Field::new(1, "name", "Name", DataType::Text).required(true),
            Field::new(2, "email", "Email", DataType::Email).required(true),
            Field::new(3, "size", "Size", DataType::Dropdown)
                .options(["S", "M", "L"])
                .default_value("M"),
            Field::new(4, "rush", "Rush order", DataType::Checkbox),
        ])
    }

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_initial_values_from_defaults() {
        let form = quote_form();
        assert_eq!(form.value("size"), Some("M"));
        assert_eq!(form.value("name"), Some(""));
        assert!(!form.is_bound());
    }

    #[test]
    fn test_unbound_form_is_invalid() {
        let mut form = quote_form();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_valid_submission_to_record() {
        let mut form = quote_form();
        form.bind(&data(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("size", "L"),
            ("rush", "on"),
        ]));
        assert!(form.is_valid());
        let record = form.to_record();
        assert_eq!(record["name"], "Ada");
        assert_eq!(record["size"], "L");
        assert_eq!(record["rush"], true);
        assert!(form.validation_error().is_none());
    }

    #[test]
    fn test_invalid_submission_collects_errors() {
        let mut form = quote_form();
        form.bind(&data(&[("email", "nope")]));
        assert!(!form.is_valid());
        assert_eq!(form.errors().len(), 2);
        assert!(form.errors().contains_key("name"));
        assert!(!form.errors().contains_key("size"));
        let err = form.validation_error().unwrap();
        assert!(err.to_string().contains("email: Enter a valid email address."));
    }

    #[test]
    fn test_dropdown_choice_outside_options() {
        let mut form = quote_form();
        form.bind(&data(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("size", "XL"),
        ]));
        assert!(!form.is_valid());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(
            form.errors()["size"],
            vec!["Select a valid choice. XL is not one of the available choices.".to_string()]
        );
    }

    #[test]
    fn test_clean() {
        let mut form = quote_form();
        assert!(matches!(form.clean(), Err(FormsmithError::InvalidState(_))));

        form.bind(&data(&[("name", "Ada"), ("email", "ada@example.com"), ("size", "S")]));
        let record = form.clean().unwrap();
        assert_eq!(record["rush"], false);

        form.bind(&data(&[("name", "Ada")]));
        assert!(matches!(
            form.clean(),
            Err(FormsmithError::ValidationError(ref e)) if e.field_errors.contains_key("email")
        ));
    }

    #[test]
    fn test_render_html_in_order_with_errors() {
        let mut form = quote_form();
        form.bind(&data(&[("email", "ada@example.com"), ("size", "S")]));
        form.is_valid();
        let html = form.render_html("Get Quote");
        let name_pos = html.find(r#"name="name""#).unwrap();
        let email_pos = html.find(r#"name="email""#).unwrap();
        assert!(name_pos < email_pos);
        assert!(html.contains("<li>This field is required.</li>"));
        assert!(html.ends_with(r#"<button type="submit">Get Quote</button></form>"#));
    }
}
