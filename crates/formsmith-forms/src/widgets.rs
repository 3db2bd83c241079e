//! Widget rendering for schema fields.
//!
//! Every [`DataType`] maps to exactly one [`WidgetType`]; types without an
//! input (repeating groups, unknown tags) map to [`WidgetType::Unsupported`],
//! which renders no input at all. The mapping is a closed `match`, so adding
//! a data type fails to compile until it gets a widget.

use std::collections::HashMap;
use std::fmt;

use formsmith_schema::{DataType, Field};

/// Enumerates the widgets a field can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`, used for text and email.
    TextInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="date">`.
    DateInput,
    /// `<select>` over the field's options.
    Select,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<textarea rows="4">`.
    Textarea,
    /// No input is rendered.
    Unsupported,
}

impl WidgetType {
    /// Returns the widget for a data type.
    pub const fn for_data_type(data_type: DataType) -> Self {
        match data_type {
            DataType::Text | DataType::Email => Self::TextInput,
            DataType::Number => Self::NumberInput,
            DataType::Date => Self::DateInput,
            DataType::Dropdown => Self::Select,
            DataType::Checkbox => Self::CheckboxInput,
            DataType::LongText => Self::Textarea,
            DataType::RepeatingGroup | DataType::Unsupported => Self::Unsupported,
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::DateInput => "DateInput",
            Self::Select => "Select",
            Self::CheckboxInput => "CheckboxInput",
            Self::Textarea => "Textarea",
            Self::Unsupported => "Unsupported",
        };
        write!(f, "{name}")
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats an HTML attributes map into a string like ` key="value" key2="value2"`.
fn render_attrs(attrs: &HashMap<String, String>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape_html(v)))
        .collect();
    parts.sort(); // deterministic output for testing
    parts.join("")
}

/// Renders only the input element of a field.
///
/// `value` is the current raw value; dropdowns fall back to the field's
/// default when it is empty. Returns an empty string for
/// [`WidgetType::Unsupported`].
pub fn render_input(field: &Field, value: Option<&str>, attrs: &HashMap<String, String>) -> String {
    let name = escape_html(&field.name);
    let val = escape_html(value.unwrap_or(""));
    let mut attrs = attrs.clone();
    if field.required {
        attrs.insert("required".to_string(), "required".to_string());
    }
    let placeholder = field
        .placeholder
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| format!(r#" placeholder="{}""#, escape_html(p)))
        .unwrap_or_default();

    match WidgetType::for_data_type(field.data_type) {
        WidgetType::TextInput => format!(
            r#"<input type="text" name="{name}" value="{val}"{placeholder}{} />"#,
            render_attrs(&attrs)
        ),
        WidgetType::NumberInput => format!(
            r#"<input type="number" name="{name}" value="{val}"{placeholder}{} />"#,
            render_attrs(&attrs)
        ),
        WidgetType::DateInput => format!(
            r#"<input type="date" name="{name}" value="{val}"{} />"#,
            render_attrs(&attrs)
        ),
        WidgetType::Select => {
            let selected = value
                .filter(|v| !v.is_empty())
                .or(field.default.as_deref())
                .unwrap_or("");
            let mut html = format!(r#"<select name="{name}"{}>"#, render_attrs(&attrs));
            for option in &field.options {
                let marker = if option == selected { " selected" } else { "" };
                let option = escape_html(option);
                html.push_str(&format!(
                    r#"<option value="{option}"{marker}>{option}</option>"#
                ));
            }
            html.push_str("</select>");
            html
        }
        WidgetType::CheckboxInput => {
            let checked = if value.is_some_and(is_truthy) {
                " checked"
            } else {
                ""
            };
            // A required checkbox is enforced by cleaning, not by the browser.
            attrs.remove("required");
            format!(
                r#"<input type="checkbox" name="{name}"{checked}{} />"#,
                render_attrs(&attrs)
            )
        }
        WidgetType::Textarea => format!(
            r#"<textarea name="{name}" rows="4"{placeholder}{}>{val}</textarea>"#,
            render_attrs(&attrs)
        ),
        WidgetType::Unsupported => String::new(),
    }
}

/// Renders a field with its label and required marker.
///
/// Checkboxes place the label after the input; every other widget places
/// it above.
pub fn render_field(field: &Field, value: Option<&str>) -> String {
    let id = format!("id_{}", field.name);
    let mut attrs = HashMap::new();
    attrs.insert("id".to_string(), id.clone());
    let marker = if field.required {
        r#"<span class="required">*</span>"#
    } else {
        ""
    };
    let label = escape_html(&field.label);
    let input = render_input(field, value, &attrs);

    if WidgetType::for_data_type(field.data_type) == WidgetType::CheckboxInput {
        format!(
            r#"<div class="field field-checkbox">{input}<label for="{id}">{label}{marker}</label></div>"#
        )
    } else {
        format!(r#"<div class="field"><label for="{id}">{label}{marker}</label>{input}</div>"#)
    }
}

pub(crate) fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
