//! Cleaning of raw submitted values.
//!
//! [`clean_value`] performs the required check and the type-specific
//! coercion for one field, returning a typed [`CleanedValue`] or the list of
//! error messages to show next to the input.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use formsmith_schema::{DataType, Field};

use crate::widgets::is_truthy;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CleanedValue {
    /// No value was given for an optional field.
    Null,
    /// Text, email, dropdown choice, or long text.
    Text(String),
    /// A parsed number.
    Number(f64),
    /// A checkbox state.
    Bool(bool),
    /// A calendar date, serialized as `YYYY-MM-DD`.
    Date(NaiveDate),
}

/// Cleans a raw input string for `field`.
///
/// 1. Required check (checkboxes must be checked, other types non-empty)
/// 2. Type coercion (number, date, checkbox)
/// 3. Type-specific validation (email pattern, dropdown membership)
pub fn clean_value(field: &Field, raw: Option<&str>) -> Result<CleanedValue, Vec<String>> {
    let raw_str = raw.map_or("", str::trim);

    if field.data_type == DataType::Checkbox {
        let checked = is_truthy(raw_str);
        if field.required && !checked {
            return Err(vec!["This field is required.".to_string()]);
        }
        return Ok(CleanedValue::Bool(checked));
    }

    if raw_str.is_empty() {
        if field.required {
            return Err(vec!["This field is required.".to_string()]);
        }
        return Ok(CleanedValue::Null);
    }

    match field.data_type {
        DataType::Text | DataType::LongText => Ok(CleanedValue::Text(raw_str.to_string())),
        DataType::Number => raw_str
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(CleanedValue::Number)
            .ok_or_else(|| vec!["Enter a number.".to_string()]),
        DataType::Date => NaiveDate::parse_from_str(raw_str, "%Y-%m-%d")
            .map(CleanedValue::Date)
            .map_err(|_| vec!["Enter a valid date (YYYY-MM-DD).".to_string()]),
        DataType::Email => {
            if EMAIL_RE.is_match(raw_str) {
                Ok(CleanedValue::Text(raw_str.to_string()))
            } else {
                Err(vec!["Enter a valid email address.".to_string()])
            }
        }
        DataType::Dropdown => {
            if field.options.iter().any(|o| o == raw_str) {
                Ok(CleanedValue::Text(raw_str.to_string()))
            } else {
                Err(vec![format!(
                    "Select a valid choice. {raw_str} is not one of the available choices."
                )])
            }
        }
        DataType::RepeatingGroup | DataType::Unsupported => {
            tracing::debug!(field = %field.name, "ignoring value for a field without an input");
            Ok(CleanedValue::Null)
        }
        DataType::Checkbox => Ok(CleanedValue::Bool(is_truthy(raw_str))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_missing() {
        let field = Field::new(1, "name", "Name", DataType::Text).required(true);
        assert_eq!(
            clean_value(&field, Some("   ")),
            Err(vec!["This field is required.".to_string()])
        );
        assert!(clean_value(&field, None).is_err());
    }

    #[test]
    fn test_optional_empty_is_null() {
        let field = Field::new(1, "name", "Name", DataType::Text);
        assert_eq!(clean_value(&field, None), Ok(CleanedValue::Null));
    }

    #[test]
    fn test_number() {
        let field = Field::new(2, "qty", "Qty", DataType::Number);
        assert_eq!(clean_value(&field, Some("2.5")), Ok(CleanedValue::Number(2.5)));
        assert!(clean_value(&field, Some("two")).is_err());
        assert!(clean_value(&field, Some("NaN")).is_err());
    }

    #[test]
    fn test_date() {
        let field = Field::new(3, "due", "Due", DataType::Date);
        assert_eq!(
            clean_value(&field, Some("2024-02-29")),
            Ok(CleanedValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
        );
        assert!(clean_value(&field, Some("2023-02-29")).is_err());
    }

    #[test]
    fn test_email() {
        let field = Field::new(4, "email", "Email", DataType::Email);
        assert!(clean_value(&field, Some("ada@example.com")).is_ok());
        assert_eq!(
            clean_value(&field, Some("ada@")),
            Err(vec!["Enter a valid email address.".to_string()])
        );
    }

    #[test]
    fn test_dropdown_membership() {
        let field = Field::new(5, "status", "Status", DataType::Dropdown).options(["Open", "Closed"]);
        assert_eq!(
            clean_value(&field, Some("Open")),
            Ok(CleanedValue::Text("Open".to_string()))
        );
        assert!(clean_value(&field, Some("Pending")).is_err());
    }

    #[test]
    fn test_checkbox() {
        let field = Field::new(6, "agree", "Agree", DataType::Checkbox);
        assert_eq!(clean_value(&field, None), Ok(CleanedValue::Bool(false)));
        assert_eq!(clean_value(&field, Some("on")), Ok(CleanedValue::Bool(true)));

        let required = field.required(true);
        assert!(clean_value(&required, Some("false")).is_err());
    }

    #[test]
    fn test_repeating_group_is_ignored() {
        let field = Field::new(7, "lines", "Lines", DataType::RepeatingGroup);
        assert_eq!(clean_value(&field, Some("x")), Ok(CleanedValue::Null));
    }

    #[test]
    fn test_cleaned_value_serialization() {
        let date = CleanedValue::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(serde_json::to_value(date).unwrap(), "2024-01-05");
        assert_eq!(serde_json::to_value(CleanedValue::Null).unwrap(), serde_json::Value::Null);
        assert_eq!(serde_json::to_value(CleanedValue::Bool(true)).unwrap(), true);
    }
}
