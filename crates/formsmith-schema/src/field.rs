//! Schema field definitions.
//!
//! A [`Field`] is one attribute of an object's schema. Fields are owned by
//! the object and exist independently of any view; a form layout refers to
//! them by [`Field::name`] when persisted and by [`Field::id`] while being
//! edited.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a field.
///
/// Fields fetched from the backend carry integer ids; fields created locally
/// before they are persisted carry a UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldId {
    /// A backend-assigned numeric id.
    Int(i64),
    /// A locally generated (or otherwise textual) id.
    Text(String),
}

impl FieldId {
    /// Parses an id from user input: integers become [`FieldId::Int`],
    /// anything else [`FieldId::Text`].
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(raw.trim().to_string()), Self::Int)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for FieldId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The closed set of field data types.
///
/// Tags the builder does not know deserialize to [`DataType::Unsupported`]
/// so a schema from a newer backend still loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Single-line text.
    Text,
    /// Numeric input.
    Number,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// One choice out of [`Field::options`].
    Dropdown,
    /// Boolean flag.
    Checkbox,
    /// Email address.
    Email,
    /// Multi-line text.
    LongText,
    /// A nested list of sub-records described by [`Field::fields`].
    RepeatingGroup,
    /// Any tag outside the known set.
    #[serde(other)]
    Unsupported,
}

impl DataType {
    /// Every supported data type, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Text,
        Self::Number,
        Self::Email,
        Self::Dropdown,
        Self::Date,
        Self::Checkbox,
        Self::LongText,
        Self::RepeatingGroup,
    ];

    /// Returns the wire tag for this type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Checkbox => "checkbox",
            Self::Email => "email",
            Self::LongText => "long_text",
            Self::RepeatingGroup => "repeating_group",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attribute of an object's schema.
///
/// Unknown keys sent by the backend are kept in [`Field::extra`] and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Stable identity, unique within the object.
    pub id: FieldId,
    /// Machine key, unique within the object; the persistence key in views.
    pub name: String,
    /// Display text.
    pub label: String,
    /// The field's data type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Whether the schema requires a value.
    #[serde(default)]
    pub required: bool,
    /// Default value for new records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Input placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Ordered choices for dropdown fields.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub options: Vec<String>,
    /// Sub-fields of a repeating group.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields: Vec<Field>,
    /// Set on fields created in the browser and not yet persisted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub locally_created: bool,
    /// Keys this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Field {
    /// Creates an optional field with no placeholder, default, or options.
    pub fn new(
        id: impl Into<FieldId>,
        name: impl Into<String>,
        label: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            data_type,
            required: false,
            default: None,
            placeholder: None,
            options: Vec::new(),
            fields: Vec::new(),
            locally_created: false,
            extra: serde_json::Map::new(),
        }
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the dropdown options.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_parse() {
        assert_eq!(FieldId::parse("42"), FieldId::Int(42));
        assert_eq!(
            FieldId::parse("b4c1-uuid"),
            FieldId::Text("b4c1-uuid".to_string())
        );
        assert_eq!(FieldId::Int(7).to_string(), "7");
    }

    #[test]
    fn test_field_id_untagged_serde() {
        let ids: Vec<FieldId> = serde_json::from_str(r#"[3, "abc"]"#).unwrap();
        assert_eq!(ids, vec![FieldId::Int(3), FieldId::Text("abc".into())]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[3,"abc"]"#);
    }

    #[test]
    fn test_data_type_tags() {
        let t: DataType = serde_json::from_str(r#""long_text""#).unwrap();
        assert_eq!(t, DataType::LongText);
        let t: DataType = serde_json::from_str(r#""repeating_group""#).unwrap();
        assert_eq!(t, DataType::RepeatingGroup);
        assert_eq!(DataType::LongText.to_string(), "long_text");
    }

    #[test]
    fn test_unknown_data_type_is_unsupported() {
        let t: DataType = serde_json::from_str(r#""signature""#).unwrap();
        assert_eq!(t, DataType::Unsupported);
    }

    #[test]
    fn test_field_deserialize_backend_shape() {
        let json = r#"{
            "id": 12,
            "name": "status",
            "label": "Status",
            "type": "dropdown",
            "required": true,
            "options": ["Open", "Closed"],
            "default": "Open",
            "is_stage": true
        }"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.id, FieldId::Int(12));
        assert_eq!(field.data_type, DataType::Dropdown);
        assert!(field.required);
        assert_eq!(field.options, vec!["Open", "Closed"]);
        assert_eq!(field.default.as_deref(), Some("Open"));
        assert_eq!(field.extra["is_stage"], true);
    }

    #[test]
    fn test_field_null_options_and_missing_required() {
        let json = r#"{"id": 1, "name": "n", "label": "N", "type": "text", "options": null}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert!(field.options.is_empty());
        assert!(!field.required);
    }

    #[test]
    fn test_field_extra_round_trips() {
        let json = serde_json::json!({
            "id": 5,
            "name": "total",
            "label": "Total",
            "type": "number",
            "required": false,
            "auto_calculated": true
        });
        let field: Field = serde_json::from_value(json).unwrap();
        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["auto_calculated"], true);
        assert_eq!(back["type"], "number");
        assert!(back.get("options").is_none());
    }

    #[test]
    fn test_field_builder() {
        let field = Field::new(1, "email", "Email", DataType::Email)
            .required(true)
            .placeholder("you@example.com");
        assert!(field.required);
        assert_eq!(field.placeholder.as_deref(), Some("you@example.com"));
        assert!(!field.locally_created);
    }
}
