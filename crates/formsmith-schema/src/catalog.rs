//! The field type catalog.
//!
//! A static registry mapping each [`DataType`] to its display label and icon,
//! plus a factory for blank fields of a given type. The sidebar uses the
//! icon lookup; schema editing uses [`create_field`].

use chrono::Utc;
use uuid::Uuid;

use crate::field::{DataType, Field, FieldId};

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataTypeEntry {
    /// Human-readable name of the type.
    pub label: &'static str,
    /// The data type.
    pub data_type: DataType,
    /// Icon identifier rendered next to fields of this type.
    pub icon: &'static str,
}

/// Every catalog entry, in palette order.
pub const DATATYPES: [DataTypeEntry; 8] = [
    DataTypeEntry {
        label: "Text",
        data_type: DataType::Text,
        icon: "quote-text",
    },
    DataTypeEntry {
        label: "Number",
        data_type: DataType::Number,
        icon: "number",
    },
    DataTypeEntry {
        label: "Email",
        data_type: DataType::Email,
        icon: "alternate-email",
    },
    DataTypeEntry {
        label: "Dropdown",
        data_type: DataType::Dropdown,
        icon: "arrow-drop-down-circle",
    },
    DataTypeEntry {
        label: "Date",
        data_type: DataType::Date,
        icon: "date-range",
    },
    DataTypeEntry {
        label: "Checkbox",
        data_type: DataType::Checkbox,
        icon: "check-box",
    },
    DataTypeEntry {
        label: "Long Text",
        data_type: DataType::LongText,
        icon: "text-align-full",
    },
    DataTypeEntry {
        label: "Repeating Group",
        data_type: DataType::RepeatingGroup,
        icon: "repeat",
    },
];

/// Returns the catalog entry for a data type, if it has one.
pub fn entry_for(data_type: DataType) -> Option<&'static DataTypeEntry> {
    DATATYPES.iter().find(|entry| entry.data_type == data_type)
}

/// Returns the icon for a data type, falling back to the first entry's icon.
pub fn icon_for(data_type: DataType) -> &'static str {
    entry_for(data_type).map_or(DATATYPES[0].icon, |entry| entry.icon)
}

/// Creates a new, locally created field of the entry's type.
///
/// The id is a fresh UUID; the name is `field_<unix millis>`, suffixed with
/// `_2`, `_3`, ... when `existing` already uses it.
pub fn create_field(entry: &DataTypeEntry, existing: &[Field]) -> Field {
    let base = format!("field_{}", Utc::now().timestamp_millis());
    let mut name = base.clone();
    let mut suffix = 2;
    while existing.iter().any(|f| f.name == name) {
        name = format!("{base}_{suffix}");
        suffix += 1;
    }

    let mut field = Field::new(
        FieldId::Text(Uuid::new_v4().to_string()),
        name,
        entry.label,
        entry.data_type,
    )
    .placeholder("")
    .default_value("");
    field.locally_created = true;
    field
}
