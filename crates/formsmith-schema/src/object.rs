//! Objects (tables) and their full field set.

use std::collections::HashSet;
use std::fmt;

use formsmith_core::{FormsmithError, FormsmithResult};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::field::{Field, FieldId};
use crate::view::ViewLocator;

/// An object's schema as handed to the form builder by its caller.
///
/// The builder never fetches this itself; `fields` is the authoritative
/// field set in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// The owning app (numeric or textual in the wire format).
    #[serde(rename = "appId", alias = "app_id", deserialize_with = "string_or_number")]
    pub app_id: String,
    /// The object's id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Every field of the object, in schema order.
    pub fields: Vec<Field>,
}

impl ObjectSchema {
    /// Creates a schema from its parts.
    pub fn new(app_id: impl fmt::Display, id: impl fmt::Display, fields: Vec<Field>) -> Self {
        Self {
            app_id: app_id.to_string(),
            id: id.to_string(),
            fields,
        }
    }

    /// Looks up a field by its machine name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by its identity.
    pub fn field_by_id(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Returns the fields the schema marks as required, in schema order.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Returns the locator of one of this object's views.
    pub fn view_locator(&self, view_id: impl fmt::Display) -> ViewLocator {
        ViewLocator::new(&self.app_id, &self.id, view_id)
    }

    /// Checks that field names and ids are unique.
    pub fn validate(&self) -> FormsmithResult<()> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(FormsmithError::ConfigurationError(format!(
                    "Duplicate field name '{}' in object {}",
                    field.name, self.id
                )));
            }
            if !ids.insert(&field.id) {
                return Err(FormsmithError::ConfigurationError(format!(
                    "Duplicate field id '{}' in object {}",
                    field.id, self.id
                )));
            }
        }
        Ok(())
    }
}

/// Accepts either a JSON string or a JSON integer and yields a `String`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or an integer id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
