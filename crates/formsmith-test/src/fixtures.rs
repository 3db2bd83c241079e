//! Sample objects and views shared by the integration suites.

use serde_json::json;

use formsmith_schema::{DataType, Field, ObjectSchema, View, ViewConfig, ViewLocator};

/// App id of the contact fixtures.
pub const CONTACT_APP_ID: i64 = 1;
/// Object id of the contact fixtures.
pub const CONTACT_OBJECT_ID: i64 = 2;
/// View id of the contact form view.
pub const CONTACT_VIEW_ID: i64 = 7;

/// A contact object: `name` and `email` are required, `phone` and `notes`
/// are optional.
pub fn contact_object() -> ObjectSchema {
    ObjectSchema::new(
        CONTACT_APP_ID,
        CONTACT_OBJECT_ID,
        vec![
            Field::new(10, "name", "Name", DataType::Text).required(true),
            Field::new(11, "email", "Email", DataType::Email)
                .required(true)
                .placeholder("you@example.com"),
            Field::new(12, "phone", "Phone", DataType::Text),
            Field::new(13, "notes", "Notes", DataType::LongText),
        ],
    )
}

/// Locator of the contact form view.
pub fn contact_locator() -> ViewLocator {
    ViewLocator::new(CONTACT_APP_ID, CONTACT_OBJECT_ID, CONTACT_VIEW_ID)
}

/// The contact form view: `[name, email]` plus an unrelated `theme` key.
pub fn contact_view() -> View {
    let mut config = ViewConfig::with_fields(["name", "email"]);
    config.rest.insert("theme".to_string(), json!("light"));
    View::form(CONTACT_VIEW_ID, "Contact form", config)
}

/// An object with three optional text fields `A`, `B`, `C`.
pub fn abc_object() -> ObjectSchema {
    ObjectSchema::new(
        CONTACT_APP_ID,
        3,
        ["A", "B", "C"]
            .into_iter()
            .zip(1_i64..)
            .map(|(name, id)| Field::new(id, name, name, DataType::Text))
            .collect(),
    )
}

/// A form view over [`abc_object`] with the given stored order.
pub fn abc_view(fields: &[&str]) -> View {
    View::form(8, "ABC form", ViewConfig::with_fields(fields.iter().copied()))
}

/// Locator of [`abc_view`].
pub fn abc_locator() -> ViewLocator {
    abc_object().view_locator(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid() {
        assert!(contact_object().validate().is_ok());
        assert!(abc_object().validate().is_ok());
        assert_eq!(contact_object().view_locator(CONTACT_VIEW_ID), contact_locator());
        assert_eq!(contact_view().config.rest["theme"], "light");
        assert_eq!(abc_view(&["C"]).config.fields, vec!["C"]);
    }
}
