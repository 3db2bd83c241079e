//! Converting between a view's stored field names and schema fields.
//!
//! A form view stores its layout as `config.fields`, an ordered list of
//! field names. [`materialize`] resolves those names against the object's
//! schema; [`serialize`] and [`merge_into`] go the other way when saving.

use std::collections::HashSet;

use formsmith_core::ValidationError;
use formsmith_schema::{Field, ViewConfig};

/// Resolves a view config into the ordered field list.
///
/// Names are resolved in stored order; names the schema does not know, and
/// repeated names, are dropped. An empty list yields every schema field in
/// schema order.
pub fn materialize(config: &ViewConfig, object_fields: &[Field]) -> Vec<Field> {
    if config.uses_all_fields() {
        return object_fields.to_vec();
    }
    let mut seen = HashSet::new();
    let mut ordered = Vec::with_capacity(config.fields.len());
    for name in &config.fields {
        if !seen.insert(name.as_str()) {
            tracing::debug!(field = %name, "dropping repeated field name from layout");
            continue;
        }
        match object_fields.iter().find(|f| &f.name == name) {
            Some(field) => ordered.push(field.clone()),
            None => tracing::warn!(field = %name, "layout refers to an unknown field"),
        }
    }
    ordered
}

/// Returns the schema-required fields missing from `ordered`, in schema order.
pub fn missing_required<'a>(object_fields: &'a [Field], ordered: &[Field]) -> Vec<&'a Field> {
    let placed: HashSet<&str> = ordered.iter().map(|f| f.name.as_str()).collect();
    object_fields
        .iter()
        .filter(|f| f.required && !placed.contains(f.name.as_str()))
        .collect()
}

/// Checks that every schema-required field is placed.
///
/// The error's code is `missing_required` and its `fields` param lists the
/// missing names.
pub fn validate_layout(object_fields: &[Field], ordered: &[Field]) -> Result<(), ValidationError> {
    let missing = missing_required(object_fields, ordered);
    if missing.is_empty() {
        return Ok(());
    }
    let labels: Vec<&str> = missing.iter().map(|f| f.label.as_str()).collect();
    let names: Vec<&str> = missing.iter().map(|f| f.name.as_str()).collect();
    Err(ValidationError::new(
        format!("Missing required fields: {}", labels.join(", ")),
        "missing_required",
    )
    .with_param("fields", names.join(",")))
}

/// Returns the field names of `ordered`, in order.
pub fn serialize(ordered: &[Field]) -> Vec<String> {
    ordered.iter().map(|f| f.name.clone()).collect()
}

/// Returns a copy of `config` whose `fields` is replaced by `ordered`.
///
/// Every other configuration key is kept as is.
pub fn merge_into(config: &ViewConfig, ordered: &[Field]) -> ViewConfig {
    ViewConfig {
        fields: serialize(ordered),
        rest: config.rest.clone(),
    }
}

/// Returns the schema fields not yet placed, in schema order.
pub fn available_fields<'a>(object_fields: &'a [Field], ordered: &[Field]) -> Vec<&'a Field> {
    let placed: HashSet<&str> = ordered.iter().map(|f| f.name.as_str()).collect();
    object_fields
        .iter()
        .filter(|f| !placed.contains(f.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_schema::DataType;
    use serde_json::json;

    fn abc() -> Vec<Field> {
        vec![
            Field::new(1, "A", "Alpha", DataType::Text),
            Field::new(2, "B", "Beta", DataType::Number),
            Field::new(3, "C", "Gamma", DataType::Date),
        ]
    }

    fn names(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_empty_config_materializes_all_fields() {
        let out = materialize(&ViewConfig::default(), &abc());
        assert_eq!(names(&out), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unknown_names_dropped() {
        let out = materialize(&ViewConfig::with_fields(["B", "Z"]), &abc());
        assert_eq!(names(&out), vec!["B"]);
    }

    #[test]
    fn test_stored_order_and_duplicates() {
        let out = materialize(&ViewConfig::with_fields(["C", "A", "C"]), &abc());
        assert_eq!(names(&out), vec!["C", "A"]);
    }

    #[test]
    fn test_only_unknown_names_gives_empty_list() {
        let out = materialize(&ViewConfig::with_fields(["Z"]), &abc());
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_layout_names_missing_labels() {
        let object = vec![
            Field::new(1, "name", "Name", DataType::Text).required(true),
            Field::new(2, "email", "Email", DataType::Email).required(true),
        ];
        let ordered = vec![object[0].clone()];
        let err = validate_layout(&object, &ordered).unwrap_err();
        assert_eq!(err.code, "missing_required");
        assert_eq!(err.message, "Missing required fields: Email");
        assert_eq!(err.params["fields"], "email");
        assert!(validate_layout(&object, &object).is_ok());
    }

    #[test]
    fn test_validate_layout_lists_all_missing() {
        let object = vec![
            Field::new(1, "name", "Name", DataType::Text).required(true),
            Field::new(2, "email", "Email", DataType::Email).required(true),
        ];
        let err = validate_layout(&object, &[]).unwrap_err();
        assert_eq!(err.message, "Missing required fields: Name, Email");
    }

    #[test]
    fn test_merge_into_preserves_other_keys() {
        let config: ViewConfig = serde_json::from_value(json!({
            "fields": ["A"],
            "theme": "dark",
            "submit": {"label": "Send"}
        }))
        .unwrap();
        let ordered = vec![abc()[2].clone(), abc()[0].clone()];
        let merged = merge_into(&config, &ordered);
        assert_eq!(merged.fields, vec!["C", "A"]);
        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["submit"]["label"], "Send");
    }

    #[test]
    fn test_available_fields() {
        let object = abc();
        let ordered = vec![object[1].clone()];
        let available: Vec<&str> = available_fields(&object, &ordered)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(available, vec!["A", "C"]);
    }
}
