//! The `place` management command.
//!
//! Inserts an available field into the form, next to another field or at
//! the end, and saves the view.

use async_trait::async_trait;
use formsmith_builder::FormBuilder;
use formsmith_core::{FormsmithError, FormsmithResult, Settings};
use formsmith_dnd::{DragPayload, DropEvent, Edge, TargetData};

use crate::command::ManagementCommand;
use crate::commands::{
    canvas_index, edge_arg, field_argument, open_from_matches, required_arg, target_arguments,
    view_arguments,
};

/// Adds a sidebar field to a form view.
pub struct PlaceCommand;

/// Drops the available field `name` on `target`, or appends it when no
/// target is given.
pub fn place_field(
    builder: &mut FormBuilder,
    name: &str,
    target: Option<(&str, Edge)>,
) -> FormsmithResult<()> {
    let field = builder
        .available_fields()
        .into_iter()
        .find(|f| f.name == name)
        .cloned();
    let Some(field) = field else {
        return Err(if builder.object().field_by_name(name).is_some() {
            FormsmithError::InvalidState(format!("Field '{name}' is already on the form"))
        } else {
            FormsmithError::NotFound(format!("field '{name}'"))
        });
    };

    let target = match target {
        Some((target, edge)) => TargetData::row(canvas_index(builder, target)?, edge),
        None => TargetData::empty_zone(),
    };
    let event = DropEvent {
        source: DragPayload::SidebarField(field),
        target,
    };
    if builder.apply_drop(&event) {
        Ok(())
    } else {
        Err(FormsmithError::InvalidState(format!(
            "Field '{name}' could not be placed"
        )))
    }
}

#[async_trait]
impl ManagementCommand for PlaceCommand {
    fn name(&self) -> &'static str {
        "place"
    }

    fn help(&self) -> &'static str {
        "Add an available field to a form view and save it"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        target_arguments(field_argument(view_arguments(cmd)), false)
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let name = required_arg(matches, "field")?;
        let target = match matches.get_one::<String>("target") {
            Some(target) => Some((target.as_str(), edge_arg(matches)?)),
            None => None,
        };

        let mut builder = open_from_matches(matches, settings).await?;
        place_field(&mut builder, name, target)?;
        builder.save().await?;
        tracing::info!(field = name, "Placed field");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use formsmith_builder::InMemoryViewApi;
    use formsmith_schema::{DataType, Field, ObjectSchema, View, ViewConfig};

    use super::*;
    use crate::commands::open_builder;

    async fn builder(order: &[&str]) -> FormBuilder {
        let object = ObjectSchema::new(
            1,
            2,
            ["a", "b", "c", "d"]
                .into_iter()
                .zip(1_i64..)
                .map(|(name, id)| Field::new(id, name, name.to_uppercase(), DataType::Text))
                .collect(),
        );
        let api = InMemoryViewApi::new().with_view(
            object.view_locator(3),
            View::form(3, "Form", ViewConfig::with_fields(order.iter().copied())),
        );
        open_builder(object, "3", Arc::new(api)).await.unwrap()
    }

    fn names(builder: &FormBuilder) -> Vec<&str> {
        builder.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_place_appends_without_target() {
        let mut b = builder(&["a", "b"]).await;
        place_field(&mut b, "d", None).unwrap();
        assert_eq!(names(&b), vec!["a", "b", "d"]);
    }

    #[tokio::test]
    async fn test_place_next_to_target() {
        let mut b = builder(&["a", "b"]).await;
        place_field(&mut b, "c", Some(("b", Edge::Top))).unwrap();
        assert_eq!(names(&b), vec!["a", "c", "b"]);
        place_field(&mut b, "d", Some(("a", Edge::Bottom))).unwrap();
        assert_eq!(names(&b), vec!["a", "d", "c", "b"]);
    }

    #[tokio::test]
    async fn test_place_rejects_placed_and_unknown_fields() {
        let mut b = builder(&["a"]).await;
        assert!(matches!(
            place_field(&mut b, "a", None),
            Err(FormsmithError::InvalidState(_))
        ));
        assert!(matches!(
            place_field(&mut b, "zzz", None),
            Err(FormsmithError::NotFound(_))
        ));
        assert!(matches!(
            place_field(&mut b, "b", Some(("c", Edge::Top))),
            Err(FormsmithError::InvalidState(_))
        ));
        assert_eq!(names(&b), vec!["a"]);
    }
}
