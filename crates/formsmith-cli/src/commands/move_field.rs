//! The `move` management command.
//!
//! Moves a field already on the form to the top or bottom edge of another
//! form field and saves the view. A move that resolves to the field's own
//! position saves nothing.

use async_trait::async_trait;
use formsmith_builder::FormBuilder;
use formsmith_core::{FormsmithResult, Settings};
use formsmith_dnd::{DragPayload, DropEvent, Edge, TargetData};

use crate::command::ManagementCommand;
use crate::commands::{
    canvas_index, edge_arg, field_argument, open_from_matches, required_arg, target_arguments,
    view_arguments,
};

/// Reorders a field within a form view.
pub struct MoveCommand;

/// Drops the form field `name` on `edge` of the form field `target`.
///
/// Returns `false` if the order did not change.
pub fn move_field(
    builder: &mut FormBuilder,
    name: &str,
    target: &str,
    edge: Edge,
) -> FormsmithResult<bool> {
    let from = canvas_index(builder, name)?;
    let to = canvas_index(builder, target)?;
    let event = DropEvent {
        source: DragPayload::CanvasField {
            field_id: builder.fields()[from].id.clone(),
        },
        target: TargetData::row(to, edge),
    };
    Ok(builder.apply_drop(&event))
}

#[async_trait]
impl ManagementCommand for MoveCommand {
    fn name(&self) -> &'static str {
        "move"
    }

    fn help(&self) -> &'static str {
        "Move a form field next to another one and save the view"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        target_arguments(field_argument(view_arguments(cmd)), true)
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let name = required_arg(matches, "field")?;
        let target = required_arg(matches, "target")?;
        let edge = edge_arg(matches)?;

        let mut builder = open_from_matches(matches, settings).await?;
        if !move_field(&mut builder, name, target, edge)? {
            tracing::info!(field = name, "Layout unchanged; nothing to save");
            return Ok(());
        }
        builder.save().await?;
        tracing::info!(field = name, next_to = target, edge = %edge, "Moved field");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use formsmith_builder::InMemoryViewApi;
    use formsmith_core::FormsmithError;
    use formsmith_schema::{DataType, Field, ObjectSchema, View, ViewConfig};

    use super::*;
    use crate::commands::open_builder;

    async fn abc() -> FormBuilder {
        let object = ObjectSchema::new(
            1,
            2,
            vec![
                Field::new(1, "A", "A", DataType::Text),
                Field::new(2, "B", "B", DataType::Text),
                Field::new(3, "C", "C", DataType::Text),
            ],
        );
        let api = InMemoryViewApi::new().with_view(
            object.view_locator(4),
            View::form(4, "Form", ViewConfig::with_fields(["A", "B", "C"])),
        );
        open_builder(object, "4", Arc::new(api)).await.unwrap()
    }

    fn names(builder: &FormBuilder) -> Vec<&str> {
        builder.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_move_down_and_up() {
        let mut b = abc().await;
        assert!(move_field(&mut b, "A", "C", Edge::Bottom).unwrap());
        assert_eq!(names(&b), vec!["B", "C", "A"]);
        assert!(move_field(&mut b, "A", "B", Edge::Top).unwrap());
        assert_eq!(names(&b), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_move_to_own_slot_is_unchanged() {
        let mut b = abc().await;
        assert!(!move_field(&mut b, "B", "C", Edge::Top).unwrap());
        assert!(!move_field(&mut b, "B", "A", Edge::Bottom).unwrap());
        assert!(!move_field(&mut b, "B", "B", Edge::Top).unwrap());
        assert_eq!(names(&b), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_move_requires_placed_fields() {
        let mut b = abc().await;
        assert!(matches!(
            move_field(&mut b, "Z", "A", Edge::Top),
            Err(FormsmithError::InvalidState(_))
        ));
    }
}
