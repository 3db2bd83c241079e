//! The `remove` management command.

use async_trait::async_trait;
use formsmith_builder::FormBuilder;
use formsmith_core::{FormsmithError, FormsmithResult, Settings};
use formsmith_schema::Field;

use crate::command::ManagementCommand;
use crate::commands::{canvas_index, field_argument, open_from_matches, required_arg, view_arguments};

/// Takes a field off a form view and saves it.
///
/// Removing a schema-required field makes the save fail validation; the
/// view is left as it was.
pub struct RemoveCommand;

/// Selects the form field `name` and removes it.
pub fn remove_field(builder: &mut FormBuilder, name: &str) -> FormsmithResult<Field> {
    let index = canvas_index(builder, name)?;
    let id = builder.fields()[index].id.clone();
    builder.select(&id);
    builder
        .remove_selected()
        .ok_or_else(|| FormsmithError::InvalidState(format!("Field '{name}' could not be removed")))
}

#[async_trait]
impl ManagementCommand for RemoveCommand {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn help(&self) -> &'static str {
        "Remove a field from a form view and save it"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        field_argument(view_arguments(cmd))
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let name = required_arg(matches, "field")?;
        let mut builder = open_from_matches(matches, settings).await?;
        let removed = remove_field(&mut builder, name)?;
        builder.save().await?;
        tracing::info!(field = %removed.name, "Removed field");
        Ok(())
    }
}
