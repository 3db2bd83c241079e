//! The `check` management command.
//!
//! Verifies that a form view places every field its object's schema
//! requires, without saving anything.

use async_trait::async_trait;
use formsmith_builder::FormBuilder;
use formsmith_core::{FormsmithResult, Settings, ValidationError};
use formsmith_layout::{missing_required, validate_layout};

use crate::command::ManagementCommand;
use crate::commands::{open_from_matches, view_arguments};

/// Runs the required-field check against a stored layout.
pub struct CheckCommand;

/// Checks the builder's current layout.
pub fn check_layout(builder: &FormBuilder) -> Result<(), ValidationError> {
    validate_layout(&builder.object().fields, builder.fields())
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check that a form view contains every required field"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        view_arguments(cmd)
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let builder = open_from_matches(matches, settings).await?;
        if let Err(err) = check_layout(&builder) {
            for field in missing_required(&builder.object().fields, builder.fields()) {
                tracing::warn!("Required field '{}' ({}) is not on the form", field.name, field.label);
            }
            return Err(err.into());
        }
        tracing::info!(
            "Form check identified no issues ({} field(s) placed)",
            builder.fields().len()
        );
        Ok(())
    }
}
