//! The `show` management command.
//!
//! Prints the form's ordered field list followed by the fields still
//! available in the sidebar.

use std::fmt::Write;

use async_trait::async_trait;
use formsmith_builder::FormBuilder;
use formsmith_core::{FormsmithResult, Settings};

use crate::command::ManagementCommand;
use crate::commands::{open_from_matches, view_arguments};

/// Prints the layout of a form view.
pub struct ShowCommand;

/// Describes the builder's layout as plain text.
pub fn describe(builder: &FormBuilder) -> String {
    let mut out = String::new();
    let name = builder.view().map_or("", |v| v.name.as_str());
    let _ = writeln!(out, "Form: {name} ({})", builder.locator());

    let _ = writeln!(out, "Fields:");
    if builder.fields().is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for (i, field) in builder.fields().iter().enumerate() {
        let marker = if field.required { " *" } else { "" };
        let _ = writeln!(
            out,
            "  {}. {} [{}] {}{marker}",
            i + 1,
            field.name,
            field.data_type,
            field.label
        );
    }

    let _ = writeln!(out, "Available:");
    let available = builder.available_fields();
    if available.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for field in available {
        let _ = writeln!(out, "  - {} [{}] {}", field.name, field.data_type, field.label);
    }
    out
}

#[async_trait]
impl ManagementCommand for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn help(&self) -> &'static str {
        "Show the field layout of a form view"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        view_arguments(cmd)
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let builder = open_from_matches(matches, settings).await?;
        print!("{}", describe(&builder));
        Ok(())
    }
}
