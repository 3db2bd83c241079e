//! Built-in management commands.
//!
//! Every command loads an object schema from a JSON file, opens the form
//! view named by `--view` through the API configured in the settings, and
//! drives a [`FormBuilder`] headlessly. Each command implements
//! [`ManagementCommand`](crate::command::ManagementCommand).

pub mod check;
pub mod move_field;
pub mod place;
pub mod remove;
pub mod show;

pub use check::CheckCommand;
pub use move_field::MoveCommand;
pub use place::PlaceCommand;
pub use remove::RemoveCommand;
pub use show::ShowCommand;

use std::path::Path;
use std::sync::Arc;

use formsmith_builder::{FormBuilder, HttpViewApi, Notifier, Toast, ToastLevel, ViewApi};
use formsmith_core::{FormsmithError, FormsmithResult, Settings};
use formsmith_dnd::Edge;
use formsmith_schema::ObjectSchema;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(ShowCommand));
    registry.register(Box::new(PlaceCommand));
    registry.register(Box::new(MoveCommand));
    registry.register(Box::new(RemoveCommand));
    registry.register(Box::new(CheckCommand));
}

/// Reports builder toasts through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => tracing::info!("{}", toast.message),
            ToastLevel::Error => tracing::error!("{}", toast.message),
        }
    }
}

/// Adds the `--object` and `--view` options every command takes.
pub(crate) fn view_arguments(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("object")
            .long("object")
            .value_name("SCHEMA_JSON")
            .required(true)
            .help("Object schema file (JSON with appId, id and fields)"),
    )
    .arg(
        clap::Arg::new("view")
            .long("view")
            .value_name("VIEW_ID")
            .required(true)
            .help("Id of the form view to edit"),
    )
}

/// Adds a required `--field <name>` option.
pub(crate) fn field_argument(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("field")
            .long("field")
            .value_name("NAME")
            .required(true)
            .help("Name of the field to act on"),
    )
}

/// Adds the `--target <name>` and `--edge top|bottom` options.
pub(crate) fn target_arguments(cmd: clap::Command, required: bool) -> clap::Command {
    cmd.arg(
        clap::Arg::new("target")
            .long("target")
            .value_name("NAME")
            .required(required)
            .help("Name of the form field to drop next to"),
    )
    .arg(
        clap::Arg::new("edge")
            .long("edge")
            .value_parser(["top", "bottom"])
            .default_value("top")
            .help("Side of the target field to drop on"),
    )
}

/// Returns a required string argument.
pub(crate) fn required_arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> FormsmithResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| FormsmithError::ConfigurationError(format!("Missing --{name}")))
}

/// Returns the `--edge` argument.
pub(crate) fn edge_arg(matches: &clap::ArgMatches) -> FormsmithResult<Edge> {
    let raw = matches.get_one::<String>("edge").map_or("top", String::as_str);
    Edge::parse(raw)
        .ok_or_else(|| FormsmithError::ConfigurationError(format!("Invalid edge '{raw}'")))
}

/// Reads and validates an object schema file.
pub fn load_object(path: impl AsRef<Path>) -> FormsmithResult<ObjectSchema> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        FormsmithError::ConfigurationError(format!(
            "Failed to read object schema '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    let object: ObjectSchema = serde_json::from_str(&content)?;
    object.validate()?;
    Ok(object)
}

/// Creates a builder over `api` and loads the view.
pub async fn open_builder(
    object: ObjectSchema,
    view_id: &str,
    api: Arc<dyn ViewApi>,
) -> FormsmithResult<FormBuilder> {
    let mut builder = FormBuilder::new(object, view_id, api, Arc::new(LogNotifier));
    builder.load().await?;
    Ok(builder)
}

/// Opens the builder named by `--object` and `--view` against the HTTP API
/// configured in `settings`.
pub(crate) async fn open_from_matches(
    matches: &clap::ArgMatches,
    settings: &Settings,
) -> FormsmithResult<FormBuilder> {
    let object = load_object(required_arg(matches, "object")?)?;
    let view_id = required_arg(matches, "view")?;
    let api = HttpViewApi::from_settings(settings);
    tracing::debug!(base_url = api.base_url(), view = view_id, "opening form view");
    open_builder(object, view_id, Arc::new(api)).await
}

/// Returns the position of a field on the form.
pub fn canvas_index(builder: &FormBuilder, name: &str) -> FormsmithResult<usize> {
    builder
        .fields()
        .iter()
        .position(|f| f.name == name)
        .ok_or_else(|| FormsmithError::InvalidState(format!("Field '{name}' is not on the form")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin_commands() {
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        assert_eq!(
            registry.list_commands(),
            vec!["check", "move", "place", "remove", "show"]
        );
    }

    #[test]
    fn test_edge_defaults_to_top() {
        let cmd = target_arguments(clap::Command::new("t"), false);
        let matches = cmd.clone().try_get_matches_from(["t"]).unwrap();
        assert_eq!(edge_arg(&matches).unwrap(), Edge::Top);
        let matches = cmd.clone().try_get_matches_from(["t", "--edge", "bottom"]).unwrap();
        assert_eq!(edge_arg(&matches).unwrap(), Edge::Bottom);
        assert!(cmd.try_get_matches_from(["t", "--edge", "left"]).is_err());
    }

    #[test]
    fn test_load_object_missing_file() {
        let err = load_object("/nonexistent/schema.json").unwrap_err();
        assert!(matches!(err, FormsmithError::ConfigurationError(_)));
    }
}
