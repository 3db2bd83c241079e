//! # formsmith-cli
//!
//! Management commands that drive the form builder from the terminal.
//!
//! - **Command framework** - [`ManagementCommand`] and [`CommandRegistry`]
//! - **Built-in commands** - `show`, `place`, `move`, `remove`, `check`
//! - **Settings** - [`load_settings`] resolves the global `--settings` file and
//!   [`init_settings`] installs it as the process-wide `SETTINGS`
//!
//! ## Quick Start
//!
//! ```rust
//! use formsmith_cli::command::CommandRegistry;
//! use formsmith_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"show"));
//! assert!(names.contains(&"move"));
//! ```

// - missing_const_for_fn: command accessors may gain runtime logic later
// - unused_async: command handlers keep a uniform async signature
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

use std::path::Path;

use formsmith_core::settings_loader;
use formsmith_core::{FormsmithResult, Settings, SETTINGS};

pub use command::{CommandRegistry, ManagementCommand};
pub use commands::register_builtin_commands;

/// Loads the settings for a CLI run.
///
/// Without a file the defaults are used. Files ending in `.json` are read as
/// JSON, anything else as TOML. `FORMSMITH_*` environment variables override
/// either way.
pub fn load_settings(path: Option<&str>) -> FormsmithResult<Settings> {
    let Some(path) = path else {
        return Ok(settings_loader::from_env());
    };
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let mut settings = settings_loader::from_json_file(path)?;
        settings_loader::apply_env_overrides(&mut settings);
        Ok(settings)
    } else {
        settings_loader::from_toml_file_with_env(path)
    }
}

/// Loads the settings and installs them as the process-wide [`SETTINGS`].
///
/// If the global is already configured it is left as is and returned.
pub fn init_settings(path: Option<&str>) -> FormsmithResult<&'static Settings> {
    if !SETTINGS.is_configured() {
        SETTINGS.configure(load_settings(path)?);
    }
    Ok(SETTINGS.get())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_settings_from_toml_and_json() {
        let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml, "log_level = \"debug\"").unwrap();
        let settings = load_settings(toml.path().to_str()).unwrap();
        assert_eq!(settings.log_level, "debug");

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(json, r#"{{"debug": false}}"#).unwrap();
        let settings = load_settings(json.path().to_str()).unwrap();
        assert!(!settings.debug);
    }

    #[test]
    fn test_init_settings_configures_global() {
        let settings = init_settings(None).unwrap();
        assert!(SETTINGS.is_configured());
        assert_eq!(settings.api_base_url, SETTINGS.get().api_base_url);
        // A second call keeps the installed settings.
        let again = init_settings(Some("/nonexistent/formsmith.toml")).unwrap();
        assert!(std::ptr::eq(settings, again));
    }

    #[test]
    fn test_load_settings_missing_file() {
        assert!(load_settings(Some("/nonexistent/formsmith.toml")).is_err());
    }
}
