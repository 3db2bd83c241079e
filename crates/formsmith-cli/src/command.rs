//! Management command framework.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use formsmith_cli::command::ManagementCommand;
//! use formsmith_core::{FormsmithResult, Settings};
//!
//! struct PingCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for PingCommand {
//!     fn name(&self) -> &str { "ping" }
//!     fn help(&self) -> &str { "Print the configured API base URL" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &Settings,
//!     ) -> FormsmithResult<()> {
//!         println!("{}", settings.api_base());
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use formsmith_core::{FormsmithError, FormsmithResult, Settings};

/// A command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and an
/// async handler. All commands must be `Send + Sync`.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &str;

    /// Returns a short help description for this command.
    fn help(&self) -> &str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command with the given argument matches and settings.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level `formsmith` command with every registered
    /// subcommand and the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formsmith")
            .about("formsmith form layout utility")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .value_name("FILE")
                    .global(true)
                    .help("Settings file (TOML or JSON)"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap wants `&'static str` names; commands are registered once
            // at startup, so the leak is bounded.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand named in `matches`.
    pub async fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormsmithResult<()> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            FormsmithError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            FormsmithError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        tracing::debug!(command = name, "running management command");
        cmd.handle(sub_matches, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand {
        cmd_name: String,
    }

    impl TestCommand {
        fn new(name: &str) -> Self {
            Self {
                cmd_name: name.to_string(),
            }
        }
    }

    #[async_trait]
    impl ManagementCommand for TestCommand {
        fn name(&self) -> &str {
            &self.cmd_name
        }

        fn help(&self) -> &'static str {
            "A test command"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("verbose")
                    .long("verbose")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        async fn handle(&self, _matches: &clap::ArgMatches, _settings: &Settings) -> FormsmithResult<()> {
            Ok(())
        }
    }

    struct FailingCommand;

    #[async_trait]
    impl ManagementCommand for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "A command that always fails"
        }

        async fn handle(&self, _matches: &clap::ArgMatches, _settings: &Settings) -> FormsmithResult<()> {
            Err(FormsmithError::ConfigurationError("deliberate failure".to_string()))
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand::new("show")));
        assert_eq!(registry.len(), 1);
        let cmd = registry.get("show").unwrap();
        assert_eq!(cmd.name(), "show");
        assert_eq!(cmd.help(), "A test command");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_list_commands_sorted_and_replaced() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand::new("show")));
        registry.register(Box::new(TestCommand::new("check")));
        registry.register(Box::new(TestCommand::new("show")));
        assert_eq!(registry.list_commands(), vec!["check", "show"]);
    }

    #[test]
    fn test_build_cli_global_settings() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand::new("show")));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["formsmith", "show", "--verbose", "--settings", "a.toml"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("settings").unwrap(), "a.toml");
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "show");
        assert!(sub.get_flag("verbose"));
    }

    #[test]
    fn test_build_cli_requires_subcommand() {
        let registry = CommandRegistry::new();
        assert!(registry.build_cli().try_get_matches_from(["formsmith"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_dispatches() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(TestCommand::new("show")));
        registry.register(Box::new(FailingCommand));
        let settings = Settings::default();

        let ok = registry.build_cli().try_get_matches_from(["formsmith", "show"]).unwrap();
        assert!(registry.execute(&ok, &settings).await.is_ok());

        let failing = registry.build_cli().try_get_matches_from(["formsmith", "fail"]).unwrap();
        assert!(matches!(
            registry.execute(&failing, &settings).await,
            Err(FormsmithError::ConfigurationError(_))
        ));
    }
}
