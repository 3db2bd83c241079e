//! The `formsmith` command-line entry point.

use std::process::ExitCode;

use formsmith_cli::{init_settings, register_builtin_commands, CommandRegistry};
use formsmith_core::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let settings = match init_settings(matches.get_one::<String>("settings").map(String::as_str)) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("formsmith: {err}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(settings);

    match registry.execute(&matches, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("formsmith: {err}");
            ExitCode::FAILURE
        }
    }
}
