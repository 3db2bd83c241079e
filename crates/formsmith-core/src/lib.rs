//! # formsmith-core
//!
//! Core types shared by every formsmith crate: the error taxonomy, the
//! settings structure and its loaders, and tracing-based logging setup.
//! This crate has no formsmith dependencies.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Builder settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormsmithError, FormsmithResult, ValidationError};
pub use settings::{Settings, SETTINGS};
