//! Core error types for formsmith.
//!
//! [`FormsmithError`] covers the failures the builder can meet: view API
//! responses, transport failures, local layout validation, configuration,
//! and serialization. [`ValidationError`] carries the user-facing message for
//! failures that are recovered locally without touching the network.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A validation error with an optional set of per-field errors.
///
/// Validation errors are either simple (a single message) or compound
/// (containing per-field error lists).
///
/// # Examples
///
/// ```
/// use formsmith_core::error::ValidationError;
///
/// let err = ValidationError::new("Missing required fields: Email", "missing_required")
///     .with_param("fields", "email");
/// assert_eq!(err.to_string(), "Missing required fields: Email");
/// assert_eq!(err.params["fields"], "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the failure (e.g. "required", "missing_required").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut keys: Vec<&String> = self.field_errors.keys().collect();
            keys.sort();
            let mut first = true;
            for field in keys {
                for error in &self.field_errors[field] {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for formsmith.
#[derive(Error, Debug)]
pub enum FormsmithError {
    // ── View API ─────────────────────────────────────────────────────

    /// The requested view (or object) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body or reason phrase.
        message: String,
    },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("Network error: {0}")]
    Network(String),

    // ── Validation ───────────────────────────────────────────────────

    /// The layout failed local validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Builder state ────────────────────────────────────────────────

    /// An operation was attempted in a phase that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormsmithError {
    /// Returns `true` for failures that originate from the view API or the
    /// transport underneath it.
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Http { .. } | Self::Network(_) | Self::SerializationError(_)
        )
    }

    /// Returns the HTTP status code this error corresponds to, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Http { status, .. } => Some(*status),
            Self::ValidationError(_) => Some(400),
            _ => None,
        }
    }
}

impl From<ValidationError> for FormsmithError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

impl From<serde_json::Error> for FormsmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormsmithError>`.
pub type FormsmithResult<T> = Result<T, FormsmithError>;
