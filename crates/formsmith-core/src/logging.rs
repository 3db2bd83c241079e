//! Logging integration for formsmith.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-screen spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise structured JSON. Installing a
/// second subscriber is silently ignored.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form builder screen.
///
/// # Examples
///
/// ```
/// use formsmith_core::logging::builder_span;
///
/// let span = builder_span("12", "3", "7");
/// let _guard = span.enter();
/// tracing::info!("loading view");
/// ```
pub fn builder_span(app_id: &str, object_id: &str, view_id: &str) -> tracing::Span {
    tracing::info_span!("form_builder", app = app_id, object = object_id, view = view_id)
}
