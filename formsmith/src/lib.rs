//! # formsmith
//!
//! A drag-and-drop form layout builder for no-code business applications.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `formsmith` for everything, or on individual crates for finer-grained
//! control.

/// Errors, settings, and logging.
pub use formsmith_core as core;

/// Fields, views, objects, and the data type catalog.
pub use formsmith_schema as schema;

/// Public-facing form rendering and validation.
#[cfg(feature = "forms")]
pub use formsmith_forms as forms;

/// Drag sessions, drop targets, and the drag monitor.
#[cfg(feature = "dnd")]
pub use formsmith_dnd as dnd;

/// The layout reducer and view materializer.
#[cfg(feature = "layout")]
pub use formsmith_layout as layout;

/// The form builder screen.
#[cfg(feature = "builder")]
pub use formsmith_builder as builder;

/// Management commands.
#[cfg(feature = "cli")]
pub use formsmith_cli as cli;

/// Test servers, mock API, and fixtures.
#[cfg(feature = "testing")]
pub use formsmith_test as test;

// Third-party re-exports
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Commonly used types in one import.
pub mod prelude {
    pub use formsmith_core::{FormsmithError, FormsmithResult, Settings, ValidationError};
    pub use formsmith_schema::{DataType, Field, FieldId, ObjectSchema, View, ViewConfig, ViewLocator};

    #[cfg(feature = "dnd")]
    pub use formsmith_dnd::{DragPayload, DropEvent, Edge, Point, Rect, TargetData};

    #[cfg(feature = "layout")]
    pub use formsmith_layout::{materialize, reduce, validate_layout};

    #[cfg(feature = "builder")]
    pub use formsmith_builder::{ElementKey, FormBuilder, HttpViewApi, InMemoryViewApi, Phase, ToastQueue};
}
