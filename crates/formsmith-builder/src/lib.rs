//! # formsmith-builder
//!
//! The form layout builder screen. A [`FormBuilder`] loads a form view
//! through a [`ViewApi`], lets fields be dragged from the sidebar onto the
//! canvas and reordered there, edits the selected field's properties, and
//! saves the resulting field order back into the view's `config.fields`.
//!
//! ## Modules
//!
//! - [`api`] - The view API seam with HTTP and in-memory implementations
//! - [`builder`] - The orchestrator and its phases
//! - [`notify`] - Toast notifications
//! - [`mount`] - Screen liveness across async requests
//! - [`render`] - View models and HTML for the three panels

pub mod api;
pub mod builder;
pub mod mount;
pub mod notify;
pub mod render;

pub use api::{HttpViewApi, InMemoryViewApi, ViewApi};
pub use builder::{ElementKey, FieldEdit, FormBuilder, Phase, LOAD_FAILED, SAVE_FAILED, SAVE_SUCCEEDED};
pub use mount::MountHandle;
pub use notify::{Notifier, Toast, ToastLevel, ToastQueue};
pub use render::{BuilderFrame, CanvasEntry, EditorFrame, IndicatorLine, PropertiesPanel, SidebarEntry};
