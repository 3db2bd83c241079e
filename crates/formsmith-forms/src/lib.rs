//! # formsmith-forms
//!
//! Renders schema fields as HTML inputs and cleans submitted values.
//!
//! - [`widgets`] - the closed data-type to widget table and field markup
//! - [`fields`] - per-type coercion and validation of raw input
//! - [`form`] - [`PublicForm`], an ordered set of fields bound to submitted data

pub mod fields;
pub mod form;
pub mod widgets;

pub use fields::{clean_value, CleanedValue};
pub use form::PublicForm;
pub use widgets::{escape_html, render_field, render_input, WidgetType};
