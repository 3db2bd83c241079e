//! # formsmith-layout
//!
//! Pure functions over the ordered form field list:
//!
//! - [`reducer`] - Applies a completed drop to the list (insert or move)
//! - [`materializer`] - Converts between a view's stored field names and
//!   schema fields, validates required fields, and derives the fields still
//!   available in the sidebar

pub mod materializer;
pub mod reducer;

pub use materializer::{
    available_fields, materialize, merge_into, missing_required, serialize, validate_layout,
};
pub use reducer::{compensate, insertion_index, reduce, Reduction};
