//! # formsmith-schema
//!
//! The data model the form builder works on: [`Field`] (one attribute of an
//! object's schema), [`View`] (a named layout whose `config.fields` stores the
//! form's field order), [`ObjectSchema`] (the object's full field set), and
//! the static field type [`catalog`].

pub mod catalog;
pub mod field;
pub mod object;
pub mod view;

pub use catalog::{create_field, entry_for, icon_for, DataTypeEntry, DATATYPES};
pub use field::{DataType, Field, FieldId};
pub use object::ObjectSchema;
pub use view::{View, ViewConfig, ViewLocator, ViewPatch, ViewType};
