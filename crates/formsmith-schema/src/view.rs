//! Views: named layouts over an object.
//!
//! The form builder only reads and writes one part of a view,
//! [`ViewConfig::fields`], the ordered list of field names placed on the
//! form. Every other key of `config` is carried in [`ViewConfig::rest`] and
//! must survive a save untouched.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::null_as_default;

/// The kind of layout a view describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    /// A data-entry form.
    Form,
    /// A tabular list.
    List,
    /// A kanban board.
    Kanban,
    /// A timeline.
    Timeline,
    /// A view type this crate does not know.
    #[serde(other)]
    Other,
}

/// The `config` object of a view.
///
/// An empty `fields` list means "every field of the object, in schema
/// order"; a missing or `null` list is read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Ordered field names placed on the form.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<String>,
    /// All other configuration keys.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ViewConfig {
    /// Creates a config holding only a field order.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            rest: serde_json::Map::new(),
        }
    }

    /// Returns `true` when no explicit field order has been stored.
    pub fn uses_all_fields(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named, typed layout over an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Backend id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Public share token.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Layout kind; the builder edits `form` views.
    #[serde(rename = "type")]
    pub view_type: ViewType,
    /// Layout configuration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ViewConfig,
    /// Whether this is the object's default view of its type.
    #[serde(default)]
    pub is_default: bool,
    /// Whether the view is reachable through its public slug.
    #[serde(default)]
    pub is_public: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl View {
    /// Creates a form view with the given config.
    pub fn form(id: i64, name: impl Into<String>, config: ViewConfig) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            view_type: ViewType::Form,
            config,
            is_default: false,
            is_public: false,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Body of the view `PATCH` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPatch {
    /// The complete, merged configuration to store.
    pub config: ViewConfig,
}

/// Addresses one view of one object of one app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewLocator {
    /// The owning app.
    pub app_id: String,
    /// The owning object (table).
    pub object_id: String,
    /// The view itself.
    pub view_id: String,
}

impl ViewLocator {
    /// Creates a locator from anything displayable (numeric or string ids).
    pub fn new(app_id: impl fmt::Display, object_id: impl fmt::Display, view_id: impl fmt::Display) -> Self {
        Self {
            app_id: app_id.to_string(),
            object_id: object_id.to_string(),
            view_id: view_id.to_string(),
        }
    }

    /// Returns the API path of the view, with its trailing slash.
    pub fn path(&self) -> String {
        format!(
            "/apps/{}/objects/{}/views/{}/",
            self.app_id, self.object_id, self.view_id
        )
    }
}

impl fmt::Display for ViewLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.app_id, self.object_id, self.view_id)
    }
}
