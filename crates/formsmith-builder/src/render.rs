//! Presentation of the builder screen.
//!
//! [`render`] turns a [`FormBuilder`] into a [`BuilderFrame`], a plain view
//! model of the three panels (available fields, canvas, properties) plus
//! the drop indicator. [`BuilderFrame::to_html`] produces markup from it.

use std::fmt::Write;

use formsmith_dnd::Edge;
use formsmith_forms::{escape_html, render_field};
use formsmith_schema::{icon_for, DataType, FieldId};

use crate::builder::{ElementKey, FormBuilder, Phase};

/// Header title of the editor.
pub const TITLE: &str = "Form Layout";
/// Header subtitle of the editor.
pub const SUBTITLE: &str = "Drag fields from the sidebar to build your form";
/// Label of the save button.
pub const SAVE_LABEL: &str = "Save Form";
/// Shown in the sidebar when every field is on the form.
pub const SIDEBAR_EMPTY: &str = "All fields are used in the form.";
/// Headline of an empty canvas.
pub const CANVAS_EMPTY_TITLE: &str = "Empty Form";
/// Hint under an empty canvas headline.
pub const CANVAS_EMPTY_HINT: &str = "Drag fields here to start";
/// Shown in the properties panel when nothing is selected.
pub const PROPERTIES_EMPTY: &str = "Select a field on the canvas to edit properties.";

/// One available field in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// Field name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Data type.
    pub data_type: DataType,
    /// Catalog icon of the data type.
    pub icon: &'static str,
    /// Whether this entry is the source of the current drag.
    pub dragging: bool,
}

/// One field row on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasEntry {
    /// Field identity.
    pub id: FieldId,
    /// Field name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Data type.
    pub data_type: DataType,
    /// Whether the field is required on this form.
    pub required: bool,
    /// Whether the row is selected.
    pub selected: bool,
    /// Whether the row is the source of the current drag.
    pub dragging: bool,
    /// Markup of the field's input, as the public form would show it.
    pub preview_html: String,
}

/// The drop indicator line, positioned relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorLine {
    /// Row the line is attached to.
    pub index: usize,
    /// Side of the row.
    pub edge: Edge,
    /// Distance from the top of the canvas.
    pub offset: f64,
}

/// Editable properties of the selected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesPanel {
    /// Field identity.
    pub field_id: FieldId,
    /// Data type.
    pub data_type: DataType,
    /// Current label.
    pub label: String,
    /// Current placeholder.
    pub placeholder: String,
    /// Current required flag.
    pub required: bool,
    /// Current dropdown choices.
    pub options: Vec<String>,
    /// Whether the options editor is shown (dropdown fields only).
    pub shows_options: bool,
}

/// The editor's panels.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorFrame {
    /// Name of the edited view.
    pub view_name: String,
    /// Whether a save is in flight.
    pub saving: bool,
    /// Available fields, in schema order.
    pub sidebar: Vec<SidebarEntry>,
    /// Fields on the form, in order.
    pub canvas: Vec<CanvasEntry>,
    /// The drop indicator, if a drag hovers a row.
    pub indicator: Option<IndicatorLine>,
    /// Properties of the selected field.
    pub properties: Option<PropertiesPanel>,
}

/// Everything the builder screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderFrame {
    /// The view is still loading.
    Loading,
    /// The view could not be loaded.
    Failed {
        /// Message shown in place of the editor.
        message: String,
    },
    /// The layout editor.
    Editor(EditorFrame),
}

/// Renders the builder's current state.
pub fn render(builder: &FormBuilder) -> BuilderFrame {
    let saving = match builder.phase() {
        Phase::Loading => return BuilderFrame::Loading,
        Phase::Failed(message) => {
            return BuilderFrame::Failed {
                message: message.clone(),
            }
        }
        Phase::Ready => false,
        Phase::Saving => true,
    };

    let sidebar = builder
        .available_fields()
        .into_iter()
        .map(|field| SidebarEntry {
            name: field.name.clone(),
            label: field.label.clone(),
            data_type: field.data_type,
            icon: icon_for(field.data_type),
            dragging: builder.is_dragging(&ElementKey::Sidebar(field.name.clone())),
        })
        .collect();

    let canvas = builder
        .fields()
        .iter()
        .map(|field| CanvasEntry {
            id: field.id.clone(),
            name: field.name.clone(),
            label: field.label.clone(),
            data_type: field.data_type,
            required: field.required,
            selected: builder.selected() == Some(&field.id),
            dragging: builder.is_dragging(&ElementKey::Canvas(field.id.clone())),
            preview_html: render_field(field, field.default.as_deref()),
        })
        .collect();

    let canvas_top = builder.canvas_rect().map_or(0.0, |rect| rect.top);
    let indicator = builder.indicator().map(|indicator| IndicatorLine {
        index: indicator.index,
        edge: indicator.edge,
        offset: indicator.line_y() - canvas_top,
    });

    let properties = builder.selected_field().map(|field| PropertiesPanel {
        field_id: field.id.clone(),
        data_type: field.data_type,
        label: field.label.clone(),
        placeholder: field.placeholder.clone().unwrap_or_default(),
        required: field.required,
        options: field.options.clone(),
        shows_options: field.data_type == DataType::Dropdown,
    });

    BuilderFrame::Editor(EditorFrame {
        view_name: builder.view().map(|v| v.name.clone()).unwrap_or_default(),
        saving,
        sidebar,
        canvas,
        indicator,
        properties,
    })
}

impl BuilderFrame {
    /// Renders the frame as HTML.
    pub fn to_html(&self) -> String {
        match self {
            Self::Loading => r#"<div class="builder builder-loading"><div class="spinner"></div></div>"#
                .to_string(),
            Self::Failed { message } => format!(
                r#"<div class="builder builder-failed"><p class="error">{}</p></div>"#,
                escape_html(message)
            ),
            Self::Editor(editor) => editor.to_html(),
        }
    }
}

impl EditorFrame {
    /// Renders the editor as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="builder">"#);
        let disabled = if self.saving { " disabled" } else { "" };
        let _ = write!(
            html,
            r#"<header><h1>{TITLE}</h1><p>{SUBTITLE}</p><button type="button" class="save"{disabled}>{SAVE_LABEL}</button></header>"#
        );

        html.push_str(r#"<aside class="sidebar"><h3>Available Fields</h3>"#);
        for entry in &self.sidebar {
            let dragging = if entry.dragging { " dragging" } else { "" };
            let _ = write!(
                html,
                r#"<div class="sidebar-field{dragging}" data-name="{}"><span class="icon icon-{}"></span><span class="label">{}</span><span class="type">{}</span></div>"#,
                escape_html(&entry.name),
                entry.icon,
                escape_html(&entry.label),
                entry.data_type
            );
        }
        if self.sidebar.is_empty() {
            let _ = write!(html, r#"<p class="empty">{SIDEBAR_EMPTY}</p>"#);
        }
        html.push_str("</aside>");

        html.push_str(r#"<main class="canvas">"#);
        if let Some(line) = &self.indicator {
            let _ = write!(
                html,
                r#"<div class="drop-indicator drop-indicator-{}" style="top: {}px"></div>"#,
                line.edge, line.offset
            );
        }
        if self.canvas.is_empty() {
            let _ = write!(
                html,
                r#"<div class="empty"><p class="title">{CANVAS_EMPTY_TITLE}</p><p>{CANVAS_EMPTY_HINT}</p></div>"#
            );
        }
        for entry in &self.canvas {
            let mut classes = String::from("canvas-field");
            if entry.selected {
                classes.push_str(" selected");
            }
            if entry.dragging {
                classes.push_str(" dragging");
            }
            let _ = write!(
                html,
                r#"<div class="{classes}" data-id="{}">{}</div>"#,
                escape_html(&entry.id.to_string()),
                entry.preview_html
            );
        }
        html.push_str("</main>");

        html.push_str(r#"<aside class="properties"><h3>Properties</h3>"#);
        match &self.properties {
            Some(panel) => html.push_str(&panel.to_html()),
            None => {
                let _ = write!(html, r#"<p class="empty">{PROPERTIES_EMPTY}</p>"#);
            }
        }
        html.push_str("</aside></div>");
        html
    }
}

impl PropertiesPanel {
    /// Renders the properties form as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<label>Label<input type="text" name="label" value="{}" /></label>"#,
            escape_html(&self.label)
        );
        let _ = write!(
            html,
            r#"<label>Placeholder<input type="text" name="placeholder" value="{}" /></label>"#,
            escape_html(&self.placeholder)
        );
        let checked = if self.required { " checked" } else { "" };
        let _ = write!(
            html,
            r#"<label><input type="checkbox" name="required"{checked} />Required</label>"#
        );
        if self.shows_options {
            let options: Vec<String> = self.options.iter().map(String::as_str).map(escape_html).collect();
            let _ = write!(
                html,
                r#"<label>Options<textarea name="options" rows="4">{}</textarea></label>"#,
                options.join("\n")
            );
        }
        html.push_str(r#"<button type="button" class="remove">Remove from Form</button>"#);
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(data_type: DataType) -> PropertiesPanel {
        PropertiesPanel {
            field_id: FieldId::Int(1),
            data_type,
            label: "Size".to_string(),
            placeholder: String::new(),
            required: true,
            options: vec!["S".to_string(), "M".to_string()],
            shows_options: data_type == DataType::Dropdown,
        }
    }

    #[test]
    fn test_blocking_screens() {
        assert!(BuilderFrame::Loading.to_html().contains("spinner"));
        let failed = BuilderFrame::Failed {
            message: "Failed to load form layout".to_string(),
        };
        assert!(failed.to_html().contains("Failed to load form layout"));
        assert!(!failed.to_html().contains(SAVE_LABEL));
    }

    #[test]
    fn test_properties_options_only_for_dropdown() {
        let html = panel(DataType::Dropdown).to_html();
        assert!(html.contains("S\nM"));
        assert!(html.contains(r#"name="required" checked"#));
        assert!(!panel(DataType::Text).to_html().contains("Options"));
    }

    #[test]
    fn test_empty_editor_messages() {
        let editor = EditorFrame {
            view_name: "Form".to_string(),
            saving: true,
            sidebar: Vec::new(),
            canvas: Vec::new(),
            indicator: None,
            properties: None,
        };
        let html = editor.to_html();
        assert!(html.contains(SIDEBAR_EMPTY));
        assert!(html.contains(CANVAS_EMPTY_HINT));
        assert!(html.contains(PROPERTIES_EMPTY));
        assert!(html.contains(r#"class="save" disabled"#));
    }
}
