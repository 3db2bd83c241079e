//! The form builder screen.
//!
//! [`FormBuilder`] owns the ordered field list of one form view and drives
//! everything that changes it: loading the view, drag gestures, property
//! edits, removal, and saving. It keeps a [`DragSession`] in sync with the
//! list so that every available field is a drag source, every canvas row is
//! a drag source and drop target, and an empty canvas is one drop zone.
//!
//! All transitions take `&mut self`; the only awaits are the two view
//! requests. A response that arrives after the screen was unmounted is
//! discarded without touching state.

use std::fmt;
use std::sync::Arc;

use formsmith_core::logging::builder_span;
use formsmith_core::{FormsmithError, FormsmithResult};
use formsmith_dnd::{
    DragEvent, DragPayload, DragSession, DragSubscription, DropEvent, DropIndicator, DropTarget,
    ElementId, Point, Rect,
};
use formsmith_layout::{available_fields, materialize, merge_into, reduce, serialize, validate_layout};
use formsmith_schema::{Field, FieldId, ObjectSchema, View, ViewLocator, ViewPatch, ViewType};
use tracing::Instrument;

use crate::api::ViewApi;
use crate::mount::MountHandle;
use crate::notify::{Notifier, Toast};
use crate::render::{self, BuilderFrame};

/// Toast shown when the view cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load form layout";
/// Toast shown after a successful save.
pub const SAVE_SUCCEEDED: &str = "Form saved successfully";
/// Toast shown when the save request fails.
pub const SAVE_FAILED: &str = "Failed to save form";

/// Lifecycle phase of the builder screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The view is being fetched.
    Loading,
    /// The layout can be edited.
    Ready,
    /// A save request is in flight.
    Saving,
    /// The view could not be loaded; nothing can be edited.
    Failed(String),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::Ready => f.write_str("ready"),
            Self::Saving => f.write_str("saving"),
            Self::Failed(message) => write!(f, "failed ({message})"),
        }
    }
}

/// A property change applied to the selected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Replace the display label.
    Label(String),
    /// Replace the placeholder text.
    Placeholder(String),
    /// Mark the field required on this form, or not.
    Required(bool),
    /// Replace the dropdown choices.
    Options(Vec<String>),
}

/// Names an element the builder registers with its drag session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKey {
    /// An available field in the sidebar, by name.
    Sidebar(String),
    /// A row on the canvas, by field id.
    Canvas(FieldId),
    /// The drop zone covering an empty canvas.
    EmptyZone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct VerticalLayout {
    row_height: f64,
    gap: f64,
}

#[derive(Debug, Default)]
struct Elements {
    sidebar: Vec<(String, ElementId)>,
    canvas: Vec<(FieldId, ElementId)>,
    empty_zone: Option<ElementId>,
}

/// The form builder for one view of one object.
pub struct FormBuilder {
    object: ObjectSchema,
    locator: ViewLocator,
    api: Arc<dyn ViewApi>,
    notifier: Arc<dyn Notifier>,
    phase: Phase,
    view: Option<View>,
    fields: Vec<Field>,
    selected: Option<FieldId>,
    indicator: Option<DropIndicator>,
    session: DragSession,
    subscription: Option<DragSubscription>,
    elements: Elements,
    canvas_rect: Option<Rect>,
    layout: Option<VerticalLayout>,
    mount: MountHandle,
    span: tracing::Span,
}

impl FormBuilder {
    /// Creates a builder for view `view_id` of `object`, in the
    /// [`Loading`](Phase::Loading) phase. Call [`load`](Self::load) next.
    pub fn new(
        object: ObjectSchema,
        view_id: impl fmt::Display,
        api: Arc<dyn ViewApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let locator = object.view_locator(view_id);
        let span = builder_span(&locator.app_id, &locator.object_id, &locator.view_id);
        let session = DragSession::new();
        let subscription = Some(session.subscribe());
        Self {
            object,
            locator,
            api,
            notifier,
            phase: Phase::Loading,
            view: None,
            fields: Vec::new(),
            selected: None,
            indicator: None,
            session,
            subscription,
            elements: Elements::default(),
            canvas_rect: None,
            layout: None,
            mount: MountHandle::new(),
            span,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Returns the object whose fields are being laid out.
    pub const fn object(&self) -> &ObjectSchema {
        &self.object
    }

    /// Returns the locator of the edited view.
    pub const fn locator(&self) -> &ViewLocator {
        &self.locator
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the view as last loaded or saved.
    pub const fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// Returns the ordered form field list.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the object fields not on the form, in schema order.
    pub fn available_fields(&self) -> Vec<&Field> {
        available_fields(&self.object.fields, &self.fields)
    }

    /// Returns the id of the selected field.
    pub const fn selected(&self) -> Option<&FieldId> {
        self.selected.as_ref()
    }

    /// Returns the selected field.
    pub fn selected_field(&self) -> Option<&Field> {
        let id = self.selected.as_ref()?;
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Returns the drop indicator currently shown.
    pub const fn indicator(&self) -> Option<&DropIndicator> {
        self.indicator.as_ref()
    }

    /// Returns the canvas bounding box, if reported.
    pub const fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Returns the drag session.
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    /// Returns a handle that can unmount the screen from another task.
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Returns `true` until the screen is unmounted.
    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Renders the screen.
    pub fn render(&self) -> BuilderFrame {
        render::render(self)
    }

    fn ensure_ready(&self) -> FormsmithResult<()> {
        if !self.mount.is_mounted() {
            return Err(FormsmithError::InvalidState(
                "form builder is unmounted".to_string(),
            ));
        }
        if self.phase != Phase::Ready {
            return Err(FormsmithError::InvalidState(format!(
                "form builder is {}",
                self.phase
            )));
        }
        Ok(())
    }

    // ── Loading and saving ───────────────────────────────────────────

    /// Fetches the view and materializes its layout.
    ///
    /// On failure the builder enters [`Phase::Failed`], shows an error toast,
    /// and returns the error.
    pub async fn load(&mut self) -> FormsmithResult<()> {
        self.phase = Phase::Loading;
        let result = self
            .api
            .get_view(&self.locator)
            .instrument(self.span.clone())
            .await;
        if !self.mount.is_mounted() {
            tracing::debug!(parent: &self.span, "discarding view response after unmount");
            return Ok(());
        }
        match result {
            Ok(view) => {
                if view.view_type != ViewType::Form {
                    tracing::warn!(parent: &self.span, view_type = ?view.view_type, "editing a non-form view");
                }
                self.fields = materialize(&view.config, &self.object.fields);
                self.view = Some(view);
                self.selected = None;
                self.indicator = None;
                self.phase = Phase::Ready;
                self.sync_elements();
                tracing::info!(
                    parent: &self.span,
                    fields = ?serialize(&self.fields),
                    "form layout loaded"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(parent: &self.span, error = %err, "failed to load form layout");
                self.phase = Phase::Failed(LOAD_FAILED.to_string());
                self.notifier.notify(Toast::error(LOAD_FAILED));
                Err(err)
            }
        }
    }

    /// Validates and persists the layout.
    ///
    /// A layout missing schema-required fields is rejected locally with an
    /// error toast naming them; no request is sent. The field list is never
    /// reset, whatever the outcome.
    pub async fn save(&mut self) -> FormsmithResult<()> {
        self.ensure_ready()?;
        if let Err(err) = validate_layout(&self.object.fields, &self.fields) {
            tracing::warn!(parent: &self.span, error = %err, "layout failed validation");
            self.notifier.notify(Toast::error(err.message.clone()));
            return Err(err.into());
        }
        let Some(view) = self.view.as_ref() else {
            return Err(FormsmithError::InvalidState("no view loaded".to_string()));
        };
        let patch = ViewPatch {
            config: merge_into(&view.config, &self.fields),
        };

        self.phase = Phase::Saving;
        let result = self
            .api
            .patch_view(&self.locator, &patch)
            .instrument(self.span.clone())
            .await;
        if !self.mount.is_mounted() {
            tracing::debug!(parent: &self.span, "discarding save response after unmount");
            return Ok(());
        }
        self.phase = Phase::Ready;
        match result {
            Ok(view) => {
                tracing::info!(parent: &self.span, fields = ?patch.config.fields, "form saved");
                self.view = Some(view);
                self.notifier.notify(Toast::success(SAVE_SUCCEEDED));
                Ok(())
            }
            Err(err) => {
                tracing::error!(parent: &self.span, error = %err, "failed to save form");
                self.notifier.notify(Toast::error(SAVE_FAILED));
                Err(err)
            }
        }
    }

    /// Marks the screen as torn down and detaches from the drag monitor.
    pub fn unmount(&mut self) {
        self.mount.unmount();
        self.session.cancel();
        self.subscription = None;
        self.indicator = None;
        tracing::debug!(parent: &self.span, "form builder unmounted");
    }

    // ── Drag input ───────────────────────────────────────────────────

    /// Starts dragging the element named by `key`.
    pub fn begin_drag(&mut self, key: &ElementKey) -> FormsmithResult<()> {
        self.ensure_ready()?;
        let id = self
            .element_id(key)
            .ok_or_else(|| FormsmithError::InvalidState(format!("no element for {key:?}")))?;
        self.session.start(id)?;
        self.process_events();
        Ok(())
    }

    /// Moves the pointer during a drag, updating the drop indicator.
    pub fn pointer_move(&mut self, point: Point) {
        self.session.pointer_move(point);
        self.process_events();
    }

    /// Releases the pointer. Returns `true` if the layout changed.
    pub fn release(&mut self, point: Point) -> bool {
        self.session.drop_at(point);
        self.process_events()
    }

    /// Abandons the current drag without changing the layout.
    pub fn cancel_drag(&mut self) {
        self.session.cancel();
        self.process_events();
    }

    /// Returns `true` if the element is the source of the current drag.
    pub fn is_dragging(&self, key: &ElementKey) -> bool {
        self.element_id(key)
            .is_some_and(|id| self.session.is_dragging(id))
    }

    fn process_events(&mut self) -> bool {
        if !self.mount.is_mounted() {
            self.subscription = None;
        }
        let Some(events) = self.subscription.as_mut().map(DragSubscription::drain) else {
            return false;
        };
        let mut changed = false;
        for event in events {
            match event {
                DragEvent::Hover(indicator) => self.indicator = Some(indicator),
                DragEvent::Started(_) | DragEvent::Leave | DragEvent::Cancelled => {
                    self.indicator = None;
                }
                DragEvent::Drop(drop) => changed |= self.apply_drop(&drop),
            }
        }
        changed
    }

    /// Applies a completed drop to the layout. Returns `true` if it changed.
    ///
    /// The indicator is cleared whatever the outcome. An inserted sidebar
    /// field becomes the selection.
    pub fn apply_drop(&mut self, event: &DropEvent) -> bool {
        self.indicator = None;
        if self.ensure_ready().is_err() {
            tracing::debug!(parent: &self.span, phase = %self.phase, "ignoring drop");
            return false;
        }
        let reduction = reduce(&self.fields, event);
        if !reduction.changed {
            return false;
        }
        self.fields = reduction.fields;
        if let Some(id) = reduction.selected {
            self.selected = Some(id);
        }
        self.sync_elements();
        tracing::info!(parent: &self.span, fields = ?serialize(&self.fields), "layout changed");
        true
    }

    // ── Selection and properties ─────────────────────────────────────

    /// Selects a canvas field. Returns `false` if it is not on the form.
    pub fn select(&mut self, id: &FieldId) -> bool {
        if self.fields.iter().any(|f| &f.id == id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Edits the selected field in place; the order is untouched.
    pub fn edit_selected(&mut self, edit: FieldEdit) -> FormsmithResult<()> {
        self.ensure_ready()?;
        let Some(id) = self.selected.clone() else {
            return Err(FormsmithError::InvalidState("no field selected".to_string()));
        };
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| FormsmithError::InvalidState(format!("field {id} is not on the form")))?;
        match edit {
            FieldEdit::Label(label) => field.label = label,
            FieldEdit::Placeholder(placeholder) => field.placeholder = Some(placeholder),
            FieldEdit::Required(required) => field.required = required,
            FieldEdit::Options(options) => field.options = options,
        }
        let name = field.name.clone();
        tracing::debug!(parent: &self.span, field = %name, "field properties edited");
        Ok(())
    }

    /// Removes the selected field from the form and clears the selection.
    ///
    /// The field returns to the sidebar with its schema properties.
    pub fn remove_selected(&mut self) -> Option<Field> {
        if self.ensure_ready().is_err() {
            return None;
        }
        let id = self.selected.take()?;
        let index = self.fields.iter().position(|f| f.id == id)?;
        let removed = self.fields.remove(index);
        self.sync_elements();
        tracing::info!(parent: &self.span, field = %removed.name, "field removed from form");
        Some(removed)
    }

    // ── Elements and geometry ────────────────────────────────────────

    /// Returns the drag session element registered for `key`.
    pub fn element_id(&self, key: &ElementKey) -> Option<ElementId> {
        match key {
            ElementKey::Sidebar(name) => self
                .elements
                .sidebar
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, id)| *id),
            ElementKey::Canvas(field_id) => self
                .elements
                .canvas
                .iter()
                .find(|(f, _)| f == field_id)
                .map(|(_, id)| *id),
            ElementKey::EmptyZone => self.elements.empty_zone,
        }
    }

    /// Reports an element's bounding box. Returns `false` for unknown keys.
    pub fn set_element_rect(&mut self, key: &ElementKey, rect: Rect) -> bool {
        self.element_id(key)
            .is_some_and(|id| self.session.set_rect(id, rect))
    }

    /// Reports the canvas bounding box.
    ///
    /// The empty-canvas zone covers it, and the drop indicator is positioned
    /// relative to its top.
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
        if let Some(zone) = self.elements.empty_zone {
            self.session.set_rect(zone, rect);
        }
        self.apply_layout();
    }

    /// Stacks canvas rows from the top of the canvas, `row_height` tall and
    /// `gap` apart, and keeps doing so after every layout change.
    pub fn layout_vertical(&mut self, row_height: f64, gap: f64) -> FormsmithResult<()> {
        if self.canvas_rect.is_none() {
            return Err(FormsmithError::InvalidState(
                "canvas bounds have not been reported".to_string(),
            ));
        }
        self.layout = Some(VerticalLayout { row_height, gap });
        self.apply_layout();
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn apply_layout(&mut self) {
        let (Some(canvas), Some(layout)) = (self.canvas_rect, self.layout) else {
            return;
        };
        for (index, field) in self.fields.iter().enumerate() {
            let Some((_, id)) = self.elements.canvas.iter().find(|(f, _)| f == &field.id) else {
                continue;
            };
            let top = canvas.top + index as f64 * (layout.row_height + layout.gap);
            self.session
                .set_rect(*id, Rect::new(canvas.left, top, canvas.width, layout.row_height));
        }
    }

    /// Registers, updates, and unregisters drag elements to match the list.
    fn sync_elements(&mut self) {
        let available: Vec<Field> = available_fields(&self.object.fields, &self.fields)
            .into_iter()
            .cloned()
            .collect();

        let session = &mut self.session;
        self.elements.sidebar.retain(|(name, id)| {
            let keep = available.iter().any(|f| &f.name == name);
            if !keep {
                session.unregister(*id);
            }
            keep
        });
        for field in available {
            if !self.elements.sidebar.iter().any(|(name, _)| name == &field.name) {
                let name = field.name.clone();
                let id = self.session.register_source(DragPayload::SidebarField(field));
                self.elements.sidebar.push((name, id));
            }
        }

        let placed: Vec<FieldId> = self.fields.iter().map(|f| f.id.clone()).collect();
        let session = &mut self.session;
        self.elements.canvas.retain(|(field_id, id)| {
            let keep = placed.contains(field_id);
            if !keep {
                session.unregister(*id);
            }
            keep
        });
        for (index, field_id) in placed.into_iter().enumerate() {
            let existing = self
                .elements
                .canvas
                .iter()
                .find(|(f, _)| f == &field_id)
                .map(|(_, id)| *id);
            match existing {
                Some(id) => {
                    if let Err(err) = self.session.update_target(id, DropTarget::row(index)) {
                        tracing::warn!(parent: &self.span, error = %err, "failed to update canvas row");
                    }
                }
                None => {
                    let id = self.session.register_source_target(
                        DragPayload::CanvasField {
                            field_id: field_id.clone(),
                        },
                        DropTarget::row(index),
                    );
                    self.elements.canvas.push((field_id, id));
                }
            }
        }

        match (self.fields.is_empty(), self.elements.empty_zone) {
            (true, None) => {
                let id = self.session.register_target(DropTarget::zone());
                if let Some(rect) = self.canvas_rect {
                    self.session.set_rect(id, rect);
                }
                self.elements.empty_zone = Some(id);
            }
            (false, Some(id)) => {
                self.session.unregister(id);
                self.elements.empty_zone = None;
            }
            _ => {}
        }

        self.apply_layout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryViewApi;
    use crate::notify::{ToastLevel, ToastQueue};
    use formsmith_dnd::{Edge, TargetData};
    use formsmith_schema::{DataType, ViewConfig};

    fn object() -> ObjectSchema {
        ObjectSchema::new(
            1,
            2,
            vec![
                Field::new(10, "name", "Name", DataType::Text).required(true),
                Field::new(11, "email", "Email", DataType::Email).required(true),
                Field::new(12, "phone", "Phone", DataType::Text),
            ],
        )
    }

    async fn loaded(fields: &[&str]) -> (FormBuilder, Arc<InMemoryViewApi>, ToastQueue) {
        let api = Arc::new(InMemoryViewApi::new().with_view(
            ViewLocator::new(1, 2, 5),
            View::form(5, "Form", ViewConfig::with_fields(fields.iter().copied())),
        ));
        let toasts = ToastQueue::new();
        let mut builder = FormBuilder::new(object(), 5, api.clone(), Arc::new(toasts.clone()));
        builder.load().await.unwrap();
        (builder, api, toasts)
    }

    fn names(builder: &FormBuilder) -> Vec<&str> {
        builder.fields().iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_load_materializes_layout() {
        let (builder, _, _) = loaded(&["email", "name"]).await;
        assert_eq!(builder.phase(), &Phase::Ready);
        assert_eq!(names(&builder), vec!["email", "name"]);
        let available: Vec<&str> = builder.available_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(available, vec!["phone"]);
        assert!(builder.element_id(&ElementKey::Sidebar("phone".into())).is_some());
        assert!(builder.element_id(&ElementKey::EmptyZone).is_none());
    }

    #[tokio::test]
    async fn test_load_failure_blocks_screen() {
        let toasts = ToastQueue::new();
        let mut builder = FormBuilder::new(
            object(),
            99,
            Arc::new(InMemoryViewApi::new()),
            Arc::new(toasts.clone()),
        );
        assert!(builder.load().await.is_err());
        assert_eq!(builder.phase(), &Phase::Failed(LOAD_FAILED.to_string()));
        assert_eq!(toasts.last(), Some(Toast::error(LOAD_FAILED)));
        assert!(builder.fields().is_empty());
        assert!(builder.begin_drag(&ElementKey::Sidebar("name".into())).is_err());
    }

    #[tokio::test]
    async fn test_apply_sidebar_drop_selects_field() {
        let (mut builder, _, _) = loaded(&["name", "email"]).await;
        let phone = builder.object().field_by_name("phone").unwrap().clone();
        let changed = builder.apply_drop(&DropEvent {
            source: DragPayload::SidebarField(phone),
            target: TargetData::row(1, Edge::Top),
        });
        assert!(changed);
        assert_eq!(names(&builder), vec!["name", "phone", "email"]);
        assert_eq!(builder.selected(), Some(&FieldId::Int(12)));
        assert!(builder.element_id(&ElementKey::Sidebar("phone".into())).is_none());
        assert!(builder.element_id(&ElementKey::Canvas(FieldId::Int(12))).is_some());
    }

    #[tokio::test]
    async fn test_edit_selected_keeps_order() {
        let (mut builder, _, _) = loaded(&["name", "email", "phone"]).await;
        assert!(matches!(
            builder.edit_selected(FieldEdit::Label("x".into())),
            Err(FormsmithError::InvalidState(_))
        ));
        assert!(builder.select(&FieldId::Int(11)));
        builder
            .edit_selected(FieldEdit::Label("Work email".into()))
            .unwrap();
        builder
            .edit_selected(FieldEdit::Placeholder("you@work".into()))
            .unwrap();
        builder.edit_selected(FieldEdit::Required(false)).unwrap();
        assert_eq!(names(&builder), vec!["name", "email", "phone"]);
        let email = builder.selected_field().unwrap();
        assert_eq!(email.label, "Work email");
        assert_eq!(email.placeholder.as_deref(), Some("you@work"));
        assert!(!email.required);
    }

    #[tokio::test]
    async fn test_remove_selected_returns_field_to_sidebar() {
        let (mut builder, _, _) = loaded(&["name", "email", "phone"]).await;
        assert!(builder.remove_selected().is_none());
        builder.select(&FieldId::Int(12));
        let removed = builder.remove_selected().unwrap();
        assert_eq!(removed.name, "phone");
        assert!(builder.selected().is_none());
        assert!(builder.element_id(&ElementKey::Sidebar("phone".into())).is_some());
        assert!(!builder.select(&FieldId::Int(12)));
    }

    #[tokio::test]
    async fn test_empty_zone_follows_list() {
        let (mut builder, _, _) = loaded(&["phone"]).await;
        assert!(builder.element_id(&ElementKey::EmptyZone).is_none());
        builder.select(&FieldId::Int(12));
        builder.remove_selected();
        assert!(builder.element_id(&ElementKey::EmptyZone).is_some());
    }

    #[tokio::test]
    async fn test_save_blocked_by_missing_required() {
        let (mut builder, api, toasts) = loaded(&["name"]).await;
        let err = builder.save().await.unwrap_err();
        assert!(matches!(err, FormsmithError::ValidationError(ref v) if v.code == "missing_required"));
        assert_eq!(api.patch_count(), 0);
        let toast = toasts.last().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.contains("Email"));
        assert_eq!(builder.phase(), &Phase::Ready);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_layout() {
        let (mut builder, api, toasts) = loaded(&["email", "name"]).await;
        api.fail_with_status(500, "boom");
        assert!(builder.save().await.is_err());
        assert_eq!(builder.phase(), &Phase::Ready);
        assert_eq!(names(&builder), vec!["email", "name"]);
        assert_eq!(toasts.last(), Some(Toast::error(SAVE_FAILED)));
    }

    #[tokio::test]
    async fn test_unmount_ignores_late_load() {
        let api = Arc::new(
            InMemoryViewApi::new()
                .with_view(ViewLocator::new(1, 2, 5), View::form(5, "Form", ViewConfig::default())),
        );
        api.set_latency(std::time::Duration::from_millis(50));
        let toasts = ToastQueue::new();
        let mut builder = FormBuilder::new(object(), 5, api, Arc::new(toasts.clone()));
        let handle = builder.mount_handle();

        let (result, ()) = tokio::join!(builder.load(), async move {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            handle.unmount();
        });
        assert!(result.is_ok());
        assert_eq!(builder.phase(), &Phase::Loading);
        assert!(builder.fields().is_empty());
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_unmount_ignores_late_save() {
        let (mut builder, api, toasts) = loaded(&["email", "name"]).await;
        let moved = builder.apply_drop(&DropEvent {
            source: DragPayload::CanvasField {
                field_id: FieldId::Int(11),
            },
            target: TargetData::row(1, Edge::Bottom),
        });
        assert!(moved);
        api.set_latency(std::time::Duration::from_millis(50));
        let handle = builder.mount_handle();

        let (result, ()) = tokio::join!(builder.save(), async move {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            handle.unmount();
        });
        assert!(result.is_ok());
        assert_eq!(api.patch_count(), 1);
        assert_eq!(builder.phase(), &Phase::Saving);
        assert_eq!(builder.view().unwrap().config.fields, vec!["email", "name"]);
        assert!(toasts.is_empty());
    }
}
