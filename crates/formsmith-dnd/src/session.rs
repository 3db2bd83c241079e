//! Drag sessions: registered elements and the gesture state machine.
//!
//! Elements are registered with a [`DragSession`] as drag sources, drop
//! targets, or both. Hosts report each element's bounding box with
//! [`DragSession::set_rect`] and feed pointer input through
//! [`start`](DragSession::start), [`pointer_move`](DragSession::pointer_move),
//! [`drop_at`](DragSession::drop_at) and [`cancel`](DragSession::cancel).
//! Results are delivered through the session's [`DragMonitor`].

use std::collections::BTreeMap;
use std::fmt;

use formsmith_core::{FormsmithError, FormsmithResult};

use crate::event::{DragEvent, DragPayload, DropEvent, DropIndicator, TargetData};
use crate::geometry::{closest_edge, Edge, Point, Rect};
use crate::monitor::{DragMonitor, DragSubscription};

/// Identifies an element registered with a [`DragSession`].
///
/// Ids increase with registration order; when targets overlap, the most
/// recently registered one is considered innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Drop target configuration of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Position of the row in the list, or `None` for a zone without rows.
    pub index: Option<usize>,
    /// Edges the pointer can be classified against.
    pub allowed_edges: Vec<Edge>,
}

impl DropTarget {
    /// A list row accepting drops on its top and bottom edges.
    pub fn row(index: usize) -> Self {
        Self {
            index: Some(index),
            allowed_edges: Edge::VERTICAL.to_vec(),
        }
    }

    /// A zone without rows, such as an empty canvas.
    pub const fn zone() -> Self {
        Self {
            index: None,
            allowed_edges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    source: Option<DragPayload>,
    target: Option<DropTarget>,
    rect: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hit {
    target: TargetData,
    indicator: Option<DropIndicator>,
}

#[derive(Debug)]
struct ActiveDrag {
    source: ElementId,
    payload: DragPayload,
    indicator: Option<DropIndicator>,
}

/// Registered elements plus the state of the current gesture, if any.
#[derive(Debug, Default)]
pub struct DragSession {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    active: Option<ActiveDrag>,
    monitor: DragMonitor,
}

impl DragSession {
    /// Creates a session with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's monitor.
    pub const fn monitor(&self) -> &DragMonitor {
        &self.monitor
    }

    /// Subscribes to this session's events, replacing any earlier subscriber.
    pub fn subscribe(&self) -> DragSubscription {
        self.monitor.subscribe()
    }

    // ── Registration ─────────────────────────────────────────────────

    fn register(&mut self, source: Option<DragPayload>, target: Option<DropTarget>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                source,
                target,
                rect: None,
            },
        );
        id
    }

    /// Registers a drag source.
    pub fn register_source(&mut self, payload: DragPayload) -> ElementId {
        self.register(Some(payload), None)
    }

    /// Registers a drop target.
    pub fn register_target(&mut self, target: DropTarget) -> ElementId {
        self.register(None, Some(target))
    }

    /// Registers an element that is both a drag source and a drop target.
    pub fn register_source_target(&mut self, payload: DragPayload, target: DropTarget) -> ElementId {
        self.register(Some(payload), Some(target))
    }

    /// Replaces the payload of a registered drag source.
    ///
    /// A gesture already in progress keeps the payload it captured.
    pub fn update_source(&mut self, id: ElementId, payload: DragPayload) -> FormsmithResult<()> {
        self.element_mut(id)?.source = Some(payload);
        Ok(())
    }

    /// Replaces the drop target configuration of an element.
    pub fn update_target(&mut self, id: ElementId, target: DropTarget) -> FormsmithResult<()> {
        self.element_mut(id)?.target = Some(target);
        Ok(())
    }

    /// Removes an element. Returns `false` if it was not registered.
    ///
    /// Unregistering the source of the current gesture does not end it.
    pub fn unregister(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    /// Records an element's bounding box. Returns `false` for unknown ids.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        element.rect = Some(rect);
        true
    }

    /// Returns an element's last reported bounding box.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).and_then(|element| element.rect)
    }

    /// Returns `true` if the element is registered.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Returns the number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements are registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element_mut(&mut self, id: ElementId) -> FormsmithResult<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or_else(|| FormsmithError::InvalidState(format!("{id} is not registered")))
    }

    // ── Gesture ──────────────────────────────────────────────────────

    /// Returns `true` while a gesture is in progress.
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns `true` if `id` is the source of the current gesture.
    pub fn is_dragging(&self, id: ElementId) -> bool {
        self.active.as_ref().is_some_and(|drag| drag.source == id)
    }

    /// Returns the payload captured by the current gesture.
    pub fn active_payload(&self) -> Option<&DragPayload> {
        self.active.as_ref().map(|drag| &drag.payload)
    }

    /// Returns the indicator currently shown, if any.
    pub fn indicator(&self) -> Option<DropIndicator> {
        self.active.as_ref().and_then(|drag| drag.indicator)
    }

    /// Starts dragging `source`, capturing its payload.
    pub fn start(&mut self, source: ElementId) -> FormsmithResult<()> {
        if self.active.is_some() {
            return Err(FormsmithError::InvalidState(
                "a drag is already in progress".to_string(),
            ));
        }
        let payload = self
            .elements
            .get(&source)
            .and_then(|element| element.source.clone())
            .ok_or_else(|| FormsmithError::InvalidState(format!("{source} is not a drag source")))?;
        tracing::debug!(%source, sidebar = payload.is_sidebar(), "drag started");
        self.monitor.emit(DragEvent::Started(payload.clone()));
        self.active = Some(ActiveDrag {
            source,
            payload,
            indicator: None,
        });
        Ok(())
    }

    /// Moves the pointer, emitting `Hover` or `Leave` when the indicator
    /// changes. Ignored while idle.
    pub fn pointer_move(&mut self, point: Point) {
        if self.active.is_none() {
            return;
        }
        let indicator = self.hit_test(point).and_then(|hit| hit.indicator);
        let Some(drag) = self.active.as_mut() else {
            return;
        };
        if drag.indicator == indicator {
            return;
        }
        let event = match indicator {
            Some(indicator) => DragEvent::Hover(indicator),
            None => DragEvent::Leave,
        };
        drag.indicator = indicator;
        self.monitor.emit(event);
    }

    /// Releases the pointer at `point`, ending the gesture.
    ///
    /// Emits `Drop` when a target is under the pointer and `Cancelled`
    /// otherwise. Returns the drop, if one happened.
    pub fn drop_at(&mut self, point: Point) -> Option<DropEvent> {
        let hit = self.hit_test(point);
        let drag = self.active.take()?;
        match hit {
            Some(hit) => {
                let event = DropEvent {
                    source: drag.payload,
                    target: hit.target,
                };
                tracing::debug!(
                    index = ?event.target.index,
                    edge = ?event.target.edge,
                    "drag dropped"
                );
                self.monitor.emit(DragEvent::Drop(event.clone()));
                Some(event)
            }
            None => {
                tracing::debug!("drag released outside every drop target");
                self.monitor.emit(DragEvent::Cancelled);
                None
            }
        }
    }

    /// Abandons the current gesture. Returns `false` while idle.
    pub fn cancel(&mut self) -> bool {
        if self.active.take().is_none() {
            return false;
        }
        tracing::debug!("drag cancelled");
        self.monitor.emit(DragEvent::Cancelled);
        true
    }

    /// Finds the innermost target containing `point`.
    fn hit_test(&self, point: Point) -> Option<Hit> {
        self.elements.values().rev().find_map(|element| {
            let target = element.target.as_ref()?;
            let rect = element.rect?;
            if !rect.contains(point) {
                return None;
            }
            let edge = closest_edge(&rect, point, &target.allowed_edges);
            let indicator = match (target.index, edge) {
                (Some(index), Some(edge)) => Some(DropIndicator { index, edge, rect }),
                _ => None,
            };
            Some(Hit {
                target: TargetData {
                    index: target.index,
                    edge,
                },
                indicator,
            })
        })
    }
}
