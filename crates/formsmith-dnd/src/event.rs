//! Drag payloads and the events a drag session emits.

use formsmith_schema::{Field, FieldId};

use crate::geometry::{Edge, Rect};

/// The data carried by a drag source, captured when the drag starts.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// A schema field dragged from the sidebar onto the canvas.
    SidebarField(Field),
    /// A field already on the canvas, dragged to a new position.
    CanvasField {
        /// Identity of the dragged field.
        field_id: FieldId,
    },
}

impl DragPayload {
    /// Returns `true` for sidebar payloads.
    pub const fn is_sidebar(&self) -> bool {
        matches!(self, Self::SidebarField(_))
    }
}

/// Where a drop landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetData {
    /// Position of the target row, or `None` for the empty-canvas zone.
    pub index: Option<usize>,
    /// The edge closest to the pointer, if the target allows edges.
    pub edge: Option<Edge>,
}

impl TargetData {
    /// A drop on the row at `index`, on `edge`.
    pub const fn row(index: usize, edge: Edge) -> Self {
        Self {
            index: Some(index),
            edge: Some(edge),
        }
    }

    /// A drop on the empty-canvas zone.
    pub const fn empty_zone() -> Self {
        Self {
            index: None,
            edge: None,
        }
    }
}

/// A completed drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DropEvent {
    /// The payload captured at drag start.
    pub source: DragPayload,
    /// The innermost target under the pointer at release.
    pub target: TargetData,
}

/// A transient marker showing where a drop would insert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIndicator {
    /// Position of the hovered row.
    pub index: usize,
    /// Which side of the row the line is drawn on.
    pub edge: Edge,
    /// The hovered row's bounding box.
    pub rect: Rect,
}

impl DropIndicator {
    /// Returns the y coordinate of the indicator line.
    pub fn line_y(&self) -> f64 {
        match self.edge {
            Edge::Top => self.rect.top,
            Edge::Bottom => self.rect.bottom(),
        }
    }
}

/// An event delivered to the drag monitor's subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// A drag gesture started with this payload.
    Started(DragPayload),
    /// The pointer moved over a row; emitted only when the indicator changes.
    Hover(DropIndicator),
    /// The pointer left every row.
    Leave,
    /// The gesture ended on a drop target.
    Drop(DropEvent),
    /// The gesture ended without a drop.
    Cancelled,
}
