//! Applying drops to the ordered field list.
//!
//! A drop resolves to a position in two steps. [`insertion_index`] turns the
//! target row and edge into a slot counted in the list *before* anything is
//! removed. When the dragged field is already on the canvas it is removed
//! first, and [`compensate`] shifts the slot down by one if the removal
//! happened above it.
//!
//! ```
//! use formsmith_layout::reducer::{compensate, insertion_index};
//! use formsmith_dnd::Edge;
//!
//! // [A, B, C]: drag A onto the bottom of C.
//! let slot = insertion_index(2, Some(Edge::Bottom));
//! assert_eq!(slot, 3);
//! assert_eq!(compensate(0, slot), 2); // -> [B, C, A]
//! ```

use formsmith_dnd::{DragPayload, DropEvent, Edge};
use formsmith_schema::{Field, FieldId};

/// The result of applying a drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// The new ordered list.
    pub fields: Vec<Field>,
    /// A field to select, set when a sidebar field was inserted.
    pub selected: Option<FieldId>,
    /// Whether `fields` differs from the input.
    pub changed: bool,
}

impl Reduction {
    fn unchanged(fields: &[Field]) -> Self {
        Self {
            fields: fields.to_vec(),
            selected: None,
            changed: false,
        }
    }
}

/// Returns the slot a drop on row `target_index` inserts at.
///
/// `Top` inserts before the row, `Bottom` after it; a missing edge is
/// treated as `Top`.
pub const fn insertion_index(target_index: usize, edge: Option<Edge>) -> usize {
    match edge {
        Some(Edge::Bottom) => target_index + 1,
        Some(Edge::Top) | None => target_index,
    }
}

/// Adjusts `insertion` for the removal of the element at `old_index`.
pub const fn compensate(old_index: usize, insertion: usize) -> usize {
    if old_index < insertion {
        insertion - 1
    } else {
        insertion
    }
}

/// Applies a completed drop to `fields`.
///
/// - A sidebar field is appended when the drop has no target row, or
///   inserted at the resolved slot (clamped to the list length). It becomes
///   the selection. A field whose name is already placed is ignored.
/// - A canvas field is moved to the resolved slot. Unknown ids and drops
///   without a target row are ignored.
pub fn reduce(fields: &[Field], event: &DropEvent) -> Reduction {
    match &event.source {
        DragPayload::SidebarField(field) => {
            if fields.iter().any(|f| f.name == field.name) {
                tracing::debug!(field = %field.name, "field already on the form");
                return Reduction::unchanged(fields);
            }
            let mut next = fields.to_vec();
            let slot = event.target.index.map_or(next.len(), |index| {
                insertion_index(index, event.target.edge).min(next.len())
            });
            next.insert(slot, field.clone());
            Reduction {
                fields: next,
                selected: Some(field.id.clone()),
                changed: true,
            }
        }
        DragPayload::CanvasField { field_id } => {
            let Some(old_index) = fields.iter().position(|f| &f.id == field_id) else {
                tracing::debug!(field = %field_id, "dragged field is no longer on the form");
                return Reduction::unchanged(fields);
            };
            let Some(index) = event.target.index else {
                return Reduction::unchanged(fields);
            };
            let slot = compensate(old_index, insertion_index(index, event.target.edge))
                .min(fields.len() - 1);
            if slot == old_index {
                return Reduction::unchanged(fields);
            }
            let mut next = fields.to_vec();
            let moved = next.remove(old_index);
            next.insert(slot, moved);
            Reduction {
                fields: next,
                selected: None,
                changed: true,
            }
        }
    }
}
