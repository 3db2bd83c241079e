//! # formsmith-dnd
//!
//! Drag-and-drop plumbing for the form builder, independent of any UI
//! toolkit. Hosts register elements with a [`DragSession`], report their
//! bounding boxes, and forward pointer input; the session classifies the
//! pointer against the closest edge of the innermost drop target and
//! reports the outcome through a single-subscriber [`DragMonitor`].
//!
//! ## Modules
//!
//! - [`geometry`] - Points, rectangles, edges, and closest-edge classification
//! - [`event`] - Drag payloads, drop events, and the drop indicator
//! - [`monitor`] - The single-subscriber event channel
//! - [`session`] - Element registration and the gesture state machine

pub mod event;
pub mod geometry;
pub mod monitor;
pub mod session;

pub use event::{DragEvent, DragPayload, DropEvent, DropIndicator, TargetData};
pub use geometry::{closest_edge, Edge, Point, Rect};
pub use monitor::{DragMonitor, DragSubscription};
pub use session::{DragSession, DropTarget, ElementId};
