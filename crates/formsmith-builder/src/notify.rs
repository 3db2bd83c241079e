//! User-facing notifications ("toasts").
//!
//! The builder reports outcomes through a [`Notifier`]. [`ToastQueue`]
//! collects them in memory so hosts can render them and tests can inspect
//! them.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    /// An operation succeeded.
    Success,
    /// An operation failed.
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A one-shot notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Toast {
    /// Creates a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Delivers toasts to the user.
pub trait Notifier: Send + Sync {
    /// Shows a toast.
    fn notify(&self, toast: Toast);
}

/// An in-memory [`Notifier`] that queues every toast.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the queued toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().expect("toast queue lock poisoned").clone()
    }

    /// Returns the most recent toast.
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .expect("toast queue lock poisoned")
            .last()
            .cloned()
    }

    /// Removes and returns every queued toast.
    pub fn take(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().expect("toast queue lock poisoned"))
    }

    /// Returns the number of queued toasts.
    pub fn len(&self) -> usize {
        self.toasts.lock().expect("toast queue lock poisoned").len()
    }

    /// Returns `true` if no toast is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        tracing::debug!(level = %toast.level, message = %toast.message, "toast");
        self.toasts.lock().expect("toast queue lock poisoned").push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_collects_and_takes() {
        let queue = ToastQueue::new();
        let shared = queue.clone();
        shared.notify(Toast::success("Form saved successfully"));
        shared.notify(Toast::error("Failed to save form"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.last(), Some(Toast::error("Failed to save form")));
        let taken = queue.take();
        assert_eq!(taken[0].level, ToastLevel::Success);
        assert!(queue.is_empty());
    }
}
