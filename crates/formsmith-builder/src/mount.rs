//! Liveness of a builder screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tracks whether a builder screen is still mounted.
///
/// The handle is cheap to clone and can be moved to whichever task tears
/// the screen down. Responses that arrive after [`unmount`](Self::unmount)
/// are discarded by the builder.
#[derive(Debug, Clone)]
pub struct MountHandle {
    mounted: Arc<AtomicBool>,
}

impl Default for MountHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl MountHandle {
    /// Creates a handle in the mounted state.
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Returns `true` until the screen is unmounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Marks the screen as torn down. Idempotent.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}
