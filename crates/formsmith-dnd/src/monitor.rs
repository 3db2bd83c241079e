//! The single-subscriber drag monitor.
//!
//! A [`DragMonitor`] delivers [`DragEvent`]s to at most one subscriber,
//! normally the builder screen. Subscribing returns a [`DragSubscription`]
//! that owns the receiving end of an unbounded channel; dropping it (or
//! calling [`DragSubscription::unsubscribe`]) detaches it, and a newer
//! subscription replaces an older one.
//!
//! ```
//! use formsmith_dnd::{DragEvent, DragMonitor};
//!
//! let monitor = DragMonitor::new();
//! let mut subscription = monitor.subscribe();
//! monitor.emit(DragEvent::Leave);
//! assert_eq!(subscription.drain(), vec![DragEvent::Leave]);
//!
//! subscription.unsubscribe();
//! assert!(!monitor.emit(DragEvent::Cancelled));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use crate::event::DragEvent;

type Slot = Arc<Mutex<Option<(u64, UnboundedSender<DragEvent>)>>>;

/// Broadcasts drag events to the current subscriber.
#[derive(Debug, Clone, Default)]
pub struct DragMonitor {
    slot: Slot,
    next_token: Arc<AtomicU64>,
}

impl DragMonitor {
    /// Creates a monitor with no subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes, replacing any existing subscriber.
    pub fn subscribe(&self) -> DragSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let previous = self
            .slot
            .lock()
            .expect("drag monitor lock poisoned")
            .replace((token, tx));
        if previous.is_some() {
            tracing::debug!("drag monitor subscriber replaced");
        }
        DragSubscription {
            token,
            rx,
            slot: Arc::clone(&self.slot),
        }
    }

    /// Returns `true` while a subscriber is attached.
    pub fn has_subscriber(&self) -> bool {
        self.slot
            .lock()
            .expect("drag monitor lock poisoned")
            .is_some()
    }

    /// Delivers an event to the subscriber.
    ///
    /// Returns `false` if nobody is subscribed.
    pub fn emit(&self, event: DragEvent) -> bool {
        let slot = self.slot.lock().expect("drag monitor lock poisoned");
        match slot.as_ref() {
            Some((_, tx)) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

/// The receiving end of a [`DragMonitor`] subscription.
#[derive(Debug)]
pub struct DragSubscription {
    token: u64,
    rx: UnboundedReceiver<DragEvent>,
    slot: Slot,
}

impl DragSubscription {
    /// Returns the next pending event without waiting.
    pub fn try_next(&mut self) -> Option<DragEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Returns every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<DragEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once this subscription has been replaced and its
    /// queue is empty.
    pub async fn recv(&mut self) -> Option<DragEvent> {
        self.rx.recv().await
    }

    /// Returns `true` while this subscription is the monitor's subscriber.
    pub fn is_active(&self) -> bool {
        self.slot
            .lock()
            .expect("drag monitor lock poisoned")
            .as_ref()
            .is_some_and(|(token, _)| *token == self.token)
    }

    /// Detaches from the monitor.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for DragSubscription {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.as_ref().is_some_and(|(token, _)| *token == self.token) {
                *slot = None;
            }
        }
    }
}
