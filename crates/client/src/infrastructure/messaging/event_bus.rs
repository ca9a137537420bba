//! Event bus for delivering session events to the controller loop.
//!
//! Push-based: subscribers register callbacks that are invoked when events
//! arrive. Dispatch is synchronous on the calling task, so events reach every
//! subscriber in transport delivery order with no batching or reordering.

use std::sync::{Arc, Mutex, PoisonError};

use crate::application::events::SessionEvent;

type Subscriber = Box<dyn FnMut(SessionEvent) + Send>;

/// Event bus for session events.
///
/// The bus holds strong references to subscribers, so they persist until
/// explicitly cleared or the bus is dropped.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    /// Create a new EventBus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events.
    ///
    /// The callback is invoked inline for every event the bridge dispatches.
    pub fn subscribe(&self, callback: impl FnMut(SessionEvent) + Send + 'static) {
        self.lock().push(Box::new(callback));
    }

    /// Dispatch an event to all subscribers, in subscription order.
    pub fn dispatch(&self, event: SessionEvent) {
        for subscriber in self.lock().iter_mut() {
            subscriber(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        // a poisoned lock only means a subscriber panicked; keep delivering
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
