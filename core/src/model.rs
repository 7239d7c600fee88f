//! The shared discipline for reactive state stores.
//!
//! A store owns one slice of application state and announces every change by
//! publishing an event — nothing else. Stores never call each other's
//! mutators; the only documented exception is a store *reading* another
//! store's derived values (the order store reads basket totals).

use crate::event_bus::EventBus;
use std::rc::Rc;

/// A state store that announces its changes over the shared [`EventBus`].
///
/// Not independently useful; implementors get [`notify`](Self::notify), the
/// only sanctioned way a store communicates a state change outward.
/// Construction is the store's own business, but by convention each store
/// takes the bus `Rc` plus an initial state value (state types implement
/// `Default`, so "partial" initial state is just a value with some fields
/// overridden).
///
/// Implementors keep interior state behind `RefCell` and must drop every
/// borrow before calling `notify`: dispatch is synchronous and reentrant, so
/// a subscriber may legitimately read the store back while the notification
/// is still on the stack.
pub trait ReactiveStore {
    /// Payload type carried by the bus this store publishes to.
    type Payload;

    /// The bus this store announces changes on.
    fn bus(&self) -> &Rc<EventBus<Self::Payload>>;

    /// Publishes a state-change event.
    fn notify(&self, event: &str, payload: &Self::Payload) {
        self.bus().publish(event, payload);
    }
}
