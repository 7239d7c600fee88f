//! A wildcard subscriber that captures every published event.

use kiosk_stores::types::{AppBus, AppPayload};
use kiosk_core::Selector;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every `(event name, payload)` pair published on a bus, in
/// dispatch order.
///
/// Attach it before the code under test runs, then assert on
/// [`names`](Self::names), [`count_of`](Self::count_of) or
/// [`last_payload`](Self::last_payload).
pub struct EventRecorder {
    seen: Rc<RefCell<Vec<(String, AppPayload)>>>,
}

impl EventRecorder {
    /// Subscribes a recording wildcard handler to `bus`.
    #[must_use]
    pub fn attach(bus: &Rc<AppBus>) -> Self {
        let seen: Rc<RefCell<Vec<(String, AppPayload)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(
            Selector::Any,
            Rc::new(move |name, payload: &AppPayload| {
                sink.borrow_mut().push((name.to_owned(), payload.clone()));
                Ok(())
            }),
        );
        Self { seen }
    }

    /// All recorded `(name, payload)` pairs, in dispatch order.
    #[must_use]
    pub fn events(&self) -> Vec<(String, AppPayload)> {
        self.seen.borrow().clone()
    }

    /// The recorded event names, in dispatch order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|(name, _)| name.clone()).collect()
    }

    /// How many times `name` was published.
    #[must_use]
    pub fn count_of(&self, name: &str) -> usize {
        self.seen.borrow().iter().filter(|(seen, _)| seen == name).count()
    }

    /// The payload of the most recent `name` event, if any.
    #[must_use]
    pub fn last_payload(&self, name: &str) -> Option<AppPayload> {
        self.seen
            .borrow()
            .iter()
            .rev()
            .find(|(seen, _)| seen == name)
            .map(|(_, payload)| payload.clone())
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}
