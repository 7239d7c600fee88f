//! Synchronous, single-process publish/subscribe dispatcher.
//!
//! The [`EventBus`] is the only channel through which the Kiosk stores talk
//! to the outside world: producers publish named events, consumers subscribe
//! with a [`Selector`] and never hold a reference to the producer.
//!
//! # Matching
//!
//! Event names follow a structured `namespace.field:verb` topic scheme
//! (`basket:changed`, `order.payment:change`). Selectors are a finite
//! enumeration rather than a general pattern engine:
//!
//! - [`Selector::Exact`] — the full event name
//! - [`Selector::Pattern`] — structural prefix + suffix comparison, covering
//!   families like `order.*:change`
//! - [`Selector::Any`] — every event
//!
//! # Dispatch semantics
//!
//! `publish` runs synchronously on the caller's stack and returns only after
//! every matching handler ran, in registration order. Handlers receive both
//! the event name and the payload, so `Any` subscribers can tell events
//! apart. The registry is snapshotted per publish: a handler that subscribes
//! during dispatch does not see the in-flight event, and one that
//! unsubscribes does not stop an already snapshotted sibling.
//!
//! A handler may itself call `publish`; the nested dispatch runs depth-first
//! to completion before the outer loop resumes. Nothing bounds that depth
//! except handler discipline — two handlers that publish each other's events
//! will recurse until the stack gives out. The bus logs a warning past
//! [`REENTRANCY_WARN_DEPTH`] but deliberately does not break the cycle.
//!
//! # Handler failures
//!
//! Each invocation runs in a guarded frame: a handler returning `Err` is
//! logged and skipped, and dispatch continues with the next handler, so one
//! failing subscriber cannot break sibling subscribers or the publisher.
//!
//! # Threading
//!
//! The bus is single-threaded by design (`Rc` handlers, `RefCell` registry).
//! Nothing here is `Send`; share the bus by cloning its `Rc`.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Reentrant publish depth past which the bus logs a warning.
///
/// Crossing it almost always means two handlers are publishing each other's
/// events. The bus keeps dispatching; breaking the cycle is the handler
/// author's job.
pub const REENTRANCY_WARN_DEPTH: usize = 32;

/// Outcome of a single handler invocation.
///
/// Handlers report failures as values instead of panicking; the bus logs the
/// error and keeps dispatching to siblings.
pub type HandlerResult = anyhow::Result<()>;

/// A subscribed event handler.
///
/// Receives the event name and a reference to the payload. Handlers are
/// compared by `Rc` identity for [`EventBus::unsubscribe`], so callers that
/// intend to unsubscribe later must keep the `Rc` they subscribed with.
pub type Handler<P> = Rc<dyn Fn(&str, &P) -> HandlerResult>;

/// Matching rule deciding which handlers receive a published event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Matches one event name exactly.
    Exact(String),
    /// Matches names that start with `prefix` and end with `suffix`,
    /// e.g. `prefix: "order.", suffix: ":change"` for `order.*:change`.
    Pattern {
        /// Required leading part of the event name.
        prefix: String,
        /// Required trailing part of the event name.
        suffix: String,
    },
    /// Matches every event (the universal wildcard).
    Any,
}

impl Selector {
    /// Selector for one exact event name.
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    /// Selector for a `prefix…suffix` family of event names.
    pub fn pattern(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Pattern {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Whether this selector matches the given event name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::Pattern { prefix, suffix } => {
                // The length check keeps prefix and suffix from overlapping
                // on short names.
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix.as_str())
                    && name.ends_with(suffix.as_str())
            }
            Self::Any => true,
        }
    }
}

struct Registration<P> {
    selector: Selector,
    handler: Handler<P>,
}

/// Synchronous publish/subscribe dispatcher over payloads of type `P`.
///
/// See the [module documentation](self) for matching and dispatch semantics.
///
/// # Example
///
/// ```
/// use kiosk_core::event_bus::{EventBus, Selector};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let bus: EventBus<u32> = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// bus.subscribe(
///     Selector::exact("basket:changed"),
///     Rc::new(move |_name, payload: &u32| {
///         sink.borrow_mut().push(*payload);
///         Ok(())
///     }),
/// );
///
/// bus.publish("basket:changed", &3);
/// assert_eq!(*seen.borrow(), vec![3]);
/// ```
pub struct EventBus<P> {
    registry: RefCell<Vec<Registration<P>>>,
    depth: Cell<usize>,
}

impl<P> EventBus<P> {
    /// Creates an empty bus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: RefCell::new(Vec::new()),
            depth: Cell::new(0),
        }
    }

    /// Registers `handler` under `selector`.
    ///
    /// Registrations are not deduplicated: subscribing the same handler to
    /// the same selector twice registers a second independent invocation.
    pub fn subscribe(&self, selector: Selector, handler: Handler<P>) {
        self.registry
            .borrow_mut()
            .push(Registration { selector, handler });
    }

    /// Removes the first registration matching both `selector` (structural
    /// equality) and `handler` (`Rc` identity). No-op if absent.
    pub fn unsubscribe(&self, selector: &Selector, handler: &Handler<P>) {
        let mut registry = self.registry.borrow_mut();
        if let Some(position) = registry
            .iter()
            .position(|reg| reg.selector == *selector && Rc::ptr_eq(&reg.handler, handler))
        {
            registry.remove(position);
        }
    }

    /// Dispatches `payload` to every handler whose selector matches `name`,
    /// in registration order, synchronously.
    ///
    /// An event nobody listens to is a deliberate no-op, never an error.
    /// Handler failures are logged per invocation and do not stop siblings.
    /// Handlers may publish further events; nested dispatch completes before
    /// this call returns.
    pub fn publish(&self, name: &str, payload: &P) {
        // Snapshot before invoking: handlers are free to mutate the registry
        // without invalidating this dispatch.
        let matched: SmallVec<[Handler<P>; 4]> = self
            .registry
            .borrow()
            .iter()
            .filter(|reg| reg.selector.matches(name))
            .map(|reg| Rc::clone(&reg.handler))
            .collect();

        if matched.is_empty() {
            return;
        }

        let depth = self.depth.get() + 1;
        self.depth.set(depth);
        if depth > REENTRANCY_WARN_DEPTH {
            tracing::warn!(event = name, depth, "deeply reentrant publish");
        }

        for handler in &matched {
            if let Err(error) = handler(name, payload) {
                tracing::error!(event = name, error = %error, "event handler failed");
            }
        }

        self.depth.set(depth - 1);
    }

    /// Number of live registrations, across all selectors.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().len()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("depth", &self.depth.get())
            .finish()
    }
}
