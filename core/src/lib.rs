//! # Kiosk Core
//!
//! Core abstractions for the Kiosk event-mediated storefront: the
//! synchronous [`EventBus`], the [`ReactiveStore`] discipline that every
//! state store follows, and the [`ShopApi`] collaborator boundary.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   intents    ┌───────────────────┐
//! │ UI glue  ├─────────────►│     EventBus      │
//! └──────────┘              └───┬───────────▲───┘
//!       ▲                      │           │
//!       │ state-change events  │ dispatch  │ notify
//!       │                  ┌───▼───────────┴───┐
//!       └──────────────────┤  Reactive stores  │
//!                          │ catalog / basket  │
//!                          │    order draft    │
//!                          └─────────┬─────────┘
//!                                    │ injected futures
//!                              ┌─────▼─────┐
//!                              │  ShopApi  │
//!                              └───────────┘
//! ```
//!
//! ## Concurrency model
//!
//! Single logical thread, cooperative, no preemption. Store mutation and bus
//! dispatch happen synchronously on the caller's stack; the only suspension
//! points are the [`ShopApi`] futures, and the bus stays fully responsive
//! while one is pending. Nothing is shared across real parallelism, so the
//! crate uses `Rc`/`RefCell` instead of locks and none of its types are
//! `Send`.

/// Publish/subscribe dispatch with exact, pattern and wildcard selectors.
pub mod event_bus;

/// The notify discipline shared by all state stores.
pub mod model;

/// The external shop API boundary.
pub mod api;

pub use api::{ApiError, ApiFuture, ShopApi};
pub use event_bus::{EventBus, Handler, HandlerResult, Selector};
pub use model::ReactiveStore;
