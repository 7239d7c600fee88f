//! # Kiosk Testing
//!
//! Testing utilities for the Kiosk storefront core:
//!
//! - [`mocks::MockShopApi`] — a scriptable in-memory shop backend
//! - [`recorder::EventRecorder`] — a wildcard subscriber capturing every
//!   published event for assertions
//! - [`fixtures`] — product and basket-item builders
//!
//! ## Example
//!
//! ```
//! use kiosk_stores::{AppBus, BasketStore, topics};
//! use kiosk_testing::{fixtures, recorder::EventRecorder};
//! use std::rc::Rc;
//!
//! let bus = Rc::new(AppBus::new());
//! let recorder = EventRecorder::attach(&bus);
//! let basket = BasketStore::new(bus);
//!
//! basket.add(&fixtures::product("p-1", "Кружка", Some(100)));
//! assert_eq!(recorder.count_of(topics::BASKET_CHANGED), 1);
//! ```

/// Mock implementations of the collaborator traits.
pub mod mocks;

/// Event capture for assertions.
pub mod recorder;

/// Canned domain objects.
pub mod fixtures;

pub use mocks::MockShopApi;
pub use recorder::EventRecorder;

/// Initializes a compact tracing subscriber for a test, ignoring the error
/// when one is already installed.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
