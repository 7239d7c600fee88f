//! # Kiosk Stores
//!
//! The three reactive state stores of the storefront and the event contract
//! that mediates between them:
//!
//! - [`CatalogStore`] — the product list and the previewed selection
//! - [`BasketStore`] — unique-id-keyed product snapshots in display order
//! - [`OrderStore`] — the checkout draft, its two-step validation state,
//!   and the live-derived submission payload
//!
//! Stores communicate only through the bus (see [`topics`] for the
//! contract); the single documented exception is [`OrderStore`] *reading*
//! [`BasketStore`]'s derived totals. All payloads travel as one
//! [`AppPayload`] enum.
//!
//! ## Example
//!
//! ```
//! use kiosk_stores::{AppBus, BasketStore};
//! use kiosk_stores::types::{Category, Product, ProductId};
//! use std::rc::Rc;
//!
//! let bus = Rc::new(AppBus::new());
//! let basket = BasketStore::new(Rc::clone(&bus));
//!
//! basket.add(&Product {
//!     id: ProductId::new("p-1"),
//!     title: "Кружка".to_owned(),
//!     description: String::new(),
//!     image: String::new(),
//!     category: Category::Other,
//!     price: Some(100),
//! });
//! assert_eq!(basket.total(), 100);
//! ```

/// Domain types and the bus payload enum.
pub mod types;

/// The event-name contract.
pub mod topics;

/// The product catalog and preview selection.
pub mod catalog;

/// The basket of product snapshots.
pub mod basket;

/// The checkout draft and its validation.
pub mod order;

pub use basket::BasketStore;
pub use catalog::{CatalogState, CatalogStore};
pub use order::OrderStore;
pub use types::{
    AppBus, AppPayload, BasketItem, Category, FormErrors, FormStep, OrderDraft, OrderField,
    OrderPayload, OrderReceipt, PaymentMethod, Product, ProductId, ValidationError,
};
