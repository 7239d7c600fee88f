//! The external shop API collaborator, at its boundary only.
//!
//! The core never performs transport itself: product lists, product detail
//! and order submission arrive through an injected [`ShopApi`]
//! implementation. Nothing here assumes HTTP, retries or headers — a failed
//! call surfaces as an [`ApiError`], is logged at the call site, and leaves
//! store state unchanged.
//!
//! # Dyn compatibility
//!
//! The trait returns explicit `Pin<Box<dyn Future>>` instead of `async fn`
//! so callers can hold an `Rc<dyn ShopApi<…>>`. The futures are deliberately
//! *not* `Send`: the whole core runs on a single logical thread
//! (see the crate documentation), and implementations are free to capture
//! `Rc` state.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors surfaced by the shop API collaborator.
///
/// Collaborator failures are expected and non-fatal: callers log them and
/// leave state untouched. Retry policy belongs to the implementation, not
/// the core.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The transport layer failed (connection refused, timeout, …).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered, but with something the client cannot use.
    #[error("unexpected response: {0}")]
    BadResponse(String),

    /// The requested product does not exist on the server.
    #[error("product not found: {0}")]
    NotFound(String),
}

/// Future returned by [`ShopApi`] operations.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + 'a>>;

/// Injected interface to the shop backend.
///
/// Generic over the domain types so this crate stays free of them; the
/// stores crate fixes `Product`, `OrderPayload` and `Receipt` to its own
/// types.
pub trait ShopApi {
    /// A product as the server describes it.
    type Product;
    /// The order submission body.
    type OrderPayload;
    /// The server's acknowledgement of a submitted order.
    type Receipt;

    /// Fetches the full product list.
    fn fetch_product_list(&self) -> ApiFuture<'_, Vec<Self::Product>>;

    /// Fetches one product by its server-assigned id.
    fn fetch_product(&self, id: &str) -> ApiFuture<'_, Self::Product>;

    /// Submits an order and returns the server's receipt.
    fn submit_order(&self, payload: Self::OrderPayload) -> ApiFuture<'_, Self::Receipt>;
}
