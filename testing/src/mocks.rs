//! Mock implementations of the collaborator traits.

use kiosk_core::{ApiError, ApiFuture, ShopApi};
use kiosk_stores::types::{OrderPayload, OrderReceipt, Product};
use std::cell::{Cell, RefCell};

/// A scriptable in-memory shop backend.
///
/// Serves a fixed product list, records every submitted order payload, and
/// can be told to fail fetches or submissions to exercise the defensive
/// paths.
pub struct MockShopApi {
    products: RefCell<Vec<Product>>,
    submitted: RefCell<Vec<OrderPayload>>,
    fail_fetch: Cell<bool>,
    fail_submit: Cell<bool>,
    next_order: Cell<u32>,
}

impl MockShopApi {
    /// A backend serving the given products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products: RefCell::new(products),
            submitted: RefCell::new(Vec::new()),
            fail_fetch: Cell::new(false),
            fail_submit: Cell::new(false),
            next_order: Cell::new(1),
        }
    }

    /// Makes every fetch fail with a transport error.
    pub fn fail_fetches(&self) {
        self.fail_fetch.set(true);
    }

    /// Makes every submission fail with a transport error.
    pub fn fail_submissions(&self) {
        self.fail_submit.set(true);
    }

    /// Every payload submitted so far, in order.
    #[must_use]
    pub fn submitted(&self) -> Vec<OrderPayload> {
        self.submitted.borrow().clone()
    }
}

impl ShopApi for MockShopApi {
    type Product = Product;
    type OrderPayload = OrderPayload;
    type Receipt = OrderReceipt;

    fn fetch_product_list(&self) -> ApiFuture<'_, Vec<Product>> {
        let result = if self.fail_fetch.get() {
            Err(ApiError::Transport("mock fetch failure".to_owned()))
        } else {
            Ok(self.products.borrow().clone())
        };
        Box::pin(async move { result })
    }

    fn fetch_product(&self, id: &str) -> ApiFuture<'_, Product> {
        let result = if self.fail_fetch.get() {
            Err(ApiError::Transport("mock fetch failure".to_owned()))
        } else {
            self.products
                .borrow()
                .iter()
                .find(|product| product.id.as_str() == id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(id.to_owned()))
        };
        Box::pin(async move { result })
    }

    fn submit_order(&self, payload: OrderPayload) -> ApiFuture<'_, OrderReceipt> {
        let result = if self.fail_submit.get() {
            Err(ApiError::Transport("mock submit failure".to_owned()))
        } else {
            let number = self.next_order.get();
            self.next_order.set(number + 1);
            let receipt = OrderReceipt {
                id: format!("order-{number}"),
                total: payload.total,
            };
            self.submitted.borrow_mut().push(payload);
            Ok(receipt)
        };
        Box::pin(async move { result })
    }
}
