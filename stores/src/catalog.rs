//! The product catalog and the "currently previewed" selection.

use crate::topics;
use crate::types::{AppBus, AppPayload, Product, ProductId};
use kiosk_core::ReactiveStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Catalog state: the ordered product sequence and an optional preview id.
///
/// The preview id is a weak reference — lookup only, not ownership. It may
/// go stale when the catalog is replaced; resolution then yields `None`.
#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    /// Ordered product sequence, as fetched.
    pub items: Vec<Product>,
    /// Id of the product currently shown in the preview, if any.
    pub preview: Option<ProductId>,
    /// Whether a catalog fetch is in flight.
    pub loading: bool,
}

/// Holds the product list and the previewed selection; populated once after
/// the shop API resolves.
///
/// Publishes [`topics::CATALOG_CHANGED`] and [`topics::PREVIEW_CHANGED`].
pub struct CatalogStore {
    bus: Rc<AppBus>,
    state: RefCell<CatalogState>,
}

impl CatalogStore {
    /// Creates an empty catalog on the given bus.
    #[must_use]
    pub fn new(bus: Rc<AppBus>) -> Self {
        Self::with_state(CatalogState::default(), bus)
    }

    /// Creates a catalog from an initial state, typically
    /// `CatalogState::default()` with some fields overridden.
    #[must_use]
    pub const fn with_state(state: CatalogState, bus: Rc<AppBus>) -> Self {
        Self {
            bus,
            state: RefCell::new(state),
        }
    }

    /// Replaces the product sequence and publishes `catalog:changed` with
    /// the new sequence.
    pub fn set_items(&self, items: Vec<Product>) {
        let snapshot = items.clone();
        self.state.borrow_mut().items = items;
        self.notify(topics::CATALOG_CHANGED, &AppPayload::Products(snapshot));
    }

    /// Looks a product up by id; `None` when absent, never a panic.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// The current product sequence.
    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.state.borrow().items.clone()
    }

    /// Sets or clears the preview reference and publishes `preview:changed`
    /// with the product, or `None` for "close the preview" (not an error).
    pub fn set_preview(&self, product: Option<&Product>) {
        let resolved = product.cloned();
        self.state.borrow_mut().preview = resolved.as_ref().map(|p| p.id.clone());
        self.notify(topics::PREVIEW_CHANGED, &AppPayload::Preview(resolved));
    }

    /// Resolves the stored preview id back to a live product; `None` if
    /// cleared, or stale after a catalog replacement.
    #[must_use]
    pub fn preview(&self) -> Option<Product> {
        let id = self.state.borrow().preview.clone()?;
        self.product(&id)
    }

    /// The raw preview id, without resolving it.
    #[must_use]
    pub fn preview_id(&self) -> Option<ProductId> {
        self.state.borrow().preview.clone()
    }

    /// Marks a catalog fetch as in flight (or finished).
    pub fn set_loading(&self, loading: bool) {
        self.state.borrow_mut().loading = loading;
    }

    /// Whether a catalog fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }
}

impl ReactiveStore for CatalogStore {
    type Payload = AppPayload;

    fn bus(&self) -> &Rc<AppBus> {
        &self.bus
    }
}
