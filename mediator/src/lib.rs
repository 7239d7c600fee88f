//! # Kiosk Mediator
//!
//! Wires the stores, the bus and the shop API into an application:
//!
//! - [`AppContext`] — explicit construction of the bus, the three stores
//!   and the injected API handle; no module-level singletons anywhere.
//! - [`AppContext::wire`] — subscribes the event-contract handlers that
//!   translate UI intents (`card:*`, `order.*:change`, `contacts.*:change`)
//!   into store method calls.
//! - The async flows [`AppContext::load_catalog`],
//!   [`AppContext::preview_product`] and [`AppContext::submit_order`] —
//!   the only places the core suspends. A collaborator failure is logged
//!   and leaves every store unchanged; there is no retry here.
//!
//! View glue stays outside: views subscribe their own re-render handlers to
//! the published state-change events and never appear in this crate.

use kiosk_core::{ApiError, Selector, ShopApi};
use kiosk_stores::types::{
    AppBus, AppPayload, OrderPayload, OrderReceipt, Product, ProductId,
};
use kiosk_stores::{topics, BasketStore, CatalogStore, OrderStore};
use std::rc::Rc;
use thiserror::Error;

/// The shop API fixed to the storefront's domain types.
pub type DynShopApi =
    dyn ShopApi<Product = Product, OrderPayload = OrderPayload, Receipt = OrderReceipt>;

/// Why an order submission was refused or failed.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The delivery step (payment + address) has unresolved errors.
    #[error("delivery step is incomplete")]
    DeliveryIncomplete,

    /// The contact step (email + phone) has unresolved errors.
    #[error("contact step is incomplete")]
    ContactsIncomplete,

    /// The collaborator rejected or never received the submission.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Explicitly constructed application context: one bus, three stores, one
/// injected collaborator.
///
/// Everything is reference-counted and single-threaded; clone the `Rc`s to
/// hand pieces to glue code.
pub struct AppContext {
    /// The shared event bus.
    pub bus: Rc<AppBus>,
    /// The injected shop backend.
    pub api: Rc<DynShopApi>,
    /// Product list + preview selection.
    pub catalog: Rc<CatalogStore>,
    /// Cart snapshots.
    pub basket: Rc<BasketStore>,
    /// Checkout draft + validation.
    pub order: Rc<OrderStore>,
}

impl AppContext {
    /// Builds the bus and the three stores around the given collaborator.
    #[must_use]
    pub fn new(api: Rc<DynShopApi>) -> Self {
        let bus = Rc::new(AppBus::new());
        let catalog = Rc::new(CatalogStore::new(Rc::clone(&bus)));
        let basket = Rc::new(BasketStore::new(Rc::clone(&bus)));
        let order = Rc::new(OrderStore::new(Rc::clone(&bus), Rc::clone(&basket)));
        Self {
            bus,
            api,
            catalog,
            basket,
            order,
        }
    }

    /// Subscribes the intent handlers of the event contract.
    ///
    /// Intents referencing an unknown product id are silent no-ops (logged
    /// at debug); an intent carrying the wrong payload shape is a glue
    /// programming error and surfaces through the bus's per-handler error
    /// isolation.
    pub fn wire(&self) {
        let order = Rc::clone(&self.order);
        self.bus.subscribe(
            topics::delivery_changes(),
            Rc::new(move |name, payload: &AppPayload| {
                let AppPayload::Field { field, value } = payload else {
                    anyhow::bail!("{name} published without a field payload");
                };
                order.set_field(*field, value);
                Ok(())
            }),
        );

        let order = Rc::clone(&self.order);
        self.bus.subscribe(
            topics::contact_changes(),
            Rc::new(move |name, payload: &AppPayload| {
                let AppPayload::Field { field, value } = payload else {
                    anyhow::bail!("{name} published without a field payload");
                };
                order.set_field(*field, value);
                Ok(())
            }),
        );

        let catalog = Rc::clone(&self.catalog);
        self.bus.subscribe(
            Selector::exact(topics::CARD_SELECT),
            Rc::new(move |name, payload: &AppPayload| {
                let AppPayload::ProductRef(id) = payload else {
                    anyhow::bail!("{name} published without a product reference");
                };
                match catalog.product(id) {
                    Some(product) => catalog.set_preview(Some(&product)),
                    None => tracing::debug!(%id, "select intent for unknown product"),
                }
                Ok(())
            }),
        );

        let catalog = Rc::clone(&self.catalog);
        let basket = Rc::clone(&self.basket);
        self.bus.subscribe(
            Selector::exact(topics::CARD_ADD),
            Rc::new(move |name, payload: &AppPayload| {
                let AppPayload::ProductRef(id) = payload else {
                    anyhow::bail!("{name} published without a product reference");
                };
                let Some(product) = catalog.product(id) else {
                    tracing::debug!(%id, "add intent for unknown product");
                    return Ok(());
                };
                basket.add(&product);
                // Keep an open preview of the same product in sync with its
                // new in-basket status.
                if catalog.preview_id().as_ref() == Some(id) {
                    catalog.set_preview(Some(&product));
                }
                Ok(())
            }),
        );

        let basket = Rc::clone(&self.basket);
        self.bus.subscribe(
            Selector::exact(topics::CARD_REMOVE),
            Rc::new(move |name, payload: &AppPayload| {
                let AppPayload::ProductRef(id) = payload else {
                    anyhow::bail!("{name} published without a product reference");
                };
                basket.remove(id);
                Ok(())
            }),
        );
    }

    /// Fetches the product list and populates the catalog.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's [`ApiError`]; the catalog is left
    /// unchanged (with `loading` cleared) when the fetch fails.
    pub async fn load_catalog(&self) -> Result<(), ApiError> {
        self.catalog.set_loading(true);
        let result = self.api.fetch_product_list().await;
        self.catalog.set_loading(false);
        match result {
            Ok(items) => {
                self.catalog.set_items(items);
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "catalog fetch failed");
                Err(error)
            }
        }
    }

    /// Refreshes one product from the server and shows it as the preview.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's [`ApiError`]; the preview is left
    /// unchanged when the fetch fails — a result that arrives after the
    /// user moved on simply shows the latest requested product.
    pub async fn preview_product(&self, id: &ProductId) -> Result<(), ApiError> {
        match self.api.fetch_product(id.as_str()).await {
            Ok(product) => {
                self.catalog.set_preview(Some(&product));
                Ok(())
            }
            Err(error) => {
                tracing::error!(%id, error = %error, "product fetch failed; preview unchanged");
                Err(error)
            }
        }
    }

    /// Validates both checkout steps, submits the live order payload, and —
    /// only on success — clears the basket and the draft.
    ///
    /// # Errors
    ///
    /// [`SubmitError::DeliveryIncomplete`] / [`SubmitError::ContactsIncomplete`]
    /// when a step has unresolved errors (the refreshed error maps go out
    /// as `formErrors:changed`), or [`SubmitError::Api`] when the
    /// collaborator fails — in which case every store keeps its state and
    /// no retry is attempted.
    pub async fn submit_order(&self) -> Result<OrderReceipt, SubmitError> {
        if !self.order.validate_delivery() {
            return Err(SubmitError::DeliveryIncomplete);
        }
        if !self.order.validate_contacts() {
            return Err(SubmitError::ContactsIncomplete);
        }

        let payload = self.order.order_payload();
        match self.api.submit_order(payload).await {
            Ok(receipt) => {
                self.basket.clear();
                self.order.clear_order();
                Ok(receipt)
            }
            Err(error) => {
                tracing::error!(error = %error, "order submission failed; state unchanged");
                Err(SubmitError::Api(error))
            }
        }
    }

    /// Publishes a UI intent on behalf of input glue.
    ///
    /// Thin convenience over `bus.publish`; views without a bus handle of
    /// their own can go through the context.
    pub fn emit_intent(&self, name: &str, id: ProductId) {
        self.bus.publish(name, &AppPayload::ProductRef(id));
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("bus", &self.bus)
            .field("basket_count", &self.basket.count())
            .finish_non_exhaustive()
    }
}
