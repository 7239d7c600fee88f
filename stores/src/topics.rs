//! The event-name contract.
//!
//! Names follow a `namespace.field:verb` scheme. State-change events are
//! published by the stores; intent events are published by input glue and
//! consumed by the mediator wiring. Field-change events carry the field in
//! the name (`order.payment:change`) so they can be subscribed as a family
//! with a pattern selector.

use crate::types::OrderField;
use kiosk_core::Selector;

/// The catalog's product sequence was replaced.
pub const CATALOG_CHANGED: &str = "catalog:changed";

/// The previewed product changed (or the preview closed).
pub const PREVIEW_CHANGED: &str = "preview:changed";

/// The basket's item list changed (published even for no-op removals).
pub const BASKET_CHANGED: &str = "basket:changed";

/// The wholesale form-error map was recomputed.
pub const FORM_ERRORS_CHANGED: &str = "formErrors:changed";

/// The delivery step validated clean.
pub const ORDER_READY: &str = "order:ready";

/// The contact step validated clean.
pub const CONTACTS_READY: &str = "contacts:ready";

/// The order draft was reset.
pub const ORDER_CLEARED: &str = "order:cleared";

/// UI intent: a catalog card was selected for preview.
pub const CARD_SELECT: &str = "card:select";

/// UI intent: add the referenced product to the basket.
pub const CARD_ADD: &str = "card:add";

/// UI intent: remove the referenced product from the basket.
pub const CARD_REMOVE: &str = "card:remove";

/// Event name for a single field edit, e.g. `order.payment:change`.
#[must_use]
pub fn field_change(field: OrderField) -> String {
    format!("{}.{field}:change", field.step().namespace())
}

/// Selector matching every delivery-step field edit (`order.*:change`).
#[must_use]
pub fn delivery_changes() -> Selector {
    Selector::pattern("order.", ":change")
}

/// Selector matching every contact-step field edit (`contacts.*:change`).
#[must_use]
pub fn contact_changes() -> Selector {
    Selector::pattern("contacts.", ":change")
}
