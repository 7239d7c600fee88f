//! The in-progress checkout draft and its validation state.
//!
//! Checkout is a two-step state machine: **delivery** (payment method +
//! address) and **contact** (email + phone). Each field write re-runs the
//! validator of the step owning that field; the error map is replaced
//! wholesale every pass. Validation outcomes are events, never `Err`s.

use crate::basket::BasketStore;
use crate::topics;
use crate::types::{
    AppBus, AppPayload, FormErrors, FormStep, OrderDraft, OrderField, OrderPayload,
    ValidationError,
};
use kiosk_core::ReactiveStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the order draft and form errors; computes the submission payload by
/// combining draft fields with basket-derived total and items.
///
/// Reads — never writes — the [`BasketStore`]. Publishes
/// [`topics::FORM_ERRORS_CHANGED`] on every validation pass,
/// [`topics::ORDER_READY`] / [`topics::CONTACTS_READY`] when a step
/// validates clean, and [`topics::ORDER_CLEARED`] on reset.
pub struct OrderStore {
    bus: Rc<AppBus>,
    basket: Rc<BasketStore>,
    draft: RefCell<OrderDraft>,
    errors: RefCell<FormErrors>,
}

impl OrderStore {
    /// Creates an empty draft on the given bus, reading totals from
    /// `basket`.
    #[must_use]
    pub fn new(bus: Rc<AppBus>, basket: Rc<BasketStore>) -> Self {
        Self::with_draft(OrderDraft::default(), bus, basket)
    }

    /// Creates a store from an initial draft, typically
    /// `OrderDraft::default()` with some fields overridden.
    #[must_use]
    pub const fn with_draft(draft: OrderDraft, bus: Rc<AppBus>, basket: Rc<BasketStore>) -> Self {
        Self {
            bus,
            basket,
            draft: RefCell::new(draft),
            errors: RefCell::new(FormErrors::new()),
        }
    }

    /// Writes one draft field from raw input, then re-validates the step
    /// that owns the field.
    ///
    /// The payment field parses the two supported literals; anything else
    /// leaves payment unset, which the delivery validator then reports as
    /// missing.
    pub fn set_field(&self, field: OrderField, value: &str) {
        {
            let mut draft = self.draft.borrow_mut();
            match field {
                OrderField::Payment => {
                    draft.payment = value.parse().ok();
                    if draft.payment.is_none() {
                        tracing::debug!(value, "payment literal did not parse; left unset");
                    }
                }
                OrderField::Address => draft.address = value.to_owned(),
                OrderField::Email => draft.email = value.to_owned(),
                OrderField::Phone => draft.phone = value.to_owned(),
            }
        }

        match field.step() {
            FormStep::Delivery => {
                if self.validate_delivery() {
                    self.notify(topics::ORDER_READY, &AppPayload::Order(self.order_payload()));
                }
            }
            FormStep::Contact => {
                if self.validate_contacts() {
                    self.notify(
                        topics::CONTACTS_READY,
                        &AppPayload::Order(self.order_payload()),
                    );
                }
            }
        }
    }

    /// Validates the delivery step (payment + address).
    ///
    /// Replaces the error map wholesale and publishes `formErrors:changed`
    /// regardless of outcome. Returns whether the step is clean.
    pub fn validate_delivery(&self) -> bool {
        let mut errors = FormErrors::new();
        {
            let draft = self.draft.borrow();
            if draft.payment.is_none() {
                errors.insert(OrderField::Payment, ValidationError::MissingPayment);
            }
            if draft.address.is_empty() {
                errors.insert(OrderField::Address, ValidationError::MissingAddress);
            }
        }
        self.replace_errors(errors)
    }

    /// Validates the contact step (email + phone).
    ///
    /// Replaces the error map wholesale and publishes `formErrors:changed`
    /// regardless of outcome. Returns whether the step is clean.
    pub fn validate_contacts(&self) -> bool {
        let mut errors = FormErrors::new();
        {
            let draft = self.draft.borrow();
            if draft.email.is_empty() {
                errors.insert(OrderField::Email, ValidationError::MissingEmail);
            } else if !email_shape_ok(&draft.email) {
                errors.insert(OrderField::Email, ValidationError::InvalidEmailFormat);
            }
            if draft.phone.is_empty() {
                errors.insert(OrderField::Phone, ValidationError::MissingPhone);
            }
        }
        self.replace_errors(errors)
    }

    /// Resets the draft and errors, then publishes `order:cleared` with the
    /// (now empty-fielded) live payload.
    pub fn clear_order(&self) {
        *self.draft.borrow_mut() = OrderDraft::default();
        self.errors.borrow_mut().clear();
        self.notify(topics::ORDER_CLEARED, &AppPayload::Order(self.order_payload()));
    }

    /// The draft merged with the basket's live total and item ids at call
    /// time — always recomputed, never a stale snapshot.
    #[must_use]
    pub fn order_payload(&self) -> OrderPayload {
        let draft = self.draft.borrow();
        OrderPayload {
            payment: draft.payment,
            address: draft.address.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            total: self.basket.total(),
            items: self.basket.item_ids(),
        }
    }

    /// The current error map (absent key = valid field).
    #[must_use]
    pub fn form_errors(&self) -> FormErrors {
        self.errors.borrow().clone()
    }

    /// A copy of the current draft.
    #[must_use]
    pub fn draft(&self) -> OrderDraft {
        self.draft.borrow().clone()
    }

    fn replace_errors(&self, errors: FormErrors) -> bool {
        let clean = errors.is_empty();
        *self.errors.borrow_mut() = errors.clone();
        self.notify(topics::FORM_ERRORS_CHANGED, &AppPayload::FormErrors(errors));
        clean
    }
}

impl ReactiveStore for OrderStore {
    type Payload = AppPayload;

    fn bus(&self) -> &Rc<AppBus> {
        &self.bus
    }
}

/// Structural `local@domain.tld` check: exactly one `@`, a dotted domain,
/// and no whitespace or further `@` anywhere.
fn email_shape_ok(value: &str) -> bool {
    let part_ok =
        |part: &str| !part.is_empty() && !part.contains('@') && !part.contains(char::is_whitespace);
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    part_ok(local) && part_ok(host) && part_ok(tld)
}
