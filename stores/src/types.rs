//! Domain types for the storefront: products, basket snapshots, the order
//! draft and its validation state, and the payload enum the event bus
//! carries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Server-assigned product identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a raw server id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product categories supported by the shop.
///
/// Serialized with the server's literal names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// `софт-скил`
    #[serde(rename = "софт-скил")]
    SoftSkill,
    /// `хард-скил`
    #[serde(rename = "хард-скил")]
    HardSkill,
    /// `другое`
    #[serde(rename = "другое")]
    Other,
    /// `дополнительное`
    #[serde(rename = "дополнительное")]
    Additional,
    /// `кнопка`
    #[serde(rename = "кнопка")]
    Button,
}

/// A catalog product, immutable once fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned unique id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Category literal.
    pub category: Category,
    /// Price in synapses; `None` is the "priceless" sentinel.
    pub price: Option<u64>,
}

impl Product {
    /// Whether this product carries the "priceless" sentinel.
    ///
    /// Priceless products can never enter the basket.
    #[must_use]
    pub const fn is_priceless(&self) -> bool {
        self.price.is_none()
    }
}

/// Display-relevant snapshot of a product taken at add-to-basket time,
/// insulated from later catalog mutation.
///
/// The price is a plain integer: the type itself guarantees a priceless
/// product can never be a basket item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    /// Id of the snapshotted product.
    pub id: ProductId,
    /// Title at add time.
    pub title: String,
    /// Price at add time, in synapses.
    pub price: u64,
}

/// The two supported payment methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay online at submission time.
    Online,
    /// Pay cash on delivery.
    Cash,
}

/// Error for a payment literal that is neither `online` nor `cash`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "online" => Ok(Self::Online),
            "cash" => Ok(Self::Cash),
            other => Err(UnknownPaymentMethod(other.to_owned())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Cash => write!(f, "cash"),
        }
    }
}

/// The two logical checkout steps, each validated independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStep {
    /// Payment method + delivery address.
    Delivery,
    /// Email + phone.
    Contact,
}

impl FormStep {
    /// Topic namespace for this step's field-change events.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Delivery => "order",
            Self::Contact => "contacts",
        }
    }
}

/// A field of the order draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderField {
    /// Payment method (delivery step).
    Payment,
    /// Delivery address (delivery step).
    Address,
    /// Buyer email (contact step).
    Email,
    /// Buyer phone (contact step).
    Phone,
}

impl OrderField {
    /// The checkout step that owns this field.
    #[must_use]
    pub const fn step(self) -> FormStep {
        match self {
            Self::Payment | Self::Address => FormStep::Delivery,
            Self::Email | Self::Phone => FormStep::Contact,
        }
    }
}

impl std::fmt::Display for OrderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        };
        write!(f, "{name}")
    }
}

/// Error for a field name that is not part of the order draft.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown order field: {0}")]
pub struct UnknownOrderField(pub String);

impl FromStr for OrderField {
    type Err = UnknownOrderField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "payment" => Ok(Self::Payment),
            "address" => Ok(Self::Address),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(UnknownOrderField(other.to_owned())),
        }
    }
}

/// A violated form constraint, surfaced through `formErrors:changed` —
/// never thrown.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// No payment method selected.
    #[error("a payment method must be selected")]
    MissingPayment,

    /// Delivery address is empty.
    #[error("a delivery address is required")]
    MissingAddress,

    /// Email is empty.
    #[error("an email address is required")]
    MissingEmail,

    /// Email is non-empty but not shaped like `local@domain.tld`.
    #[error("the email address is not valid")]
    InvalidEmailFormat,

    /// Phone is empty.
    #[error("a phone number is required")]
    MissingPhone,
}

/// Validation state of the order draft: absent key = valid field.
///
/// Recomputed wholesale on every validation pass, never merged
/// incrementally.
pub type FormErrors = BTreeMap<OrderField, ValidationError>;

/// The in-progress checkout draft, mutated field by field as the user types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Selected payment method, if any.
    pub payment: Option<PaymentMethod>,
    /// Delivery address.
    pub address: String,
    /// Buyer email.
    pub email: String,
    /// Buyer phone.
    pub phone: String,
}

/// The order as submitted to the server: draft fields merged with the
/// basket's live total and item ids at the moment of computation.
///
/// Always recomputed on demand, never cached — it cannot desynchronize from
/// basket mutations between validation and submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    /// Selected payment method.
    pub payment: Option<PaymentMethod>,
    /// Delivery address.
    pub address: String,
    /// Buyer email.
    pub email: String,
    /// Buyer phone.
    pub phone: String,
    /// Basket total at computation time.
    pub total: u64,
    /// Basket item ids at computation time.
    pub items: Vec<ProductId>,
}

/// The server's acknowledgement of a submitted order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    /// Server-assigned order id.
    pub id: String,
    /// Total the server charged.
    pub total: u64,
}

/// Every payload that travels over the application bus.
///
/// One enum rather than per-event types: the bus is generic over a single
/// payload type, and wildcard subscribers need a uniform view.
#[derive(Clone, Debug, PartialEq)]
pub enum AppPayload {
    /// Ordered product sequence (`catalog:changed`).
    Products(Vec<Product>),
    /// Resolved preview product, or `None` for "close the preview"
    /// (`preview:changed`).
    Preview(Option<Product>),
    /// Ordered basket items (`basket:changed`).
    BasketItems(Vec<BasketItem>),
    /// Wholesale validation state (`formErrors:changed`).
    FormErrors(FormErrors),
    /// Live order payload (`order:ready`, `contacts:ready`, `order:cleared`).
    Order(OrderPayload),
    /// A single form-field edit (`order.*:change`, `contacts.*:change`).
    Field {
        /// The edited field.
        field: OrderField,
        /// The raw input value.
        value: String,
    },
    /// A product referenced by a UI intent (`card:select`, `card:add`,
    /// `card:remove`).
    ProductRef(ProductId),
}

/// The application bus, fixed to [`AppPayload`].
pub type AppBus = kiosk_core::EventBus<AppPayload>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;

    #[test]
    fn category_literals_round_trip_through_serde() {
        let json = r#""софт-скил""#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category, Category::SoftSkill);
        assert_eq!(serde_json::to_string(&category).unwrap(), json);
    }

    #[test]
    fn product_deserializes_priceless_sentinel() {
        let json = r#"{
            "id": "p-1",
            "title": "Бесценный товар",
            "description": "",
            "image": "/img/p-1.png",
            "category": "кнопка",
            "price": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_priceless());
    }

    #[test]
    fn payment_method_parses_only_the_two_literals() {
        assert_eq!("online".parse::<PaymentMethod>().unwrap(), PaymentMethod::Online);
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn order_field_parses_its_wire_names() {
        assert_eq!("payment".parse::<OrderField>().unwrap(), OrderField::Payment);
        assert_eq!("phone".parse::<OrderField>().unwrap(), OrderField::Phone);
        assert_eq!(
            "quantity".parse::<OrderField>(),
            Err(UnknownOrderField("quantity".to_owned()))
        );
    }

    #[test]
    fn order_fields_map_to_their_steps() {
        assert_eq!(OrderField::Payment.step(), FormStep::Delivery);
        assert_eq!(OrderField::Address.step(), FormStep::Delivery);
        assert_eq!(OrderField::Email.step(), FormStep::Contact);
        assert_eq!(OrderField::Phone.step(), FormStep::Contact);
    }

    #[test]
    fn order_payload_serializes_payment_literal() {
        let payload = OrderPayload {
            payment: Some(PaymentMethod::Online),
            address: "ул. Пушкина".to_owned(),
            email: "a@b.ru".to_owned(),
            phone: "+71234567890".to_owned(),
            total: 100,
            items: vec![ProductId::new("p-1")],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["payment"], "online");
        assert_eq!(json["items"][0], "p-1");
    }
}
