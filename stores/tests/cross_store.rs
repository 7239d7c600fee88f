//! Cross-store consistency: the order payload can never desynchronize from
//! the basket, because it is derived live at read time.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use kiosk_stores::types::{AppBus, AppPayload, OrderField, ProductId};
use kiosk_stores::{topics, BasketStore, OrderStore};
use kiosk_testing::{fixtures, EventRecorder};
use std::rc::Rc;

struct World {
    basket: Rc<BasketStore>,
    order: OrderStore,
    recorder: EventRecorder,
}

fn world() -> World {
    let bus = Rc::new(AppBus::new());
    let recorder = EventRecorder::attach(&bus);
    let basket = Rc::new(BasketStore::new(Rc::clone(&bus)));
    let order = OrderStore::new(bus, Rc::clone(&basket));
    World {
        basket,
        order,
        recorder,
    }
}

#[test]
fn priceless_product_reaches_neither_basket_nor_payload() {
    let w = world();
    let priced = fixtures::product("1", "Кружка", Some(100));
    let priceless = fixtures::product("2", "Бесценное", None);

    w.basket.add(&priced);
    w.basket.add(&priceless);

    let payload = w.order.order_payload();
    assert_eq!(payload.total, 100);
    assert_eq!(payload.items, vec![ProductId::new("1")]);
    assert_eq!(w.recorder.count_of(topics::BASKET_CHANGED), 1);
}

#[test]
fn order_ready_payload_reflects_basket_mutations_after_validation() {
    let w = world();
    w.basket.add(&fixtures::product("1", "Кружка", Some(100)));
    w.order.set_field(OrderField::Payment, "online");
    w.order.set_field(OrderField::Address, "ул. Пушкина, 1");

    let Some(AppPayload::Order(at_ready)) = w.recorder.last_payload(topics::ORDER_READY) else {
        panic!("expected an order payload");
    };
    assert_eq!(at_ready.total, 100);

    // Mutating the basket after the ready event: the next payload read is
    // already up to date, no stale snapshot anywhere.
    w.basket.add(&fixtures::product("2", "Плакат", Some(50)));
    assert_eq!(w.order.order_payload().total, 150);
}

#[test]
fn cleared_order_and_cleared_basket_agree_on_an_empty_payload() {
    let w = world();
    w.basket.add(&fixtures::product("1", "Кружка", Some(100)));
    w.order.set_field(OrderField::Email, "buyer@example.ru");

    w.basket.clear();
    w.order.clear_order();

    let payload = w.order.order_payload();
    assert!(payload.items.is_empty());
    assert_eq!(payload.total, w.basket.total());
    assert_eq!(payload.total, 0);
    assert!(payload.email.is_empty());
}
