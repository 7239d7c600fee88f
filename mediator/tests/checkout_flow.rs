//! Integration tests for the wired application: intents in, state-change
//! events out, collaborator at the boundary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use kiosk_mediator::{AppContext, DynShopApi, SubmitError};
use kiosk_stores::types::{AppPayload, OrderField, ProductId};
use kiosk_stores::topics;
use kiosk_testing::{fixtures, EventRecorder, MockShopApi};
use std::rc::Rc;

struct App {
    api: Rc<MockShopApi>,
    ctx: AppContext,
    recorder: EventRecorder,
}

fn app() -> App {
    kiosk_testing::init_tracing();
    let api = Rc::new(MockShopApi::new(fixtures::catalog()));
    let dyn_api: Rc<DynShopApi> = api.clone();
    let ctx = AppContext::new(dyn_api);
    ctx.wire();
    let recorder = EventRecorder::attach(&ctx.bus);
    App { api, ctx, recorder }
}

fn publish_field(ctx: &AppContext, field: OrderField, value: &str) {
    ctx.bus.publish(
        &topics::field_change(field),
        &AppPayload::Field {
            field,
            value: value.to_owned(),
        },
    );
}

#[tokio::test]
async fn load_catalog_populates_the_store_and_clears_loading() {
    let app = app();

    app.ctx.load_catalog().await.unwrap();

    assert_eq!(app.ctx.catalog.items().len(), 4);
    assert!(!app.ctx.catalog.is_loading());
    assert_eq!(app.recorder.count_of(topics::CATALOG_CHANGED), 1);
}

#[tokio::test]
async fn failed_catalog_fetch_leaves_the_store_unchanged() {
    let app = app();
    app.api.fail_fetches();

    assert!(app.ctx.load_catalog().await.is_err());

    assert!(app.ctx.catalog.items().is_empty());
    assert!(!app.ctx.catalog.is_loading());
    assert_eq!(app.recorder.count_of(topics::CATALOG_CHANGED), 0);
}

#[tokio::test]
async fn select_intent_resolves_and_previews_the_product() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();

    app.ctx.emit_intent(topics::CARD_SELECT, ProductId::new("p-1"));

    assert_eq!(app.ctx.catalog.preview_id(), Some(ProductId::new("p-1")));
    assert_eq!(app.recorder.count_of(topics::PREVIEW_CHANGED), 1);
}

#[tokio::test]
async fn select_intent_for_unknown_id_is_a_silent_no_op() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();

    app.ctx.emit_intent(topics::CARD_SELECT, ProductId::new("ghost"));

    assert_eq!(app.ctx.catalog.preview_id(), None);
    assert_eq!(app.recorder.count_of(topics::PREVIEW_CHANGED), 0);
}

#[tokio::test]
async fn add_intent_snapshots_the_product_and_refreshes_an_open_preview() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();
    app.ctx.emit_intent(topics::CARD_SELECT, ProductId::new("p-1"));

    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-1"));

    assert!(app.ctx.basket.contains(&ProductId::new("p-1")));
    // Once for the select, once re-published after the add.
    assert_eq!(app.recorder.count_of(topics::PREVIEW_CHANGED), 2);
}

#[tokio::test]
async fn add_intent_for_priceless_product_changes_nothing() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();

    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-4"));

    assert_eq!(app.ctx.basket.count(), 0);
    assert_eq!(app.recorder.count_of(topics::BASKET_CHANGED), 0);
}

#[tokio::test]
async fn remove_intent_drops_the_item() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();
    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-1"));

    app.ctx.emit_intent(topics::CARD_REMOVE, ProductId::new("p-1"));

    assert_eq!(app.ctx.basket.count(), 0);
    assert_eq!(app.recorder.count_of(topics::BASKET_CHANGED), 2);
}

#[tokio::test]
async fn field_change_events_reach_the_order_store_through_the_patterns() {
    let app = app();

    publish_field(&app.ctx, OrderField::Payment, "online");
    publish_field(&app.ctx, OrderField::Address, "ул. Пушкина, 1");
    publish_field(&app.ctx, OrderField::Email, "buyer@example.ru");
    publish_field(&app.ctx, OrderField::Phone, "+71234567890");

    let draft = app.ctx.order.draft();
    assert_eq!(draft.address, "ул. Пушкина, 1");
    assert_eq!(draft.email, "buyer@example.ru");
    assert_eq!(app.recorder.count_of(topics::ORDER_READY), 1);
    assert_eq!(app.recorder.count_of(topics::CONTACTS_READY), 1);
}

#[tokio::test]
async fn successful_submission_clears_basket_and_draft() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();
    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-1"));
    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-3"));
    publish_field(&app.ctx, OrderField::Payment, "cash");
    publish_field(&app.ctx, OrderField::Address, "ул. Пушкина, 1");
    publish_field(&app.ctx, OrderField::Email, "buyer@example.ru");
    publish_field(&app.ctx, OrderField::Phone, "+71234567890");

    let receipt = app.ctx.submit_order().await.unwrap();

    assert_eq!(receipt.total, 350);
    let submitted = app.api.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].total, 350);
    assert_eq!(
        submitted[0].items,
        vec![ProductId::new("p-1"), ProductId::new("p-3")]
    );
    assert_eq!(app.ctx.basket.count(), 0);
    assert_eq!(app.ctx.order.draft().address, "");
    assert_eq!(app.recorder.count_of(topics::ORDER_CLEARED), 1);
}

#[tokio::test]
async fn incomplete_delivery_step_refuses_submission() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();
    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-1"));

    let result = app.ctx.submit_order().await;

    assert!(matches!(result, Err(SubmitError::DeliveryIncomplete)));
    assert!(app.api.submitted().is_empty());
    assert_eq!(app.ctx.basket.count(), 1);
}

#[tokio::test]
async fn failed_submission_leaves_all_state_in_place() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();
    app.ctx.emit_intent(topics::CARD_ADD, ProductId::new("p-1"));
    publish_field(&app.ctx, OrderField::Payment, "online");
    publish_field(&app.ctx, OrderField::Address, "ул. Пушкина, 1");
    publish_field(&app.ctx, OrderField::Email, "buyer@example.ru");
    publish_field(&app.ctx, OrderField::Phone, "+71234567890");
    app.api.fail_submissions();

    let result = app.ctx.submit_order().await;

    assert!(matches!(result, Err(SubmitError::Api(_))));
    assert_eq!(app.ctx.basket.count(), 1);
    assert_eq!(app.ctx.order.draft().email, "buyer@example.ru");
    assert_eq!(app.recorder.count_of(topics::ORDER_CLEARED), 0);
}

#[tokio::test]
async fn preview_product_refreshes_from_the_server() {
    let app = app();
    app.ctx.load_catalog().await.unwrap();

    app.ctx.preview_product(&ProductId::new("p-2")).await.unwrap();
    assert_eq!(app.ctx.catalog.preview_id(), Some(ProductId::new("p-2")));

    app.api.fail_fetches();
    assert!(app.ctx.preview_product(&ProductId::new("p-3")).await.is_err());
    // Defensive continuation: the stale request leaves the preview alone.
    assert_eq!(app.ctx.catalog.preview_id(), Some(ProductId::new("p-2")));
}
