//! The basket: unique-id-keyed product snapshots in insertion order.

use crate::topics;
use crate::types::{AppBus, AppPayload, BasketItem, Product, ProductId};
use kiosk_core::ReactiveStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Holds the set of products currently in the cart as add-time snapshots.
///
/// Keys are unique product ids; insertion order is display order. Re-adding
/// an id overwrites the snapshot in place — there is no quantity tracking,
/// `count` is the number of distinct items.
///
/// Publishes [`topics::BASKET_CHANGED`] with the ordered item list after
/// every mutation attempt except a priceless `add`, which is a silent no-op
/// by design.
pub struct BasketStore {
    bus: Rc<AppBus>,
    items: RefCell<Vec<BasketItem>>,
}

impl BasketStore {
    /// Creates an empty basket on the given bus.
    #[must_use]
    pub const fn new(bus: Rc<AppBus>) -> Self {
        Self {
            bus,
            items: RefCell::new(Vec::new()),
        }
    }

    /// Adds a snapshot of `product`, or overwrites the existing one in
    /// place.
    ///
    /// A priceless product never enters the basket: no state change, no
    /// event.
    pub fn add(&self, product: &Product) {
        let Some(price) = product.price else {
            tracing::debug!(id = %product.id, "ignoring priceless product");
            return;
        };
        let item = BasketItem {
            id: product.id.clone(),
            title: product.title.clone(),
            price,
        };
        {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        }
        self.publish_changed();
    }

    /// Removes the item with `id` if present.
    ///
    /// Publishes `basket:changed` unconditionally, even when the id was
    /// absent, so downstream views stay idempotent.
    pub fn remove(&self, id: &ProductId) {
        self.items.borrow_mut().retain(|item| &item.id != id);
        self.publish_changed();
    }

    /// Empties the basket and publishes `basket:changed` with an empty list.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.publish_changed();
    }

    /// Sum of all current item prices; `0` for an empty basket.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.borrow().iter().map(|item| item.price).sum()
    }

    /// Number of distinct items (not quantity-aware).
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether an item with `id` is in the basket.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.borrow().iter().any(|item| &item.id == id)
    }

    /// The items in display order.
    #[must_use]
    pub fn items(&self) -> Vec<BasketItem> {
        self.items.borrow().clone()
    }

    /// The item ids in display order, as the order payload wants them.
    #[must_use]
    pub fn item_ids(&self) -> Vec<ProductId> {
        self.items.borrow().iter().map(|item| item.id.clone()).collect()
    }

    fn publish_changed(&self) {
        let snapshot = self.items.borrow().clone();
        self.notify(topics::BASKET_CHANGED, &AppPayload::BasketItems(snapshot));
    }
}

impl ReactiveStore for BasketStore {
    type Payload = AppPayload;

    fn bus(&self) -> &Rc<AppBus> {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use kiosk_stores::topics;
    use kiosk_stores::types::{AppBus, AppPayload, ProductId};
    use kiosk_stores::BasketStore;
    use kiosk_testing::fixtures;
    use kiosk_testing::recorder::EventRecorder;
    use std::rc::Rc;

    fn store_with_recorder() -> (BasketStore, EventRecorder) {
        let bus = Rc::new(AppBus::new());
        let recorder = EventRecorder::attach(&bus);
        (BasketStore::new(bus), recorder)
    }

    #[test]
    fn priceless_product_never_enters_and_publishes_nothing() {
        let (store, recorder) = store_with_recorder();
        let a = fixtures::product("1", "Кружка", Some(100));
        let b = fixtures::product("2", "Бесценное", None);

        store.add(&a);
        store.add(&b);

        assert_eq!(store.items(), vec![fixtures::basket_item("1", "Кружка", 100)]);
        assert_eq!(store.total(), 100);
        assert_eq!(store.count(), 1);
        assert_eq!(recorder.count_of(topics::BASKET_CHANGED), 1);
    }

    #[test]
    fn re_add_overwrites_in_place_without_duplicating() {
        let (store, recorder) = store_with_recorder();
        store.add(&fixtures::product("1", "Кружка", Some(100)));
        store.add(&fixtures::product("2", "Плакат", Some(50)));

        // Same id, new snapshot: position and count stay put.
        store.add(&fixtures::product("1", "Кружка синяя", Some(120)));

        assert_eq!(
            store.items(),
            vec![
                fixtures::basket_item("1", "Кружка синяя", 120),
                fixtures::basket_item("2", "Плакат", 50),
            ]
        );
        assert_eq!(store.count(), 2);
        assert_eq!(recorder.count_of(topics::BASKET_CHANGED), 3);
    }

    #[test]
    fn remove_of_absent_id_still_publishes() {
        let (store, recorder) = store_with_recorder();
        store.add(&fixtures::product("1", "Кружка", Some(100)));

        store.remove(&ProductId::new("missing"));

        assert_eq!(store.count(), 1);
        assert_eq!(recorder.count_of(topics::BASKET_CHANGED), 2);
    }

    #[test]
    fn clear_publishes_an_empty_list() {
        let (store, recorder) = store_with_recorder();
        store.add(&fixtures::product("1", "Кружка", Some(100)));

        store.clear();

        assert_eq!(
            recorder.last_payload(topics::BASKET_CHANGED),
            Some(AppPayload::BasketItems(Vec::new()))
        );
        assert_eq!(store.total(), 0);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn contains_tracks_the_latest_published_keys() {
        let (store, recorder) = store_with_recorder();
        store.add(&fixtures::product("1", "Кружка", Some(100)));
        store.add(&fixtures::product("2", "Плакат", Some(50)));
        store.remove(&ProductId::new("1"));

        let Some(AppPayload::BasketItems(items)) = recorder.last_payload(topics::BASKET_CHANGED)
        else {
            panic!("expected basket payload");
        };
        let published: Vec<ProductId> = items.into_iter().map(|item| item.id).collect();

        assert!(!store.contains(&ProductId::new("1")));
        assert!(store.contains(&ProductId::new("2")));
        assert_eq!(published, store.item_ids());
    }

    #[test]
    fn totals_track_add_remove_clear_sequences() {
        let (store, _recorder) = store_with_recorder();
        store.add(&fixtures::product("1", "Кружка", Some(100)));
        store.add(&fixtures::product("2", "Плакат", Some(50)));
        assert_eq!(store.total(), 150);

        store.remove(&ProductId::new("1"));
        assert_eq!(store.total(), 50);

        store.clear();
        assert_eq!(store.total(), 0);
    }
}
