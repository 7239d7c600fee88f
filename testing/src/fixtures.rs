//! Canned domain objects for tests.

use kiosk_stores::types::{BasketItem, Category, Product, ProductId};

/// A product with the given id, title and price; remaining fields are
/// filler.
#[must_use]
pub fn product(id: &str, title: &str, price: Option<u64>) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        description: format!("Описание товара «{title}»"),
        image: format!("/images/{id}.png"),
        category: Category::Other,
        price,
    }
}

/// A basket snapshot with the given id, title and price.
#[must_use]
pub fn basket_item(id: &str, title: &str, price: u64) -> BasketItem {
    BasketItem {
        id: ProductId::new(id),
        title: title.to_owned(),
        price,
    }
}

/// A small catalog: three priced products and one priceless.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product("p-1", "Кружка", Some(100)),
        product("p-2", "Плакат", Some(50)),
        product("p-3", "Футболка", Some(250)),
        product("p-4", "Бесценный лот", None),
    ]
}
