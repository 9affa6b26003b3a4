//! Shared entity fixtures for unit tests.

use crate::models::{Brand, Product, ProductType};

pub(crate) fn brand(id: i32) -> Brand {
    Brand {
        id,
        name: format!("brand-{id}"),
    }
}

pub(crate) fn product_type(id: i32) -> ProductType {
    ProductType {
        id,
        name: format!("type-{id}"),
    }
}

pub(crate) fn product(id: i32, name: &str, price: f64, brand_id: i32, type_id: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        picture_url: String::new(),
        brand: brand(brand_id),
        product_type: product_type(type_id),
    }
}
