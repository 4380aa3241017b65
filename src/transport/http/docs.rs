//! OpenAPI-only shapes. Products are open maps at runtime; these document the
//! fields clients are expected to send and receive.

use utoipa::ToSchema;

#[derive(ToSchema)]
#[schema(example = json!({
    "id": "ABC3D",
    "name": "Laptop",
    "category": "Electronics",
    "price": 999.99,
    "quantity": 50
}))]
#[allow(dead_code)]
pub struct Product {
    /// The auto-generated id of the product
    pub id: String,
    /// The product name
    pub name: String,
    /// The product category
    pub category: String,
    /// The product price
    pub price: f64,
}

/// Fields sent to create or update a product. Any `id` is ignored; unknown fields are kept.
#[derive(ToSchema)]
#[schema(example = json!({
    "name": "Laptop",
    "category": "Electronics",
    "price": 999.99
}))]
#[allow(dead_code)]
pub struct ProductInput {
    /// The product name
    pub name: Option<String>,
    /// The product category
    pub category: Option<String>,
    /// The product price
    pub price: Option<f64>,
}
