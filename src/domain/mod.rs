//! Domain types for the product collection.

pub mod ids;
pub mod product;

pub use ids::{IdGenerator, RandomIdGenerator, PRODUCT_ID_LEN};
pub use product::{Product, ProductFields, ID_FIELD};
