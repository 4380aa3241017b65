use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Open set of product fields (`name`, `category`, `price`, and anything else the client sends).
pub type ProductFields = Map<String, JsonValue>;

/// Name of the store-owned identifier field.
pub const ID_FIELD: &str = "id";

/// A product record: a store-assigned `id` plus an open map of client-supplied fields.
///
/// On the wire the fields are flattened next to `id`:
/// `{"id": "ABC3D", "name": "Laptop", "category": "Electronics", "price": 999.99}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// Builds a product from client fields. Any `id` key in `fields` is dropped.
    pub fn new(id: String, mut fields: ProductFields) -> Self {
        fields.remove(ID_FIELD);
        Self { id, fields }
    }

    /// Shallow merge: supplied fields overwrite existing ones, the rest are kept.
    /// The identifier is never touched.
    pub fn merge(&mut self, fields: ProductFields) {
        for (key, value) in fields {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }
}
