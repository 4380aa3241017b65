//! The record store: the canonical in-memory product collection, kept in step
//! with a durable copy on every mutation.
//!
//! The durable copy is a single JSON document of the form `{"products": [...]}`,
//! read whole on load and rewritten whole on each write. Other top-level keys in
//! the document are carried along untouched.

use crate::domain::{Product, ProductFields};
use crate::error::{StoreError, StoreResult};
use crate::storage::medium::DurableMedium;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

#[derive(Deserialize)]
struct StoreDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(flatten)]
    rest: Map<String, JsonValue>,
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    products: &'a [Product],
    #[serde(flatten)]
    rest: &'a Map<String, JsonValue>,
}

pub struct RecordStore {
    products: Vec<Product>,
    /// Top-level document keys other than `products`.
    rest: Map<String, JsonValue>,
    medium: Box<dyn DurableMedium>,
}

impl RecordStore {
    /// Reads the durable document into memory, or writes an empty one if none exists.
    pub fn load<M: DurableMedium + 'static>(medium: M) -> StoreResult<Self> {
        let location = medium.location();
        let unavailable = |reason: String| StoreError::StorageUnavailable {
            location: location.clone(),
            reason,
        };

        let existing = medium.read().map_err(|e| unavailable(e.to_string()))?;

        let doc = match existing {
            Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
                let doc: StoreDocument = serde_json::from_slice(&bytes)
                    .map_err(|e| unavailable(format!("invalid products document: {}", e)))?;
                check_ids(&doc.products).map_err(unavailable)?;
                doc
            }
            _ => {
                let store = Self {
                    products: Vec::new(),
                    rest: Map::new(),
                    medium: Box::new(medium),
                };
                store
                    .persist(&store.products)
                    .map_err(|e| unavailable(e.to_string()))?;
                tracing::info!(location = %location, "initialized empty products document");
                return Ok(store);
            }
        };

        tracing::info!(location = %location, count = doc.products.len(), "loaded products");
        Ok(Self {
            products: doc.products,
            rest: doc.rest,
            medium: Box::new(medium),
        })
    }

    /// Full ordered collection.
    pub fn snapshot(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn location(&self) -> String {
        self.medium.location()
    }

    /// Appends and persists. On a failed write the product is taken back out.
    pub fn append(&mut self, product: Product) -> StoreResult<()> {
        self.products.push(product);
        if let Err(e) = self.persist(&self.products) {
            self.products.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Shallow-merges `fields` into the product with `id` and persists.
    ///
    /// Returns `Ok(None)` without writing when no product has that id.
    pub fn merge_fields(&mut self, id: &str, fields: ProductFields) -> StoreResult<Option<Product>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };

        let previous = self.products[idx].clone();
        self.products[idx].merge(fields);
        if let Err(e) = self.persist(&self.products) {
            self.products[idx] = previous;
            return Err(e);
        }
        Ok(Some(self.products[idx].clone()))
    }

    /// Removes the first product with `id`, then persists whether or not anything was removed.
    ///
    /// Returns whether a product was removed.
    pub fn remove_by_id(&mut self, id: &str) -> StoreResult<bool> {
        let removed = self.position(id).map(|idx| (idx, self.products.remove(idx)));
        if let Err(e) = self.persist(&self.products) {
            if let Some((idx, product)) = removed {
                self.products.insert(idx, product);
            }
            return Err(e);
        }
        Ok(removed.is_some())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn persist(&self, products: &[Product]) -> StoreResult<()> {
        let failure = |reason: String| StoreError::PersistenceFailure {
            location: self.medium.location(),
            reason,
        };
        let bytes = serde_json::to_vec_pretty(&StoreDocumentRef {
            products,
            rest: &self.rest,
        })
            .map_err(|e| failure(e.to_string()))?;
        self.medium.write(&bytes).map_err(|e| {
            tracing::error!(location = %self.medium.location(), error = %e, "failed to persist products");
            failure(e.to_string())
        })
    }
}

fn check_ids(products: &[Product]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(products.len());
    for (idx, product) in products.iter().enumerate() {
        if product.id.is_empty() {
            return Err(format!("product at index {} has an empty id", idx));
        }
        if !seen.insert(product.id.as_str()) {
            return Err(format!("duplicate product id '{}'", product.id));
        }
    }
    Ok(())
}
