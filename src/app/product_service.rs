//! The Product Service.
//!
//! This module sits between the HTTP handlers and the record store.
//! It is responsible for:
//! 1.  Assigning a fresh short identifier to every created product.
//! 2.  Translating list/get/create/update/delete into store lookups and mutations.
//! 3.  Reporting absent products as `StoreError::NotFound` for get and update.

use crate::domain::{IdGenerator, Product, ProductFields, RandomIdGenerator};
use crate::error::{StoreError, StoreResult};
use crate::storage::{JsonFileMedium, MemoryMedium, RecordStore};
use std::path::Path;

/// How many fresh ids to draw before giving up on finding an unused one.
pub const MAX_ID_ATTEMPTS: usize = 16;

pub struct ProductService {
    store: RecordStore,
    id_generator: Box<dyn IdGenerator>,
}

impl ProductService {
    pub fn new(store: RecordStore) -> Self {
        Self::with_id_generator(store, RandomIdGenerator::default())
    }

    pub fn with_id_generator<G: IdGenerator + 'static>(store: RecordStore, id_generator: G) -> Self {
        Self {
            store,
            id_generator: Box::new(id_generator),
        }
    }

    /// Opens (or creates) the JSON document at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let store = RecordStore::load(JsonFileMedium::new(path.as_ref()))?;
        Ok(Self::new(store))
    }

    /// A service over a fresh in-memory medium.
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::new(RecordStore::load(MemoryMedium::new())?))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    pub fn list(&self) -> &[Product] {
        self.store.snapshot()
    }

    pub fn get(&self, id: &str) -> StoreResult<Product> {
        self.store
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn create(&mut self, fields: ProductFields) -> StoreResult<Product> {
        let id = self.fresh_id()?;
        let product = Product::new(id, fields);
        self.store.append(product.clone())?;
        tracing::info!(product_id = %product.id, "created product");
        Ok(product)
    }

    pub fn update(&mut self, id: &str, fields: ProductFields) -> StoreResult<Product> {
        match self.store.merge_fields(id, fields)? {
            Some(product) => {
                tracing::info!(product_id = %id, "updated product");
                Ok(product)
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Deleting an id that does not exist succeeds.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let removed = self.store.remove_by_id(id)?;
        if removed {
            tracing::info!(product_id = %id, "deleted product");
        } else {
            tracing::debug!(product_id = %id, "delete of unknown product id");
        }
        Ok(())
    }

    fn fresh_id(&self) -> StoreResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.id_generator.generate();
            if !id.is_empty() && !self.store.contains_id(&id) {
                return Ok(id);
            }
            tracing::warn!(product_id = %id, "generated product id already in use, retrying");
        }
        Err(StoreError::IdSpaceExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}
