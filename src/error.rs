use thiserror::Error;

/// Errors raised by the record store and the product operations built on it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product not found: {0}")]
    NotFound(String),

    /// The durable medium rejected a write. The in-memory collection is left as it was.
    #[error("failed to persist products to {location}: {reason}")]
    PersistenceFailure { location: String, reason: String },

    /// The durable medium could not be read or initialized at startup.
    #[error("storage unavailable at {location}: {reason}")]
    StorageUnavailable { location: String, reason: String },

    #[error("could not generate a free product id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;
