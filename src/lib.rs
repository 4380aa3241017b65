pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::ProductService;
pub use domain::{IdGenerator, Product, ProductFields, RandomIdGenerator};
pub use error::{StoreError, StoreResult};
pub use infra::config::ServerConfig;
pub use storage::{DurableMedium, JsonFileMedium, MemoryMedium, RecordStore};
