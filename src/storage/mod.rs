pub mod medium;
pub mod record_store;

pub use medium::{DurableMedium, JsonFileMedium, MemoryMedium};
pub use record_store::RecordStore;
