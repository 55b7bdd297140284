pub mod file;
pub mod memory;
pub mod repository;

use crate::error::StorageError;
use async_trait::async_trait;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{SavedSearchRepository, SAVED_SEARCHES_KEY};

/// String key/value persistence in the shape of browser local storage.
///
/// Implementations hold whole serialized documents per key; callers own the
/// encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Drop `key`; absent keys are not an error
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
