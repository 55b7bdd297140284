use std::sync::Arc;

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::StorageError;
use crate::models::SavedSearch;

/// Storage key holding the saved-search collection
pub const SAVED_SEARCHES_KEY: &str = "savedSearches";

/// Synchronizes the saved-search collection with a [`KeyValueStore`].
///
/// The collection is the unit of persistence: every write replaces the whole
/// JSON array. `load` and `persist` never fail; problems are logged and the
/// caller keeps working from memory.
#[derive(Clone)]
pub struct SavedSearchRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SavedSearchRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: SAVED_SEARCHES_KEY.to_string(),
        }
    }

    pub async fn try_load(&self) -> Result<Vec<SavedSearch>, StorageError> {
        let Some(raw) = self.store.get_item(&self.key).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
            key: self.key.clone(),
            source,
        })
    }

    pub async fn try_persist(&self, searches: &[SavedSearch]) -> Result<(), StorageError> {
        let json = serde_json::to_string(searches).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.store.set_item(&self.key, &json).await
    }

    /// Read the persisted collection, falling back to an empty one
    pub async fn load(&self) -> Vec<SavedSearch> {
        match self.try_load().await {
            Ok(searches) => {
                debug!("Loaded {} saved searches", searches.len());
                searches
            }
            Err(err) => {
                warn!("Could not load saved searches, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    /// Write the collection; returns whether the write went through
    pub async fn persist(&self, searches: &[SavedSearch]) -> bool {
        match self.try_persist(searches).await {
            Ok(()) => true,
            Err(err) => {
                warn!("Could not persist {} saved searches: {}", searches.len(), err);
                false
            }
        }
    }
}
