use crate::error::SearchError;
use crate::models::SearchFilters;
use crate::search::types::SearchResults;
use async_trait::async_trait;

/// Listing search capability the workflow depends on.
/// Lets the simulated backend, the HTTP backend and test doubles swap freely.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a search for the given criteria
    async fn search(&self, filters: &SearchFilters) -> Result<SearchResults, SearchError>;

    /// Get the name of the backend, used in logs
    fn backend_name(&self) -> &'static str;
}
