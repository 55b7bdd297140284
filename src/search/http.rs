use crate::error::SearchError;
use crate::models::SearchFilters;
use crate::search::traits::SearchBackend;
use crate::search::types::SearchResults;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "/api/properties/search";

/// Search backend talking to the listings API over HTTP
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    /// Create a backend against `base_url` (scheme and host, no trailing path)
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, filters: &SearchFilters) -> Result<SearchResults, SearchError> {
        let url = self.search_url();
        debug!("Posting search to {}", url);

        let response = self.client.post(&url).json(filters).send().await?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let results: SearchResults = serde_json::from_str(&body).map_err(SearchError::Decode)?;
        info!(
            "Listings API returned {} of {} matches",
            results.items.len(),
            results.total_count
        );
        Ok(results)
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
