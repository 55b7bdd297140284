use crate::error::SearchError;
use crate::models::SearchFilters;
use crate::search::traits::SearchBackend;
use crate::search::types::SearchResults;
use async_trait::async_trait;
use rand::Rng;
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::debug;

/// Delay used when nothing else is configured
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1500);

/// Range of simulated total counts
pub const SIMULATED_TOTALS: RangeInclusive<u32> = 10..=59;

/// Stand-in for the listing service: waits a fixed delay, then reports a
/// random number of matches and no items. It never fails.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SEARCH_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchBackend for SimulatedBackend {
    async fn search(&self, filters: &SearchFilters) -> Result<SearchResults, SearchError> {
        debug!(
            "Simulating search with {} active criteria ({:?} delay)",
            filters.active_criteria(),
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        let total = rand::rng().random_range(SIMULATED_TOTALS);
        Ok(SearchResults::count_only(total))
    }

    fn backend_name(&self) -> &'static str {
        "simulated"
    }
}
