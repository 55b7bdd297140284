use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::models::{SavedSearch, SavedSearchDraft, SavedSearchUpdate, SearchFilters};

// Ids past the end of year 9999 are not creation timestamps and never seed the counter
const MAX_ID_MILLIS: i64 = 253_402_300_799_999;

/// In-memory saved-search collection, most recent first.
///
/// Generated ids are creation timestamps in milliseconds, nudged forward when
/// two saves land in the same millisecond so ids stay unique and ordered.
#[derive(Debug, Clone, Default)]
pub struct SavedSearchStore {
    searches: Vec<SavedSearch>,
    last_issued: i64,
}

impl SavedSearchStore {
    pub fn new(searches: Vec<SavedSearch>) -> Self {
        let last_issued = searches
            .iter()
            .filter_map(|search| search.id.parse::<i64>().ok())
            .filter(|id| (0..=MAX_ID_MILLIS).contains(id))
            .max()
            .unwrap_or(0);

        Self {
            searches,
            last_issued,
        }
    }

    pub fn searches(&self) -> &[SavedSearch] {
        &self.searches
    }

    pub fn get(&self, id: &str) -> Option<&SavedSearch> {
        self.searches.iter().find(|search| search.id == id)
    }

    fn issue_id(&mut self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis().max(self.last_issued.saturating_add(1));
        while self.get(&candidate.to_string()).is_some() {
            candidate = candidate.saturating_add(1);
        }
        self.last_issued = candidate;
        candidate.to_string()
    }

    /// Build a saved search from `draft` and a copy of `filters`, and put it first.
    ///
    /// Result counts left out of the draft are filled with small random numbers
    /// standing in for the server's first count.
    pub fn save(
        &mut self,
        draft: SavedSearchDraft,
        filters: &SearchFilters,
        now: DateTime<Utc>,
    ) -> SavedSearch {
        let id = match draft.id {
            Some(id) => id,
            None => self.issue_id(now),
        };
        let mut rng = rand::rng();
        let defaults = SavedSearch::default();

        let saved = SavedSearch {
            id,
            name: draft.name.unwrap_or(defaults.name),
            description: draft.description.unwrap_or(defaults.description),
            filters: filters.clone(),
            created_at: now,
            last_notified: now,
            result_count: draft
                .result_count
                .unwrap_or_else(|| rng.random_range(0..50)),
            new_results: draft.new_results.unwrap_or_else(|| rng.random_range(0..5)),
            notifications_enabled: draft
                .notifications_enabled
                .unwrap_or(defaults.notifications_enabled),
            frequency: draft.frequency.unwrap_or(defaults.frequency),
            is_active: draft.is_active.unwrap_or(defaults.is_active),
        };

        debug!("Saved search {} ({})", saved.id, saved.name);
        self.searches.insert(0, saved.clone());
        saved
    }

    /// Remove the entry with `id`; returns whether anything was removed
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.searches.len();
        self.searches.retain(|search| search.id != id);
        self.searches.len() != before
    }

    /// Merge `update` into the entry with `id`; returns whether it existed
    pub fn update(&mut self, id: &str, update: SavedSearchUpdate) -> bool {
        match self.searches.iter_mut().find(|search| search.id == id) {
            Some(search) => {
                search.apply(update);
                true
            }
            None => false,
        }
    }
}
