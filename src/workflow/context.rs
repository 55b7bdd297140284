use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::{
    FilterUpdate, MapBounds, MapView, PropertyRef, SavedSearch, SavedSearchDraft,
    SavedSearchUpdate, SearchFilters,
};
use crate::search::{SearchBackend, SearchResults};
use crate::storage::SavedSearchRepository;
use crate::workflow::state::WorkflowState;
use crate::workflow::step::{WorkflowStep, FILTER_EDIT_INCREMENT};

/// Handle to a scheduled search completion. Dropping it does not cancel the search.
pub type SearchHandle = JoinHandle<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    /// `apply_filters`: step was already moved to results, only progress finishes
    Apply,
    /// `perform_search`: the step moves to results when the search lands
    Perform,
}

/// Owner of the search workflow state.
///
/// Cloning the context hands out another reference to the same state; every
/// mutation goes through one lock, so there is a single writer at a time.
/// Saved-search changes are written through the repository before the action
/// returns.
#[derive(Clone)]
pub struct WorkflowContext {
    state: Arc<RwLock<WorkflowState>>,
    backend: Arc<dyn SearchBackend>,
    repository: SavedSearchRepository,
}

impl WorkflowContext {
    /// Fresh context with an empty saved-search collection
    pub fn new(backend: Arc<dyn SearchBackend>, repository: SavedSearchRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorkflowState::default())),
            backend,
            repository,
        }
    }

    /// Context seeded from persisted saved searches. Unreadable storage starts empty.
    pub async fn load(backend: Arc<dyn SearchBackend>, repository: SavedSearchRepository) -> Self {
        let searches = repository.load().await;
        info!(
            "Workflow ready with {} saved searches (backend: {})",
            searches.len(),
            backend.backend_name()
        );

        Self {
            state: Arc::new(RwLock::new(WorkflowState::with_saved_searches(searches))),
            backend,
            repository,
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> WorkflowState {
        self.state.read().await.clone()
    }

    pub async fn filters(&self) -> SearchFilters {
        self.state.read().await.filters.clone()
    }

    pub async fn saved_searches(&self) -> Vec<SavedSearch> {
        self.state.read().await.saved_searches().to_vec()
    }

    async fn write(&self) -> RwLockWriteGuard<'_, WorkflowState> {
        self.state.write().await
    }

    async fn persist_saved(&self, state: &WorkflowState) {
        self.repository.persist(state.saved_searches()).await;
    }

    // Filters

    /// Merge `update` into the live filters and bump progress by ten, keeping the step
    pub async fn update_filters(&self, update: FilterUpdate) {
        let mut state = self.write().await;
        state.filters = state.filters.merge(update);
        state.tracker.bump(FILTER_EDIT_INCREMENT);
        debug!(
            "Filters updated ({} active), progress {}",
            state.filters.active_criteria(),
            state.tracker.progress()
        );
    }

    /// Put every filter back to its default; step and progress stay where they are
    pub async fn reset_filters(&self) {
        self.write().await.filters = SearchFilters::default();
    }

    /// Jump to results at 80% and schedule the search. Progress reaches 100 when it lands.
    pub async fn apply_filters(&self) -> SearchHandle {
        let filters = {
            let mut state = self.write().await;
            state.tracker.begin_search();
            state.is_loading = true;
            state.filters.clone()
        };
        self.spawn_search(filters, SearchKind::Apply)
    }

    /// Mark loading and schedule the search; the results step is entered on completion
    pub async fn perform_search(&self) -> SearchHandle {
        let filters = {
            let mut state = self.write().await;
            state.is_loading = true;
            state.filters.clone()
        };
        self.spawn_search(filters, SearchKind::Perform)
    }

    fn spawn_search(&self, filters: SearchFilters, kind: SearchKind) -> SearchHandle {
        let context = self.clone();
        tokio::spawn(async move {
            let outcome = context.backend.search(&filters).await;
            context.finish_search(outcome, kind).await;
        })
    }

    async fn finish_search(
        &self,
        outcome: Result<SearchResults, crate::error::SearchError>,
        kind: SearchKind,
    ) {
        let mut state = self.write().await;
        state.is_loading = false;

        match outcome {
            Ok(results) => {
                info!(
                    "Search via {} finished with {} results",
                    self.backend.backend_name(),
                    results.total_count
                );
                state.total_results = results.total_count;
                state.search_results = results.items;
                state.last_error = None;
                match kind {
                    SearchKind::Apply => state.tracker.finish_search(),
                    SearchKind::Perform => state.tracker.set(WorkflowStep::Results),
                }
            }
            Err(err) => {
                warn!("Search via {} failed: {}", self.backend.backend_name(), err);
                state.last_error = Some(err.to_string());
            }
        }
    }

    // Saved searches

    /// Save the live filters under `draft`, close the save dialog and enter the save step
    pub async fn save_search(&self, draft: SavedSearchDraft) -> SavedSearch {
        let mut state = self.write().await;
        let filters = state.filters.clone();
        let saved = state.saved.save(draft, &filters, Utc::now());
        state.show_save_dialog = false;
        state.tracker.enter(WorkflowStep::Save);
        self.persist_saved(&state).await;
        saved
    }

    /// Remove a saved search. Unknown ids are ignored.
    pub async fn delete_saved_search(&self, id: &str) -> bool {
        let mut state = self.write().await;
        let removed = state.saved.delete(id);
        if removed {
            self.persist_saved(&state).await;
        } else {
            debug!("No saved search {} to delete", id);
        }
        removed
    }

    /// Merge `update` into a saved search. Unknown ids are ignored.
    pub async fn update_saved_search(&self, id: &str, update: SavedSearchUpdate) -> bool {
        let mut state = self.write().await;
        let updated = state.saved.update(id, update);
        if updated {
            self.persist_saved(&state).await;
        }
        updated
    }

    /// Replace the live filters with a copy of a saved search's filters
    pub async fn load_saved_search(&self, id: &str) -> bool {
        let mut state = self.write().await;
        match state.saved.get(id).map(|saved| saved.filters.clone()) {
            Some(filters) => {
                state.filters = filters;
                true
            }
            None => false,
        }
    }

    // Map

    pub async fn set_map_view(&self, view: MapView) {
        self.write().await.map_view = view;
    }

    pub async fn select_property(&self, property: Option<PropertyRef>) {
        self.write().await.selected_property = property;
    }

    pub async fn update_map_bounds(&self, bounds: Option<MapBounds>) {
        self.write().await.map_bounds = bounds;
    }

    // Steps

    pub async fn set_workflow_step(&self, step: WorkflowStep) {
        self.write().await.tracker.set(step);
    }

    pub async fn next_step(&self) -> WorkflowStep {
        let mut state = self.write().await;
        state.tracker.advance();
        state.tracker.step()
    }

    pub async fn previous_step(&self) -> WorkflowStep {
        let mut state = self.write().await;
        state.tracker.retreat();
        state.tracker.step()
    }

    // Panels

    /// Open or close the advanced filters; opening enters the filter step, closing returns to search
    pub async fn toggle_advanced_filters(&self) -> bool {
        let mut state = self.write().await;
        state.show_advanced_filters = !state.show_advanced_filters;
        let step = if state.show_advanced_filters {
            WorkflowStep::Filter
        } else {
            WorkflowStep::Search
        };
        state.tracker.enter(step);
        state.show_advanced_filters
    }

    /// Open or close the map panel; opening enters the map step, closing returns to search
    pub async fn toggle_map_view(&self) -> bool {
        let mut state = self.write().await;
        state.show_map_view = !state.show_map_view;
        let step = if state.show_map_view {
            WorkflowStep::Map
        } else {
            WorkflowStep::Search
        };
        state.tracker.enter(step);
        state.show_map_view
    }

    pub async fn toggle_save_dialog(&self) -> bool {
        let mut state = self.write().await;
        state.show_save_dialog = !state.show_save_dialog;
        state.show_save_dialog
    }
}
