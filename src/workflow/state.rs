use crate::models::{MapBounds, MapView, Property, PropertyRef, SavedSearch, SearchFilters};
use crate::workflow::saved::SavedSearchStore;
use crate::workflow::step::{StepTracker, WorkflowStep};

/// Everything the search UI reads. Mutated only through [`WorkflowContext`].
///
/// [`WorkflowContext`]: crate::workflow::WorkflowContext
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub filters: SearchFilters,
    pub search_results: Vec<Property>,
    pub total_results: u32,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub(crate) saved: SavedSearchStore,
    pub map_view: MapView,
    pub selected_property: Option<PropertyRef>,
    pub map_bounds: Option<MapBounds>,
    pub(crate) tracker: StepTracker,
    pub show_advanced_filters: bool,
    pub show_map_view: bool,
    pub show_save_dialog: bool,
}

impl WorkflowState {
    pub(crate) fn with_saved_searches(searches: Vec<SavedSearch>) -> Self {
        Self {
            saved: SavedSearchStore::new(searches),
            ..Default::default()
        }
    }

    pub fn saved_searches(&self) -> &[SavedSearch] {
        self.saved.searches()
    }

    pub fn workflow_step(&self) -> WorkflowStep {
        self.tracker.step()
    }

    pub fn workflow_progress(&self) -> u8 {
        self.tracker.progress()
    }
}
