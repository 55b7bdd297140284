pub mod context;
pub mod saved;
pub mod state;
pub mod step;

pub use context::{SearchHandle, WorkflowContext};
pub use saved::SavedSearchStore;
pub use state::WorkflowState;
pub use step::{StepTracker, WorkflowStep};
