//! Property search workflow for the brokerage site: live filters, saved
//! searches with local persistence, the guided step tracker, and the small
//! collaborators around it (listing search, review submission, mortgage
//! estimates).

pub mod config;
pub mod error;
pub mod models;
pub mod mortgage;
pub mod reviews;
pub mod search;
pub mod storage;
pub mod telemetry;
pub mod workflow;

pub use config::ScoutConfig;
pub use models::{FilterUpdate, SavedSearch, SavedSearchDraft, SavedSearchUpdate, SearchFilters};
pub use workflow::{WorkflowContext, WorkflowState, WorkflowStep};
