pub mod client;
pub mod types;

pub use client::{ReviewClient, PENDING_REVIEWS_KEY};
pub use types::{ReviewPayload, StoredReview, SubmissionOutcome, SyncStatus};
