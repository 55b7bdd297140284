use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// A client review as entered in the review form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
}

impl ReviewPayload {
    pub fn validate(&self) -> Result<(), ReviewError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewError::InvalidRating(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ReviewError::EmptyReview);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Accepted by the reviews API
    Synced,
    /// Kept locally until it can be resent
    PendingSync,
}

/// A review as recorded after submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredReview {
    pub id: String,
    #[serde(flatten)]
    pub payload: ReviewPayload,
    pub submitted_at: DateTime<Utc>,
    pub status: SyncStatus,
}

/// What the reviews API answers on success
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewResponse {
    pub message: String,
    pub review: serde_json::Value,
}

/// Result reported back to the form. Always a success from the user's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub status: SyncStatus,
    pub message: String,
    pub review: StoredReview,
}
