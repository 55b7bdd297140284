use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ReviewError, StorageError};
use crate::reviews::types::{
    ReviewPayload, ReviewResponse, StoredReview, SubmissionOutcome, SyncStatus,
};
use crate::storage::KeyValueStore;

/// Storage key holding reviews that still have to reach the API
pub const PENDING_REVIEWS_KEY: &str = "pendingReviews";

const REVIEWS_PATH: &str = "/api/reviews";
const PENDING_MESSAGE: &str = "Thank you! Your review was saved and will be published shortly.";

/// Posts reviews to the reviews API and queues them locally when that fails.
///
/// Network and HTTP failures never reach the caller: the review is stored
/// under [`PENDING_REVIEWS_KEY`] and reported as accepted with
/// [`SyncStatus::PendingSync`]. Nothing is retried until
/// [`ReviewClient::flush_pending`] is called.
///
/// Every read-modify-write of the queue happens under `queue_lock`, so
/// concurrent submissions and flushes never drop each other's entries.
pub struct ReviewClient {
    client: Client,
    base_url: Option<String>,
    store: Arc<dyn KeyValueStore>,
    queue_lock: Mutex<()>,
    last_issued: Mutex<i64>,
}

impl ReviewClient {
    /// `base_url` of `None` keeps every review local
    pub fn new(base_url: Option<&str>, store: Arc<dyn KeyValueStore>) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            store,
            queue_lock: Mutex::new(()),
            last_issued: Mutex::new(0),
        })
    }

    // Millisecond timestamps, bumped past the previous id when submissions share a millisecond
    async fn issue_id(&self, now: DateTime<Utc>) -> String {
        let mut last = self.last_issued.lock().await;
        *last = now.timestamp_millis().max(last.saturating_add(1));
        last.to_string()
    }

    pub async fn submit(&self, payload: ReviewPayload) -> Result<SubmissionOutcome, ReviewError> {
        payload.validate()?;

        let now = Utc::now();
        let mut review = StoredReview {
            id: self.issue_id(now).await,
            payload,
            submitted_at: now,
            status: SyncStatus::Synced,
        };

        match self.post(&review.payload).await {
            Ok(Some(response)) => {
                if let Some(id) = response.review.get("id").and_then(remote_id) {
                    review.id = id;
                }
                info!("Review {} published", review.id);
                Ok(SubmissionOutcome {
                    status: SyncStatus::Synced,
                    message: response.message,
                    review,
                })
            }
            Ok(None) => {
                debug!("No reviews API configured, keeping review locally");
                Ok(self.keep_locally(review).await)
            }
            Err(err) => {
                warn!("Review submission failed, keeping it locally: {}", err);
                Ok(self.keep_locally(review).await)
            }
        }
    }

    async fn post(&self, payload: &ReviewPayload) -> Result<Option<ReviewResponse>, ReviewError> {
        let Some(base_url) = &self.base_url else {
            return Ok(None);
        };

        let response = self
            .client
            .post(format!("{base_url}{REVIEWS_PATH}"))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReviewError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body).map_err(ReviewError::Decode)?;
        Ok(Some(parsed))
    }

    async fn keep_locally(&self, mut review: StoredReview) -> SubmissionOutcome {
        review.status = SyncStatus::PendingSync;

        if let Err(err) = self.enqueue(&review).await {
            warn!("Could not queue review {} locally: {}", review.id, err);
        }

        SubmissionOutcome {
            status: SyncStatus::PendingSync,
            message: PENDING_MESSAGE.to_string(),
            review,
        }
    }

    async fn enqueue(&self, review: &StoredReview) -> Result<(), StorageError> {
        let _guard = self.queue_lock.lock().await;
        let mut pending = self.pending().await?;
        pending.push(review.clone());
        self.write_pending(&pending).await
    }

    /// Reviews waiting to be sent, oldest first
    pub async fn pending(&self) -> Result<Vec<StoredReview>, StorageError> {
        let Some(raw) = self.store.get_item(PENDING_REVIEWS_KEY).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Deserialize {
            key: PENDING_REVIEWS_KEY.to_string(),
            source,
        })
    }

    async fn write_pending(&self, pending: &[StoredReview]) -> Result<(), StorageError> {
        if pending.is_empty() {
            return self.store.remove_item(PENDING_REVIEWS_KEY).await;
        }

        let json = serde_json::to_string(pending).map_err(|source| StorageError::Serialize {
            key: PENDING_REVIEWS_KEY.to_string(),
            source,
        })?;
        self.store.set_item(PENDING_REVIEWS_KEY, &json).await
    }

    /// Resend queued reviews once; those that fail again stay queued.
    /// Returns how many were published.
    pub async fn flush_pending(&self) -> Result<usize, ReviewError> {
        let _guard = self.queue_lock.lock().await;
        let pending = self.pending().await?;
        if pending.is_empty() || self.base_url.is_none() {
            return Ok(0);
        }

        let mut remaining = Vec::new();
        let mut published = 0;
        for review in pending {
            match self.post(&review.payload).await {
                Ok(Some(_)) => published += 1,
                Ok(None) => remaining.push(review),
                Err(err) => {
                    debug!("Review {} still pending: {}", review.id, err);
                    remaining.push(review);
                }
            }
        }

        self.write_pending(&remaining).await?;
        info!(
            "Published {} pending reviews, {} still queued",
            published,
            remaining.len()
        );
        Ok(published)
    }
}

fn remote_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
