use thiserror::Error;

/// Failures reading or writing the local key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {key}: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures from a search backend.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search backend returned status {0}")]
    Status(u16),

    #[error("could not decode search response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("search backend unavailable: {0}")]
    Unavailable(String),
}

/// Failures submitting a review. Only validation errors reach the caller;
/// transport failures are absorbed into the pending queue.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("review text is empty")]
    EmptyReview,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("review endpoint returned status {0}")]
    Status(u16),

    #[error("could not decode review response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not queue review locally: {0}")]
    Storage(#[from] StorageError),
}

/// Environment values that could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Inputs the amortization formula cannot work with.
#[derive(Debug, Error, PartialEq)]
pub enum MortgageError {
    #[error("loan term must be at least one year")]
    ZeroTerm,

    #[error("interest rate must be finite and non-negative, got {0}")]
    InvalidRate(f64),

    #[error("down payment {down_payment} exceeds the price {price}")]
    DownPaymentTooLarge { price: f64, down_payment: f64 },
}
