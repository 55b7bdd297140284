pub mod filters;
pub mod map;
pub mod saved_search;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use filters::{FilterUpdate, SearchFilters, DEFAULT_PRICE_MAX};
pub use map::{MapBounds, MapView, PropertyRef};
pub use saved_search::{NotificationFrequency, SavedSearch, SavedSearchDraft, SavedSearchUpdate};

/// Location information for a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub city: String,
    pub neighborhood: Option<String>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A single listing returned by a search backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub location: Location,
    pub price: u64,
    #[serde(default)]
    pub bedrooms: u8,
    #[serde(default)]
    pub bathrooms: f32,
    #[serde(default)]
    pub sqft: u32,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub url: String,
    pub listed_at: Option<DateTime<Utc>>,
}
