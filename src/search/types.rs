use crate::models::Property;
use serde::{Deserialize, Serialize};

/// Listings returned for one search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Listings on the current page; may be shorter than `total_count`
    #[serde(default)]
    pub items: Vec<Property>,
    /// Total number of matches reported by the backend
    pub total_count: u32,
}

impl SearchResults {
    pub fn count_only(total_count: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count,
        }
    }
}
