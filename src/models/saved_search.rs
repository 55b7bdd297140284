use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filters::SearchFilters;

pub const UNTITLED_SEARCH: &str = "Untitled Search";

/// How often a saved search sends new-listing notifications
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFrequency {
    Immediate,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl NotificationFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationFrequency::Immediate => "immediate",
            NotificationFrequency::Daily => "daily",
            NotificationFrequency::Weekly => "weekly",
            NotificationFrequency::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for NotificationFrequency {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(NotificationFrequency::Immediate),
            "daily" => Ok(NotificationFrequency::Daily),
            "weekly" => Ok(NotificationFrequency::Weekly),
            "monthly" => Ok(NotificationFrequency::Monthly),
            other => Err(format!("unknown notification frequency: {other}")),
        }
    }
}

/// Named snapshot of a filter record plus notification preferences.
///
/// Every field falls back to a default when missing so records written by
/// older releases still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSearch {
    pub id: String,
    pub name: String,
    pub description: String,
    pub filters: SearchFilters,
    pub created_at: DateTime<Utc>,
    pub last_notified: DateTime<Utc>,
    pub result_count: u32,
    pub new_results: u32,
    pub notifications_enabled: bool,
    pub frequency: NotificationFrequency,
    pub is_active: bool,
}

impl Default for SavedSearch {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: UNTITLED_SEARCH.to_string(),
            description: String::new(),
            filters: SearchFilters::default(),
            created_at: DateTime::<Utc>::default(),
            last_notified: DateTime::<Utc>::default(),
            result_count: 0,
            new_results: 0,
            notifications_enabled: true,
            frequency: NotificationFrequency::Daily,
            is_active: true,
        }
    }
}

/// Caller-supplied fields for a new saved search. Filters are always
/// captured from the live record at save time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSearchDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub result_count: Option<u32>,
    pub new_results: Option<u32>,
    pub notifications_enabled: Option<bool>,
    pub frequency: Option<NotificationFrequency>,
    pub is_active: Option<bool>,
}

impl SavedSearchDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Partial update merged into an existing saved search
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSearchUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub filters: Option<SearchFilters>,
    pub last_notified: Option<DateTime<Utc>>,
    pub result_count: Option<u32>,
    pub new_results: Option<u32>,
    pub notifications_enabled: Option<bool>,
    pub frequency: Option<NotificationFrequency>,
    pub is_active: Option<bool>,
}

impl SavedSearch {
    pub fn apply(&mut self, update: SavedSearchUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(filters) = update.filters {
            self.filters = filters;
        }
        if let Some(last_notified) = update.last_notified {
            self.last_notified = last_notified;
        }
        if let Some(result_count) = update.result_count {
            self.result_count = result_count;
        }
        if let Some(new_results) = update.new_results {
            self.new_results = new_results;
        }
        if let Some(enabled) = update.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&NotificationFrequency::Weekly).expect("serializes");
        assert_eq!(json, "\"weekly\"");
        assert_eq!(
            "Monthly".parse::<NotificationFrequency>(),
            Ok(NotificationFrequency::Monthly)
        );
        assert!("hourly".parse::<NotificationFrequency>().is_err());
    }

    #[test]
    fn older_record_without_notification_fields_still_loads() {
        let raw = r#"{"id": "1700000000000", "name": "Downtown condos", "filters": {"bedrooms": "2"}}"#;
        let saved: SavedSearch = serde_json::from_str(raw).expect("legacy record loads");

        assert_eq!(saved.id, "1700000000000");
        assert_eq!(saved.filters.bedrooms, "2");
        assert_eq!(saved.frequency, NotificationFrequency::Daily);
        assert!(saved.is_active);
        assert!(saved.filters.amenities.is_empty());
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut saved = SavedSearch {
            id: "1".to_string(),
            name: "Lake houses".to_string(),
            ..Default::default()
        };

        saved.apply(SavedSearchUpdate {
            frequency: Some(NotificationFrequency::Immediate),
            is_active: Some(false),
            ..Default::default()
        });

        assert_eq!(saved.name, "Lake houses");
        assert_eq!(saved.frequency, NotificationFrequency::Immediate);
        assert!(!saved.is_active);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(SavedSearch::default()).expect("serializes");
        for key in [
            "id",
            "name",
            "description",
            "filters",
            "createdAt",
            "lastNotified",
            "resultCount",
            "newResults",
            "notificationsEnabled",
            "frequency",
            "isActive",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
