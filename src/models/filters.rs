use serde::{Deserialize, Deserializer, Serialize};

/// Upper price bound of a fresh search, covering the full market range
pub const DEFAULT_PRICE_MAX: u64 = 2_000_000;

/// Search criteria a user can specify to narrow property listings.
///
/// Bedroom, bathroom and parking selectors stay string-encoded (`"3"`, `"3+"`)
/// because the UI treats them as categories rather than numbers. Investment
/// fields are free text and are never validated. Ranges are not checked
/// either: a `price_min` above `price_max` is kept as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub location: String,
    pub price_min: u64,
    pub price_max: u64,
    pub bedrooms: String,
    pub bathrooms: String,
    pub property_type: String,
    pub sqft_min: Option<u32>,
    pub sqft_max: Option<u32>,
    pub year_built_min: Option<u16>,
    pub year_built_max: Option<u16>,
    pub lot_size_min: Option<u32>,
    pub lot_size_max: Option<u32>,
    pub parking_spaces: String,
    pub garage_type: String,
    pub neighborhood: String,
    pub school_district: String,
    pub zip_code: String,
    pub amenities: Vec<String>,
    pub features: Vec<String>,
    pub days_on_market: String,
    pub price_reduced: bool,
    pub new_listing: bool,
    pub open_house: bool,
    pub rental_yield: String,
    pub cap_rate: String,
    pub hoa_fee: String,
    pub accessibility: Vec<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            location: String::new(),
            price_min: 0,
            price_max: DEFAULT_PRICE_MAX,
            bedrooms: String::new(),
            bathrooms: String::new(),
            property_type: String::new(),
            sqft_min: None,
            sqft_max: None,
            year_built_min: None,
            year_built_max: None,
            lot_size_min: None,
            lot_size_max: None,
            parking_spaces: String::new(),
            garage_type: String::new(),
            neighborhood: String::new(),
            school_district: String::new(),
            zip_code: String::new(),
            amenities: Vec::new(),
            features: Vec::new(),
            days_on_market: String::new(),
            price_reduced: false,
            new_listing: false,
            open_house: false,
            rental_yield: String::new(),
            cap_rate: String::new(),
            hoa_fee: String::new(),
            accessibility: Vec::new(),
        }
    }
}

/// Partial update applied on top of the live [`SearchFilters`].
///
/// `None` means "not part of this update". Optional numeric bounds use a
/// nested option so an update can clear a bound: `Some(None)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub location: Option<String>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub property_type: Option<String>,
    #[serde(deserialize_with = "present")]
    pub sqft_min: Option<Option<u32>>,
    #[serde(deserialize_with = "present")]
    pub sqft_max: Option<Option<u32>>,
    #[serde(deserialize_with = "present")]
    pub year_built_min: Option<Option<u16>>,
    #[serde(deserialize_with = "present")]
    pub year_built_max: Option<Option<u16>>,
    #[serde(deserialize_with = "present")]
    pub lot_size_min: Option<Option<u32>>,
    #[serde(deserialize_with = "present")]
    pub lot_size_max: Option<Option<u32>>,
    pub parking_spaces: Option<String>,
    pub garage_type: Option<String>,
    pub neighborhood: Option<String>,
    pub school_district: Option<String>,
    pub zip_code: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub days_on_market: Option<String>,
    pub price_reduced: Option<bool>,
    pub new_listing: Option<bool>,
    pub open_house: Option<bool>,
    pub rental_yield: Option<String>,
    pub cap_rate: Option<String>,
    pub hoa_fee: Option<String>,
    pub accessibility: Option<Vec<String>>,
}

// A key that is present in the payload is always `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

macro_rules! overwrite {
    ($target:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $field {
                $target.$field = value;
            }
        )+
    };
}

impl SearchFilters {
    /// Produce a new record with every field present in `update` replacing the current value.
    ///
    /// Tag containers (`amenities`, `features`, `accessibility`) keep their current
    /// contents when the update leaves them out, and take the new value verbatim
    /// (even an empty list) when it doesn't.
    pub fn merge(&self, update: FilterUpdate) -> SearchFilters {
        let FilterUpdate {
            location,
            price_min,
            price_max,
            bedrooms,
            bathrooms,
            property_type,
            sqft_min,
            sqft_max,
            year_built_min,
            year_built_max,
            lot_size_min,
            lot_size_max,
            parking_spaces,
            garage_type,
            neighborhood,
            school_district,
            zip_code,
            amenities,
            features,
            days_on_market,
            price_reduced,
            new_listing,
            open_house,
            rental_yield,
            cap_rate,
            hoa_fee,
            accessibility,
        } = update;

        let mut next = self.clone();
        overwrite!(next;
            location,
            price_min,
            price_max,
            bedrooms,
            bathrooms,
            property_type,
            sqft_min,
            sqft_max,
            year_built_min,
            year_built_max,
            lot_size_min,
            lot_size_max,
            parking_spaces,
            garage_type,
            neighborhood,
            school_district,
            zip_code,
            amenities,
            features,
            days_on_market,
            price_reduced,
            new_listing,
            open_house,
            rental_yield,
            cap_rate,
            hoa_fee,
            accessibility,
        );
        next
    }

    /// Number of criteria that differ from a fresh search, for compact summaries.
    pub fn active_criteria(&self) -> usize {
        let defaults = SearchFilters::default();
        let text = [
            &self.location,
            &self.bedrooms,
            &self.bathrooms,
            &self.property_type,
            &self.parking_spaces,
            &self.garage_type,
            &self.neighborhood,
            &self.school_district,
            &self.zip_code,
            &self.days_on_market,
            &self.rental_yield,
            &self.cap_rate,
            &self.hoa_fee,
        ]
        .iter()
        .filter(|value| !value.is_empty())
        .count();
        let bounds = [
            self.sqft_min.is_some(),
            self.sqft_max.is_some(),
            self.year_built_min.is_some(),
            self.year_built_max.is_some(),
            self.lot_size_min.is_some(),
            self.lot_size_max.is_some(),
            self.price_min != defaults.price_min,
            self.price_max != defaults.price_max,
            self.price_reduced,
            self.new_listing,
            self.open_house,
        ]
        .iter()
        .filter(|set| **set)
        .count();

        text + bounds + self.amenities.len() + self.features.len() + self.accessibility.len()
    }
}
