use serde::{Deserialize, Serialize};

/// Base layer shown by the map widget
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MapView {
    Satellite,
    #[default]
    Street,
    Terrain,
}

impl MapView {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapView::Satellite => "satellite",
            MapView::Street => "street",
            MapView::Terrain => "terrain",
        }
    }
}

impl std::str::FromStr for MapView {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "satellite" => Ok(MapView::Satellite),
            "street" => Ok(MapView::Street),
            "terrain" => Ok(MapView::Terrain),
            other => Err(format!("unknown map view: {other}")),
        }
    }
}

/// Property reference handed over by the map widget. Opaque to the workflow.
pub type PropertyRef = serde_json::Value;

/// Viewport reported by the map widget. Stored as given, never validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}
