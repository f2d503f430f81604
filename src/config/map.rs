//! Map display configuration

use serde::Deserialize;

use crate::selection::Focus;

/// Map settings shared by the web page and the terminal canvas
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Focus used while nothing is selected
    pub center_lat: f64,
    pub center_lon: f64,
    /// Initial Leaflet zoom level
    pub zoom: u8,
    /// Tile URL template (`{s}`, `{z}`, `{x}`, `{y}` placeholders)
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: Focus::REGIONAL_CENTROID.lat,
            center_lon: Focus::REGIONAL_CENTROID.lon,
            zoom: 10,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

/// Map settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileMap {
    pub center_lat: Option<f64>,
    pub center_lon: Option<f64>,
    pub zoom: Option<u8>,
    pub tile_url: Option<String>,
    pub attribution: Option<String>,
}

impl MapConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileMap>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            center_lat: file.center_lat.unwrap_or(defaults.center_lat),
            center_lon: file.center_lon.unwrap_or(defaults.center_lon),
            zoom: file.zoom.unwrap_or(defaults.zoom),
            tile_url: file.tile_url.unwrap_or(defaults.tile_url),
            attribution: file.attribution.unwrap_or(defaults.attribution),
        }
    }

    pub fn default_focus(&self) -> Focus {
        Focus::new(self.center_lat, self.center_lon)
    }
}
