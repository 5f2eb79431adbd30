//! Widget configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use signalmap_types::{latlon, GeoPoint, GeoPoint2d};

use crate::error::SignalMapError;

/// Settings of a [`SignalMap`](crate::SignalMap). Every field has a default, so a configuration
/// file only needs to list what it overrides.
///
/// ```
/// use signalmap::WidgetConfig;
///
/// let config = WidgetConfig::from_json(r#"{"locateZoom": 15}"#).unwrap();
/// assert_eq!(config.locate_zoom, 15.0);
/// assert_eq!(config.zoom, 11.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Initial center of the map.
    pub center: GeoPoint2d,
    /// Initial zoom level.
    pub zoom: f64,
    /// Style identifier handed to the map display.
    pub map_id: String,
    /// Location of the dataset file.
    pub dataset_url: String,
    /// Zoom level set after the user's location is found.
    pub locate_zoom: f64,
    /// Zoom level used to frame a place search result that has no viewport.
    pub place_zoom: f64,
    /// Country code search requests are restricted to.
    pub region: String,
    /// Camera of the street-level image shown in the detail surface.
    pub street_view: StreetViewConfig,
    /// Template of the directions link. `{lat}` and `{lng}` are replaced with the light's position.
    pub directions_url: String,
}

/// Street-level imagery camera orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetViewConfig {
    /// Compass heading in degrees.
    pub heading: f64,
    /// Camera pitch in degrees.
    pub pitch: f64,
}

impl Default for StreetViewConfig {
    fn default() -> Self {
        Self {
            heading: 34.0,
            pitch: 10.0,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            center: latlon!(2.3, 102.3),
            zoom: 11.0,
            map_id: "f49b240c79c381e43a2b689c".to_string(),
            dataset_url: "traffic-lights.json".to_string(),
            locate_zoom: 16.0,
            place_zoom: 28.0,
            region: "MY".to_string(),
            street_view: StreetViewConfig::default(),
            directions_url: "https://maps.google.com/?q={lat},{lng}".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, SignalMapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    /// Checks that the configuration can be used to build a widget.
    pub fn validate(&self) -> Result<(), SignalMapError> {
        self.center
            .validate()
            .map_err(|err| SignalMapError::Config(err.to_string()))?;

        for (name, zoom) in [
            ("zoom", self.zoom),
            ("locateZoom", self.locate_zoom),
            ("placeZoom", self.place_zoom),
        ] {
            if !zoom.is_finite() || zoom < 0.0 {
                return Err(SignalMapError::Config(format!(
                    "{name} must be a non-negative number, got {zoom}"
                )));
            }
        }

        self.directions_url_for(&self.center)?;

        Ok(())
    }

    /// Directions link for the given position.
    pub fn directions_url_for(
        &self,
        position: &impl GeoPoint<Num = f64>,
    ) -> Result<String, SignalMapError> {
        let vars = HashMap::from([
            ("lat".to_string(), position.lat().to_string()),
            ("lng".to_string(), position.lon().to_string()),
        ]);

        Ok(strfmt::strfmt(&self.directions_url, &vars)?)
    }
}
