use serde::{Deserialize, Serialize};

use crate::GeolocatorKind;

/// Longitude/latitude pair in degrees, in whatever datum the backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

/// A single normalized positioning result.
///
/// `accuracy`, `coords` and `timestamp` are always present. Everything else
/// is best-effort and depends on which backend produced the fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Reported accuracy radius in meters.
    pub accuracy: f64,
    pub coords: Coordinates,
    /// Direction of travel in degrees clockwise from north. `None` when the
    /// device is stationary or the backend does not know.
    #[serde(default)]
    pub heading: Option<f64>,
    /// Meters per second.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub geolocator: GeolocatorKind,
    /// Reverse-geocoded address, in the backend's own shape.
    #[serde(default)]
    pub address: Option<serde_json::Value>,
    #[serde(default)]
    pub pois: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub roads: Option<Vec<serde_json::Value>>,
    /// Number of road crossings reported near the fix.
    #[serde(default)]
    pub crosses: Option<usize>,
}

impl PositionFix {
    /// A fix carrying only the mandatory fields.
    #[must_use]
    pub fn new(
        geolocator: GeolocatorKind,
        coords: Coordinates,
        accuracy: f64,
        timestamp: i64,
    ) -> Self {
        Self {
            accuracy,
            coords,
            heading: None,
            speed: None,
            timestamp,
            geolocator,
            address: None,
            pois: None,
            roads: None,
            crosses: None,
        }
    }
}
