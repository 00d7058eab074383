pub mod config;
pub mod data;
pub mod geo;
pub mod geometry;
pub mod nearest;
pub mod render;
pub mod spatial;
pub mod telemetry;

use serde::{Deserialize, Serialize};

use crate::geo::great_circle::distance_km;

/// A point on the earth's surface in decimal degrees.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        GeoPoint { lat_deg, lon_deg }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Airport {
    pub icao: String,
    pub lat: f64,
    pub lon: f64,
    /// Runway lengths in meters
    #[serde(default)]
    pub runway_lengths_m: Vec<f64>,
}

impl Airport {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Length of the longest runway, 0 for airports without runway data.
    pub fn longest_runway_m(&self) -> f64 {
        self.runway_lengths_m.iter().copied().fold(0.0, f64::max)
    }

    pub fn distance_to_point(&self, p: GeoPoint) -> f64 {
        distance_km(self.location(), p)
    }
}
