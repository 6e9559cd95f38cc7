//! Latitude and longitude coordinates.

use serde::Serialize;

/// The latitude and longitude in decimal degrees.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl From<(f64, f64)> for Coords {
    fn from(pair: (f64, f64)) -> Self {
        Self {
            lat: pair.0,
            lon: pair.1,
        }
    }
}

impl Coords {
    /// Build from the separate degree and minute columns the JMA station tables use.
    pub fn from_degrees_minutes(lat_deg: f64, lat_min: f64, lon_deg: f64, lon_min: f64) -> Self {
        Self {
            lat: lat_deg + lat_min / 60.0,
            lon: lon_deg + lon_min / 60.0,
        }
    }

    /// Longitude first, the order GeoJSON wants.
    pub fn lnglat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
