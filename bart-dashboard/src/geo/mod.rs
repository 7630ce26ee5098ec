//! Geodesy helpers: coordinate validation, haversine distance and the
//! nearby-station filter.

use serde::Serialize;

use crate::domain::Station;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default search radius for nearby stations.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Error returned when coordinate strings cannot be plotted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinate is not a number: {0:?}")]
    NotANumber(String),

    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    OutOfRange { lat: f64, lon: f64 },
}

/// A validated WGS84 point in decimal degrees.
///
/// Both components are finite, latitude is within ±90 and longitude within
/// ±180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate from numbers, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(GeoError::OutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Parse the decimal-degree strings BART sends (`gtfs_latitude`, `gtfs_longitude`).
    pub fn parse(lat: &str, lon: &str) -> Result<Self, GeoError> {
        let lat_val = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::NotANumber(lat.to_string()))?;
        let lon_val = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| GeoError::NotANumber(lon.to_string()))?;
        Self::new(lat_val, lon_val)
    }

    /// `[lat, lon]` pair, the shape map libraries expect.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Haversine distance between two points in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// A station paired with its distance from a reference point.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyStation<'a> {
    #[serde(flatten)]
    pub station: &'a Station,
    pub distance_km: f64,
}

/// Stations within `radius_km` of `origin`, nearest first.
///
/// Stations whose coordinates cannot be parsed are never "nearby".
pub fn filter_nearby_stations(
    stations: &[Station],
    origin: Coordinate,
    radius_km: f64,
) -> Vec<NearbyStation<'_>> {
    let mut nearby: Vec<NearbyStation<'_>> = stations
        .iter()
        .filter_map(|station| {
            let distance_km = station.coordinate()?.distance_km(&origin);
            (distance_km <= radius_km).then_some(NearbyStation {
                station,
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}
