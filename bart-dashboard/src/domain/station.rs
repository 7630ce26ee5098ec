//! Station records.

use serde::Serialize;

use super::departure::Departure;
use crate::geo::Coordinate;

/// A BART station from the station list.
///
/// The abbreviation is the natural key every other record uses to refer to
/// a station. Coordinates are kept as the decimal-degree strings the API
/// sends; use [`Station::coordinate`] to get a plottable point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub name: String,
    pub abbr: String,
    pub gtfs_latitude: String,
    pub gtfs_longitude: String,
    pub address: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub zipcode: String,
    /// Current departures, when they have been attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etd: Option<Vec<Departure>>,
}

impl Station {
    /// The station's position, if its coordinate strings are plottable.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(&self.gtfs_latitude, &self.gtfs_longitude).ok()
    }
}

/// Detailed information for a single station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    pub station: Station,
    pub north_routes: Vec<String>,
    pub south_routes: Vec<String>,
    pub north_platforms: Vec<String>,
    pub south_platforms: Vec<String>,
    pub platform_info: String,
    pub intro: String,
    pub cross_street: String,
    pub food: String,
    pub shopping: String,
    pub attraction: String,
    pub link: String,
}

/// Access information (parking, bikes, lockers) for a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationAccess {
    pub name: String,
    pub abbr: String,
    pub parking_flag: bool,
    pub bike_flag: bool,
    pub bike_station_flag: bool,
    pub locker_flag: bool,
    pub entering: String,
    pub exiting: String,
    pub parking: String,
    pub fill_time: String,
    pub car_share: String,
    pub lockers: String,
    pub bike_station_text: String,
    pub destinations: String,
    pub transit_info: String,
    pub link: String,
}
