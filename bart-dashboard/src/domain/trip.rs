//! Trip planning and fare records.

use serde::Serialize;

/// One uninterrupted ride in a trip itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripLeg {
    pub order: u32,
    pub transfer_code: String,
    pub origin: String,
    pub destination: String,
    pub orig_time_min: String,
    pub orig_time_date: String,
    pub dest_time_min: String,
    pub dest_time_date: String,
    /// Route label, e.g. "ROUTE 7".
    pub line: String,
    pub bike_flag: bool,
    pub train_head_station: String,
    pub load: String,
}

impl TripLeg {
    /// The route number encoded in `line` ("ROUTE 7" -> "7").
    pub fn route_number(&self) -> Option<&str> {
        let number = self.line.trim().strip_prefix("ROUTE")?.trim();
        (!number.is_empty()).then_some(number)
    }
}

/// A planned trip between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub origin: String,
    pub destination: String,
    pub fare: String,
    pub clipper: String,
    pub orig_time_min: String,
    pub orig_time_date: String,
    pub dest_time_min: String,
    pub dest_time_date: String,
    /// Total trip time in minutes.
    pub trip_time: u32,
    pub legs: Vec<TripLeg>,
}

impl Trip {
    /// Number of transfers (legs minus one).
    pub fn transfers(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }
}

/// One row of a fare table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareClass {
    pub amount: String,
    pub class: String,
    pub name: String,
}

/// Fare between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareInfo {
    pub origin: String,
    pub destination: String,
    /// Headline fare, e.g. "4.40".
    pub fare: String,
    pub clipper_discount: String,
    pub fares: Vec<FareClass>,
}
