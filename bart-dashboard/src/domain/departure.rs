//! Departure estimates and the trains derived from them.

use serde::Serialize;

use super::eta::Eta;
use crate::geo::Coordinate;

/// One upcoming train in an ETD entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub minutes: Eta,
    pub platform: String,
    /// "North" or "South".
    pub direction: String,
    /// Number of cars.
    pub length: String,
    /// Colour name, e.g. "YELLOW".
    pub color: String,
    pub hexcolor: String,
    pub bikeflag: String,
    /// Delay in seconds.
    pub delay: String,
}

/// Upcoming trains from one station towards one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Departure {
    pub destination: String,
    pub abbreviation: String,
    pub limited: String,
    pub estimate: Vec<Estimate>,
}

impl Departure {
    /// The soonest estimate, if any.
    pub fn first_estimate(&self) -> Option<&Estimate> {
        self.estimate.first()
    }
}

/// The departure board of one station, as returned by the ETD endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDepartures {
    pub name: String,
    pub abbr: String,
    pub departures: Vec<Departure>,
}

/// A train inferred from a departure estimate.
///
/// BART does not publish train positions. A `Train` is a best-effort
/// projection of one estimate at one station, matched to a route so the
/// next stop can be guessed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Train {
    pub train_id: String,
    pub current_station: String,
    pub current_station_name: String,
    pub next_station: Option<String>,
    pub destination: String,
    pub destination_abbr: String,
    pub minutes: Eta,
    pub platform: String,
    pub direction: String,
    pub color: String,
    pub hexcolor: String,
    /// Name of the matched route, when one was found.
    pub route: Option<String>,
    /// Position of the current station, when it is plottable.
    pub position: Option<Coordinate>,
}
