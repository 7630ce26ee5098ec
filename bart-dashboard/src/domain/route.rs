//! Route records.

use serde::Serialize;

/// An entry in the route list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub abbr: String,
    pub route_id: String,
    pub number: String,
    /// Colour name, e.g. "YELLOW".
    pub color: String,
    pub hexcolor: String,
}

/// A route with its ordered stop sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub name: String,
    pub number: String,
    /// Colour name, e.g. "YELLOW".
    pub color_name: String,
    pub hexcolor: String,
    /// Station abbreviations in physical stop order.
    pub stations: Vec<String>,
}

impl Route {
    /// Index of a station in the stop sequence.
    pub fn position_of(&self, abbr: &str) -> Option<usize> {
        self.stations.iter().position(|s| s.eq_ignore_ascii_case(abbr))
    }

    /// First and last stops, if the route has at least two.
    pub fn termini(&self) -> Option<(&str, &str)> {
        match self.stations.as_slice() {
            [first, .., last] => Some((first.as_str(), last.as_str())),
            _ => None,
        }
    }
}
