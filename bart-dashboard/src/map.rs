//! Map render model.
//!
//! Turns stations, routes and departures into what the Leaflet page draws:
//! polylines, markers and the popup for the selected station.

use std::collections::HashMap;

use serde::Serialize;

use crate::density::CrowdingLevel;
use crate::domain::{Departure, Route, Station, normalize_hex};
use crate::geo::Coordinate;

pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 37.7749,
    lon: -122.4194,
};
pub const DEFAULT_ZOOM: u8 = 12;

/// Departures listed in a popup before the rest are summarised.
pub const POPUP_DEPARTURES: usize = 5;

const SELECTED_SIZE: u8 = 16;
const SELECTED_COLOR: &str = "#ffffff";
const MARKER_SIZE: u8 = 12;
const MARKER_COLOR: &str = "#00ff00";
const NO_ESTIMATE: &str = "N/A";
const DEPARTURE_FALLBACK_COLOR: &str = "#FFFFFF";

/// A route drawn as a line through its stations, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLine {
    pub name: String,
    pub number: String,
    pub color: String,
    pub points: Vec<[f64; 2]>,
}

/// Polylines for every route with at least two plottable stations.
///
/// Stations missing from `stations` or with unusable coordinates are
/// skipped rather than breaking the line.
pub fn route_lines(routes: &[Route], stations: &[Station]) -> Vec<RouteLine> {
    let positions: HashMap<&str, Coordinate> = stations
        .iter()
        .filter_map(|s| Some((s.abbr.as_str(), s.coordinate()?)))
        .collect();

    routes
        .iter()
        .filter_map(|route| {
            let points: Vec<[f64; 2]> = route
                .stations
                .iter()
                .filter_map(|abbr| positions.get(abbr.as_str()))
                .map(Coordinate::as_pair)
                .collect();

            (points.len() >= 2).then(|| RouteLine {
                name: route.name.clone(),
                number: route.number.clone(),
                color: normalize_hex(&route.hexcolor),
                points,
            })
        })
        .collect()
}

/// Dots drawn around a marker to show how busy a station is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrowdDots {
    pub count: u8,
    pub color: &'static str,
}

impl CrowdDots {
    pub fn for_level(level: CrowdingLevel) -> Option<Self> {
        match level {
            CrowdingLevel::Low => None,
            CrowdingLevel::Moderate => Some(Self {
                count: 6,
                color: "#f59e0b",
            }),
            CrowdingLevel::High => Some(Self {
                count: 12,
                color: "#ef4444",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub abbr: String,
    pub name: String,
    pub position: Coordinate,
    pub selected: bool,
    pub size: u8,
    pub color: &'static str,
    pub crowding: CrowdingLevel,
    pub dots: Option<CrowdDots>,
}

/// One marker per plottable station.
///
/// `crowding` is asked once for each station that gets a marker.
pub fn station_markers(
    stations: &[Station],
    selected: Option<&str>,
    mut crowding: impl FnMut(&Station) -> CrowdingLevel,
) -> Vec<StationMarker> {
    stations
        .iter()
        .filter_map(|station| {
            let position = station.coordinate()?;
            let selected = selected.is_some_and(|abbr| abbr.eq_ignore_ascii_case(&station.abbr));
            let level = crowding(station);
            Some(StationMarker {
                abbr: station.abbr.clone(),
                name: station.name.clone(),
                position,
                selected,
                size: if selected { SELECTED_SIZE } else { MARKER_SIZE },
                color: if selected { SELECTED_COLOR } else { MARKER_COLOR },
                crowding: level,
                dots: CrowdDots::for_level(level),
            })
        })
        .collect()
}

/// One line in a station popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupDeparture {
    pub destination: String,
    /// `Leaving`, `N min` or `N/A`.
    pub minutes: String,
    pub color: String,
}

impl From<&Departure> for PopupDeparture {
    fn from(departure: &Departure) -> Self {
        let first = departure.first_estimate();
        let destination = if departure.destination.trim().is_empty() {
            "Unknown".to_string()
        } else {
            departure.destination.clone()
        };
        Self {
            destination,
            minutes: first.map_or_else(|| NO_ESTIMATE.to_string(), |e| e.minutes.label()),
            color: first
                .map(|e| e.hexcolor.clone())
                .filter(|hex| !hex.is_empty())
                .unwrap_or_else(|| DEPARTURE_FALLBACK_COLOR.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PopupDepartures {
    /// Selected, but no departures have arrived yet.
    Loading,
    Empty,
    Ready {
        departures: Vec<PopupDeparture>,
        /// `+ N more destinations`, when the list was cut short.
        more: Option<String>,
    },
}

impl PopupDepartures {
    pub fn from_departures(departures: Option<&[Departure]>) -> Self {
        match departures {
            None => PopupDepartures::Loading,
            Some([]) => PopupDepartures::Empty,
            Some(all) => {
                let hidden = all.len().saturating_sub(POPUP_DEPARTURES);
                PopupDepartures::Ready {
                    departures: all
                        .iter()
                        .take(POPUP_DEPARTURES)
                        .map(PopupDeparture::from)
                        .collect(),
                    more: (hidden > 0).then(|| format!("+ {hidden} more destinations")),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPopup {
    pub abbr: String,
    pub name: String,
    pub address: String,
    /// `City, ST`
    pub locality: String,
    pub departures: PopupDepartures,
}

pub fn station_popup(station: &Station, departures: Option<&[Departure]>) -> StationPopup {
    StationPopup {
        abbr: station.abbr.clone(),
        name: station.name.clone(),
        address: station.address.clone(),
        locality: format!("{}, {}", station.city, station.state),
        departures: PopupDepartures::from_departures(departures),
    }
}

/// Everything the dashboard map draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub routes: Vec<RouteLine>,
    pub stations: Vec<StationMarker>,
    pub popup: Option<StationPopup>,
}

impl MapView {
    /// Build the map. The popup is for `selected`, if that station exists.
    pub fn build(
        stations: &[Station],
        routes: &[Route],
        selected: Option<&str>,
        departures: Option<&[Departure]>,
        crowding: impl FnMut(&Station) -> CrowdingLevel,
    ) -> Self {
        let popup = selected
            .and_then(|abbr| stations.iter().find(|s| s.abbr.eq_ignore_ascii_case(abbr)))
            .map(|station| station_popup(station, departures));

        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            routes: route_lines(routes, stations),
            stations: station_markers(stations, selected, crowding),
            popup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Estimate, Eta};

    fn station(abbr: &str, lat: &str, lon: &str) -> Station {
        Station {
            name: format!("{abbr} Station"),
            abbr: abbr.to_string(),
            gtfs_latitude: lat.to_string(),
            gtfs_longitude: lon.to_string(),
            address: "1 Main St".into(),
            city: "San Francisco".into(),
            county: String::new(),
            state: "CA".into(),
            zipcode: String::new(),
            etd: None,
        }
    }

    fn route(hex: &str, stops: &[&str]) -> Route {
        Route {
            name: "Test Line".into(),
            number: "1".into(),
            color_name: "RED".into(),
            hexcolor: hex.into(),
            stations: stops.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn departure(destination: &str, minutes: &str) -> Departure {
        Departure {
            destination: destination.into(),
            abbreviation: String::new(),
            limited: "0".into(),
            estimate: vec![Estimate {
                minutes: Eta::parse(minutes),
                platform: "1".into(),
                direction: "South".into(),
                length: "8".into(),
                color: "RED".into(),
                hexcolor: "#ff0000".into(),
                bikeflag: "1".into(),
                delay: "0".into(),
            }],
        }
    }

    fn stations() -> Vec<Station> {
        vec![
            station("EMBR", "37.792874", "-122.397020"),
            station("MONT", "37.789405", "-122.401066"),
            station("POWL", "37.784471", "-122.407974"),
        ]
    }

    #[test]
    fn polyline_points_follow_route_order() {
        let lines = route_lines(&[route("ff0000", &["POWL", "EMBR", "MONT"])], &stations());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].color, "#ff0000");
        assert_eq!(
            lines[0].points,
            vec![
                [37.784471, -122.407974],
                [37.792874, -122.397020],
                [37.789405, -122.401066],
            ]
        );
    }

    #[test]
    fn unresolved_stations_are_skipped() {
        let lines = route_lines(&[route("#339933", &["EMBR", "XXXX", "POWL"])], &stations());
        assert_eq!(lines[0].points.len(), 2);
    }

    #[test]
    fn short_routes_have_no_polyline() {
        let routes = [route("#339933", &["EMBR", "XXXX"]), route("#339933", &[])];
        assert!(route_lines(&routes, &stations()).is_empty());
    }

    #[test]
    fn blank_route_color_falls_back() {
        let lines = route_lines(&[route("", &["EMBR", "MONT"])], &stations());
        assert_eq!(lines[0].color, "#CCCCCC");
    }

    #[test]
    fn invalid_coordinates_get_no_marker() {
        let mut all = stations();
        all.push(station("BAD", "invalid", "-122.4"));

        let markers = station_markers(&all, None, |_| CrowdingLevel::Low);
        assert_eq!(markers.len(), 3);
        assert!(markers.iter().all(|m| m.abbr != "BAD"));

        let lines = route_lines(&[route("#ff0000", &["BAD", "EMBR"])], &all);
        assert!(lines.is_empty());
    }

    #[test]
    fn selected_marker_is_larger_and_white() {
        let markers = station_markers(&stations(), Some("mont"), |_| CrowdingLevel::Low);
        let selected: Vec<&StationMarker> = markers.iter().filter(|m| m.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].abbr, "MONT");
        assert_eq!((selected[0].size, selected[0].color), (16, "#ffffff"));

        let other = markers.iter().find(|m| m.abbr == "EMBR").unwrap();
        assert_eq!((other.size, other.color), (12, "#00ff00"));
    }

    #[test]
    fn crowd_dots_by_level() {
        let markers = station_markers(&stations(), None, |s| match s.abbr.as_str() {
            "EMBR" => CrowdingLevel::High,
            "MONT" => CrowdingLevel::Moderate,
            _ => CrowdingLevel::Low,
        });
        let dots: Vec<Option<CrowdDots>> = markers.iter().map(|m| m.dots).collect();
        assert_eq!(
            dots,
            vec![
                Some(CrowdDots {
                    count: 12,
                    color: "#ef4444"
                }),
                Some(CrowdDots {
                    count: 6,
                    color: "#f59e0b"
                }),
                None,
            ]
        );
    }

    #[test]
    fn popup_shows_first_five_departures() {
        let departures: Vec<Departure> = ["Leaving", "3", "7", "12", "15", "20", "25"]
            .iter()
            .enumerate()
            .map(|(i, m)| departure(&format!("Dest {i}"), m))
            .collect();

        let popup = station_popup(&stations()[0], Some(departures.as_slice()));
        assert_eq!(popup.locality, "San Francisco, CA");
        let PopupDepartures::Ready { departures, more } = popup.departures else {
            panic!("expected departures");
        };
        assert_eq!(departures.len(), 5);
        assert_eq!(departures[0].minutes, "Leaving");
        assert_eq!(departures[1].minutes, "3 min");
        assert_eq!(departures[1].color, "#ff0000");
        assert_eq!(more.as_deref(), Some("+ 2 more destinations"));
    }

    #[test]
    fn popup_states() {
        let embr = &stations()[0];
        assert_eq!(station_popup(embr, None).departures, PopupDepartures::Loading);
        assert_eq!(station_popup(embr, Some(&[][..])).departures, PopupDepartures::Empty);

        let mut no_estimate = departure("", "5");
        no_estimate.estimate.clear();
        let PopupDepartures::Ready { departures, more } =
            station_popup(embr, Some(std::slice::from_ref(&no_estimate))).departures
        else {
            panic!("expected departures");
        };
        assert_eq!(departures[0].destination, "Unknown");
        assert_eq!(departures[0].minutes, "N/A");
        assert_eq!(departures[0].color, "#FFFFFF");
        assert!(more.is_none());
    }

    #[test]
    fn map_view_defaults() {
        let view = MapView::build(
            &stations(),
            &[route("#0099cc", &["EMBR", "MONT", "POWL"])],
            Some("POWL"),
            None,
            |_| CrowdingLevel::Low,
        );
        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, 12);
        assert_eq!(view.routes.len(), 1);
        assert_eq!(view.popup.unwrap().name, "POWL Station");

        let json = serde_json::to_value(
            MapView::build(&stations(), &[], Some("NOPE"), None, |_| CrowdingLevel::Low),
        )
        .unwrap();
        assert!(json["popup"].is_null());
    }
}
