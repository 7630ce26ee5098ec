//! Trip planner.
//!
//! Validates an origin/destination pair, asks BART for itineraries and the
//! fare, and resolves codes into names and line colours for display.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bart::TripQuery;
use crate::cache::TransitData;
use crate::domain::{FareInfo, Route, Station, Trip, TripLeg, normalize_hex};

const UNKNOWN_TIME: &str = "N/A";
const FARE_UNAVAILABLE: &str = "Unavailable";
const LEG_FALLBACK_COLOR: &str = "#666666";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Please select both origin and destination stations")]
    MissingStation,

    #[error("Origin and destination cannot be the same")]
    SameStation,
}

/// Whether the requested time is when to leave or when to arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripMode {
    #[default]
    Depart,
    Arrive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    pub time: Option<String>,
    pub date: Option<String>,
    pub mode: TripMode,
}

impl PlanRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Normalised station codes, or why they cannot be planned between.
    pub fn validate(&self) -> Result<(String, String), PlanError> {
        let origin = self.origin.trim().to_ascii_uppercase();
        let destination = self.destination.trim().to_ascii_uppercase();

        if origin.is_empty() || destination.is_empty() {
            return Err(PlanError::MissingStation);
        }
        if origin == destination {
            return Err(PlanError::SameStation);
        }
        Ok((origin, destination))
    }

    fn query(&self, origin: String, destination: String) -> TripQuery {
        let mut query = TripQuery::new(origin, destination);
        query.time = self.time.clone().filter(|t| !t.trim().is_empty());
        query.date = self.date.clone().filter(|d| !d.trim().is_empty());
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedLeg {
    /// BART's label, e.g. `ROUTE 6`.
    pub line: String,
    /// The route's name when it is known, else the label.
    pub line_name: String,
    pub line_color: String,
    pub origin: String,
    pub origin_name: String,
    pub destination: String,
    pub destination_name: String,
    pub depart: String,
    pub arrive: String,
    pub bikes_allowed: bool,
    pub train_head_station: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTrip {
    pub depart: String,
    pub arrive: String,
    pub trip_time: u32,
    pub transfers: usize,
    pub legs: Vec<PlannedLeg>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub origin: String,
    pub origin_name: String,
    pub destination: String,
    pub destination_name: String,
    /// `$4.40`, or `Unavailable`.
    pub fare: String,
    pub trips: Vec<PlannedTrip>,
}

fn station_name(stations: &[Station], abbr: &str) -> String {
    stations
        .iter()
        .find(|s| s.abbr.eq_ignore_ascii_case(abbr))
        .map_or_else(|| abbr.to_string(), |s| s.name.clone())
}

fn display_time(time: &str) -> String {
    let time = time.trim();
    if time.is_empty() {
        UNKNOWN_TIME.to_string()
    } else {
        time.to_string()
    }
}

pub fn fare_label(fare: Option<&FareInfo>) -> String {
    fare.map(|f| f.fare.trim())
        .filter(|f| !f.is_empty())
        .map_or_else(|| FARE_UNAVAILABLE.to_string(), |f| format!("${f}"))
}

fn plan_leg(leg: &TripLeg, stations: &[Station], routes: &[Route]) -> PlannedLeg {
    let route = leg
        .route_number()
        .and_then(|number| routes.iter().find(|r| r.number == number));

    PlannedLeg {
        line: leg.line.clone(),
        line_name: route.map_or_else(|| leg.line.clone(), |r| r.name.clone()),
        line_color: route.map_or_else(
            || LEG_FALLBACK_COLOR.to_string(),
            |r| normalize_hex(&r.hexcolor),
        ),
        origin: leg.origin.clone(),
        origin_name: station_name(stations, &leg.origin),
        destination: leg.destination.clone(),
        destination_name: station_name(stations, &leg.destination),
        depart: display_time(&leg.orig_time_min),
        arrive: display_time(&leg.dest_time_min),
        bikes_allowed: leg.bike_flag,
        train_head_station: station_name(stations, &leg.train_head_station),
    }
}

/// Render trips and a fare for display.
pub fn build_plan(
    origin: &str,
    destination: &str,
    trips: &[Trip],
    fare: Option<&FareInfo>,
    stations: &[Station],
    routes: &[Route],
) -> TripPlan {
    let trips = trips
        .iter()
        .map(|trip| PlannedTrip {
            depart: display_time(&trip.orig_time_min),
            arrive: display_time(&trip.dest_time_min),
            trip_time: trip.trip_time,
            transfers: trip.transfers(),
            legs: trip
                .legs
                .iter()
                .map(|leg| plan_leg(leg, stations, routes))
                .collect(),
        })
        .collect();

    TripPlan {
        origin: origin.to_string(),
        origin_name: station_name(stations, origin),
        destination: destination.to_string(),
        destination_name: station_name(stations, destination),
        fare: fare_label(fare),
        trips,
    }
}

/// Validate, then fetch trips, fare and the route table concurrently.
///
/// Upstream failures give a plan with no trips or an unavailable fare.
pub async fn plan_trip(data: &TransitData, request: &PlanRequest) -> Result<TripPlan, PlanError> {
    let (origin, destination) = request.validate()?;
    let query = request.query(origin.clone(), destination.clone());

    let trips = async {
        match request.mode {
            TripMode::Depart => data.trip_by_departure(query).await,
            TripMode::Arrive => data.trip_by_arrival(query).await,
        }
    };
    let (trips, fare, app) = tokio::join!(
        trips,
        data.fare(&origin, &destination),
        data.initial_app_data()
    );

    debug!(
        origin = %origin,
        destination = %destination,
        trips = trips.len(),
        "planned trip"
    );
    Ok(build_plan(
        &origin,
        &destination,
        &trips,
        fare.as_deref(),
        &app.stations,
        &app.routes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::{BartClient, MockFetcher, fixtures};
    use crate::cache::CacheConfig;

    fn data() -> TransitData {
        TransitData::new(
            BartClient::with_fetcher(fixtures::mock()),
            &CacheConfig::default(),
        )
    }

    #[test]
    fn validation_messages() {
        let err = PlanRequest::new("EMBR", " ").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select both origin and destination stations"
        );

        let err = PlanRequest::new("embr", "EMBR ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Origin and destination cannot be the same");

        assert_eq!(
            PlanRequest::new(" embr", "daly").validate(),
            Ok(("EMBR".to_string(), "DALY".to_string()))
        );
    }

    #[test]
    fn fare_labels() {
        let mut fare = FareInfo {
            origin: "EMBR".into(),
            destination: "DALY".into(),
            fare: "4.40".into(),
            clipper_discount: String::new(),
            fares: Vec::new(),
        };
        assert_eq!(fare_label(Some(&fare)), "$4.40");
        fare.fare.clear();
        assert_eq!(fare_label(Some(&fare)), "Unavailable");
        assert_eq!(fare_label(None), "Unavailable");
    }

    #[tokio::test]
    async fn embarcadero_to_daly_city() {
        let plan = plan_trip(&data(), &PlanRequest::new("EMBR", "DALY"))
            .await
            .unwrap();

        assert_eq!(plan.origin_name, "Embarcadero");
        assert_eq!(plan.destination_name, "Daly City");
        assert_eq!(plan.fare, "$4.40");
        assert_eq!(plan.trips.len(), 1);

        let trip = &plan.trips[0];
        assert_eq!(trip.trip_time, 22);
        assert_eq!(trip.transfers, 1);
        assert_eq!((trip.depart.as_str(), trip.arrive.as_str()), ("9:02 AM", "9:24 AM"));

        let names: Vec<(&str, &str)> = trip
            .legs
            .iter()
            .map(|l| (l.origin_name.as_str(), l.destination_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("Embarcadero", "Balboa Park"), ("Balboa Park", "Daly City")]
        );
        assert_eq!(trip.legs[0].line_color, "#339933");
        assert_eq!(trip.legs[1].line_color, "#0099cc");
        assert_eq!(trip.legs[0].train_head_station, "Daly City");
        assert!(trip.legs[0].bikes_allowed);
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_the_api() {
        let data = data();
        let err = plan_trip(&data, &PlanRequest::new("", "DALY")).await;
        assert_eq!(err, Err(PlanError::MissingStation));
        assert_eq!(data.entry_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_gives_an_empty_plan() {
        let data = TransitData::new(
            BartClient::with_fetcher(MockFetcher::new()),
            &CacheConfig::default(),
        );
        let plan = plan_trip(&data, &PlanRequest::new("EMBR", "XXXX"))
            .await
            .unwrap();

        assert!(plan.trips.is_empty());
        assert_eq!(plan.fare, "Unavailable");
        assert_eq!(plan.destination_name, "XXXX");
    }

    #[test]
    fn unknown_codes_and_lines_fall_back() {
        let trip = Trip {
            origin: "ZZZZ".into(),
            destination: "DALY".into(),
            fare: String::new(),
            clipper: String::new(),
            orig_time_min: String::new(),
            orig_time_date: String::new(),
            dest_time_min: "9:24 AM".into(),
            dest_time_date: String::new(),
            trip_time: 10,
            legs: vec![TripLeg {
                order: 1,
                transfer_code: String::new(),
                origin: "ZZZZ".into(),
                destination: "DALY".into(),
                orig_time_min: String::new(),
                orig_time_date: String::new(),
                dest_time_min: "9:24 AM".into(),
                dest_time_date: String::new(),
                line: "ROUTE 99".into(),
                bike_flag: false,
                train_head_station: String::new(),
                load: String::new(),
            }],
        };

        let plan = build_plan("ZZZZ", "DALY", &[trip], None, &[], &[]);
        let leg = &plan.trips[0].legs[0];
        assert_eq!(leg.origin_name, "ZZZZ");
        assert_eq!(leg.line_color, "#666666");
        assert_eq!(leg.line_name, "ROUTE 99");
        assert_eq!(leg.depart, "N/A");
        assert_eq!(plan.trips[0].depart, "N/A");
    }
}
