//! Data transfer objects for web requests and responses.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::density::{DensityPoint, DensityTimeline};
use crate::domain::{Departure, FareInfo, SystemStatus, Train};
use crate::lines::LineStatus;
use crate::metrics::CallMetric;
use crate::planner::{PlanRequest, TripMode};

/// Query for the map render model.
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    /// Abbreviation of the station whose popup is open
    pub selected: Option<String>,
}

/// Query for stations near a point.
#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,

    /// Search radius in km (defaults to 10)
    pub radius: Option<f64>,
}

/// Query for line search.
#[derive(Debug, Default, Deserialize)]
pub struct LinesQuery {
    #[serde(default)]
    pub q: String,
}

/// Trip planning parameters, from a query string or a JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct PlanTripRequest {
    /// Origin station abbreviation
    #[serde(default, alias = "origin")]
    pub orig: String,

    /// Destination station abbreviation
    #[serde(default, alias = "destination")]
    pub dest: String,

    /// e.g. `9:30am` (defaults to now)
    pub time: Option<String>,

    /// e.g. `10/17/2026` or `today`
    pub date: Option<String>,

    #[serde(default)]
    pub mode: TripMode,
}

impl From<PlanTripRequest> for PlanRequest {
    fn from(req: PlanTripRequest) -> Self {
        PlanRequest {
            origin: req.orig,
            destination: req.dest,
            time: req.time,
            date: req.date,
            mode: req.mode,
        }
    }
}

/// Query for a fare.
#[derive(Debug, Default, Deserialize)]
pub struct FareQuery {
    #[serde(default)]
    pub orig: String,
    #[serde(default)]
    pub dest: String,
}

/// Fare lookup result.
#[derive(Debug, Serialize)]
pub struct FareResponse {
    /// `$4.40` or `Unavailable`
    pub fare: String,

    /// Full fare breakdown, when BART returned one
    pub details: Option<Arc<FareInfo>>,
}

/// Optional schedule date.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    pub date: Option<String>,
}

/// Query for the density overlay: the page's timeline state.
#[derive(Debug, Default, Deserialize)]
pub struct DensityQuery {
    /// Hour of day (defaults to the current hour)
    pub hour: Option<u8>,

    #[serde(default)]
    pub visible: bool,

    #[serde(default)]
    pub playing: bool,

    /// Advance the timeline one hour before picking points
    #[serde(default)]
    pub step: bool,
}

/// Heat map points around the timeline's hour.
#[derive(Debug, Serialize)]
pub struct DensityResponse {
    pub timeline: DensityTimeline,
    pub points: Vec<DensityPoint>,
}

/// Departures for one station.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    pub station: String,
    pub departures: Arc<Vec<Departure>>,

    /// When the departures were fetched
    pub refreshed_at: DateTime<Utc>,
}

/// Live train positions.
#[derive(Debug, Serialize)]
pub struct TrainsResponse {
    pub trains: Arc<Vec<Train>>,

    /// When the positions were inferred
    pub refreshed_at: DateTime<Utc>,
}

/// System status with its refresh time.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: Arc<SystemStatus>,

    pub refreshed_at: DateTime<Utc>,
}

/// Matching lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineStatus>,
}

/// Request to drop cached data.
#[derive(Debug, Default, Deserialize)]
pub struct InvalidateRequest {
    /// One of the cache tags; every tag when absent
    pub tag: Option<String>,
}

/// Tags that were invalidated.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: Vec<&'static str>,
}

/// Recent data-layer call timings.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub recording: bool,
    pub calls: Vec<CallMetric>,
}

/// Change the metrics overlay's recording state.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsControl {
    pub recording: Option<bool>,

    /// Drop everything recorded so far
    #[serde(default)]
    pub clear: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
