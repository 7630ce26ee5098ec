//! Two-stage decoding of BART response bodies.
//!
//! Stage one deserializes the body into the strict DTOs in `types.rs`.
//! If that fails, stage two runs the matching extractor from `lenient.rs`
//! over the same parsed value. The caller learns which stage succeeded
//! through [`Parsed`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    ApiVersion, FareInfo, Holiday, Route, RouteSchedule, RouteSummary, Station, StationAccess,
    StationDepartures, StationInfo, StationSchedule, SystemAlert, Trip,
};

use super::convert;
use super::error::BartError;
use super::lenient;
use super::types::Envelope;

/// A decoded record and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// The body matched the expected schema.
    Strict(T),
    /// The body needed best-effort extraction.
    Lenient(T),
}

impl<T> Parsed<T> {
    pub fn into_inner(self) -> T {
        match self {
            Parsed::Strict(value) | Parsed::Lenient(value) => value,
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Parsed::Strict(_))
    }
}

fn decode<D, T>(
    endpoint: &'static str,
    body: &str,
    strict: impl FnOnce(D) -> Option<T>,
    lenient: impl FnOnce(&Value) -> Option<T>,
) -> Result<Parsed<T>, BartError>
where
    D: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body).map_err(|e| BartError::json(e, body))?;

    let strict_err = match Envelope::<D>::deserialize(&value) {
        Ok(envelope) => match strict(envelope.root) {
            Some(record) => return Ok(Parsed::Strict(record)),
            None => "record node is empty".to_string(),
        },
        Err(e) => e.to_string(),
    };

    let root = value.get("root").unwrap_or(&Value::Null);

    if let Some(message) = lenient::upstream_error(root) {
        return Err(BartError::Schema { endpoint, message });
    }

    match lenient(root) {
        Some(record) => {
            debug!(endpoint, error = %strict_err, "strict parse failed, used lenient extraction");
            Ok(Parsed::Lenient(record))
        }
        None => Err(BartError::Schema {
            endpoint,
            message: strict_err,
        }),
    }
}

pub fn stations(body: &str) -> Result<Parsed<Vec<Station>>, BartError> {
    decode("stns", body, |r| Some(convert::stations(r)), lenient::stations)
}

pub fn station_info(body: &str) -> Result<Parsed<StationInfo>, BartError> {
    decode("stninfo", body, convert::station_info, lenient::station_info)
}

pub fn station_access(body: &str) -> Result<Parsed<StationAccess>, BartError> {
    decode("stnaccess", body, convert::station_access, lenient::station_access)
}

pub fn departures(body: &str) -> Result<Parsed<Vec<StationDepartures>>, BartError> {
    decode("etd", body, |r| Some(convert::departures(r)), lenient::departures)
}

pub fn routes(body: &str) -> Result<Parsed<Vec<RouteSummary>>, BartError> {
    decode("routes", body, |r| Some(convert::routes(r)), lenient::routes)
}

pub fn route_info(body: &str) -> Result<Parsed<Route>, BartError> {
    decode("routeinfo", body, convert::route_info, lenient::route_info)
}

/// Service advisories and elevator notices share one shape.
pub fn advisories(body: &str) -> Result<Parsed<Vec<SystemAlert>>, BartError> {
    decode("bsa", body, |r| Some(convert::advisories(r)), lenient::advisories)
}

pub fn train_count(body: &str) -> Result<Parsed<u32>, BartError> {
    decode("count", body, convert::train_count, lenient::train_count)
}

pub fn fare(body: &str) -> Result<Parsed<FareInfo>, BartError> {
    decode("fare", body, convert::fare, lenient::fare)
}

pub fn trips(body: &str) -> Result<Parsed<Vec<Trip>>, BartError> {
    decode("trip", body, convert::trips, lenient::trips)
}

pub fn holidays(body: &str) -> Result<Parsed<Vec<Holiday>>, BartError> {
    decode("holiday", body, |r| Some(convert::holidays(r)), lenient::holidays)
}

pub fn station_schedule(body: &str) -> Result<Parsed<StationSchedule>, BartError> {
    decode(
        "stnsched",
        body,
        convert::station_schedule,
        lenient::station_schedule,
    )
}

pub fn route_schedule(body: &str) -> Result<Parsed<RouteSchedule>, BartError> {
    decode(
        "routesched",
        body,
        convert::route_schedule,
        lenient::route_schedule,
    )
}

pub fn version(body: &str) -> Result<Parsed<ApiVersion>, BartError> {
    decode("ver", body, convert::version, lenient::version)
}
