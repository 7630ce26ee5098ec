//! Typed BART API client.
//!
//! Each method builds a request, fetches the body through the configured
//! [`Fetcher`] and decodes it into domain records. Errors are returned, not
//! swallowed; `TransitData` decides what a failure degrades to.

use std::sync::Arc;

use tracing::trace;

use crate::domain::{
    ApiVersion, Departure, FareInfo, Holiday, Route, RouteSchedule, RouteSummary, Station,
    StationAccess, StationDepartures, StationInfo, StationSchedule, SystemAlert, Train, Trip,
};

use super::decode::{self, Parsed};
use super::error::BartError;
use super::fetch::{BartConfig, Fetcher, HttpFetcher};
use super::request::{ALL_STATIONS, ApiRequest, TripQuery};
use super::trains::synthesize_trains;

/// BART API client.
#[derive(Clone)]
pub struct BartClient {
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for BartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BartClient").finish_non_exhaustive()
    }
}

impl BartClient {
    /// Create a client for the live API.
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        Ok(Self::with_fetcher(HttpFetcher::new(config)?))
    }

    /// Create a client over any fetcher, e.g. a [`MockFetcher`](super::MockFetcher).
    pub fn with_fetcher(fetcher: impl Fetcher + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    async fn get<T>(
        &self,
        request: ApiRequest,
        decode: fn(&str) -> Result<Parsed<T>, BartError>,
    ) -> Result<T, BartError> {
        let body = self.fetcher.fetch(&request).await?;
        let parsed = decode(&body)?;
        trace!(cmd = request.cmd(), strict = parsed.is_strict(), "decoded");
        Ok(parsed.into_inner())
    }

    pub async fn stations(&self) -> Result<Vec<Station>, BartError> {
        self.get(ApiRequest::Stations, decode::stations).await
    }

    pub async fn station_info(&self, station: &str) -> Result<StationInfo, BartError> {
        let request = ApiRequest::StationInfo {
            station: station.to_string(),
        };
        self.get(request, decode::station_info).await
    }

    pub async fn station_access(&self, station: &str) -> Result<StationAccess, BartError> {
        let request = ApiRequest::StationAccess {
            station: station.to_string(),
        };
        self.get(request, decode::station_access).await
    }

    /// Departure boards for one station, or every station with [`ALL_STATIONS`].
    pub async fn departure_boards(
        &self,
        station: &str,
    ) -> Result<Vec<StationDepartures>, BartError> {
        let request = ApiRequest::Departures {
            station: station.to_string(),
        };
        self.get(request, decode::departures).await
    }

    /// Upcoming departures from one station.
    pub async fn departures(&self, station: &str) -> Result<Vec<Departure>, BartError> {
        let boards = self.departure_boards(station).await?;
        Ok(boards
            .into_iter()
            .next()
            .map(|board| board.departures)
            .unwrap_or_default())
    }

    pub async fn routes(&self) -> Result<Vec<RouteSummary>, BartError> {
        self.get(ApiRequest::Routes, decode::routes).await
    }

    pub async fn route_info(&self, route: &str) -> Result<Route, BartError> {
        let request = ApiRequest::RouteInfo {
            route: route.to_string(),
        };
        self.get(request, decode::route_info).await
    }

    pub async fn alerts(&self) -> Result<Vec<SystemAlert>, BartError> {
        self.get(ApiRequest::Alerts, decode::advisories).await
    }

    pub async fn elevator_status(&self) -> Result<Vec<SystemAlert>, BartError> {
        self.get(ApiRequest::ElevatorStatus, decode::advisories).await
    }

    pub async fn train_count(&self) -> Result<u32, BartError> {
        self.get(ApiRequest::TrainCount, decode::train_count).await
    }

    /// Trains inferred from every station's departures.
    ///
    /// `routes` must carry stop sequences and `stations` coordinates.
    pub async fn train_locations(
        &self,
        routes: &[Route],
        stations: &[Station],
    ) -> Result<Vec<Train>, BartError> {
        let boards = self.departure_boards(ALL_STATIONS).await?;
        Ok(synthesize_trains(&boards, routes, stations))
    }

    pub async fn fare(&self, origin: &str, destination: &str) -> Result<FareInfo, BartError> {
        let request = ApiRequest::Fare {
            origin: origin.to_string(),
            destination: destination.to_string(),
        };
        self.get(request, decode::fare).await
    }

    pub async fn trip_by_departure(&self, query: TripQuery) -> Result<Vec<Trip>, BartError> {
        self.get(ApiRequest::TripByDeparture(query), decode::trips).await
    }

    pub async fn trip_by_arrival(&self, query: TripQuery) -> Result<Vec<Trip>, BartError> {
        self.get(ApiRequest::TripByArrival(query), decode::trips).await
    }

    pub async fn holidays(&self) -> Result<Vec<Holiday>, BartError> {
        self.get(ApiRequest::Holidays, decode::holidays).await
    }

    pub async fn station_schedule(
        &self,
        station: &str,
        date: Option<&str>,
    ) -> Result<StationSchedule, BartError> {
        let request = ApiRequest::StationSchedule {
            station: station.to_string(),
            date: date.map(str::to_string),
        };
        self.get(request, decode::station_schedule).await
    }

    pub async fn route_schedule(
        &self,
        route: &str,
        date: Option<&str>,
    ) -> Result<RouteSchedule, BartError> {
        let request = ApiRequest::RouteSchedule {
            route: route.to_string(),
            date: date.map(str::to_string),
        };
        let mut schedule = self.get(request, decode::route_schedule).await?;
        schedule.number = route.to_string();
        Ok(schedule)
    }

    pub async fn api_version(&self) -> Result<ApiVersion, BartError> {
        self.get(ApiRequest::Version, decode::version).await
    }
}
