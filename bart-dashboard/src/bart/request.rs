//! Request descriptions for every BART endpoint the dashboard uses.

use reqwest::Url;

use super::error::BartError;

/// Station abbreviation that asks the ETD endpoint for every station.
pub const ALL_STATIONS: &str = "ALL";

/// Origin, destination and optional time/date for a trip query.
///
/// Values are passed through as typed; the API validates formats
/// (`h:mm+am/pm`, `mm/dd/yyyy`, `now`, `today`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripQuery {
    pub origin: String,
    pub destination: String,
    pub time: Option<String>,
    pub date: Option<String>,
}

impl TripQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            time: None,
            date: None,
        }
    }

    pub fn at_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// One call to the legacy BART API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiRequest {
    Stations,
    StationInfo { station: String },
    StationAccess { station: String },
    /// Use [`ALL_STATIONS`] for every station at once.
    Departures { station: String },
    Routes,
    RouteInfo { route: String },
    Alerts,
    ElevatorStatus,
    TrainCount,
    Fare { origin: String, destination: String },
    TripByDeparture(TripQuery),
    TripByArrival(TripQuery),
    Holidays,
    StationSchedule { station: String, date: Option<String> },
    RouteSchedule { route: String, date: Option<String> },
    Version,
}

impl ApiRequest {
    /// The `.aspx` resource the command belongs to.
    pub fn path(&self) -> &'static str {
        match self {
            ApiRequest::Stations
            | ApiRequest::StationInfo { .. }
            | ApiRequest::StationAccess { .. } => "stn.aspx",
            ApiRequest::Departures { .. } => "etd.aspx",
            ApiRequest::Routes | ApiRequest::RouteInfo { .. } => "route.aspx",
            ApiRequest::Alerts | ApiRequest::ElevatorStatus | ApiRequest::TrainCount => "bsa.aspx",
            ApiRequest::Fare { .. }
            | ApiRequest::TripByDeparture(_)
            | ApiRequest::TripByArrival(_)
            | ApiRequest::Holidays
            | ApiRequest::StationSchedule { .. }
            | ApiRequest::RouteSchedule { .. } => "sched.aspx",
            ApiRequest::Version => "version.aspx",
        }
    }

    /// The `cmd` query parameter. Also the name used in logs and metrics.
    pub fn cmd(&self) -> &'static str {
        match self {
            ApiRequest::Stations => "stns",
            ApiRequest::StationInfo { .. } => "stninfo",
            ApiRequest::StationAccess { .. } => "stnaccess",
            ApiRequest::Departures { .. } => "etd",
            ApiRequest::Routes => "routes",
            ApiRequest::RouteInfo { .. } => "routeinfo",
            ApiRequest::Alerts => "bsa",
            ApiRequest::ElevatorStatus => "elev",
            ApiRequest::TrainCount => "count",
            ApiRequest::Fare { .. } => "fare",
            ApiRequest::TripByDeparture(_) => "depart",
            ApiRequest::TripByArrival(_) => "arrive",
            ApiRequest::Holidays => "holiday",
            ApiRequest::StationSchedule { .. } => "stnsched",
            ApiRequest::RouteSchedule { .. } => "routesched",
            ApiRequest::Version => "ver",
        }
    }

    /// Command-specific query parameters, excluding `cmd`, `key` and `json`.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        match self {
            ApiRequest::StationInfo { station }
            | ApiRequest::StationAccess { station }
            | ApiRequest::Departures { station } => params.push(("orig", station.as_str())),
            ApiRequest::RouteInfo { route } => params.push(("route", route.as_str())),
            ApiRequest::Fare {
                origin,
                destination,
            } => {
                params.push(("orig", origin.as_str()));
                params.push(("dest", destination.as_str()));
            }
            ApiRequest::TripByDeparture(query) | ApiRequest::TripByArrival(query) => {
                params.push(("orig", query.origin.as_str()));
                params.push(("dest", query.destination.as_str()));
                if let Some(time) = &query.time {
                    params.push(("time", time.as_str()));
                }
                if let Some(date) = &query.date {
                    params.push(("date", date.as_str()));
                }
            }
            ApiRequest::StationSchedule { station, date } => {
                params.push(("orig", station.as_str()));
                if let Some(date) = date {
                    params.push(("date", date.as_str()));
                }
            }
            ApiRequest::RouteSchedule { route, date } => {
                params.push(("route", route.as_str()));
                if let Some(date) = date {
                    params.push(("date", date.as_str()));
                }
            }
            ApiRequest::Stations
            | ApiRequest::Routes
            | ApiRequest::Alerts
            | ApiRequest::ElevatorStatus
            | ApiRequest::TrainCount
            | ApiRequest::Holidays
            | ApiRequest::Version => {}
        }
        params
    }

    /// The main argument, used to key mock responses and in logs.
    pub fn arg(&self) -> Option<&str> {
        self.params().first().map(|(_, value)| *value)
    }

    /// Full request URL, with the key and `json=y` appended.
    pub fn url(&self, base_url: &str, api_key: &str) -> Result<Url, BartError> {
        let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), self.path());
        let mut query = vec![("cmd", self.cmd())];
        query.extend(self.params());
        query.push(("key", api_key));
        query.push(("json", "y"));

        Url::parse_with_params(&endpoint, &query)
            .map_err(|e| BartError::InvalidConfig(format!("bad base URL {base_url:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn departures_url() {
        let url = ApiRequest::Departures {
            station: "EMBR".into(),
        }
        .url("https://api.bart.gov/api", "KEY")
        .unwrap();

        assert_eq!(url.path(), "/api/etd.aspx");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("cmd".into(), "etd".into()),
                ("orig".into(), "EMBR".into()),
                ("key".into(), "KEY".into()),
                ("json".into(), "y".into()),
            ]
        );
    }

    #[test]
    fn trip_url_carries_optional_time_and_date() {
        let query = TripQuery::new("EMBR", "DALY").at_time("9:30am");
        let url = ApiRequest::TripByArrival(query)
            .url("https://api.bart.gov/api/", "KEY")
            .unwrap();

        assert_eq!(url.path(), "/api/sched.aspx");
        let pairs = query_pairs(&url);
        assert!(pairs.contains(&("cmd".into(), "arrive".into())));
        assert!(pairs.contains(&("time".into(), "9:30am".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "date"));
    }

    #[test]
    fn free_text_is_encoded() {
        let url = ApiRequest::RouteInfo {
            route: "1&cmd=x".into(),
        }
        .url("https://api.bart.gov/api", "KEY")
        .unwrap();
        let pairs = query_pairs(&url);
        assert!(pairs.contains(&("route".into(), "1&cmd=x".into())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "cmd").count(), 1);
    }

    #[test]
    fn bad_base_url() {
        assert!(matches!(
            ApiRequest::Stations.url("not a url", "KEY"),
            Err(BartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn every_command_has_a_resource() {
        let all = [
            ApiRequest::Stations,
            ApiRequest::Routes,
            ApiRequest::Alerts,
            ApiRequest::ElevatorStatus,
            ApiRequest::TrainCount,
            ApiRequest::Holidays,
            ApiRequest::Version,
        ];
        for req in all {
            assert!(req.path().ends_with(".aspx"));
            assert!(req.arg().is_none());
        }
    }
}
