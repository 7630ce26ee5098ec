//! Cached data layer over the BART client.
//!
//! Slow-changing data (stations, routes, fares, schedules) is cached with a
//! per-kind TTL. Live data (departures, train positions, trip plans) is
//! always fetched. Every fetch is timed.
//!
//! This is where errors stop: a failed fetch is logged and degrades to an
//! empty list, `None` or zero, and is not cached.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use moka::future::Cache as MokaCache;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bart::{BartClient, BartError, TripQuery};
use crate::domain::{
    ApiVersion, Departure, FareInfo, Holiday, Route, RouteSchedule, RouteSummary, Station,
    StationAccess, StationInfo, StationSchedule, SystemAlert, SystemStatus, Train, Trip,
};
use crate::metrics::{CallMetric, MetricsSink, NoopSink};

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Groups of cached data that are invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTag {
    Stations,
    Routes,
    Alerts,
    Elevators,
    Trains,
    Fares,
    Schedules,
    Api,
}

impl CacheTag {
    pub const ALL: [CacheTag; 8] = [
        CacheTag::Stations,
        CacheTag::Routes,
        CacheTag::Alerts,
        CacheTag::Elevators,
        CacheTag::Trains,
        CacheTag::Fares,
        CacheTag::Schedules,
        CacheTag::Api,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTag::Stations => "stations",
            CacheTag::Routes => "routes",
            CacheTag::Alerts => "alerts",
            CacheTag::Elevators => "elevators",
            CacheTag::Trains => "trains",
            CacheTag::Fares => "fares",
            CacheTag::Schedules => "schedules",
            CacheTag::Api => "api",
        }
    }
}

/// TTLs for each kind of cached data.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub stations_ttl: Duration,
    pub station_detail_ttl: Duration,
    pub routes_ttl: Duration,
    pub alerts_ttl: Duration,
    pub elevators_ttl: Duration,
    pub train_count_ttl: Duration,
    pub fares_ttl: Duration,
    pub holidays_ttl: Duration,
    pub schedules_ttl: Duration,
    pub version_ttl: Duration,

    /// Maximum entries in each keyed cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stations_ttl: DAY,
            station_detail_ttl: HOUR,
            routes_ttl: DAY,
            alerts_ttl: 5 * MINUTE,
            elevators_ttl: 30 * MINUTE,
            train_count_ttl: MINUTE,
            fares_ttl: DAY,
            holidays_ttl: DAY,
            schedules_ttl: HOUR,
            version_ttl: DAY,
            max_capacity: 1000,
        }
    }
}

fn cache<K, V>(ttl: Duration, max_capacity: u64) -> MokaCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(ttl)
        .max_capacity(max_capacity)
        .build()
}

type DatedKey = (String, Option<String>);

struct Caches {
    stations: MokaCache<(), Arc<Vec<Station>>>,
    station_info: MokaCache<String, Arc<StationInfo>>,
    station_access: MokaCache<String, Arc<StationAccess>>,
    routes: MokaCache<(), Arc<Vec<RouteSummary>>>,
    route_info: MokaCache<String, Arc<Route>>,
    alerts: MokaCache<(), Arc<Vec<SystemAlert>>>,
    elevators: MokaCache<(), Arc<Vec<SystemAlert>>>,
    train_count: MokaCache<(), u32>,
    fares: MokaCache<(String, String), Arc<FareInfo>>,
    holidays: MokaCache<(), Arc<Vec<Holiday>>>,
    station_schedules: MokaCache<DatedKey, Arc<StationSchedule>>,
    route_schedules: MokaCache<DatedKey, Arc<RouteSchedule>>,
    version: MokaCache<(), Arc<ApiVersion>>,
}

impl Caches {
    fn new(config: &CacheConfig) -> Self {
        let cap = config.max_capacity;
        Self {
            stations: cache(config.stations_ttl, 1),
            station_info: cache(config.station_detail_ttl, cap),
            station_access: cache(config.station_detail_ttl, cap),
            routes: cache(config.routes_ttl, 1),
            route_info: cache(config.routes_ttl, cap),
            alerts: cache(config.alerts_ttl, 1),
            elevators: cache(config.elevators_ttl, 1),
            train_count: cache(config.train_count_ttl, 1),
            fares: cache(config.fares_ttl, cap),
            holidays: cache(config.holidays_ttl, 1),
            station_schedules: cache(config.schedules_ttl, cap),
            route_schedules: cache(config.schedules_ttl, cap),
            version: cache(config.version_ttl, 1),
        }
    }

    fn invalidate(&self, tag: CacheTag) {
        match tag {
            CacheTag::Stations => {
                self.stations.invalidate_all();
                self.station_info.invalidate_all();
                self.station_access.invalidate_all();
            }
            CacheTag::Routes => {
                self.routes.invalidate_all();
                self.route_info.invalidate_all();
            }
            CacheTag::Alerts => self.alerts.invalidate_all(),
            CacheTag::Elevators => self.elevators.invalidate_all(),
            CacheTag::Trains => self.train_count.invalidate_all(),
            CacheTag::Fares => self.fares.invalidate_all(),
            CacheTag::Schedules => {
                self.holidays.invalidate_all();
                self.station_schedules.invalidate_all();
                self.route_schedules.invalidate_all();
            }
            CacheTag::Api => self.version.invalidate_all(),
        }
    }

    fn entry_count(&self) -> u64 {
        self.stations.entry_count()
            + self.station_info.entry_count()
            + self.station_access.entry_count()
            + self.routes.entry_count()
            + self.route_info.entry_count()
            + self.alerts.entry_count()
            + self.elevators.entry_count()
            + self.train_count.entry_count()
            + self.fares.entry_count()
            + self.holidays.entry_count()
            + self.station_schedules.entry_count()
            + self.route_schedules.entry_count()
            + self.version.entry_count()
    }
}

/// Stations plus every route with its stop sequence, for first paint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppData {
    pub stations: Arc<Vec<Station>>,
    pub routes: Vec<Route>,
}

/// The data layer the web handlers and pollers use.
pub struct TransitData {
    client: BartClient,
    caches: Caches,
    metrics: Arc<dyn MetricsSink>,
}

impl TransitData {
    pub fn new(client: BartClient, config: &CacheConfig) -> Self {
        Self::with_metrics(client, config, Arc::new(NoopSink))
    }

    pub fn with_metrics(
        client: BartClient,
        config: &CacheConfig,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            client,
            caches: Caches::new(config),
            metrics,
        }
    }

    /// Run a fetch, log how long it took and hand the timing to the sink.
    async fn timed<T>(
        &self,
        name: String,
        fut: impl Future<Output = Result<T, BartError>>,
    ) -> Result<T, BartError> {
        let start = Instant::now();
        let result = fut.await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => debug!(call = %name, ms = duration.as_millis() as u64, "fetched"),
            Err(e) => warn!(call = %name, ms = duration.as_millis() as u64, error = %e, "fetch failed"),
        }

        self.metrics.record(CallMetric {
            name,
            duration,
            success: result.is_ok(),
            recorded_at: Utc::now(),
        });
        result
    }

    /// Look up `key`, fetching and caching on a miss. Failures are not cached.
    async fn cached<K, V>(
        &self,
        cache: &MokaCache<K, V>,
        key: K,
        name: String,
        fetch: impl Future<Output = Result<V, BartError>>,
    ) -> Option<V>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        cache
            .try_get_with(key, self.timed(name, fetch))
            .await
            .ok()
    }

    /// Fetch without caching, degrading to a default on failure.
    async fn live<T: Default>(
        &self,
        name: String,
        fetch: impl Future<Output = Result<T, BartError>>,
    ) -> T {
        self.timed(name, fetch).await.unwrap_or_default()
    }

    pub async fn stations(&self) -> Arc<Vec<Station>> {
        let fetch = async { self.client.stations().await.map(Arc::new) };
        self.cached(&self.caches.stations, (), "stations".into(), fetch)
            .await
            .unwrap_or_default()
    }

    pub async fn station_info(&self, station: &str) -> Option<Arc<StationInfo>> {
        let fetch = async { self.client.station_info(station).await.map(Arc::new) };
        let name = format!("station_info({station})");
        self.cached(&self.caches.station_info, station.to_string(), name, fetch)
            .await
    }

    pub async fn station_access(&self, station: &str) -> Option<Arc<StationAccess>> {
        let fetch = async { self.client.station_access(station).await.map(Arc::new) };
        let name = format!("station_access({station})");
        self.cached(&self.caches.station_access, station.to_string(), name, fetch)
            .await
    }

    /// Live departures; never cached.
    pub async fn departures(&self, station: &str) -> Vec<Departure> {
        self.live(
            format!("departures({station})"),
            self.client.departures(station),
        )
        .await
    }

    pub async fn routes(&self) -> Arc<Vec<RouteSummary>> {
        let fetch = async { self.client.routes().await.map(Arc::new) };
        self.cached(&self.caches.routes, (), "routes".into(), fetch)
            .await
            .unwrap_or_default()
    }

    pub async fn route_info(&self, route: &str) -> Option<Arc<Route>> {
        let fetch = async { self.client.route_info(route).await.map(Arc::new) };
        let name = format!("route_info({route})");
        self.cached(&self.caches.route_info, route.to_string(), name, fetch)
            .await
    }

    pub async fn alerts(&self) -> Arc<Vec<SystemAlert>> {
        let fetch = async { self.client.alerts().await.map(Arc::new) };
        self.cached(&self.caches.alerts, (), "alerts".into(), fetch)
            .await
            .unwrap_or_default()
    }

    pub async fn elevator_status(&self) -> Arc<Vec<SystemAlert>> {
        let fetch = async { self.client.elevator_status().await.map(Arc::new) };
        self.cached(&self.caches.elevators, (), "elevator_status".into(), fetch)
            .await
            .unwrap_or_default()
    }

    pub async fn train_count(&self) -> u32 {
        let fetch = self.client.train_count();
        self.cached(&self.caches.train_count, (), "train_count".into(), fetch)
            .await
            .unwrap_or(0)
    }

    pub async fn fare(&self, origin: &str, destination: &str) -> Option<Arc<FareInfo>> {
        let fetch = async { self.client.fare(origin, destination).await.map(Arc::new) };
        let key = (origin.to_string(), destination.to_string());
        let name = format!("fare({origin}, {destination})");
        self.cached(&self.caches.fares, key, name, fetch).await
    }

    /// Live trip plans; never cached.
    pub async fn trip_by_departure(&self, query: TripQuery) -> Vec<Trip> {
        let name = format!("trip_by_departure({}, {})", query.origin, query.destination);
        self.live(name, self.client.trip_by_departure(query)).await
    }

    /// Live trip plans; never cached.
    pub async fn trip_by_arrival(&self, query: TripQuery) -> Vec<Trip> {
        let name = format!("trip_by_arrival({}, {})", query.origin, query.destination);
        self.live(name, self.client.trip_by_arrival(query)).await
    }

    pub async fn holidays(&self) -> Arc<Vec<Holiday>> {
        let fetch = async { self.client.holidays().await.map(Arc::new) };
        self.cached(&self.caches.holidays, (), "holidays".into(), fetch)
            .await
            .unwrap_or_default()
    }

    pub async fn station_schedule(
        &self,
        station: &str,
        date: Option<&str>,
    ) -> Option<Arc<StationSchedule>> {
        let fetch = async {
            self.client
                .station_schedule(station, date)
                .await
                .map(Arc::new)
        };
        let key = (station.to_string(), date.map(str::to_string));
        let name = format!("station_schedule({station})");
        self.cached(&self.caches.station_schedules, key, name, fetch)
            .await
    }

    pub async fn route_schedule(
        &self,
        route: &str,
        date: Option<&str>,
    ) -> Option<Arc<RouteSchedule>> {
        let fetch = async { self.client.route_schedule(route, date).await.map(Arc::new) };
        let key = (route.to_string(), date.map(str::to_string));
        let name = format!("route_schedule({route})");
        self.cached(&self.caches.route_schedules, key, name, fetch)
            .await
    }

    pub async fn api_version(&self) -> Option<Arc<ApiVersion>> {
        let fetch = async { self.client.api_version().await.map(Arc::new) };
        self.cached(&self.caches.version, (), "api_version".into(), fetch)
            .await
    }

    /// Stations and fully-described routes, fetched concurrently.
    ///
    /// Routes whose details cannot be fetched, or that have no stops, are
    /// dropped. A route keeps the colour from the route list.
    pub async fn initial_app_data(&self) -> AppData {
        let start = Instant::now();
        let (stations, summaries) = tokio::join!(self.stations(), self.routes());

        let details =
            futures::future::join_all(summaries.iter().map(|r| self.route_info(&r.number))).await;

        let routes: Vec<Route> = summaries
            .iter()
            .zip(details)
            .filter_map(|(summary, info)| {
                let info = info?;
                (!info.stations.is_empty()).then(|| Route {
                    name: summary.name.clone(),
                    number: summary.number.clone(),
                    color_name: summary.color.clone(),
                    hexcolor: summary.hexcolor.clone(),
                    stations: info.stations.clone(),
                })
            })
            .collect();

        debug!(
            stations = stations.len(),
            routes = routes.len(),
            ms = start.elapsed().as_millis() as u64,
            "initial app data ready"
        );
        AppData { stations, routes }
    }

    /// Train count, advisories and elevator notices, fetched concurrently.
    pub async fn system_status(&self) -> SystemStatus {
        let (train_count, alerts, elevators) =
            tokio::join!(self.train_count(), self.alerts(), self.elevator_status());
        SystemStatus {
            train_count,
            alerts: alerts.as_ref().clone(),
            elevator_status: elevators.as_ref().clone(),
        }
    }

    /// Live train positions; never cached, though the routes and stations
    /// they are placed on are.
    pub async fn train_locations(&self) -> Vec<Train> {
        let data = self.initial_app_data().await;
        self.live(
            "train_locations".into(),
            self.client.train_locations(&data.routes, &data.stations),
        )
        .await
    }

    pub fn invalidate_tag(&self, tag: CacheTag) {
        debug!(tag = tag.as_str(), "invalidating cache");
        self.caches.invalidate(tag);
    }

    pub fn invalidate_all(&self) {
        for tag in CacheTag::ALL {
            self.invalidate_tag(tag);
        }
    }

    /// Approximate number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.caches.entry_count()
    }
}
