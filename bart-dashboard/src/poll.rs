//! Background refresh of live data.
//!
//! Live trains, system status and the departures of recently viewed
//! stations are refreshed on fixed periods and held as snapshots, so
//! requests for them read memory instead of waiting on the API.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::cache::TransitData;
use crate::domain::{Departure, SystemStatus, Train};

/// Refresh periods.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub trains_every: Duration,
    pub departures_every: Duration,
    pub status_every: Duration,
    /// How long a station stays watched after it was last viewed.
    pub watch_ttl: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            trains_every: Duration::from_secs(15),
            departures_every: Duration::from_secs(15),
            status_every: Duration::from_secs(30),
            watch_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// A job run on a fixed period until stopped.
///
/// The first run happens immediately. Dropping the handle stops the job
/// after its current run.
#[derive(Debug)]
pub struct PeriodicTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn start<F, Fut>(name: &'static str, period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => job().await,
                    // Fires on an explicit stop and when the handle is dropped.
                    _ = stop_rx.changed() => break,
                }
            }
            debug!(task = name, "periodic task stopped");
        });

        debug!(task = name, period_secs = period.as_secs(), "periodic task started");
        Self {
            stop_tx,
            handle,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the job and wait for its current run to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.handle.await;
    }
}

/// A value and when it was fetched.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<T> {
    pub value: T,
    pub refreshed_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    fn now(value: T) -> Self {
        Self {
            value,
            refreshed_at: Utc::now(),
        }
    }
}

/// Latest live data, shared between the pollers and the web handlers.
#[derive(Debug)]
pub struct LiveBoard {
    trains: RwLock<Option<Snapshot<Arc<Vec<Train>>>>>,
    status: RwLock<Option<Snapshot<Arc<SystemStatus>>>>,
    departures: RwLock<HashMap<String, Snapshot<Arc<Vec<Departure>>>>>,
    watched: RwLock<HashMap<String, Instant>>,
    watch_ttl: Duration,
}

impl LiveBoard {
    pub fn new(watch_ttl: Duration) -> Self {
        Self {
            trains: RwLock::new(None),
            status: RwLock::new(None),
            departures: RwLock::new(HashMap::new()),
            watched: RwLock::new(HashMap::new()),
            watch_ttl,
        }
    }

    pub async fn trains(&self) -> Option<Snapshot<Arc<Vec<Train>>>> {
        self.trains.read().await.clone()
    }

    pub async fn status(&self) -> Option<Snapshot<Arc<SystemStatus>>> {
        self.status.read().await.clone()
    }

    pub async fn departures(&self, station: &str) -> Option<Snapshot<Arc<Vec<Departure>>>> {
        self.departures.read().await.get(station).cloned()
    }

    pub async fn set_trains(&self, trains: Vec<Train>) -> Snapshot<Arc<Vec<Train>>> {
        let snapshot = Snapshot::now(Arc::new(trains));
        *self.trains.write().await = Some(snapshot.clone());
        snapshot
    }

    pub async fn set_status(&self, status: SystemStatus) -> Snapshot<Arc<SystemStatus>> {
        let snapshot = Snapshot::now(Arc::new(status));
        *self.status.write().await = Some(snapshot.clone());
        snapshot
    }

    pub async fn set_departures(
        &self,
        station: &str,
        departures: Vec<Departure>,
    ) -> Snapshot<Arc<Vec<Departure>>> {
        let snapshot = Snapshot::now(Arc::new(departures));
        self.departures
            .write()
            .await
            .insert(station.to_string(), snapshot.clone());
        snapshot
    }

    /// Keep a station's departures refreshed for a while.
    pub async fn watch(&self, station: &str) {
        self.watched
            .write()
            .await
            .insert(station.to_string(), Instant::now());
    }

    /// Stations viewed within the watch TTL. Expired stations are forgotten,
    /// along with their departures.
    pub async fn watched_stations(&self) -> Vec<String> {
        let ttl = self.watch_ttl;
        let mut watched = self.watched.write().await;
        let expired: Vec<String> = watched
            .iter()
            .filter(|(_, seen)| seen.elapsed() > ttl)
            .map(|(station, _)| station.clone())
            .collect();

        if !expired.is_empty() {
            let mut departures = self.departures.write().await;
            for station in &expired {
                watched.remove(station);
                departures.remove(station);
            }
        }

        let mut stations: Vec<String> = watched.keys().cloned().collect();
        stations.sort();
        stations
    }
}

pub async fn refresh_trains(data: &TransitData, board: &LiveBoard) {
    let trains = data.train_locations().await;
    debug!(trains = trains.len(), "refreshed trains");
    board.set_trains(trains).await;
}

pub async fn refresh_status(data: &TransitData, board: &LiveBoard) {
    board.set_status(data.system_status().await).await;
}

pub async fn refresh_departures(data: &TransitData, board: &LiveBoard) {
    let stations = board.watched_stations().await;
    if stations.is_empty() {
        return;
    }
    let boards = futures::future::join_all(stations.iter().map(|s| data.departures(s))).await;
    for (station, departures) in stations.iter().zip(boards) {
        board.set_departures(station, departures).await;
    }
    debug!(stations = stations.len(), "refreshed departures");
}

/// The running pollers. Dropping this stops them.
#[derive(Debug)]
pub struct Pollers {
    pub trains: PeriodicTask,
    pub departures: PeriodicTask,
    pub status: PeriodicTask,
}

pub fn spawn_pollers(data: Arc<TransitData>, board: Arc<LiveBoard>, config: &PollConfig) -> Pollers {
    let trains = {
        let (data, board) = (data.clone(), board.clone());
        PeriodicTask::start("trains", config.trains_every, move || {
            let (data, board) = (data.clone(), board.clone());
            async move { refresh_trains(&data, &board).await }
        })
    };

    let departures = {
        let (data, board) = (data.clone(), board.clone());
        PeriodicTask::start("departures", config.departures_every, move || {
            let (data, board) = (data.clone(), board.clone());
            async move { refresh_departures(&data, &board).await }
        })
    };

    let status = PeriodicTask::start("status", config.status_every, move || {
        let (data, board) = (data.clone(), board.clone());
        async move { refresh_status(&data, &board).await }
    });

    Pollers {
        trains,
        departures,
        status,
    }
}
