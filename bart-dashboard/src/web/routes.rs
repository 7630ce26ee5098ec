//! HTTP route handlers.
//!
//! Upstream failures never reach a response: the data layer has already
//! degraded them to empty values. Errors here are about the request itself.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, Timelike, Utc};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::cache::CacheTag;
use crate::density::{DensityTimeline, points_for_hour, station_crowding};
use crate::domain::{Departure, Station, SystemStatus};
use crate::geo::{Coordinate, DEFAULT_RADIUS_KM, filter_nearby_stations};
use crate::lines::{apply_alerts, available_lines};
use crate::map::MapView;
use crate::planner::{self, PlanError, PlanRequest, fare_label};
use crate::poll::Snapshot;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/trip-planner", get(trip_planner_page))
        .route("/health", get(health))
        .route("/api/map", get(map_view))
        .route("/api/stations", get(stations))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/stations/:abbr", get(station_info))
        .route("/api/stations/:abbr/access", get(station_access))
        .route("/api/stations/:abbr/departures", get(station_departures))
        .route("/api/routes", get(routes))
        .route("/api/routes/:number", get(route_info))
        .route("/api/trains", get(trains))
        .route("/api/status", get(status))
        .route("/api/lines", get(line_search))
        .route("/api/trip", get(trip))
        .route("/trip/plan", post(plan_trip))
        .route("/api/fare", get(fare))
        .route("/api/holidays", get(holidays))
        .route("/api/schedules/stations/:abbr", get(station_schedule))
        .route("/api/schedules/routes/:number", get(route_schedule))
        .route("/api/version", get(version))
        .route("/api/density", get(density))
        .route("/api/cache/invalidate", post(invalidate_cache))
        .route("/debug/metrics", get(metrics).post(control_metrics))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn render(template: &impl Template) -> Html<String> {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Dashboard with the live map.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let status = current_status(&state).await;
    render(&IndexTemplate::from_status(&status.value))
}

/// Trip planner page.
async fn trip_planner_page(State(state): State<AppState>) -> impl IntoResponse {
    let stations = state.data.stations().await;
    render(&TripPlannerTemplate {
        stations: stations.iter().map(StationOption::from).collect(),
    })
}

async fn not_found() -> impl IntoResponse {
    let page = ErrorTemplate {
        title: "Not Found".into(),
        message: "There is nothing at this address.".into(),
        details: None,
    };
    (StatusCode::NOT_FOUND, render(&page))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn current_hour() -> u8 {
    Local::now().hour() as u8
}

/// Normalise a station abbreviation, e.g. ` embr` to `EMBR`.
fn station_code(raw: &str) -> Result<String, AppError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.is_empty() || code.len() > 4 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::BadRequest {
            message: format!("Invalid station code: {}", raw),
        });
    }
    Ok(code)
}

fn route_number(raw: &str) -> Result<String, AppError> {
    let number = raw.trim();
    if number.is_empty() || number.len() > 3 || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest {
            message: format!("Invalid route number: {}", raw),
        });
    }
    Ok(number.to_string())
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest {
            message: e.body_text(),
        })
}

/// Parse an optional JSON body. An empty body is the default request.
fn json_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn schedule_date(q: &ScheduleQuery) -> Option<&str> {
    q.date.as_deref().map(str::trim).filter(|d| !d.is_empty())
}

// ----------------------------------------------------------------------------
// Live snapshots: served from the board, fetched on first request
// ----------------------------------------------------------------------------

async fn current_status(state: &AppState) -> Snapshot<Arc<SystemStatus>> {
    match state.board.status().await {
        Some(snapshot) => snapshot,
        None => state.board.set_status(state.data.system_status().await).await,
    }
}

/// Departures for a station, which is watched from now on.
///
/// Only stations in the station list are watched; anything else is `None`
/// and costs no upstream request.
async fn current_departures(
    state: &AppState,
    stations: &[Station],
    station: &str,
) -> Option<Snapshot<Arc<Vec<Departure>>>> {
    if !stations.iter().any(|s| s.abbr == station) {
        debug!(station, "not watching unknown station");
        return None;
    }

    state.board.watch(station).await;
    let snapshot = match state.board.departures(station).await {
        Some(snapshot) => snapshot,
        None => {
            let departures = state.data.departures(station).await;
            state.board.set_departures(station, departures).await
        }
    };
    Some(snapshot)
}

// ----------------------------------------------------------------------------
// Map and stations
// ----------------------------------------------------------------------------

/// Map render model, with the popup for `selected` if given.
async fn map_view(
    State(state): State<AppState>,
    Query(req): Query<MapQuery>,
) -> Result<Json<MapView>, AppError> {
    let selected = req
        .selected
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(station_code)
        .transpose()?;

    let app = state.data.initial_app_data().await;
    let departures = match selected.as_deref() {
        Some(abbr) => current_departures(&state, &app.stations, abbr)
            .await
            .map(|snapshot| snapshot.value),
        None => None,
    };

    let hour = current_hour();
    let view = MapView::build(
        &app.stations,
        &app.routes,
        selected.as_deref(),
        departures.as_deref().map(Vec::as_slice),
        |station| station_crowding(&station.abbr, hour),
    );
    Ok(Json(view))
}

async fn stations(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.data.stations().await)
}

/// Stations near a point, nearest first.
async fn nearby_stations(
    State(state): State<AppState>,
    req: Result<Query<NearbyQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let req = query(req)?;
    let origin = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let radius = req.radius.unwrap_or(DEFAULT_RADIUS_KM);
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {}", radius),
        });
    }

    let stations = state.data.stations().await;
    let nearby = filter_nearby_stations(&stations, origin, radius);
    debug!(found = nearby.len(), radius, "nearby stations");
    Ok(Json(nearby).into_response())
}

async fn station_info(
    State(state): State<AppState>,
    Path(abbr): Path<String>,
) -> Result<Response, AppError> {
    let code = station_code(&abbr)?;
    Ok(Json(state.data.station_info(&code).await).into_response())
}

async fn station_access(
    State(state): State<AppState>,
    Path(abbr): Path<String>,
) -> Result<Response, AppError> {
    let code = station_code(&abbr)?;
    Ok(Json(state.data.station_access(&code).await).into_response())
}

async fn station_departures(
    State(state): State<AppState>,
    Path(abbr): Path<String>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let code = station_code(&abbr)?;
    let stations = state.data.stations().await;
    let (departures, refreshed_at) = match current_departures(&state, &stations, &code).await {
        Some(snapshot) => (snapshot.value, snapshot.refreshed_at),
        None => (Arc::default(), Utc::now()),
    };
    Ok(Json(DeparturesResponse {
        station: code,
        departures,
        refreshed_at,
    }))
}

// ----------------------------------------------------------------------------
// Routes, trains and status
// ----------------------------------------------------------------------------

/// Every route with its stops.
async fn routes(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.data.initial_app_data().await.routes)
}

async fn route_info(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Response, AppError> {
    let number = route_number(&number)?;
    Ok(Json(state.data.route_info(&number).await).into_response())
}

async fn trains(State(state): State<AppState>) -> Json<TrainsResponse> {
    let snapshot = match state.board.trains().await {
        Some(snapshot) => snapshot,
        None => {
            let trains = state.data.train_locations().await;
            state.board.set_trains(trains).await
        }
    };
    Json(TrainsResponse {
        trains: snapshot.value,
        refreshed_at: snapshot.refreshed_at,
    })
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = current_status(&state).await;
    Json(StatusResponse {
        status: snapshot.value,
        refreshed_at: snapshot.refreshed_at,
    })
}

/// Search line names.
async fn line_search(
    State(state): State<AppState>,
    Query(req): Query<LinesQuery>,
) -> Json<LinesResponse> {
    if req.q.trim().is_empty() {
        return Json(LinesResponse { lines: Vec::new() });
    }

    let (app, alerts) = tokio::join!(state.data.initial_app_data(), state.data.alerts());
    let mut lines = available_lines(&app.routes);
    apply_alerts(&mut lines, &alerts);

    Json(LinesResponse {
        lines: crate::lines::search_lines(&lines, &req.q),
    })
}

// ----------------------------------------------------------------------------
// Trips and fares
// ----------------------------------------------------------------------------

async fn trip(
    State(state): State<AppState>,
    Query(req): Query<PlanTripRequest>,
) -> Result<Json<planner::TripPlan>, AppError> {
    let plan = planner::plan_trip(&state.data, &PlanRequest::from(req)).await?;
    Ok(Json(plan))
}

/// Plan a trip from a JSON body.
///
/// Browsers asking for HTML get the results fragment, with validation
/// problems shown inline.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanTripRequest = json_body(&body)?;
    let result = planner::plan_trip(&state.data, &PlanRequest::from(req)).await;

    if accepts_html(&headers) {
        let template = match result {
            Ok(plan) => TripResultsTemplate {
                error: None,
                plan: Some(plan.into()),
            },
            Err(e) => TripResultsTemplate {
                error: Some(e.to_string()),
                plan: None,
            },
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(result?).into_response())
    }
}

async fn fare(
    State(state): State<AppState>,
    Query(req): Query<FareQuery>,
) -> Result<Json<FareResponse>, AppError> {
    let (origin, destination) = PlanRequest::new(req.orig, req.dest).validate()?;
    let details = state.data.fare(&origin, &destination).await;
    Ok(Json(FareResponse {
        fare: fare_label(details.as_deref()),
        details,
    }))
}

// ----------------------------------------------------------------------------
// Schedules and reference data
// ----------------------------------------------------------------------------

async fn holidays(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.data.holidays().await)
}

async fn station_schedule(
    State(state): State<AppState>,
    Path(abbr): Path<String>,
    Query(req): Query<ScheduleQuery>,
) -> Result<Response, AppError> {
    let code = station_code(&abbr)?;
    let schedule = state
        .data
        .station_schedule(&code, schedule_date(&req))
        .await;
    Ok(Json(schedule).into_response())
}

async fn route_schedule(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Query(req): Query<ScheduleQuery>,
) -> Result<Response, AppError> {
    let number = route_number(&number)?;
    let schedule = state
        .data
        .route_schedule(&number, schedule_date(&req))
        .await;
    Ok(Json(schedule).into_response())
}

async fn version(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.data.api_version().await)
}

// ----------------------------------------------------------------------------
// Density, cache control and metrics
// ----------------------------------------------------------------------------

async fn density(
    State(state): State<AppState>,
    req: Result<Query<DensityQuery>, QueryRejection>,
) -> Result<Json<DensityResponse>, AppError> {
    let req = query(req)?;
    let hour = req.hour.unwrap_or_else(current_hour);
    if hour > 23 {
        return Err(AppError::BadRequest {
            message: format!("Invalid hour: {}", hour),
        });
    }

    let mut timeline = DensityTimeline {
        visible: req.visible,
        playing: req.playing,
        ..DensityTimeline::default()
    };
    timeline.set_hour(hour);
    if req.step {
        timeline.advance();
    }

    Ok(Json(DensityResponse {
        timeline,
        points: points_for_hour(&state.density, timeline.hour),
    }))
}

async fn invalidate_cache(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InvalidateResponse>, AppError> {
    let req: InvalidateRequest = json_body(&body)?;
    let invalidated = match req.tag.as_deref() {
        Some(tag) => {
            let tag = CacheTag::parse(tag).ok_or_else(|| AppError::BadRequest {
                message: format!("Unknown cache tag: {}", tag),
            })?;
            state.data.invalidate_tag(tag);
            vec![tag.as_str()]
        }
        None => {
            state.data.invalidate_all();
            CacheTag::ALL.iter().map(CacheTag::as_str).collect()
        }
    };
    Ok(Json(InvalidateResponse { invalidated }))
}

fn metrics_response(state: &AppState) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        recording: state.metrics.is_recording(),
        calls: state.metrics.snapshot(),
    })
}

/// Recent data-layer call timings.
async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    metrics_response(&state)
}

async fn control_metrics(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MetricsResponse>, AppError> {
    let control: MetricsControl = json_body(&body)?;
    if control.clear {
        state.metrics.clear();
    }
    if let Some(on) = control.recording {
        state.metrics.set_recording(on);
    }
    Ok(metrics_response(&state))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
