//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Station, SystemAlert, SystemStatus};
use crate::planner::{PlannedLeg, PlannedTrip, TripPlan};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard with the live map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub train_count: u32,
    pub alerts: Vec<AlertView>,
    pub elevator_notices: Vec<AlertView>,
}

/// Trip planner form.
#[derive(Template)]
#[template(path = "trip_planner.html")]
pub struct TripPlannerTemplate {
    pub stations: Vec<StationOption>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Trip planner results fragment.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub error: Option<String>,
    pub plan: Option<TripPlanView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An advisory line in the status panel.
#[derive(Debug, Clone)]
pub struct AlertView {
    pub description: String,
    pub posted: String,
    pub color: &'static str,
}

impl From<&SystemAlert> for AlertView {
    fn from(alert: &SystemAlert) -> Self {
        Self {
            description: alert.description.clone(),
            posted: alert.posted.clone(),
            color: alert.indicator_color(),
        }
    }
}

impl IndexTemplate {
    pub fn from_status(status: &SystemStatus) -> Self {
        Self {
            train_count: status.train_count,
            alerts: status.alerts.iter().map(AlertView::from).collect(),
            elevator_notices: status.elevator_status.iter().map(AlertView::from).collect(),
        }
    }
}

/// A `<select>` option.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub abbr: String,
    pub name: String,
}

impl From<&Station> for StationOption {
    fn from(station: &Station) -> Self {
        Self {
            abbr: station.abbr.clone(),
            name: station.name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TripPlanView {
    pub origin_name: String,
    pub destination_name: String,
    pub fare: String,
    pub trips: Vec<TripView>,
}

impl From<TripPlan> for TripPlanView {
    fn from(plan: TripPlan) -> Self {
        Self {
            origin_name: plan.origin_name,
            destination_name: plan.destination_name,
            fare: plan.fare,
            trips: plan.trips.into_iter().map(TripView::from).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TripView {
    pub depart: String,
    pub arrive: String,
    pub duration_display: String,
    pub transfers: usize,
    pub legs: Vec<PlannedLeg>,
}

impl From<PlannedTrip> for TripView {
    fn from(trip: PlannedTrip) -> Self {
        let hours = trip.trip_time / 60;
        let mins = trip.trip_time % 60;
        let duration_display = if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        };

        Self {
            depart: trip.depart,
            arrive: trip.arrive,
            duration_display,
            transfers: trip.transfers,
            legs: trip.legs,
        }
    }
}
