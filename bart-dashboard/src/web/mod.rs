//! Web layer for the BART dashboard.
//!
//! Serves the dashboard and trip planner pages, plus JSON endpoints for the
//! map, live trains, schedules and cache control.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
