//! Domain records for the BART dashboard.
//!
//! These are the normalized, immutable values produced from upstream API
//! responses. Nothing here knows about the wire format: attribute prefixes,
//! CDATA wrappers and singleton/array ambiguity are all resolved by the
//! `bart` module before a record is constructed.

mod color;
mod departure;
mod eta;
mod route;
mod schedule;
mod station;
mod status;
mod trip;

pub use color::{FALLBACK_HEX, hex_or_fallback, normalize_hex, same_hex};
pub use departure::{Departure, Estimate, StationDepartures, Train};
pub use eta::Eta;
pub use route::{Route, RouteSummary};
pub use schedule::{
    Holiday, RouteSchedule, ScheduleItem, ScheduledStop, ScheduledTrain, StationSchedule,
};
pub use station::{Station, StationAccess, StationInfo};
pub use status::{ApiVersion, SystemAlert, SystemStatus};
pub use trip::{FareClass, FareInfo, Trip, TripLeg};
