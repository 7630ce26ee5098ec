//! BART legacy API client.
//!
//! Talks to `https://api.bart.gov/api` and turns its JSON into the records
//! in [`crate::domain`].
//!
//! Key characteristics of the API:
//! - It is an XML service rendered as JSON, so list nodes with one element
//!   arrive as bare objects and some text arrives CDATA-wrapped
//!   (see `xml.rs`)
//! - Bad requests still return 200, with the complaint in
//!   `root.message.error`
//! - There are no train positions; `trains.rs` infers them from departures

mod client;
mod convert;
mod decode;
mod error;
mod fetch;
mod lenient;
mod mock;
mod request;
mod trains;
mod types;
mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::BartClient;
pub use decode::Parsed;
pub use error::BartError;
pub use fetch::{BartConfig, DEFAULT_BASE_URL, Fetcher, HttpFetcher};
pub use mock::MockFetcher;
pub use request::{ALL_STATIONS, ApiRequest, TripQuery};
pub use trains::{LOOKAHEAD_MINUTES, match_route, next_station, synthesize_trains};
