//! BART dashboard server.
//!
//! A live map of the Bay Area Rapid Transit network: stations, routes,
//! inferred train positions, service advisories and a trip planner.

pub mod bart;
pub mod cache;
pub mod config;
pub mod density;
pub mod domain;
pub mod geo;
pub mod lines;
pub mod map;
pub mod metrics;
pub mod planner;
pub mod poll;
pub mod web;
