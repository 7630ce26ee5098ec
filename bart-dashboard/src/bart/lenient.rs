//! Best-effort extraction for responses the strict DTOs reject.
//!
//! Each extractor walks the untyped `root` value along the usual path and a
//! few known alternatives, then builds the same records the strict stage
//! would. Missing text becomes `""`, missing numbers `0`, missing colours
//! [`FALLBACK_HEX`](crate::domain::FALLBACK_HEX). An extractor returns
//! `None` only when it cannot find the node that holds the records at all.

use serde_json::Value;

use crate::domain::{
    ApiVersion, Departure, Estimate, Eta, FareClass, FareInfo, Holiday, Route, RouteSchedule,
    RouteSummary, ScheduleItem, ScheduledStop, ScheduledTrain, Station, StationAccess,
    StationDepartures, StationInfo, StationSchedule, SystemAlert, Trip, TripLeg, hex_or_fallback,
};

use super::xml::{CDATA_KEY, flag};

/// Follow a chain of object keys.
pub fn path<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |v, key| v.get(*key))
}

/// The first of several paths that exists.
fn first_path<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|keys| path(value, keys))
}

/// Elements of a repeatable node: an array's objects, a bare object as a
/// one-element list, anything else as nothing.
pub fn items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(values)) => values.iter().filter(|v| v.is_object()).collect(),
        Some(v @ Value::Object(_)) => vec![v],
        _ => Vec::new(),
    }
}

/// Text of a node: strings, numbers and booleans as written, CDATA
/// unwrapped, anything else empty.
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Object(map)) => match map.get(CDATA_KEY) {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Text of every element of a repeatable text node, blanks dropped.
fn texts(value: Option<&Value>) -> Vec<String> {
    let values: Vec<&Value> = match value {
        Some(Value::Array(values)) => values.iter().collect(),
        Some(v) => vec![v],
        None => Vec::new(),
    };
    values
        .into_iter()
        .map(|v| text(Some(v)))
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn field(obj: &Value, key: &str) -> String {
    text(obj.get(key))
}

/// An XML attribute, which may or may not have kept its `@` prefix.
pub fn attr(obj: &Value, name: &str) -> String {
    let prefixed = format!("@{name}");
    obj.get(&prefixed)
        .or_else(|| obj.get(name))
        .map(|v| text(Some(v)))
        .unwrap_or_default()
}

fn number(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// The error text BART puts in `root.message.error` for bad requests.
pub fn upstream_error(root: &Value) -> Option<String> {
    let error = path(root, &["message", "error"])?;
    let summary = field(error, "text");
    let details = field(error, "details");
    match (summary.is_empty(), details.is_empty()) {
        (true, true) => None,
        (false, true) => Some(summary),
        (true, false) => Some(details),
        (false, false) => Some(format!("{summary}: {details}")),
    }
}

fn station(v: &Value) -> Station {
    Station {
        name: field(v, "name"),
        abbr: field(v, "abbr"),
        gtfs_latitude: field(v, "gtfs_latitude"),
        gtfs_longitude: field(v, "gtfs_longitude"),
        address: field(v, "address"),
        city: field(v, "city"),
        county: field(v, "county"),
        state: field(v, "state"),
        zipcode: field(v, "zipcode"),
        etd: None,
    }
}

fn station_node(root: &Value) -> Option<&Value> {
    first_path(root, &[&["stations", "station"], &["station"]])
}

pub fn stations(root: &Value) -> Option<Vec<Station>> {
    let node = station_node(root)?;
    Some(items(Some(node)).into_iter().map(station).collect())
}

pub fn station_info(root: &Value) -> Option<StationInfo> {
    let v = *items(station_node(root)).first()?;
    Some(StationInfo {
        station: station(v),
        north_routes: texts(path(v, &["north_routes", "route"])),
        south_routes: texts(path(v, &["south_routes", "route"])),
        north_platforms: texts(path(v, &["north_platforms", "platform"])),
        south_platforms: texts(path(v, &["south_platforms", "platform"])),
        platform_info: field(v, "platform_info"),
        intro: field(v, "intro"),
        cross_street: field(v, "cross_street"),
        food: field(v, "food"),
        shopping: field(v, "shopping"),
        attraction: field(v, "attraction"),
        link: field(v, "link"),
    })
}

pub fn station_access(root: &Value) -> Option<StationAccess> {
    let v = *items(station_node(root)).first()?;
    Some(StationAccess {
        name: field(v, "name"),
        abbr: field(v, "abbr"),
        parking_flag: flag(&attr(v, "parking_flag")),
        bike_flag: flag(&attr(v, "bike_flag")),
        bike_station_flag: flag(&attr(v, "bike_station_flag")),
        locker_flag: flag(&attr(v, "locker_flag")),
        entering: field(v, "entering"),
        exiting: field(v, "exiting"),
        parking: field(v, "parking"),
        fill_time: field(v, "fill_time"),
        car_share: field(v, "car_share"),
        lockers: field(v, "lockers"),
        bike_station_text: field(v, "bike_station_text"),
        destinations: field(v, "destinations"),
        transit_info: field(v, "transit_info"),
        link: field(v, "link"),
    })
}

fn estimate(v: &Value) -> Estimate {
    Estimate {
        minutes: Eta::parse(&field(v, "minutes")),
        platform: field(v, "platform"),
        direction: field(v, "direction"),
        length: field(v, "length"),
        color: field(v, "color"),
        hexcolor: hex_or_fallback(field(v, "hexcolor")),
        bikeflag: field(v, "bikeflag"),
        delay: field(v, "delay"),
    }
}

fn departure(v: &Value) -> Departure {
    Departure {
        destination: field(v, "destination"),
        abbreviation: field(v, "abbreviation"),
        limited: field(v, "limited"),
        estimate: items(v.get("estimate")).into_iter().map(estimate).collect(),
    }
}

pub fn departures(root: &Value) -> Option<Vec<StationDepartures>> {
    let node = root.get("station")?;
    Some(
        items(Some(node))
            .into_iter()
            .map(|s| StationDepartures {
                name: field(s, "name"),
                abbr: field(s, "abbr"),
                departures: items(s.get("etd")).into_iter().map(departure).collect(),
            })
            .collect(),
    )
}

fn route_node(root: &Value) -> Option<&Value> {
    first_path(root, &[&["routes", "route"], &["route"]])
}

pub fn routes(root: &Value) -> Option<Vec<RouteSummary>> {
    let node = route_node(root)?;
    Some(
        items(Some(node))
            .into_iter()
            .map(|r| RouteSummary {
                name: field(r, "name"),
                abbr: field(r, "abbr"),
                route_id: field(r, "routeID"),
                number: field(r, "number"),
                color: field(r, "color"),
                hexcolor: hex_or_fallback(field(r, "hexcolor")),
            })
            .collect(),
    )
}

pub fn route_info(root: &Value) -> Option<Route> {
    let r = *items(route_node(root)).first()?;
    let stations = first_path(r, &[&["config", "station"], &["stations"]]);
    Some(Route {
        name: field(r, "name"),
        number: field(r, "number"),
        color_name: field(r, "color"),
        hexcolor: hex_or_fallback(field(r, "hexcolor")),
        stations: texts(stations),
    })
}

/// Advisories. A missing `bsa` node means there are none.
pub fn advisories(root: &Value) -> Option<Vec<SystemAlert>> {
    if !root.is_object() {
        return None;
    }
    Some(
        items(root.get("bsa"))
            .into_iter()
            .map(|a| SystemAlert {
                description: field(a, "description"),
                posted: field(a, "posted"),
                alert_type: field(a, "type"),
            })
            .collect(),
    )
}

pub fn train_count(root: &Value) -> Option<u32> {
    number(&field(root, "traincount"))
}

pub fn fare(root: &Value) -> Option<FareInfo> {
    let trip = root.get("trip");
    let fares = first_path(root, &[&["fares", "fare"]]);
    if trip.is_none() && fares.is_none() {
        return None;
    }

    let headline = trip.map(|t| field(t, "fare")).unwrap_or_default();
    let clipper = trip
        .and_then(|t| path(t, &["discount", "clipper"]))
        .map(|c| text(Some(c)))
        .unwrap_or_default();

    Some(FareInfo {
        origin: field(root, "origin"),
        destination: field(root, "destination"),
        fare: headline,
        clipper_discount: clipper,
        fares: items(fares)
            .into_iter()
            .map(|f| FareClass {
                amount: attr(f, "amount"),
                class: attr(f, "class"),
                name: attr(f, "name"),
            })
            .collect(),
    })
}

fn trip_leg(index: usize, v: &Value) -> TripLeg {
    TripLeg {
        order: number(&attr(v, "order")).unwrap_or(index as u32 + 1),
        transfer_code: attr(v, "transfercode"),
        origin: attr(v, "origin"),
        destination: attr(v, "destination"),
        orig_time_min: attr(v, "origTimeMin"),
        orig_time_date: attr(v, "origTimeDate"),
        dest_time_min: attr(v, "destTimeMin"),
        dest_time_date: attr(v, "destTimeDate"),
        line: attr(v, "line"),
        bike_flag: flag(&attr(v, "bikeflag")),
        train_head_station: attr(v, "trainHeadStation"),
        load: attr(v, "load"),
    }
}

pub fn trips(root: &Value) -> Option<Vec<Trip>> {
    let node = first_path(root, &[&["schedule", "request", "trip"], &["trip"]])?;
    Some(
        items(Some(node))
            .into_iter()
            .map(|t| Trip {
                origin: attr(t, "origin"),
                destination: attr(t, "destination"),
                fare: attr(t, "fare"),
                clipper: attr(t, "clipper"),
                orig_time_min: attr(t, "origTimeMin"),
                orig_time_date: attr(t, "origTimeDate"),
                dest_time_min: attr(t, "destTimeMin"),
                dest_time_date: attr(t, "destTimeDate"),
                trip_time: number(&attr(t, "tripTime")).unwrap_or(0),
                legs: items(t.get("leg"))
                    .into_iter()
                    .enumerate()
                    .map(|(i, leg)| trip_leg(i, leg))
                    .collect(),
            })
            .collect(),
    )
}

pub fn holidays(root: &Value) -> Option<Vec<Holiday>> {
    let node = first_path(root, &[&["holidays", "holiday"], &["holiday"]])?;
    Some(
        items(Some(node))
            .into_iter()
            .map(|h| Holiday {
                name: field(h, "name"),
                date: field(h, "date"),
                schedule_type: field(h, "schedule_type"),
            })
            .collect(),
    )
}

pub fn station_schedule(root: &Value) -> Option<StationSchedule> {
    let s = root.get("station").filter(|s| s.is_object())?;
    Some(StationSchedule {
        name: field(s, "name"),
        abbr: field(s, "abbr"),
        date: field(root, "date"),
        items: items(s.get("item"))
            .into_iter()
            .map(|i| ScheduleItem {
                line: attr(i, "line"),
                train_head_station: attr(i, "trainHeadStation"),
                orig_time: attr(i, "origTime"),
                dest_time: attr(i, "destTime"),
                train_idx: attr(i, "trainIdx"),
                bike_flag: flag(&attr(i, "bikeflag")),
                train_id: attr(i, "trainId"),
                load: attr(i, "load"),
            })
            .collect(),
    })
}

pub fn route_schedule(root: &Value) -> Option<RouteSchedule> {
    let trains = first_path(root, &[&["route", "train"], &["train"]])?;
    Some(RouteSchedule {
        number: String::new(),
        date: field(root, "date"),
        trains: items(Some(trains))
            .into_iter()
            .map(|t| ScheduledTrain {
                index: attr(t, "index"),
                stops: items(t.get("stop"))
                    .into_iter()
                    .map(|s| ScheduledStop {
                        station: attr(s, "station"),
                        orig_time: attr(s, "origTime"),
                        bike_flag: flag(&attr(s, "bikeflag")),
                    })
                    .collect(),
            })
            .collect(),
    })
}

pub fn version(root: &Value) -> Option<ApiVersion> {
    let api_version = field(root, "apiVersion");
    if api_version.is_empty() {
        return None;
    }
    Some(ApiVersion {
        api_version,
        copyright: field(root, "copyright"),
        license: field(root, "license"),
    })
}
