//! Line status search for the sidebar.

use serde::Serialize;

use crate::domain::{Route, SystemAlert};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineState {
    Normal,
    Delayed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineStatus {
    pub name: String,
    pub color: String,
    pub hexcolor: String,
    pub status: LineState,
}

impl LineStatus {
    fn new(name: impl Into<String>, color: &str, hexcolor: &str) -> Self {
        Self {
            name: name.into(),
            color: color.to_string(),
            hexcolor: hexcolor.to_string(),
            status: LineState::Normal,
        }
    }
}

const MISSING_HEX: &str = "#999999";

/// `(name, colour, hex)`, used until the route list has loaded.
const FALLBACK_LINES: [(&str, &str, &str); 12] = [
    ("Dublin/Pleasanton & Daly City", "blue", "#0099cc"),
    ("Daly City to Dublin/Pleasanton", "blue", "#0099cc"),
    ("Berryessa/North San Jose & Daly City", "green", "#339933"),
    ("Daly City to Berryessa/North San Jose", "green", "#339933"),
    ("Berryessa/North San Jose & Richmond", "orange", "#ff9933"),
    ("Richmond to Berryessa/North San Jose", "orange", "#ff9933"),
    ("Richmond & Millbrae+SFO", "red", "#ff0000"),
    ("Millbrae/Daly City to Richmond", "red", "#ff0000"),
    ("Antioch & SFO/Millbrae", "yellow", "#ffff33"),
    ("Millbrae/SFIA to Antioch", "yellow", "#ffff33"),
    ("Oakland Airport & Coliseum", "orange", "#ff9933"),
    ("Coliseum to Oakland Airport", "orange", "#ff9933"),
];

pub fn fallback_lines() -> Vec<LineStatus> {
    FALLBACK_LINES
        .iter()
        .map(|(name, color, hex)| LineStatus::new(*name, color, hex))
        .collect()
}

/// Two entries per route with at least two stations, one each way.
pub fn lines_from_routes(routes: &[Route]) -> Vec<LineStatus> {
    routes
        .iter()
        .filter_map(|route| {
            let (first, last) = route.termini()?;
            let hex = if route.hexcolor.trim().is_empty() {
                MISSING_HEX
            } else {
                route.hexcolor.as_str()
            };
            Some([
                LineStatus::new(
                    format!("Service between {first} & {last}"),
                    &route.color_name,
                    hex,
                ),
                LineStatus::new(format!("{last} to {first}"), &route.color_name, hex),
            ])
        })
        .flatten()
        .collect()
}

/// Lines built from `routes`, or the fallback table if none qualify.
pub fn available_lines(routes: &[Route]) -> Vec<LineStatus> {
    let lines = lines_from_routes(routes);
    if lines.is_empty() {
        fallback_lines()
    } else {
        lines
    }
}

/// Mark lines delayed when a delay advisory mentions their colour.
pub fn apply_alerts(lines: &mut [LineStatus], alerts: &[SystemAlert]) {
    let delays: Vec<String> = alerts
        .iter()
        .filter(|a| a.alert_type.eq_ignore_ascii_case("delay"))
        .map(|a| a.description.to_ascii_lowercase())
        .collect();

    for line in lines.iter_mut() {
        let color = line.color.to_ascii_lowercase();
        if !color.is_empty() && delays.iter().any(|d| d.contains(&color)) {
            line.status = LineState::Delayed;
        }
    }
}

/// Case-insensitive substring match on the line name. A blank query
/// matches nothing.
pub fn search_lines(lines: &[LineStatus], query: &str) -> Vec<LineStatus> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    lines
        .iter()
        .filter(|line| line.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
