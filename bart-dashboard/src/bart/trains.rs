//! Synthesizing train positions from departure estimates.
//!
//! BART does not publish where its trains are. What it does publish is, for
//! every station, the trains expected to leave it. Matching each estimate
//! to a route's stop sequence lets us place a train at the station it is
//! about to leave and guess the one it is heading for.

use std::collections::HashMap;

use crate::domain::{Estimate, Route, Station, StationDepartures, Train, same_hex};

/// Trains further out than this are not drawn.
pub const LOOKAHEAD_MINUTES: u32 = 20;

/// Line colour to a fragment of the name of a route with that colour.
///
/// Used when no route carries the estimate's exact hex colour.
const COLOR_ROUTE_TABLE: &[(&str, &str)] = &[
    ("YELLOW", "Antioch"),
    ("ORANGE", "Richmond"),
    ("RED", "Millbrae"),
    ("GREEN", "Berryessa"),
    ("BLUE", "Dublin"),
    ("BEIGE", "Oakland"),
    ("GRAY", "Oakland"),
    ("WHITE", "Oakland"),
];

fn routes_for_color_name<'a>(routes: &'a [Route], color: &str) -> Vec<&'a Route> {
    let Some((_, fragment)) = COLOR_ROUTE_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(color.trim()))
    else {
        return Vec::new();
    };
    let fragment = fragment.to_ascii_lowercase();
    routes
        .iter()
        .filter(|r| r.name.to_ascii_lowercase().contains(&fragment))
        .collect()
}

/// The route an estimate most likely belongs to.
///
/// Candidates share the estimate's hex colour, or failing that its colour
/// name. Among candidates, a route that reaches the destination after the
/// current station wins; otherwise any candidate serving the station.
pub fn match_route<'a>(
    routes: &'a [Route],
    estimate: &Estimate,
    station: &str,
    destination: &str,
) -> Option<&'a Route> {
    let mut candidates: Vec<&Route> = routes
        .iter()
        .filter(|r| same_hex(&r.hexcolor, &estimate.hexcolor))
        .collect();
    if candidates.is_empty() {
        candidates = routes_for_color_name(routes, &estimate.color);
    }

    let heads_to_destination = candidates.iter().copied().find(|r| {
        matches!(
            (r.position_of(station), r.position_of(destination)),
            (Some(here), Some(there)) if there > here
        )
    });

    heads_to_destination.or_else(|| {
        candidates
            .into_iter()
            .find(|r| r.position_of(station).is_some())
    })
}

/// The stop after `station` on `route`, heading for `destination`.
///
/// If the destination is on the route, step one stop towards it. If not,
/// "North" steps towards the start of the sequence and anything else
/// towards the end.
pub fn next_station(
    route: &Route,
    station: &str,
    destination: &str,
    direction: &str,
) -> Option<String> {
    let here = route.position_of(station)?;
    let next = match route.position_of(destination) {
        Some(there) if there > here => here + 1,
        Some(there) if there < here => here - 1,
        Some(_) => return None,
        None if direction.eq_ignore_ascii_case("north") => here.checked_sub(1)?,
        None => here + 1,
    };
    route.stations.get(next).cloned()
}

/// Cross-join departure boards with route stop sequences.
///
/// One train per estimate inside the lookahead window. Estimates that are
/// `Leaving` or not numeric are always kept.
pub fn synthesize_trains(
    boards: &[StationDepartures],
    routes: &[Route],
    stations: &[Station],
) -> Vec<Train> {
    let by_abbr: HashMap<String, &Station> = stations
        .iter()
        .map(|s| (s.abbr.to_ascii_uppercase(), s))
        .collect();

    let mut trains = Vec::new();
    for board in boards {
        let here = by_abbr.get(&board.abbr.to_ascii_uppercase());
        let position = here.and_then(|s| s.coordinate());
        let station_name = here
            .map(|s| s.name.clone())
            .unwrap_or_else(|| board.name.clone());

        for departure in &board.departures {
            for (i, estimate) in departure.estimate.iter().enumerate() {
                if !estimate.minutes.within(LOOKAHEAD_MINUTES) {
                    continue;
                }

                let route = match_route(routes, estimate, &board.abbr, &departure.abbreviation);
                let next = route.and_then(|r| {
                    next_station(r, &board.abbr, &departure.abbreviation, &estimate.direction)
                });

                trains.push(Train {
                    train_id: format!("{}-{}-{i}", board.abbr, departure.abbreviation),
                    current_station: board.abbr.clone(),
                    current_station_name: station_name.clone(),
                    next_station: next,
                    destination: departure.destination.clone(),
                    destination_abbr: departure.abbreviation.clone(),
                    minutes: estimate.minutes.clone(),
                    platform: estimate.platform.clone(),
                    direction: estimate.direction.clone(),
                    color: estimate.color.clone(),
                    hexcolor: estimate.hexcolor.clone(),
                    route: route.map(|r| r.name.clone()),
                    position,
                });
            }
        }
    }
    trains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::{decode, fixtures};
    use crate::domain::Eta;

    fn fixture_routes() -> Vec<Route> {
        [
            fixtures::ROUTE_INFO_5,
            fixtures::ROUTE_INFO_6,
            fixtures::ROUTE_INFO_11,
            fixtures::ROUTE_INFO_12,
        ]
        .into_iter()
        .map(|body| decode::route_info(body).unwrap().into_inner())
        .collect()
    }

    fn estimate(color: &str, hex: &str, minutes: &str, direction: &str) -> Estimate {
        Estimate {
            minutes: Eta::parse(minutes),
            platform: "1".into(),
            direction: direction.into(),
            length: "8".into(),
            color: color.into(),
            hexcolor: hex.into(),
            bikeflag: "1".into(),
            delay: "0".into(),
        }
    }

    #[test]
    fn hex_match_prefers_route_towards_destination() {
        let routes = fixture_routes();
        let est = estimate("GREEN", "#339933", "3", "South");
        let route = match_route(&routes, &est, "EMBR", "DALY").unwrap();
        assert_eq!(route.number, "5");

        let est = estimate("GREEN", "#339933", "3", "North");
        let route = match_route(&routes, &est, "EMBR", "BERY").unwrap();
        assert_eq!(route.number, "6");
    }

    #[test]
    fn hex_match_ignores_case() {
        let routes = fixture_routes();
        let est = estimate("BLUE", "#0099CC", "3", "South");
        assert_eq!(
            match_route(&routes, &est, "EMBR", "DALY").unwrap().number,
            "11"
        );
    }

    #[test]
    fn colour_name_fallback() {
        let routes = fixture_routes();
        let est = estimate("green", "#123456", "3", "South");
        let route = match_route(&routes, &est, "EMBR", "DALY").unwrap();
        assert!(route.name.contains("Berryessa"));
    }

    #[test]
    fn no_match_at_all() {
        let routes = fixture_routes();
        let est = estimate("RED", "#ff0000", "3", "South");
        assert!(match_route(&routes, &est, "DALY", "MLBR").is_none());
    }

    #[test]
    fn next_station_steps_towards_destination() {
        let routes = fixture_routes();
        let route_5 = &routes[0];
        assert_eq!(
            next_station(route_5, "EMBR", "DALY", "South").as_deref(),
            Some("MONT")
        );
        assert_eq!(
            next_station(route_5, "EMBR", "BERY", "North").as_deref(),
            Some("WOAK")
        );
        assert_eq!(next_station(route_5, "DALY", "DALY", "South"), None);
    }

    #[test]
    fn next_station_by_direction_when_destination_unknown() {
        let routes = fixture_routes();
        let route_6 = &routes[1];
        assert_eq!(
            next_station(route_6, "GLEN", "SFIA", "North").as_deref(),
            Some("BALB")
        );
        assert_eq!(
            next_station(route_6, "GLEN", "SFIA", "South").as_deref(),
            Some("24TH")
        );
        assert_eq!(next_station(route_6, "DALY", "SFIA", "North"), None);
        assert_eq!(next_station(route_6, "BERY", "SFIA", "South"), None);
    }

    #[test]
    fn synthesized_from_every_station() {
        let boards = decode::departures(fixtures::ETD_ALL).unwrap().into_inner();
        let stations = decode::stations(fixtures::STATIONS).unwrap().into_inner();
        let routes = fixture_routes();

        let trains = synthesize_trains(&boards, &routes, &stations);

        // The 25 minute Dublin train at EMBR is beyond the lookahead.
        let ids: Vec<&str> = trains.iter().map(|t| t.train_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "EMBR-DALY-0",
                "EMBR-DALY-1",
                "EMBR-BERY-0",
                "DALY-DUBL-0",
                "DALY-MLBR-0",
            ]
        );

        let leaving = &trains[0];
        assert_eq!(leaving.minutes, Eta::Leaving);
        assert_eq!(leaving.current_station_name, "Embarcadero");
        assert_eq!(leaving.next_station.as_deref(), Some("MONT"));
        assert_eq!(
            leaving.route.as_deref(),
            Some("Berryessa/North San Jose - Daly City")
        );
        assert!(leaving.position.is_some());

        assert_eq!(trains[2].next_station.as_deref(), Some("WOAK"));
        assert_eq!(trains[3].next_station.as_deref(), Some("BALB"));

        let millbrae = &trains[4];
        assert!(millbrae.route.is_none());
        assert!(millbrae.next_station.is_none());
    }

    #[test]
    fn leaving_and_odd_tokens_always_included() {
        let board = StationDepartures {
            name: "Embarcadero".into(),
            abbr: "EMBR".into(),
            departures: vec![crate::domain::Departure {
                destination: "Daly City".into(),
                abbreviation: "DALY".into(),
                limited: "0".into(),
                estimate: vec![
                    estimate("GREEN", "#339933", "Leaving", "South"),
                    estimate("GREEN", "#339933", "21", "South"),
                    estimate("GREEN", "#339933", "Arriving", "South"),
                ],
            }],
        };

        let trains = synthesize_trains(&[board], &fixture_routes(), &[]);
        let minutes: Vec<String> = trains.iter().map(|t| t.minutes.to_string()).collect();
        assert_eq!(minutes, vec!["Leaving", "Arriving"]);
        assert!(trains.iter().all(|t| t.position.is_none()));
    }
}
