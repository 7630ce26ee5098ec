//! Synthetic ridership heat map.
//!
//! BART publishes no crowding data. These points are generated from a
//! time-of-day model around a handful of busy areas and stand in for a
//! real feed on the density overlay. The station crowding badges on the
//! map come from here too.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Points generated per unit of intensity at each location.
const POINTS_PER_INTENSITY: f64 = 25.0;

/// Jitter applied to each point, in degrees either side of the centre.
const JITTER_DEG: f64 = 0.01;

/// Hour the timeline starts at.
pub const DEFAULT_HOUR: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AreaKind {
    Downtown,
    Residential,
    Other,
}

struct Area {
    lat: f64,
    lon: f64,
    kind: AreaKind,
}

const AREAS: [Area; 8] = [
    // San Francisco downtown
    Area { lat: 37.789, lon: -122.401, kind: AreaKind::Downtown },
    // Oakland
    Area { lat: 37.804, lon: -122.271, kind: AreaKind::Downtown },
    // Berkeley
    Area { lat: 37.873, lon: -122.283, kind: AreaKind::Downtown },
    // San Jose
    Area { lat: 37.330, lon: -121.889, kind: AreaKind::Other },
    // Fremont
    Area { lat: 37.557, lon: -121.976, kind: AreaKind::Residential },
    // Richmond
    Area { lat: 37.937, lon: -122.353, kind: AreaKind::Residential },
    // Walnut Creek
    Area { lat: 37.905, lon: -122.067, kind: AreaKind::Residential },
    // Millbrae
    Area { lat: 37.600, lon: -122.386, kind: AreaKind::Other },
];

/// One heat map sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub lat: f64,
    pub lon: f64,
    /// Roughly 0..1.5.
    pub intensity: f64,
    /// Hour of day, 0-23.
    pub hour: u8,
}

fn base_intensity(hour: u8) -> f64 {
    match hour {
        7..=9 | 16..=19 => 0.8,
        0..=5 | 22..=23 => 0.1,
        _ => 0.3,
    }
}

fn multiplier(kind: AreaKind, hour: u8) -> f64 {
    match kind {
        AreaKind::Downtown if (8..=18).contains(&hour) => 1.5,
        AreaKind::Residential if hour >= 18 || hour <= 8 => 1.3,
        _ => 1.0,
    }
}

fn area_intensity(area: &Area, hour: u8) -> f64 {
    base_intensity(hour) * multiplier(area.kind, hour)
}

/// Points for every hour of the day.
pub fn generate_density<R: Rng + ?Sized>(rng: &mut R) -> Vec<DensityPoint> {
    let mut points = Vec::new();
    for hour in 0..24u8 {
        for area in &AREAS {
            let intensity = area_intensity(area, hour);
            let count = (intensity * POINTS_PER_INTENSITY).floor() as usize;
            for _ in 0..count {
                points.push(DensityPoint {
                    lat: area.lat + rng.random_range(-JITTER_DEG..JITTER_DEG),
                    lon: area.lon + rng.random_range(-JITTER_DEG..JITTER_DEG),
                    intensity: intensity * rng.random_range(0.7..1.3),
                    hour,
                });
            }
        }
    }
    points
}

/// Points within an hour either side of `hour`. No wrap-around at midnight.
pub fn points_for_hour(points: &[DensityPoint], hour: u8) -> Vec<DensityPoint> {
    points
        .iter()
        .filter(|p| p.hour.abs_diff(hour) <= 1)
        .copied()
        .collect()
}

/// State of the density overlay's time slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DensityTimeline {
    pub visible: bool,
    pub hour: u8,
    pub playing: bool,
}

impl Default for DensityTimeline {
    fn default() -> Self {
        Self {
            visible: false,
            hour: DEFAULT_HOUR,
            playing: false,
        }
    }
}

impl DensityTimeline {
    /// Step one hour forward if the overlay is shown and playing.
    pub fn advance(&mut self) {
        if self.visible && self.playing {
            self.hour = (self.hour + 1) % 24;
        }
    }

    pub fn set_hour(&mut self, hour: u8) {
        self.hour = hour % 24;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrowdingLevel {
    Low,
    Moderate,
    High,
}

impl CrowdingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdingLevel::Low => "LOW",
            CrowdingLevel::Moderate => "MODERATE",
            CrowdingLevel::High => "HIGH",
        }
    }
}

/// Pick a crowding level for a station: half low, a third moderate, the
/// rest high.
pub fn random_crowding<R: Rng + ?Sized>(rng: &mut R) -> CrowdingLevel {
    let roll: f64 = rng.random();
    if roll < 0.5 {
        CrowdingLevel::Low
    } else if roll < 0.83 {
        CrowdingLevel::Moderate
    } else {
        CrowdingLevel::High
    }
}

/// Crowding for a station during an hour. Stable for the same inputs, so
/// markers do not flicker between refreshes.
pub fn station_crowding(abbr: &str, hour: u8) -> CrowdingLevel {
    let mut hasher = DefaultHasher::new();
    abbr.hash(&mut hasher);
    hour.hash(&mut hasher);
    random_crowding(&mut StdRng::seed_from_u64(hasher.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn intensity_by_time_of_day() {
        let downtown = &AREAS[0];
        let residential = &AREAS[4];
        let other = &AREAS[3];

        // Morning peak downtown: 0.8 * 1.5
        assert!((area_intensity(downtown, 8) - 1.2).abs() < 1e-9);
        // Morning peak, residential before 09:00
        assert!((area_intensity(residential, 7) - 1.04).abs() < 1e-9);
        assert!((area_intensity(residential, 9) - 0.8).abs() < 1e-9);
        // Night
        assert!((area_intensity(other, 2) - 0.1).abs() < 1e-9);
        assert!((area_intensity(residential, 23) - 0.13).abs() < 1e-9);
        // Midday
        assert!((area_intensity(other, 12) - 0.3).abs() < 1e-9);
        assert!((area_intensity(downtown, 12) - 0.45).abs() < 1e-9);
    }

    #[test]
    fn point_counts_follow_intensity() {
        let points = generate_density(&mut rng());
        let at_noon = points.iter().filter(|p| p.hour == 12).count();
        // 3 downtown areas at floor(0.45*25)=11, 5 others at floor(0.3*25)=7
        assert_eq!(at_noon, 3 * 11 + 5 * 7);
    }

    #[test]
    fn points_stay_near_their_area() {
        for p in generate_density(&mut rng()) {
            let near = AREAS.iter().any(|a| {
                (p.lat - a.lat).abs() <= JITTER_DEG + 1e-9
                    && (p.lon - a.lon).abs() <= JITTER_DEG + 1e-9
            });
            assert!(near, "{p:?} is far from every area");
        }
    }

    #[test]
    fn hour_window_is_one_either_side() {
        let points = generate_density(&mut rng());
        let window = points_for_hour(&points, 8);
        assert!(!window.is_empty());
        assert!(window.iter().all(|p| (7..=9).contains(&p.hour)));

        let midnight = points_for_hour(&points, 0);
        assert!(midnight.iter().all(|p| p.hour <= 1));
    }

    #[test]
    fn timeline_wraps_and_only_moves_when_playing() {
        let mut timeline = DensityTimeline::default();
        assert_eq!(timeline.hour, 8);

        timeline.advance();
        assert_eq!(timeline.hour, 8);

        timeline.visible = true;
        timeline.playing = true;
        timeline.set_hour(23);
        timeline.advance();
        assert_eq!(timeline.hour, 0);
    }

    #[test]
    fn crowding_levels_serialize_upper_case() {
        let json = serde_json::to_string(&CrowdingLevel::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
        assert_eq!(CrowdingLevel::High.as_str(), "HIGH");
    }

    #[test]
    fn station_crowding_is_stable() {
        assert_eq!(station_crowding("EMBR", 8), station_crowding("EMBR", 8));
        let levels: std::collections::HashSet<CrowdingLevel> = (0..24)
            .flat_map(|h| ["EMBR", "MONT", "POWL", "CIVC"].map(|s| station_crowding(s, h)))
            .collect();
        assert!(levels.len() > 1);
    }

    #[test]
    fn random_crowding_produces_every_level() {
        let mut rng = rng();
        let levels: std::collections::HashSet<CrowdingLevel> =
            (0..200).map(|_| random_crowding(&mut rng)).collect();
        assert_eq!(levels.len(), 3);
    }
}
