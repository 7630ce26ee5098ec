//! Conversion from strictly-parsed DTOs to domain records.
//!
//! List converters always succeed. Single-record converters return `None`
//! when the list node that should hold the record is empty.

use crate::domain::{
    ApiVersion, Departure, Estimate, Eta, FareClass, FareInfo, Holiday, Route, RouteSchedule,
    RouteSummary, ScheduleItem, ScheduledStop, ScheduledTrain, Station, StationAccess,
    StationDepartures, StationInfo, StationSchedule, SystemAlert, Trip, TripLeg, hex_or_fallback,
};

use super::types::{
    AdvisoryDto, AdvisoryRoot, CountRoot, EstimateDto, EtdDto, EtdRoot, FareRoot, HolidayRoot,
    LegDto, RouteDto, RouteInfoRoot, RouteScheduleRoot, RoutesRoot, StationAccessDto,
    StationAccessRoot, StationDto, StationInfoRoot, StationScheduleRoot, StationsRoot, TripDto,
    TripRoot, VersionRoot,
};
use super::xml::{flag, text_or_empty};

impl From<StationDto> for Station {
    fn from(dto: StationDto) -> Self {
        Station {
            name: dto.name,
            abbr: dto.abbr,
            gtfs_latitude: dto.gtfs_latitude,
            gtfs_longitude: dto.gtfs_longitude,
            address: dto.address,
            city: dto.city,
            county: dto.county,
            state: dto.state,
            zipcode: dto.zipcode,
            etd: None,
        }
    }
}

pub fn stations(root: StationsRoot) -> Vec<Station> {
    root.stations
        .station
        .into_vec()
        .into_iter()
        .map(Station::from)
        .collect()
}

pub fn station_info(root: StationInfoRoot) -> Option<StationInfo> {
    let dto = root.stations.station.into_first()?;
    Some(StationInfo {
        station: dto.station.into(),
        north_routes: dto.north_routes.map(|r| r.route.into_vec()).unwrap_or_default(),
        south_routes: dto.south_routes.map(|r| r.route.into_vec()).unwrap_or_default(),
        north_platforms: dto
            .north_platforms
            .map(|p| p.platform.into_vec())
            .unwrap_or_default(),
        south_platforms: dto
            .south_platforms
            .map(|p| p.platform.into_vec())
            .unwrap_or_default(),
        platform_info: text_or_empty(dto.platform_info),
        intro: text_or_empty(dto.intro),
        cross_street: text_or_empty(dto.cross_street),
        food: text_or_empty(dto.food),
        shopping: text_or_empty(dto.shopping),
        attraction: text_or_empty(dto.attraction),
        link: text_or_empty(dto.link),
    })
}

impl From<StationAccessDto> for StationAccess {
    fn from(dto: StationAccessDto) -> Self {
        StationAccess {
            name: dto.name,
            abbr: dto.abbr,
            parking_flag: flag(&dto.parking_flag),
            bike_flag: flag(&dto.bike_flag),
            bike_station_flag: flag(&dto.bike_station_flag),
            locker_flag: flag(&dto.locker_flag),
            entering: text_or_empty(dto.entering),
            exiting: text_or_empty(dto.exiting),
            parking: text_or_empty(dto.parking),
            fill_time: text_or_empty(dto.fill_time),
            car_share: text_or_empty(dto.car_share),
            lockers: text_or_empty(dto.lockers),
            bike_station_text: text_or_empty(dto.bike_station_text),
            destinations: text_or_empty(dto.destinations),
            transit_info: text_or_empty(dto.transit_info),
            link: text_or_empty(dto.link),
        }
    }
}

pub fn station_access(root: StationAccessRoot) -> Option<StationAccess> {
    root.stations.station.into_first().map(StationAccess::from)
}

impl From<EstimateDto> for Estimate {
    fn from(dto: EstimateDto) -> Self {
        Estimate {
            minutes: Eta::parse(&dto.minutes),
            platform: dto.platform,
            direction: dto.direction,
            length: dto.length,
            color: dto.color,
            hexcolor: hex_or_fallback(dto.hexcolor),
            bikeflag: dto.bikeflag,
            delay: dto.delay,
        }
    }
}

impl From<EtdDto> for Departure {
    fn from(dto: EtdDto) -> Self {
        Departure {
            destination: dto.destination,
            abbreviation: dto.abbreviation,
            limited: dto.limited,
            estimate: dto
                .estimate
                .into_vec()
                .into_iter()
                .map(Estimate::from)
                .collect(),
        }
    }
}

pub fn departures(root: EtdRoot) -> Vec<StationDepartures> {
    root.station
        .into_vec()
        .into_iter()
        .map(|s| StationDepartures {
            name: s.name,
            abbr: s.abbr,
            departures: s
                .etd
                .map(|etd| etd.into_vec().into_iter().map(Departure::from).collect())
                .unwrap_or_default(),
        })
        .collect()
}

impl From<RouteDto> for RouteSummary {
    fn from(dto: RouteDto) -> Self {
        RouteSummary {
            name: dto.name,
            abbr: dto.abbr,
            route_id: dto.route_id,
            number: dto.number,
            color: dto.color,
            hexcolor: hex_or_fallback(dto.hexcolor),
        }
    }
}

pub fn routes(root: RoutesRoot) -> Vec<RouteSummary> {
    root.routes
        .route
        .into_vec()
        .into_iter()
        .map(RouteSummary::from)
        .collect()
}

pub fn route_info(root: RouteInfoRoot) -> Option<Route> {
    let dto = root.routes.route.into_first()?;
    Some(Route {
        name: dto.name,
        number: dto.number,
        color_name: dto.color,
        hexcolor: hex_or_fallback(dto.hexcolor),
        stations: dto.config.station.into_vec(),
    })
}

impl From<AdvisoryDto> for SystemAlert {
    fn from(dto: AdvisoryDto) -> Self {
        SystemAlert {
            description: dto.description.into_text(),
            posted: dto.posted,
            alert_type: dto.kind,
        }
    }
}

pub fn advisories(root: AdvisoryRoot) -> Vec<SystemAlert> {
    root.bsa
        .map(|bsa| bsa.into_vec().into_iter().map(SystemAlert::from).collect())
        .unwrap_or_default()
}

pub fn train_count(root: CountRoot) -> Option<u32> {
    root.traincount.as_u32()
}

pub fn fare(root: FareRoot) -> Option<FareInfo> {
    Some(FareInfo {
        origin: root.origin,
        destination: root.destination,
        fare: root.trip.fare,
        clipper_discount: root.trip.discount.map(|d| d.clipper).unwrap_or_default(),
        fares: root
            .fares
            .map(|table| {
                table
                    .fare
                    .into_vec()
                    .into_iter()
                    .map(|f| FareClass {
                        amount: f.amount,
                        class: f.class,
                        name: f.name,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    })
}

fn leg(dto: LegDto) -> Option<TripLeg> {
    Some(TripLeg {
        order: dto.order.as_u32()?,
        transfer_code: dto.transfer_code,
        origin: dto.origin,
        destination: dto.destination,
        orig_time_min: dto.orig_time_min,
        orig_time_date: dto.orig_time_date,
        dest_time_min: dto.dest_time_min,
        dest_time_date: dto.dest_time_date,
        line: dto.line,
        bike_flag: flag(&dto.bike_flag),
        train_head_station: dto.train_head_station,
        load: dto.load,
    })
}

fn trip(dto: TripDto) -> Option<Trip> {
    let legs = dto
        .leg
        .into_vec()
        .into_iter()
        .map(leg)
        .collect::<Option<Vec<_>>>()?;

    Some(Trip {
        origin: dto.origin,
        destination: dto.destination,
        fare: dto.fare,
        clipper: dto.clipper,
        orig_time_min: dto.orig_time_min,
        orig_time_date: dto.orig_time_date,
        dest_time_min: dto.dest_time_min,
        dest_time_date: dto.dest_time_date,
        trip_time: dto.trip_time.as_u32()?,
        legs,
    })
}

/// Trips, or `None` if any trip or leg carries an unreadable number.
pub fn trips(root: TripRoot) -> Option<Vec<Trip>> {
    root.schedule
        .request
        .trip
        .into_vec()
        .into_iter()
        .map(trip)
        .collect()
}

pub fn holidays(root: HolidayRoot) -> Vec<Holiday> {
    root.holidays
        .holiday
        .into_vec()
        .into_iter()
        .map(|h| Holiday {
            name: h.name,
            date: h.date,
            schedule_type: h.schedule_type,
        })
        .collect()
}

pub fn station_schedule(root: StationScheduleRoot) -> Option<StationSchedule> {
    let station = root.station;
    Some(StationSchedule {
        name: station.name,
        abbr: station.abbr,
        date: root.date,
        items: station
            .item
            .into_vec()
            .into_iter()
            .map(|i| ScheduleItem {
                line: i.line,
                train_head_station: i.train_head_station,
                orig_time: i.orig_time,
                dest_time: i.dest_time,
                train_idx: i.train_idx,
                bike_flag: flag(&i.bike_flag),
                train_id: i.train_id,
                load: i.load,
            })
            .collect(),
    })
}

/// The route number is not in the body; callers fill it in.
pub fn route_schedule(root: RouteScheduleRoot) -> Option<RouteSchedule> {
    Some(RouteSchedule {
        number: String::new(),
        date: root.date,
        trains: root
            .route
            .train
            .into_vec()
            .into_iter()
            .map(|t| ScheduledTrain {
                index: t.index,
                stops: t
                    .stop
                    .into_vec()
                    .into_iter()
                    .map(|s| ScheduledStop {
                        station: s.station,
                        orig_time: s.orig_time.unwrap_or_default(),
                        bike_flag: flag(&s.bike_flag),
                    })
                    .collect(),
            })
            .collect(),
    })
}

pub fn version(root: VersionRoot) -> Option<ApiVersion> {
    Some(ApiVersion {
        api_version: root.api_version,
        copyright: root.copyright,
        license: root.license,
    })
}
