//! BART API response DTOs.
//!
//! These map the well-formed shape of each JSON response. Every body is
//! wrapped in `{"root": ...}`. Repeatable nodes use [`OneOrMany`] and text
//! nodes that may carry CDATA use [`TextNode`]. Keys that identify a record
//! are required; descriptive text defaults to empty.
//!
//! A body that does not fit here is handed to the lenient extractors in
//! `lenient.rs`.

use serde::Deserialize;

use super::xml::{NumberOrString, OneOrMany, TextNode};

/// The `{"root": ...}` wrapper around every response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub root: T,
}

// ---------------------------------------------------------------------------
// stn.aspx
// ---------------------------------------------------------------------------

/// `cmd=stns`
#[derive(Debug, Clone, Deserialize)]
pub struct StationsRoot {
    pub stations: StationList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationList {
    pub station: OneOrMany<StationDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,
    pub abbr: String,
    pub gtfs_latitude: String,
    pub gtfs_longitude: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
}

/// `cmd=stninfo`
#[derive(Debug, Clone, Deserialize)]
pub struct StationInfoRoot {
    pub stations: StationInfoList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationInfoList {
    pub station: OneOrMany<StationInfoDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationInfoDto {
    #[serde(flatten)]
    pub station: StationDto,
    #[serde(default)]
    pub north_routes: Option<RouteRefs>,
    #[serde(default)]
    pub south_routes: Option<RouteRefs>,
    #[serde(default)]
    pub north_platforms: Option<PlatformRefs>,
    #[serde(default)]
    pub south_platforms: Option<PlatformRefs>,
    #[serde(default)]
    pub platform_info: Option<TextNode>,
    #[serde(default)]
    pub intro: Option<TextNode>,
    #[serde(default)]
    pub cross_street: Option<TextNode>,
    #[serde(default)]
    pub food: Option<TextNode>,
    #[serde(default)]
    pub shopping: Option<TextNode>,
    #[serde(default)]
    pub attraction: Option<TextNode>,
    #[serde(default)]
    pub link: Option<TextNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRefs {
    #[serde(default)]
    pub route: OneOrMany<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformRefs {
    #[serde(default)]
    pub platform: OneOrMany<String>,
}

/// `cmd=stnaccess`
#[derive(Debug, Clone, Deserialize)]
pub struct StationAccessRoot {
    pub stations: StationAccessList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationAccessList {
    pub station: OneOrMany<StationAccessDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationAccessDto {
    pub name: String,
    pub abbr: String,
    #[serde(rename = "@parking_flag", default)]
    pub parking_flag: String,
    #[serde(rename = "@bike_flag", default)]
    pub bike_flag: String,
    #[serde(rename = "@bike_station_flag", default)]
    pub bike_station_flag: String,
    #[serde(rename = "@locker_flag", default)]
    pub locker_flag: String,
    #[serde(default)]
    pub entering: Option<TextNode>,
    #[serde(default)]
    pub exiting: Option<TextNode>,
    #[serde(default)]
    pub parking: Option<TextNode>,
    #[serde(default)]
    pub fill_time: Option<TextNode>,
    #[serde(default)]
    pub car_share: Option<TextNode>,
    #[serde(default)]
    pub lockers: Option<TextNode>,
    #[serde(default)]
    pub bike_station_text: Option<TextNode>,
    #[serde(default)]
    pub destinations: Option<TextNode>,
    #[serde(default)]
    pub transit_info: Option<TextNode>,
    #[serde(default)]
    pub link: Option<TextNode>,
}

// ---------------------------------------------------------------------------
// etd.aspx
// ---------------------------------------------------------------------------

/// `cmd=etd`
#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    pub station: OneOrMany<EtdStationDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdStationDto {
    pub name: String,
    pub abbr: String,
    /// Absent when nothing is scheduled to leave.
    #[serde(default)]
    pub etd: Option<OneOrMany<EtdDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdDto {
    pub destination: String,
    pub abbreviation: String,
    #[serde(default)]
    pub limited: String,
    pub estimate: OneOrMany<EstimateDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateDto {
    /// Whole minutes, or "Leaving".
    pub minutes: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hexcolor: String,
    #[serde(default)]
    pub bikeflag: String,
    #[serde(default)]
    pub delay: String,
}

// ---------------------------------------------------------------------------
// route.aspx
// ---------------------------------------------------------------------------

/// `cmd=routes`
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesRoot {
    pub routes: RouteList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteList {
    pub route: OneOrMany<RouteDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub abbr: String,
    #[serde(rename = "routeID", default)]
    pub route_id: String,
    #[serde(default)]
    pub hexcolor: String,
    #[serde(default)]
    pub color: String,
}

/// `cmd=routeinfo`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteInfoRoot {
    pub routes: RouteInfoList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteInfoList {
    pub route: OneOrMany<RouteInfoDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteInfoDto {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub hexcolor: String,
    #[serde(default)]
    pub color: String,
    pub config: RouteConfigDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfigDto {
    pub station: OneOrMany<String>,
}

// ---------------------------------------------------------------------------
// bsa.aspx
// ---------------------------------------------------------------------------

/// `cmd=bsa` and `cmd=elev`
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryRoot {
    #[serde(default)]
    pub bsa: Option<OneOrMany<AdvisoryDto>>,
}

/// An advisory. The "no delays" placeholder BART sends has neither `posted`
/// nor `type`, so it only decodes leniently.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryDto {
    pub description: TextNode,
    pub posted: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `cmd=count`
#[derive(Debug, Clone, Deserialize)]
pub struct CountRoot {
    pub traincount: NumberOrString,
}

// ---------------------------------------------------------------------------
// sched.aspx
// ---------------------------------------------------------------------------

/// `cmd=fare`
#[derive(Debug, Clone, Deserialize)]
pub struct FareRoot {
    pub origin: String,
    pub destination: String,
    pub trip: FareTripDto,
    #[serde(default)]
    pub fares: Option<FareTableDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareTripDto {
    pub fare: String,
    #[serde(default)]
    pub discount: Option<FareDiscountDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareDiscountDto {
    #[serde(default)]
    pub clipper: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareTableDto {
    #[serde(default)]
    pub fare: OneOrMany<FareClassDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FareClassDto {
    #[serde(rename = "@amount")]
    pub amount: String,
    #[serde(rename = "@class", default)]
    pub class: String,
    #[serde(rename = "@name", default)]
    pub name: String,
}

/// `cmd=depart` and `cmd=arrive`
#[derive(Debug, Clone, Deserialize)]
pub struct TripRoot {
    pub schedule: TripScheduleDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripScheduleDto {
    pub request: TripRequestDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripRequestDto {
    pub trip: OneOrMany<TripDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    #[serde(rename = "@origin")]
    pub origin: String,
    #[serde(rename = "@destination")]
    pub destination: String,
    #[serde(rename = "@fare", default)]
    pub fare: String,
    #[serde(rename = "@clipper", default)]
    pub clipper: String,
    #[serde(rename = "@origTimeMin")]
    pub orig_time_min: String,
    #[serde(rename = "@origTimeDate", default)]
    pub orig_time_date: String,
    #[serde(rename = "@destTimeMin")]
    pub dest_time_min: String,
    #[serde(rename = "@destTimeDate", default)]
    pub dest_time_date: String,
    #[serde(rename = "@tripTime")]
    pub trip_time: NumberOrString,
    pub leg: OneOrMany<LegDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    #[serde(rename = "@order")]
    pub order: NumberOrString,
    #[serde(rename = "@transfercode", default)]
    pub transfer_code: String,
    #[serde(rename = "@origin")]
    pub origin: String,
    #[serde(rename = "@destination")]
    pub destination: String,
    #[serde(rename = "@origTimeMin", default)]
    pub orig_time_min: String,
    #[serde(rename = "@origTimeDate", default)]
    pub orig_time_date: String,
    #[serde(rename = "@destTimeMin", default)]
    pub dest_time_min: String,
    #[serde(rename = "@destTimeDate", default)]
    pub dest_time_date: String,
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@bikeflag", default)]
    pub bike_flag: String,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
    #[serde(rename = "@load", default)]
    pub load: String,
}

/// `cmd=holiday`
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayRoot {
    pub holidays: HolidayList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayList {
    pub holiday: OneOrMany<HolidayDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDto {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub schedule_type: String,
}

/// `cmd=stnsched`
#[derive(Debug, Clone, Deserialize)]
pub struct StationScheduleRoot {
    #[serde(default)]
    pub date: String,
    pub station: StationScheduleDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationScheduleDto {
    pub name: String,
    pub abbr: String,
    pub item: OneOrMany<ScheduleItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleItemDto {
    #[serde(rename = "@line", default)]
    pub line: String,
    #[serde(rename = "@trainHeadStation", default)]
    pub train_head_station: String,
    #[serde(rename = "@origTime")]
    pub orig_time: String,
    #[serde(rename = "@destTime", default)]
    pub dest_time: String,
    #[serde(rename = "@trainIdx", default)]
    pub train_idx: String,
    #[serde(rename = "@bikeflag", default)]
    pub bike_flag: String,
    #[serde(rename = "@trainId", default)]
    pub train_id: String,
    #[serde(rename = "@load", default)]
    pub load: String,
}

/// `cmd=routesched`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteScheduleRoot {
    #[serde(default)]
    pub date: String,
    pub route: RouteScheduleDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteScheduleDto {
    pub train: OneOrMany<ScheduledTrainDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledTrainDto {
    #[serde(rename = "@index")]
    pub index: String,
    pub stop: OneOrMany<ScheduledStopDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledStopDto {
    #[serde(rename = "@station")]
    pub station: String,
    /// Absent when the train passes without stopping.
    #[serde(rename = "@origTime", default)]
    pub orig_time: Option<String>,
    #[serde(rename = "@bikeflag", default)]
    pub bike_flag: String,
}

// ---------------------------------------------------------------------------
// version.aspx
// ---------------------------------------------------------------------------

/// `cmd=ver`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRoot {
    pub api_version: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub license: String,
}
