//! Published schedule records.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holiday {
    pub name: String,
    pub date: String,
    /// Which timetable runs that day, e.g. "Sunday".
    pub schedule_type: String,
}

/// One departure in a station timetable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleItem {
    pub line: String,
    pub train_head_station: String,
    pub orig_time: String,
    pub dest_time: String,
    pub train_idx: String,
    pub bike_flag: bool,
    pub train_id: String,
    pub load: String,
}

/// A station's timetable for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSchedule {
    pub name: String,
    pub abbr: String,
    pub date: String,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledStop {
    pub station: String,
    /// Empty when the train does not stop here.
    pub orig_time: String,
    pub bike_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTrain {
    pub index: String,
    pub stops: Vec<ScheduledStop>,
}

/// A route's timetable for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSchedule {
    pub number: String,
    pub date: String,
    pub trains: Vec<ScheduledTrain>,
}
