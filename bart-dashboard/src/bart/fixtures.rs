//! Canned API bodies for tests, trimmed from real responses.
//!
//! The station list covers the San Francisco trunk from Embarcadero to Daly
//! City. Routes 11 and 12 also list WOAK and DUBL, which are deliberately
//! missing from the station list.

use super::mock::MockFetcher;

pub const STATIONS: &str = r#"{"root":{"stations":{"station":[
{"name":"Embarcadero","abbr":"EMBR","gtfs_latitude":"37.792874","gtfs_longitude":"-122.397020","address":"298 Market Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94111"},
{"name":"Montgomery St.","abbr":"MONT","gtfs_latitude":"37.789405","gtfs_longitude":"-122.401066","address":"598 Market Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94104"},
{"name":"Powell St.","abbr":"POWL","gtfs_latitude":"37.784471","gtfs_longitude":"-122.407974","address":"899 Market Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94102"},
{"name":"Civic Center/UN Plaza","abbr":"CIVC","gtfs_latitude":"37.779732","gtfs_longitude":"-122.414123","address":"1150 Market Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94102"},
{"name":"16th St. Mission","abbr":"16TH","gtfs_latitude":"37.765062","gtfs_longitude":"-122.419694","address":"2000 Mission Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94110"},
{"name":"24th St. Mission","abbr":"24TH","gtfs_latitude":"37.752470","gtfs_longitude":"-122.418143","address":"2800 Mission Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94110"},
{"name":"Glen Park","abbr":"GLEN","gtfs_latitude":"37.733064","gtfs_longitude":"-122.433817","address":"2901 Diamond Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94131"},
{"name":"Balboa Park","abbr":"BALB","gtfs_latitude":"37.721585","gtfs_longitude":"-122.447506","address":"401 Geneva Avenue","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94112"},
{"name":"Daly City","abbr":"DALY","gtfs_latitude":"37.706121","gtfs_longitude":"-122.469081","address":"500 John Daly Blvd.","city":"Daly City","county":"sanmateo","state":"CA","zipcode":"94014"}
]},"message":""}}"#;

pub const ROUTES: &str = r##"{"root":{"routes":{"route":[
{"name":"Berryessa/North San Jose - Daly City","abbr":"BERY-DALY","routeID":"ROUTE 5","number":"5","hexcolor":"#339933","color":"GREEN"},
{"name":"Daly City - Berryessa/North San Jose","abbr":"DALY-BERY","routeID":"ROUTE 6","number":"6","hexcolor":"#339933","color":"GREEN"},
{"name":"Dublin/Pleasanton - Daly City","abbr":"DUBL-DALY","routeID":"ROUTE 11","number":"11","hexcolor":"#0099CC","color":"BLUE"},
{"name":"Daly City - Dublin/Pleasanton","abbr":"DALY-DUBL","routeID":"ROUTE 12","number":"12","hexcolor":"#0099cc","color":"BLUE"}
]},"message":""}}"##;

pub const ROUTE_INFO_5: &str = r##"{"root":{"routes":{"route":{"name":"Berryessa/North San Jose - Daly City","number":"5","hexcolor":"#339933","color":"GREEN",
"config":{"station":["BERY","WOAK","EMBR","MONT","POWL","CIVC","16TH","24TH","GLEN","BALB","DALY"]}}}}}"##;

pub const ROUTE_INFO_6: &str = r##"{"root":{"routes":{"route":{"name":"Daly City - Berryessa/North San Jose","number":"6","hexcolor":"#339933","color":"GREEN",
"config":{"station":["DALY","BALB","GLEN","24TH","16TH","CIVC","POWL","MONT","EMBR","WOAK","BERY"]}}}}}"##;

pub const ROUTE_INFO_11: &str = r##"{"root":{"routes":{"route":{"name":"Dublin/Pleasanton - Daly City","number":"11","hexcolor":"#0099cc","color":"BLUE",
"config":{"station":["DUBL","WOAK","EMBR","MONT","POWL","CIVC","16TH","24TH","GLEN","BALB","DALY"]}}}}}"##;

pub const ROUTE_INFO_12: &str = r##"{"root":{"routes":{"route":{"name":"Daly City - Dublin/Pleasanton","number":"12","hexcolor":"#0099cc","color":"BLUE",
"config":{"station":["DALY","BALB","GLEN","24TH","16TH","CIVC","POWL","MONT","EMBR","WOAK","DUBL"]}}}}}"##;

/// Embarcadero board. Daly City has a train leaving now; the Dublin train
/// is outside the 20 minute lookahead.
pub const ETD_EMBR: &str = r##"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","station":[{"name":"Embarcadero","abbr":"EMBR","etd":[
{"destination":"Daly City","abbreviation":"DALY","limited":"0","estimate":[
  {"minutes":"Leaving","platform":"1","direction":"South","length":"8","color":"GREEN","hexcolor":"#339933","bikeflag":"1","delay":"0"},
  {"minutes":"12","platform":"1","direction":"South","length":"10","color":"BLUE","hexcolor":"#0099cc","bikeflag":"1","delay":"0"}]},
{"destination":"Berryessa","abbreviation":"BERY","limited":"0","estimate":
  {"minutes":"5","platform":"2","direction":"North","length":"8","color":"GREEN","hexcolor":"#339933","bikeflag":"1","delay":"0"}},
{"destination":"Dublin/Pleasanton","abbreviation":"DUBL","limited":"0","estimate":[
  {"minutes":"25","platform":"2","direction":"North","length":"10","color":"BLUE","hexcolor":"#0099cc","bikeflag":"1","delay":"0"}]}
]}],"message":""}}"##;

/// Every station: Embarcadero as above, Daly City with a Dublin train and a
/// Millbrae train no fixture route serves, Glen Park with nothing.
pub const ETD_ALL: &str = r##"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","station":[
{"name":"Embarcadero","abbr":"EMBR","etd":[
{"destination":"Daly City","abbreviation":"DALY","limited":"0","estimate":[
  {"minutes":"Leaving","platform":"1","direction":"South","length":"8","color":"GREEN","hexcolor":"#339933","bikeflag":"1","delay":"0"},
  {"minutes":"12","platform":"1","direction":"South","length":"10","color":"BLUE","hexcolor":"#0099cc","bikeflag":"1","delay":"0"}]},
{"destination":"Berryessa","abbreviation":"BERY","limited":"0","estimate":
  {"minutes":"5","platform":"2","direction":"North","length":"8","color":"GREEN","hexcolor":"#339933","bikeflag":"1","delay":"0"}},
{"destination":"Dublin/Pleasanton","abbreviation":"DUBL","limited":"0","estimate":[
  {"minutes":"25","platform":"2","direction":"North","length":"10","color":"BLUE","hexcolor":"#0099cc","bikeflag":"1","delay":"0"}]}]},
{"name":"Daly City","abbr":"DALY","etd":[
{"destination":"Dublin/Pleasanton","abbreviation":"DUBL","limited":"0","estimate":
  {"minutes":"Leaving","platform":"2","direction":"North","length":"10","color":"BLUE","hexcolor":"#0099cc","bikeflag":"1","delay":"0"}},
{"destination":"Millbrae","abbreviation":"MLBR","limited":"0","estimate":
  {"minutes":"8","platform":"1","direction":"South","length":"6","color":"RED","hexcolor":"#ff0000","bikeflag":"1","delay":"0"}}]},
{"name":"Glen Park","abbr":"GLEN"}
],"message":""}}"##;

pub const BSA_ALERTS: &str = r##"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","bsa":[
{"@id":"1","station":"BART","type":"DELAY","description":{"#cdata-section":"There is a 10-minute delay at Daly City in the East Bay direction."},"posted":"Sat Oct 17 2026 08:15 AM PDT","expires":"Thu Dec 31 2037 11:59 PM PST"}
],"message":""}}"##;

/// BART's placeholder when nothing is wrong: no `type`, no `posted`.
pub const BSA_NO_DELAYS: &str = r##"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","bsa":[
{"station":"","description":{"#cdata-section":"No delays reported."},"sms_text":{"#cdata-section":"No delays reported."}}
],"message":""}}"##;

pub const ELEVATORS: &str = r##"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","bsa":
{"@id":"","station":"BART","type":"ELEVATOR","description":{"#cdata-section":"There is one elevator out of service at this time: Powell St: Street elevator."},"posted":"Sat Oct 17 2026 07:40 AM PDT","expires":""},
"message":""}}"##;

pub const COUNT: &str = r#"{"root":{"date":"10/17/2026","time":"09:00:00 AM PDT","traincount":"47","message":""}}"#;

pub const FARE: &str = r#"{"root":{"origin":"EMBR","destination":"DALY",
"trip":{"fare":"4.40","discount":{"clipper":"0.00"}},
"fares":{"@level":"normal","fare":[
{"@amount":"4.40","@class":"clipper","@name":"Clipper"},
{"@amount":"2.20","@class":"rtcclipper","@name":"Clipper START"},
{"@amount":"1.65","@class":"senior","@name":"Senior/Disabled Clipper"}]},
"message":""}}"#;

/// Embarcadero to Daly City in two legs, changing at Balboa Park.
pub const TRIP_EMBR_DALY: &str = r#"{"root":{"origin":"EMBR","destination":"DALY","schedule":{"date":"Oct 17, 2026","time":"9:00 AM","before":"0","after":"1",
"request":{"trip":[
{"@origin":"EMBR","@destination":"DALY","@fare":"4.40","@origTimeMin":"9:02 AM","@origTimeDate":"10/17/2026 ","@destTimeMin":"9:24 AM","@destTimeDate":"10/17/2026","@clipper":"0.00","@tripTime":"22","@co2":"3.1",
"leg":[
{"@order":"1","@transfercode":"","@origin":"EMBR","@destination":"BALB","@origTimeMin":"9:02 AM","@origTimeDate":"10/17/2026","@destTimeMin":"9:17 AM","@destTimeDate":"10/17/2026","@line":"ROUTE 6","@bikeflag":"1","@trainHeadStation":"DALY","@load":"1"},
{"@order":"2","@transfercode":"N","@origin":"BALB","@destination":"DALY","@origTimeMin":"9:20 AM","@origTimeDate":"10/17/2026","@destTimeMin":"9:24 AM","@destTimeDate":"10/17/2026","@line":"ROUTE 12","@bikeflag":"0","@trainHeadStation":"DALY","@load":"2"}
]}]}},"message":""}}"#;

pub const HOLIDAYS: &str = r#"{"root":{"holidays":{"holiday":[
{"name":"Thanksgiving Day","date":"11/26/2026","schedule_type":"Sunday"},
{"name":"Christmas Day","date":"12/25/2026","schedule_type":"Sunday"}]},"message":""}}"#;

pub const STATION_SCHEDULE: &str = r#"{"root":{"date":"10/17/2026","station":{"name":"Embarcadero","abbr":"EMBR","item":[
{"@line":"ROUTE 6","@trainHeadStation":"DALY","@origTime":"9:02 AM","@destTime":"9:24 AM","@trainIdx":"31","@bikeflag":"1","@trainId":"1234","@load":"1"},
{"@line":"ROUTE 11","@trainHeadStation":"DALY","@origTime":"9:14 AM","@destTime":"9:36 AM","@trainIdx":"42","@bikeflag":"1","@trainId":"1250","@load":"2"}
]},"message":""}}"#;

/// One train. It passes Balboa Park without a time.
pub const ROUTE_SCHEDULE: &str = r#"{"root":{"date":"10/17/2026","sched_num":"77","route":{"train":
{"@index":"1","stop":[
{"@station":"DALY","@origTime":"5:00 AM","@bikeflag":"1"},
{"@station":"BALB","@bikeflag":"1"},
{"@station":"GLEN","@origTime":"5:06 AM","@bikeflag":"1"}]}
},"message":""}}"#;

pub const VERSION: &str = r#"{"root":{"apiVersion":"3.10","copyright":"Copyright 2026 Bay Area Rapid Transit District","license":"http://www.bart.gov/schedules/developers/developer-license-agreement","message":""}}"#;

pub const STATION_INFO: &str = r##"{"root":{"stations":{"station":{
"name":"Embarcadero","abbr":"EMBR","gtfs_latitude":"37.792874","gtfs_longitude":"-122.397020","address":"298 Market Street","city":"San Francisco","county":"sanfrancisco","state":"CA","zipcode":"94111",
"north_routes":{"route":["ROUTE 2","ROUTE 6"]},
"south_routes":{"route":["ROUTE 1","ROUTE 5"]},
"north_platforms":{"platform":"2"},
"south_platforms":{"platform":"1"},
"platform_info":"Always check destination signs and listen for departure announcements.",
"intro":{"#cdata-section":"Embarcadero is a downtown station."},
"cross_street":{"#cdata-section":"Market Street"},
"food":{"#cdata-section":"Ferry Building Marketplace"},
"shopping":{"#cdata-section":"Embarcadero Center"},
"attraction":{"#cdata-section":"Ferry Building"},
"link":{"#cdata-section":"https://www.bart.gov/stations/embr"}}},"message":""}}"##;

pub const STATION_ACCESS: &str = r##"{"root":{"stations":{"station":{
"@parking_flag":"0","@bike_flag":"1","@bike_station_flag":"1","@locker_flag":"0",
"name":"Embarcadero","abbr":"EMBR",
"entering":{"#cdata-section":"Enter from Market Street."},
"exiting":{"#cdata-section":"Exit to Market Street."},
"parking":{"#cdata-section":"No parking."},
"fill_time":{"#cdata-section":""},
"car_share":{"#cdata-section":""},
"lockers":{"#cdata-section":""},
"bike_station_text":{"#cdata-section":"Bike station at the Market Street entrance."},
"destinations":{"#cdata-section":"Ferry Building"},
"transit_info":{"#cdata-section":"Muni Metro"},
"link":{"#cdata-section":"https://www.bart.gov/stations/embr"}}},"message":""}}"##;

/// What BART answers for a station code it does not know.
pub const UNKNOWN_STATION: &str = r#"{"root":{"message":{"error":{"text":"Invalid orig","details":"The orig station parameter ZZZZ is missing or invalid."}}}}"#;

/// A mock serving every fixture above.
pub fn mock() -> MockFetcher {
    MockFetcher::new()
        .with_response("stns", STATIONS)
        .with_response("stninfo-EMBR", STATION_INFO)
        .with_response("stninfo-ZZZZ", UNKNOWN_STATION)
        .with_response("stnaccess-EMBR", STATION_ACCESS)
        .with_response("stnaccess-ZZZZ", UNKNOWN_STATION)
        .with_response("etd-EMBR", ETD_EMBR)
        .with_response("etd-ALL", ETD_ALL)
        .with_response("routes", ROUTES)
        .with_response("routeinfo-5", ROUTE_INFO_5)
        .with_response("routeinfo-6", ROUTE_INFO_6)
        .with_response("routeinfo-11", ROUTE_INFO_11)
        .with_response("routeinfo-12", ROUTE_INFO_12)
        .with_response("bsa", BSA_ALERTS)
        .with_response("elev", ELEVATORS)
        .with_response("count", COUNT)
        .with_response("fare", FARE)
        .with_response("depart", TRIP_EMBR_DALY)
        .with_response("arrive", TRIP_EMBR_DALY)
        .with_response("holiday", HOLIDAYS)
        .with_response("stnsched", STATION_SCHEDULE)
        .with_response("routesched", ROUTE_SCHEDULE)
        .with_response("ver", VERSION)
}
