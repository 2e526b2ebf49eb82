//! CSV timetable loader.
//!
//! # CSV format
//!
//! One row per service line, in itinerary order.  Service-level fields
//! (`description`, `next_service`, `auto_reverse`) are read from the first
//! row of each service.
//!
//! ```csv
//! service_code,description,place_code,track_code,arrival,departure,must_stop,next_service,auto_reverse
//! S1,Down local,WST,1,,06:02:00,1,S2,1
//! S1,Down local,MID,,,,0,S2,1
//! S1,Down local,EST,2,06:10:00,,1,S2,1
//! ```
//!
//! Empty `arrival` / `departure` cells mean "not scheduled"; an empty
//! departure holds the train at that place indefinitely.  Flags accept
//! `1`/`0`, `true`/`false`, and `yes`/`no`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rail_core::SimTime;

use crate::{ScheduleError, ScheduleResult, Service, ServiceLine, ServiceRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ServiceRecord {
    service_code: String,
    #[serde(default)]
    description:  Option<String>,
    place_code:   String,
    #[serde(default)]
    track_code:   Option<String>,
    #[serde(default)]
    arrival:      Option<String>,
    #[serde(default)]
    departure:    Option<String>,
    must_stop:    String,
    #[serde(default)]
    next_service: Option<String>,
    #[serde(default)]
    auto_reverse: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load services from a CSV file.
pub fn load_services_csv(path: &Path) -> ScheduleResult<ServiceRegistry> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_services_reader(file)
}

/// Like [`load_services_csv`] but accepts any `Read` source.
///
/// Chained next services are validated once all rows are read.
pub fn load_services_reader<R: Read>(reader: R) -> ScheduleResult<ServiceRegistry> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut services: Vec<Service> = Vec::new();

    for result in csv_reader.deserialize::<ServiceRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let line = ServiceLine {
            place_code:          row.place_code.trim().to_owned(),
            track_code:          non_empty(row.track_code),
            scheduled_arrival:   parse_time(row.arrival)?,
            scheduled_departure: parse_time(row.departure)?,
            must_stop:           parse_flag(&row.must_stop)?,
        };

        match services.iter_mut().find(|s| s.code == row.service_code) {
            Some(service) => service.lines.push(line),
            None => {
                let auto_reverse = match non_empty(row.auto_reverse) {
                    Some(flag) => parse_flag(&flag)?,
                    None => false,
                };
                services.push(Service {
                    code:              row.service_code,
                    description:       non_empty(row.description).unwrap_or_default(),
                    lines:             vec![line],
                    next_service_code: non_empty(row.next_service),
                    auto_reverse,
                });
            }
        }
    }

    let mut registry = ServiceRegistry::new();
    for service in services {
        registry.insert(service)?;
    }
    registry.validate()?;
    Ok(registry)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn parse_time(s: Option<String>) -> ScheduleResult<Option<SimTime>> {
    non_empty(s)
        .map(|t| t.parse::<SimTime>().map_err(|e| ScheduleError::Parse(e.to_string())))
        .transpose()
}

fn parse_flag(s: &str) -> ScheduleResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ScheduleError::Parse(format!(
            "invalid flag {other:?}: expected 1/0, true/false, or yes/no"
        ))),
    }
}
