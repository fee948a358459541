//! Train records as scraped, and trains as exported.

use serde::{Deserialize, Serialize};

use super::{Direction, StopTime, StopTimes};

/// One train as listed on a station timetable page.
///
/// Identity is the normalized URL key held by the accumulator, not any
/// field of the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRecord {
    /// Canonical train detail URL.
    pub url: String,
    /// Train number component of the `tx` parameter.
    pub train_id: String,
    /// Last two `tx` components, disambiguating repeated train numbers.
    pub train_id2: String,
    /// Destination label as shown on the station page.
    pub dest: String,
    /// Train type short code (e.g. `普通`, `快速`).
    pub train_type: String,
    /// Label of the direction tab the train was listed under.
    pub direction: String,
    /// Zero-based direction tab id, if the tab carried one.
    pub direction_id: Option<u8>,
}

impl TrainRecord {
    /// Direction recorded on each stop of this train.
    pub fn stop_direction(&self) -> Option<Direction> {
        self.direction_id.map(Direction::from_direction_id)
    }
}

/// One stop on a train detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEntry {
    pub station: String,
    /// Raw time strings, one per rendered line (0 to 2 entries).
    #[serde(default)]
    pub times: Vec<String>,
}

impl StopEntry {
    /// Stop with its raw time strings.
    pub fn new(station: impl Into<String>, times: &[&str]) -> Self {
        Self {
            station: station.into(),
            times: times.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A train record together with the stops from its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainDetail {
    pub record: TrainRecord,
    pub stops: Vec<StopEntry>,
}

/// One stop of an exported train timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableEntry {
    pub name: String,
    pub direction: Option<Direction>,
    pub arr: Option<StopTime>,
    pub dep: Option<StopTime>,
    pub platform: String,
    pub number: String,
    #[serde(rename = "type")]
    pub train_type: String,
    pub destination: String,
    pub note: Vec<String>,
}

impl TimetableEntry {
    /// Entry with empty platform and notes.
    pub fn new(
        name: &str,
        direction: Option<Direction>,
        times: StopTimes,
        number: &str,
        train_type: &str,
        destination: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            direction,
            arr: times.arrival,
            dep: times.departure,
            platform: String::new(),
            number: number.to_string(),
            train_type: train_type.to_string(),
            destination: destination.to_string(),
            note: Vec::new(),
        }
    }
}

/// One physical train run in the exported model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainEntry {
    pub url: String,
    pub number: String,
    /// Name of the first stop on the detail page.
    pub origin: String,
    /// Destination label as scraped; not necessarily the line terminus.
    pub destination: String,
    pub via: Option<String>,
    #[serde(rename = "type")]
    pub train_type: String,
    pub name: Vec<String>,
    pub distance: u32,
    /// Direction relative to the target line; `None` if undetermined.
    pub direction: Option<Direction>,
    pub fare_type: Option<String>,
    pub note: Vec<String>,
    pub timetable: Vec<TimetableEntry>,
}

impl TrainEntry {
    /// Key of this train within a revision: `<number>:<origin>-<destination>:0:`.
    pub fn composite_key(&self) -> String {
        format!("{}:{}-{}:0:", self.number, self.origin, self.destination)
    }
}
