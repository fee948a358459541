//! The exported railway model.

use indexmap::IndexMap;
use serde::Serialize;

use super::TypeRegistry;
use crate::domain::{Direction, LineStations, StationRef, TrainEntry};

/// Data source credited in exports.
pub const SOURCE_NAME: &str = "駅探";

/// Usage notice carried in exports.
pub const NOTICE: &str =
    "このデータを私的利用の範囲を超えて公開すると、著作権法に触れる可能性があります。";

/// Line metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RailwayData {
    /// Revision date (改正日).
    #[serde(rename = "改正日", skip_serializing_if = "Option::is_none")]
    pub revised: Option<String>,
    /// Same revision date; used as the key of [`RailwayModel::trains`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "データ取得元")]
    pub source: String,
    #[serde(rename = "注意事項")]
    pub notice: String,
    #[serde(rename = "lineId")]
    pub line_id: String,
    /// Line name.
    pub name: String,
}

impl RailwayData {
    /// Attribution block; both dates are the revision date.
    pub fn new(revision: Option<String>, line_id: &str, name: &str) -> Self {
        Self {
            revised: revision.clone(),
            created: revision,
            source: SOURCE_NAME.to_string(),
            notice: NOTICE.to_string(),
            line_id: line_id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Entry of the train URL index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainUrl {
    pub url: String,
}

/// Entry of the station time index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationTime {
    #[serde(rename = "type")]
    pub train_type: String,
    pub destination: String,
    /// Zero-based direction tab id of the listing.
    pub direction: Option<u8>,
}

/// The normalized timetable of one line for one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RailwayModel {
    #[serde(rename = "railwayData")]
    pub railway_data: RailwayData,
    pub stations: Vec<StationRef>,
    /// `trainId` → `trainId2` → detail URL, for every collected train.
    #[serde(rename = "trainURLList")]
    pub train_url_list: IndexMap<String, IndexMap<String, TrainUrl>>,
    /// `"<hhmm>-<station>-<trainId>"` → listing info, for every stop.
    #[serde(rename = "stationTimeList")]
    pub station_time_list: IndexMap<String, StationTime>,
    pub types: TypeRegistry,
    /// Revision date → composite train key → train.
    pub trains: IndexMap<String, IndexMap<String, TrainEntry>>,
    /// Station names in line order; the diagram's column axis.
    #[serde(skip)]
    pub line: LineStations,
}

impl RailwayModel {
    /// Key of this model's revision in [`RailwayModel::trains`].
    ///
    /// Empty when no page reported a revision date.
    pub fn revision_key(&self) -> &str {
        self.railway_data.created.as_deref().unwrap_or_default()
    }

    /// Trains of a revision running in the given direction, in insertion
    /// order. Direction-less trains belong to neither bucket.
    pub fn bucket(&self, revision: &str, direction: Direction) -> Vec<&TrainEntry> {
        self.trains
            .get(revision)
            .map(|trains| {
                trains
                    .values()
                    .filter(|t| t.direction == Some(direction))
                    .collect()
            })
            .unwrap_or_default()
    }
}
