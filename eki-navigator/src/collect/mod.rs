//! Collection of raw timetable pages for one line.
//!
//! Page scraping itself lives behind [`TimetableSource`]; this module walks
//! a line's pages in order and gathers one deduplicated, in-memory record
//! set for the model builder. Failures are contained as narrowly as
//! possible: a bad station page drops that page, a bad train page drops
//! that train, and only an unreadable line page fails the job.

mod accumulator;
mod error;
mod recorded;

pub use accumulator::TrainAccumulator;
pub use error::{CollectError, PartialFetchError, SourceError};
pub use recorded::{Capture, RecordedSource};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{StationRef, StopEntry, TrainDetail, TrainRecord};
use crate::train_url::normalize_train_url;

/// A line's station list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePage {
    /// Line name from the page heading.
    pub label: String,
    /// Stations in line order, names as scraped.
    pub stations: Vec<StationRef>,
    /// Station timetable page URLs, deduplicated, in page order.
    pub station_pages: Vec<String>,
}

/// One station timetable page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationPage {
    /// Trains listed under each direction tab; `None` if the page carried
    /// no result list.
    pub trains: Option<Vec<ListedTrain>>,
    /// Revision date shown in the page footer.
    pub date: Option<String>,
}

/// One train link on a station timetable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedTrain {
    pub url: String,
    pub dest: String,
    #[serde(rename = "type")]
    pub train_type: String,
    /// Label of the direction tab.
    pub direction: String,
    /// Zero-based direction tab id.
    pub direction_id: Option<u8>,
}

/// Supplier of scraped pages.
///
/// Implementations fetch or replay pages; they do no interpretation beyond
/// extracting the listed fields.
pub trait TimetableSource {
    /// Fetch a line's station list for a date.
    fn line_page(&self, line_url: &str, date: &str) -> Result<LinePage, SourceError>;

    /// Fetch the train list of one station timetable page.
    fn station_page(&self, station_url: &str, date: &str) -> Result<StationPage, SourceError>;

    /// Fetch the stop list of one train detail page.
    fn train_stops(&self, train_url: &str) -> Result<Vec<StopEntry>, SourceError>;
}

/// Everything the model builder needs for one line and date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedLine {
    pub line_url: String,
    /// Last path segment of the line URL.
    pub line_id: String,
    pub label: String,
    pub stations: Vec<StationRef>,
    /// Revision date from the first station page reporting one.
    pub revision: Option<String>,
    pub trains: Vec<TrainDetail>,
}

/// Last non-empty path segment of a line URL.
///
/// ```
/// use eki_navigator::collect::line_id;
///
/// assert_eq!(line_id("https://ekitan.com/timetable/railway/line/4500/"), "4500");
/// ```
pub fn line_id(line_url: &str) -> String {
    line_url
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or_default()
        .to_string()
}

/// Merge one station page into the accumulator.
///
/// Returns the number of trains recorded from the page.
pub fn ingest_station_page(
    acc: &mut TrainAccumulator,
    station_url: &str,
    page: StationPage,
) -> Result<usize, PartialFetchError> {
    let trains = page.trains.ok_or_else(|| PartialFetchError {
        station_url: station_url.to_string(),
        reason: "page has no train list".to_string(),
    })?;

    let mut recorded = 0;
    for listed in trains {
        let normalized = match normalize_train_url(&listed.url) {
            Ok(n) => n,
            Err(e) => {
                warn!(station_url, error = %e, "skipping train link");
                continue;
            }
        };
        let Some(train_id) = normalized.train_id() else {
            warn!(station_url, tx = %normalized.tx, "skipping train link without train number");
            continue;
        };
        let record = TrainRecord {
            url: normalized.canonical_url.clone(),
            train_id: train_id.to_string(),
            train_id2: normalized.train_id2(),
            dest: listed.dest,
            train_type: listed.train_type,
            direction: listed.direction,
            direction_id: listed.direction_id,
        };
        acc.record(normalized.key, record);
        recorded += 1;
    }
    acc.observe_revision(page.date.as_deref());
    Ok(recorded)
}

/// Collect all pages of one line for a date.
pub fn collect_line<S: TimetableSource + ?Sized>(
    source: &S,
    line_url: &str,
    date: &str,
) -> Result<CollectedLine, CollectError> {
    let line = source
        .line_page(line_url, date)
        .map_err(CollectError::LinePage)?;
    if line.stations.is_empty() {
        return Err(CollectError::NoStations(line_url.to_string()));
    }
    info!(
        line = %line.label,
        stations = line.stations.len(),
        pages = line.station_pages.len(),
        "collecting line"
    );

    let mut acc = TrainAccumulator::new();
    for station_url in &line.station_pages {
        let result = source
            .station_page(station_url, date)
            .map_err(|e| PartialFetchError {
                station_url: station_url.clone(),
                reason: e.to_string(),
            })
            .and_then(|page| ingest_station_page(&mut acc, station_url, page));
        if let Err(e) = result {
            warn!(error = %e, "skipping station page");
        }
    }

    debug!(trains = acc.len(), "station pages read");
    if acc.revision().is_none() {
        warn!(line = %line.label, "no page reported a revision date");
    }

    let (records, revision) = acc.into_parts();
    let mut trains = Vec::with_capacity(records.len());
    for record in records {
        match source.train_stops(&record.url) {
            Ok(stops) => trains.push(TrainDetail { record, stops }),
            Err(e) => warn!(url = %record.url, error = %e, "skipping train"),
        }
    }
    info!(trains = trains.len(), "collected line");

    Ok(CollectedLine {
        line_url: line_url.to_string(),
        line_id: line_id(line_url),
        label: line.label,
        stations: line.stations,
        revision,
        trains,
    })
}
