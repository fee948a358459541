//! Replay source backed by a JSON capture of scraped pages.
//!
//! Serves pages recorded by an earlier scrape as if they were fetched live,
//! which allows offline exports and deterministic tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SourceError;
use super::{LinePage, StationPage, TimetableSource};
use crate::domain::StopEntry;
use crate::train_url::normalize_train_url;

/// A recorded scrape: every page a line job touches, keyed by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    /// Timetable date (YYYYMMDD) the pages were scraped for, if recorded.
    #[serde(default)]
    pub requested_date: Option<String>,
    /// Line station list pages, keyed by line URL.
    #[serde(default)]
    pub lines: HashMap<String, LinePage>,
    /// Station timetable pages, keyed by station page URL.
    #[serde(default)]
    pub station_pages: HashMap<String, StationPage>,
    /// Train detail stop lists, keyed by train URL.
    #[serde(default)]
    pub trains: HashMap<String, Vec<StopEntry>>,
}

/// A [`TimetableSource`] that serves pages from a [`Capture`].
///
/// A capture holds a single date's pages. When it records that date, line
/// and station pages requested for any other date are refused; otherwise
/// the requested date is not checked. Train pages are matched by normalized train key, so any variant of a
/// train URL finds the recorded stops.
#[derive(Debug, Clone)]
pub struct RecordedSource {
    date: Option<String>,
    lines: HashMap<String, LinePage>,
    station_pages: HashMap<String, StationPage>,
    trains: HashMap<String, Vec<StopEntry>>,
}

fn train_key(url: &str) -> String {
    normalize_train_url(url)
        .map(|n| n.key)
        .unwrap_or_else(|_| url.to_string())
}

fn line_key(url: &str) -> &str {
    url.trim_end_matches('/')
}

impl RecordedSource {
    /// Index a capture by normalized URL.
    pub fn new(capture: Capture) -> Self {
        Self {
            date: capture.requested_date,
            lines: capture
                .lines
                .into_iter()
                .map(|(url, page)| (line_key(&url).to_string(), page))
                .collect(),
            station_pages: capture.station_pages,
            trains: capture
                .trains
                .into_iter()
                .map(|(url, stops)| (train_key(&url), stops))
                .collect(),
        }
    }

    /// Parse a capture from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let capture: Capture = serde_json::from_str(json)?;
        Ok(Self::new(capture))
    }

    /// Load a capture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading capture");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn check_date(&self, date: &str) -> Result<(), SourceError> {
        match &self.date {
            Some(available) if available != date => Err(SourceError::DateMismatch {
                requested: date.to_string(),
                available: available.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl TimetableSource for RecordedSource {
    fn line_page(&self, line_url: &str, date: &str) -> Result<LinePage, SourceError> {
        self.check_date(date)?;
        self.lines
            .get(line_key(line_url))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(line_url.to_string()))
    }

    fn station_page(&self, station_url: &str, date: &str) -> Result<StationPage, SourceError> {
        self.check_date(date)?;
        self.station_pages
            .get(station_url)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(station_url.to_string()))
    }

    fn train_stops(&self, train_url: &str) -> Result<Vec<StopEntry>, SourceError> {
        self.trains
            .get(&train_key(train_url))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(train_url.to_string()))
    }
}
