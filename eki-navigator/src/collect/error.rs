//! Collection error types.

/// Errors from a [`TimetableSource`](super::TimetableSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading a capture failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A capture or page payload was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested page is not available
    #[error("page not found: {0}")]
    NotFound(String),

    /// Pages were requested for a date the source does not hold
    #[error("requested date {requested} but pages are for {available}")]
    DateMismatch { requested: String, available: String },
}

/// A station page that contributed nothing.
///
/// Never fatal: the job logs it and carries on without that page's trains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("station page {station_url} skipped: {reason}")]
pub struct PartialFetchError {
    pub station_url: String,
    pub reason: String,
}

/// Errors that abort a whole line job.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The line's station list page could not be read
    #[error("line page unavailable: {0}")]
    LinePage(#[source] SourceError),

    /// The line page listed no stations
    #[error("line page {0} lists no stations")]
    NoStations(String),
}
