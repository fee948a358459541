//! Station references.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the "駅" qualifier when it ends the name or precedes a
/// parenthesised annotation, e.g. `東京駅` or `新宿駅(JR)`.
static STATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"駅($|\(.*)").expect("station suffix pattern is valid"));

/// Remove the "駅" qualifier from a scraped station name.
///
/// Only the qualifier is dropped; a trailing annotation such as `(JR)` is
/// kept. A "駅" inside the name (`駅前`) is left untouched.
///
/// # Examples
///
/// ```
/// use eki_navigator::domain::strip_station_suffix;
///
/// assert_eq!(strip_station_suffix("東京駅"), "東京");
/// assert_eq!(strip_station_suffix("新宿駅(JR)"), "新宿(JR)");
/// assert_eq!(strip_station_suffix("駅前"), "駅前");
/// ```
pub fn strip_station_suffix(name: &str) -> String {
    STATION_SUFFIX.replace(name, "$1").into_owned()
}

/// A station on the target line, as listed by the line page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRef {
    pub name: String,
    pub url: String,
}

impl StationRef {
    /// Station as listed, name not yet stripped.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Returns a copy with the station-name qualifier stripped.
    pub fn stripped(&self) -> Self {
        Self {
            name: strip_station_suffix(&self.name),
            url: self.url.clone(),
        }
    }
}
