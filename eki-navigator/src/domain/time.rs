//! Stop time handling.
//!
//! Train detail pages render each stop's times as free text such as
//! `15:30着` / `15:32発`, one per line. This module reduces those strings to
//! bare `HH:MM` values and decides which side (arrival or departure) a lone
//! time belongs to.

use std::fmt;

use serde::{Serialize, Serializer};

/// Glyph marking a time as an arrival.
pub const ARRIVAL_MARKER: char = '着';

/// Reduce a raw time string to its ASCII digits and colons.
///
/// ```
/// use eki_navigator::domain::clean_time;
///
/// assert_eq!(clean_time("15:32着"), "15:32");
/// assert_eq!(clean_time(" 9:05 発"), "9:05");
/// ```
pub fn clean_time(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect()
}

/// A cleaned stop time, e.g. `"15:32"`.
///
/// Holds whatever digits and colons survived cleaning; it is never empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopTime(String);

impl StopTime {
    /// Clean a raw time string. Returns `None` when nothing usable remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = clean_time(raw);
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// The cleaned `HH:MM` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The time without colons, e.g. `"0905"`.
    pub fn digits(&self) -> String {
        self.0.replace(':', "")
    }

    /// The time as written in diagram files: colons removed and a single
    /// leading zero dropped, e.g. `"09:05"` becomes `"905"`.
    pub fn to_oudia(&self) -> String {
        let digits = self.digits();
        match digits.strip_prefix('0') {
            Some(rest) => rest.to_string(),
            None => digits,
        }
    }
}

impl fmt::Debug for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopTime({})", self.0)
    }
}

impl fmt::Display for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StopTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Arrival and departure at one stop.
///
/// At most one side is missing for a normal stop; both are missing only
/// when the page listed the stop without any usable time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopTimes {
    pub arrival: Option<StopTime>,
    pub departure: Option<StopTime>,
}

impl StopTimes {
    /// Resolve the raw time strings of one stop.
    ///
    /// Two usable times are `[arrival, departure]`. A single time is an
    /// arrival if its raw text carries [`ARRIVAL_MARKER`], otherwise a
    /// departure. The marker is checked on the raw string, since cleaning
    /// removes it.
    ///
    /// ```
    /// use eki_navigator::domain::StopTimes;
    ///
    /// let times = StopTimes::resolve(&["15:32着"]);
    /// assert_eq!(times.arrival.unwrap().digits(), "1532");
    /// assert!(times.departure.is_none());
    /// ```
    pub fn resolve<S: AsRef<str>>(raw: &[S]) -> Self {
        let second = raw.get(1).and_then(|s| StopTime::parse(s.as_ref()));
        if let Some(departure) = second {
            return Self {
                arrival: raw.first().and_then(|s| StopTime::parse(s.as_ref())),
                departure: Some(departure),
            };
        }

        let Some(first) = raw.first() else {
            return Self::default();
        };
        let first: &str = first.as_ref();
        let time = StopTime::parse(first);
        if first.contains(ARRIVAL_MARKER) {
            Self {
                arrival: time,
                departure: None,
            }
        } else {
            Self {
                arrival: None,
                departure: time,
            }
        }
    }
}
