//! The ordered station list of the target line.
//!
//! Direction inference and the diagram's column axis both work off this
//! list. It is a list rather than a set: names may repeat (loop lines,
//! branches sharing a name) and position matters.

use super::{Direction, StationRef, TimetableEntry};

/// Line positions of the first and last stops of a train that lie on the
/// line, in the train's own stop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub first: usize,
    pub last: usize,
}

impl LineSpan {
    /// Direction implied by the span, or `None` when the train touches the
    /// line at a single position.
    pub fn direction(self) -> Option<Direction> {
        match self.first.cmp(&self.last) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less => Some(Direction::Down),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Ordered, duplicate-permitting list of station names on a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStations(Vec<String>);

impl LineStations {
    /// Wrap station names already in line order.
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Take the names of a line page's stations, in page order.
    pub fn from_stations(stations: &[StationRef]) -> Self {
        Self(stations.iter().map(|s| s.name.clone()).collect())
    }

    /// Number of stations, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the line has no stations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Station names in line order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Position of the first station with this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    /// Find the span of a timetable over this line.
    ///
    /// Returns `None` if no stop matches a line station.
    pub fn span(&self, timetable: &[TimetableEntry]) -> Option<LineSpan> {
        let mut positions = timetable.iter().filter_map(|e| self.position(&e.name));
        let first = positions.next()?;
        let last = positions.last().unwrap_or(first);
        Some(LineSpan { first, last })
    }

    /// Classify a train's direction relative to this line.
    ///
    /// Uses the span when the train covers more than one line position;
    /// otherwise falls back to `label`, the direction recorded for the train.
    /// The fallback also applies to a train with no stops at all.
    pub fn classify(
        &self,
        timetable: &[TimetableEntry],
        label: Option<Direction>,
    ) -> Option<Direction> {
        self.span(timetable).and_then(LineSpan::direction).or(label)
    }
}
