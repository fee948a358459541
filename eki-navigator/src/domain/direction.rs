//! Travel direction along a line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two travel directions of a line.
///
/// `Up` (上り, Nobori) runs from the tail of the line's station list toward
/// its head; `Down` (下り, Kudari) runs head to tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DN")]
    Down,
}

impl Direction {
    /// Map a station page's zero-based direction tab id to a direction.
    ///
    /// Tab id 0 is the up tab; any other id is down.
    pub fn from_direction_id(id: u8) -> Self {
        if id == 0 { Direction::Up } else { Direction::Down }
    }

    /// The label used in exported timetables (`"UP"` / `"DN"`).
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DN",
        }
    }

    /// The direction keyword used by diagram files.
    pub fn oudia_name(self) -> &'static str {
        match self {
            Direction::Up => "Nobori",
            Direction::Down => "Kudari",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
