//! Domain types for the timetable exporter.
//!
//! These types represent scraped timetable data after the minimal cleanup
//! needed to place each train on its line: station names without their
//! "駅" qualifier, times reduced to `HH:MM`, and line-relative directions.

mod direction;
mod line;
mod station;
mod time;
mod train;

pub use direction::Direction;
pub use line::{LineSpan, LineStations};
pub use station::{StationRef, strip_station_suffix};
pub use time::{ARRIVAL_MARKER, StopTime, StopTimes, clean_time};
pub use train::{StopEntry, TimetableEntry, TrainDetail, TrainEntry, TrainRecord};
