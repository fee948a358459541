//! Deduplicating accumulator for trains discovered across station pages.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, warn};

use crate::domain::TrainRecord;

/// Trains seen so far in one line job, keyed by normalized URL key.
///
/// Iteration follows the order in which each key was first seen. A later
/// observation of the same key replaces the stored record in place: the
/// same train looked up from different stations is expected to carry the
/// same content, so the last observation wins. A replacement that actually
/// changes the record is logged.
#[derive(Debug, Default)]
pub struct TrainAccumulator {
    trains: IndexMap<String, TrainRecord>,
    revision: Option<String>,
}

impl TrainAccumulator {
    /// Empty accumulator with no revision date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a train observation.
    ///
    /// Returns true if the key was already present.
    pub fn record(&mut self, key: String, record: TrainRecord) -> bool {
        match self.trains.entry(key) {
            Entry::Occupied(mut slot) => {
                if slot.get() != &record {
                    warn!(
                        key = %slot.key(),
                        previous = ?slot.get(),
                        replacement = ?record,
                        "conflicting observations for one train, keeping the latest"
                    );
                }
                slot.insert(record);
                true
            }
            Entry::Vacant(slot) => {
                debug!(key = %slot.key(), "new train");
                slot.insert(record);
                false
            }
        }
    }

    /// Note the revision date reported by a page.
    ///
    /// Only the first reported date is kept; later pages never overwrite it.
    pub fn observe_revision(&mut self, date: Option<&str>) {
        let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
            return;
        };
        match &self.revision {
            None => self.revision = Some(date.to_string()),
            Some(known) if known != date => {
                debug!(known = %known, ignored = %date, "revision date already set");
            }
            Some(_) => {}
        }
    }

    /// The revision date, if any page reported one.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Number of distinct trains recorded so far.
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// True if no train has been recorded.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// Consume the accumulator, yielding records in first-seen order and
    /// the revision date.
    pub fn into_parts(self) -> (Vec<TrainRecord>, Option<String>) {
        (self.trains.into_values().collect(), self.revision)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every distinct key survives, holding the last record written for it
        #[test]
        fn no_key_is_lost(ops in proptest::collection::vec((0u8..6, "[A-C]"), 0..30)) {
            let mut acc = TrainAccumulator::new();
            let mut expected: IndexMap<String, String> = IndexMap::new();
            for (k, dest) in &ops {
                let key = format!("k{k}");
                let r = TrainRecord {
                    url: key.clone(),
                    train_id: k.to_string(),
                    train_id2: String::new(),
                    dest: dest.clone(),
                    train_type: String::new(),
                    direction: String::new(),
                    direction_id: None,
                };
                acc.record(key.clone(), r);
                expected.insert(key, dest.clone());
            }
            let (records, _) = acc.into_parts();
            prop_assert_eq!(records.len(), expected.len());
            for (record, (key, dest)) in records.iter().zip(expected.iter()) {
                prop_assert_eq!(&record.url, key);
                prop_assert_eq!(&record.dest, dest);
            }
        }
    }
}
