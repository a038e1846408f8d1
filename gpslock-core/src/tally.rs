//! Rejection tally
//!
//! Counts downgraded fixes per reason, for the diagnostic summary printed
//! after a run:
//!
//! ```text
//! Note: 42 GPS readings were mapped to 'NO_LOCK', for the following reasons:
//! * Heuristics -> 3
//! * Outside BBox -> 0
//! * DOP > 10 -> 39
//! * Speed > 60 kph -> 0
//! ```
//!
//! Reasons are registered while the pipeline is built. Each registration
//! hands back an increment callback that a
//! [`ReportingFilter`](crate::ReportingFilter) invokes on rejection.
//! Registration order is kept and is the order entries are listed in.
//!
//! One fix can count against several reasons, so [`RejectionTally::total`]
//! is the number of rejections, not the number of rejected fixes.
//!
//! Counters are atomic and shared with the callbacks through `Arc`, so a
//! filter tree holding them stays `Send`.

use core::fmt;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use heapless::{FnvIndexMap, String};

use crate::{
    constants::pipeline::{MAX_REASONS, MAX_REASON_LABEL_LEN},
    errors::{ConfigError, ConfigResult},
};

/// Reason label as stored in the tally
pub type ReasonLabel = String<MAX_REASON_LABEL_LEN>;

/// Ordered reason → count mapping
#[derive(Debug, Default)]
pub struct RejectionTally {
    counters: FnvIndexMap<ReasonLabel, Arc<AtomicU64>, MAX_REASONS>,
}

impl RejectionTally {
    /// Empty tally
    pub fn new() -> Self {
        Self { counters: FnvIndexMap::new() }
    }

    /// Register a reason and get its increment callback
    ///
    /// Registering a label twice returns a callback for the same counter;
    /// the label keeps its original position.
    pub fn register(&mut self, label: &str) -> ConfigResult<impl Fn() + Send + Sync + 'static> {
        let key = Self::key(label)?;

        let counter = match self.counters.get(&key) {
            Some(existing) => existing.clone(),
            None => {
                let counter = Arc::new(AtomicU64::new(0));
                self.counters
                    .insert(key, counter.clone())
                    .map_err(|_| ConfigError::TallyFull { capacity: MAX_REASONS })?;
                counter
            }
        };

        Ok(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
    }

    /// Count for one reason, `None` if never registered
    pub fn count(&self, label: &str) -> Option<u64> {
        let key = Self::key(label).ok()?;
        self.counters.get(&key).map(|c| c.load(Ordering::Relaxed))
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counters.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// `(label, count)` pairs in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counters
            .iter()
            .map(|(label, count)| (label.as_str(), count.load(Ordering::Relaxed)))
    }

    /// Number of registered reasons
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// True before any reason is registered
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    fn key(label: &str) -> ConfigResult<ReasonLabel> {
        let mut key = ReasonLabel::new();
        key.push_str(label).map_err(|_| ConfigError::ReasonLabelTooLong {
            len: label.len(),
            max: MAX_REASON_LABEL_LEN,
        })?;
        Ok(key)
    }
}

/// One `* label -> count` line per reason
impl fmt::Display for RejectionTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, count) in self.entries() {
            writeln!(f, "* {label} -> {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_reason() {
        let mut tally = RejectionTally::new();
        let dop = tally.register("DOP > 10").unwrap();
        let speed = tally.register("Speed > 60 kph").unwrap();

        dop();
        dop();
        speed();

        assert_eq!(tally.count("DOP > 10"), Some(2));
        assert_eq!(tally.count("Speed > 60 kph"), Some(1));
        assert_eq!(tally.count("Heuristics"), None);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn registration_order_kept() {
        let mut tally = RejectionTally::new();
        for label in ["Heuristics", "Outside BBox", "DOP > 10", "Speed > 60 kph"] {
            tally.register(label).unwrap();
        }

        let labels: Vec<&str> = tally.entries().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Heuristics", "Outside BBox", "DOP > 10", "Speed > 60 kph"]);
    }

    #[test]
    fn register_is_idempotent() {
        let mut tally = RejectionTally::new();
        let first = tally.register("Heuristics").unwrap();
        tally.register("DOP > 10").unwrap();
        let again = tally.register("Heuristics").unwrap();

        first();
        again();

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.entries().next(), Some(("Heuristics", 2)));
    }

    #[test]
    fn capacity_and_label_limits() {
        let mut tally = RejectionTally::new();
        for i in 0..MAX_REASONS {
            tally.register(&format!("reason {i}")).unwrap();
        }
        assert!(matches!(
            tally.register("one too many"),
            Err(ConfigError::TallyFull { .. })
        ));

        let long = "x".repeat(MAX_REASON_LABEL_LEN + 1);
        assert!(matches!(
            RejectionTally::new().register(&long),
            Err(ConfigError::ReasonLabelTooLong { .. })
        ));
    }

    #[test]
    fn display_lists_entries() {
        let mut tally = RejectionTally::new();
        let bbox = tally.register("Outside BBox").unwrap();
        tally.register("DOP > 10").unwrap();
        bbox();

        assert_eq!(tally.to_string(), "* Outside BBox -> 1\n* DOP > 10 -> 0\n");
    }

    #[test]
    fn callbacks_outlive_borrow() {
        let mut tally = RejectionTally::new();
        let inc = tally.register("Heuristics").unwrap();
        let handle = std::thread::spawn(move || {
            for _ in 0..10 {
                inc();
            }
        });
        handle.join().unwrap();
        assert_eq!(tally.total(), 10);
    }
}
