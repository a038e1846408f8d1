//! Heuristic continuity tracker
//!
//! ## Overview
//!
//! The stateless filters judge a fix on its own numbers. Many bad fixes look
//! fine in isolation and only stand out against the fixes around them. The
//! tracker keeps a short history and rejects locked fixes that break
//! continuity with it.
//!
//! ## Rules
//!
//! Only fixes the receiver reports as locked can be rejected; not-locked
//! fixes are already untrusted, but their lock changes still count.
//!
//! ### 1. Fix flapping
//! A receiver losing and regaining lock within a moment produces garbage
//! around the transitions. Lock state changes are counted across the
//! trailing `flap_window` (current fix included), whatever the sample
//! rate: only the times of the most recent changes are kept. Reaching
//! `max_lock_transitions` rejects the fix, and keeps rejecting until the
//! unstable stretch has aged out of the window.
//!
//! ```text
//! lock:  L L L N L L L L L L L
//!              └─┴─ 2 transitions → rejected while inside the window
//! ```
//!
//! ### 2. Frozen position
//! Two consecutive locked fixes with bit-identical coordinates while both
//! report moving faster than `frozen_speed`. A moving receiver does not
//! repeat its position to the last bit; it is replaying a stale solution.
//!
//! ### 3. Teleport
//! The great-circle distance from the last fix the tracker accepted,
//! divided by the elapsed time, exceeds `max_implied_speed`. After
//! `reference_timeout` without an accepted fix the reference is stale: the
//! next locked fix is accepted and becomes the new reference, so one bad
//! jump cannot poison the rest of the track.
//!
//! ## Ordering
//!
//! The tracker must see every sample exactly once, in arrival order. It
//! cannot be shared or run on parallel chunks of a stream.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    buffer::CircularBuffer,
    constants::gps::{
        DEFAULT_FLAP_WINDOW_MS, DEFAULT_FROZEN_SPEED_MPS, DEFAULT_MAX_IMPLIED_SPEED_MPS,
        DEFAULT_MAX_LOCK_TRANSITIONS, DEFAULT_REFERENCE_TIMEOUT_MS, MAX_TRACKED_TRANSITIONS,
    },
    errors::{ConfigError, ConfigResult},
    sample::GpsSample,
    time::Offset,
    traits::LockFilter,
};

use super::utils;

/// Tunables of the heuristic tracker
///
/// Durations (de)serialize as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Trailing window for counting lock transitions
    #[serde(with = "crate::time::serde_secs")]
    pub flap_window: Duration,

    /// Transitions within the window that mark flapping (1..=16)
    pub max_lock_transitions: usize,

    /// Speed (m/s) above which a repeated position counts as frozen
    pub frozen_speed: f64,

    /// Largest plausible speed (m/s) between accepted fixes
    pub max_implied_speed: f64,

    /// Age after which the teleport reference is replaced
    #[serde(with = "crate::time::serde_secs")]
    pub reference_timeout: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            flap_window: Duration::from_millis(DEFAULT_FLAP_WINDOW_MS),
            max_lock_transitions: DEFAULT_MAX_LOCK_TRANSITIONS,
            frozen_speed: DEFAULT_FROZEN_SPEED_MPS,
            max_implied_speed: DEFAULT_MAX_IMPLIED_SPEED_MPS,
            reference_timeout: Duration::from_millis(DEFAULT_REFERENCE_TIMEOUT_MS),
        }
    }
}

impl TrackerSettings {
    /// Check ranges; called by [`HeuristicTracker::new`]
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_lock_transitions == 0 {
            return Err(ConfigError::InvalidTrackerSetting {
                name: "max_lock_transitions",
                reason: "must be at least 1",
            });
        }
        if self.max_lock_transitions > MAX_TRACKED_TRANSITIONS {
            return Err(ConfigError::InvalidTrackerSetting {
                name: "max_lock_transitions",
                reason: "must be at most 16",
            });
        }
        if !(self.frozen_speed.is_finite() && self.frozen_speed >= 0.0) {
            return Err(ConfigError::InvalidTrackerSetting {
                name: "frozen_speed",
                reason: "must be finite and non-negative",
            });
        }
        if !(self.max_implied_speed.is_finite() && self.max_implied_speed > 0.0) {
            return Err(ConfigError::InvalidTrackerSetting {
                name: "max_implied_speed",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

/// Why the tracker rejected a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// Lock state changed too often within the flap window
    FixFlapping,
    /// Same coordinates as the previous fix while reportedly moving
    FrozenPosition,
    /// Implausible jump from the last accepted fix
    Teleport,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixFlapping => f.write_str("fix flapping"),
            Self::FrozenPosition => f.write_str("frozen position"),
            Self::Teleport => f.write_str("teleport"),
        }
    }
}

/// Position of a locked fix
#[derive(Debug, Clone, Copy)]
struct PositionReport {
    timestamp: Offset,
    latitude: f64,
    longitude: f64,
    ground_speed: f64,
}

impl From<&GpsSample> for PositionReport {
    fn from(sample: &GpsSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            latitude: sample.latitude,
            longitude: sample.longitude,
            ground_speed: sample.ground_speed,
        }
    }
}

/// Stateful filter rejecting locked fixes that break continuity
#[derive(Debug, Clone)]
pub struct HeuristicTracker {
    settings: TrackerSettings,

    /// Lock state of the previous sample
    last_lock: Option<bool>,

    /// Times of the most recent lock state changes, oldest first
    transitions: CircularBuffer<Offset, MAX_TRACKED_TRANSITIONS>,

    /// Immediately preceding sample, if it was locked
    previous_locked: Option<PositionReport>,

    /// Last locked fix this tracker accepted
    reference: Option<PositionReport>,

    /// Rule behind the most recent rejection
    last_anomaly: Option<Anomaly>,
}

impl Default for HeuristicTracker {
    fn default() -> Self {
        Self::with_valid_settings(TrackerSettings::default())
    }
}

impl HeuristicTracker {
    /// Tracker with custom settings
    pub fn new(settings: TrackerSettings) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: TrackerSettings) -> Self {
        Self {
            settings,
            last_lock: None,
            transitions: CircularBuffer::new(),
            previous_locked: None,
            reference: None,
            last_anomaly: None,
        }
    }

    /// Active settings
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Rule that caused the most recent rejection, if the last sample was rejected
    pub fn last_anomaly(&self) -> Option<Anomaly> {
        self.last_anomaly
    }

    /// Judge a locked sample; its own lock change must already be recorded
    fn check(&self, sample: &GpsSample) -> Option<Anomaly> {
        if self.lock_transitions_since(sample.timestamp) >= self.settings.max_lock_transitions {
            return Some(Anomaly::FixFlapping);
        }

        if let Some(prev) = self.previous_locked {
            let moving = prev.ground_speed > self.settings.frozen_speed
                && sample.ground_speed > self.settings.frozen_speed;
            if moving && prev.latitude == sample.latitude && prev.longitude == sample.longitude {
                return Some(Anomaly::FrozenPosition);
            }
        }

        if let Some(reference) = self.reference {
            let elapsed = sample.timestamp.saturating_sub(reference.timestamp);
            if elapsed <= self.settings.reference_timeout {
                let distance = utils::haversine_distance_m(
                    reference.latitude,
                    reference.longitude,
                    sample.latitude,
                    sample.longitude,
                );
                if utils::implied_speed_mps(distance, elapsed) > self.settings.max_implied_speed {
                    return Some(Anomaly::Teleport);
                }
            }
        }

        None
    }

    /// Lock state changes inside the flap window ending at `now`
    ///
    /// The ring holds at least `max_lock_transitions` changes, so the
    /// count is exact up to the threshold it is compared against.
    fn lock_transitions_since(&self, now: Offset) -> usize {
        let window_start = now.saturating_sub(self.settings.flap_window);
        self.transitions.iter().filter(|&&t| t >= window_start).count()
    }

    fn record_lock(&mut self, timestamp: Offset, locked: bool) {
        if self.last_lock.is_some_and(|previous| previous != locked) {
            self.transitions.push(timestamp);
        }
        self.last_lock = Some(locked);
    }
}

impl LockFilter for HeuristicTracker {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        let locked = sample.fix.is_locked();
        self.record_lock(sample.timestamp, locked);

        if !locked {
            self.previous_locked = None;
            self.last_anomaly = None;
            return true;
        }

        let anomaly = self.check(sample);
        self.previous_locked = Some(PositionReport::from(sample));
        self.last_anomaly = anomaly;

        match anomaly {
            Some(anomaly) => {
                log_debug!(
                    "tracker rejected fix at {:.1} ms: {}",
                    crate::time::as_millis_f64(sample.timestamp),
                    anomaly
                );
                false
            }
            None => {
                self.reference = Some(PositionReport::from(sample));
                true
            }
        }
    }

    fn name(&self) -> &'static str {
        "HeuristicTracker"
    }
}
