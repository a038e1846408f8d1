//! Time handling for sample offsets
//!
//! Samples carry their position in the recording as a [`Duration`] offset
//! from the first frame. Wall-clock time only appears at export, where an
//! optional recording start is added to the offset.
//!
//! The serde helpers let offsets travel as plain numbers:
//! - [`serde_millis`]: sample timestamps, `timestamp_ms: 1250.5`
//! - [`serde_secs`]: configuration durations, `step: 5`

use core::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Offset from the start of the recording
pub type Offset = Duration;

/// Absolute time of an offset, given the recording start
///
/// Returns `None` when the sum leaves chrono's representable range.
pub fn absolute_time(start: DateTime<Utc>, offset: Offset) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::from_std(offset).ok()?;
    start.checked_add_signed(delta)
}

/// Milliseconds as a fractional float, for log output
pub fn as_millis_f64(offset: Offset) -> f64 {
    offset.as_secs_f64() * 1_000.0
}

fn from_secs_checked(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs >= 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

/// (De)serialize a [`Duration`] as fractional milliseconds
pub mod serde_millis {
    use core::time::Duration;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as milliseconds
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(super::as_millis_f64(*value))
    }

    /// Deserialize from non-negative milliseconds
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(deserializer)?;
        super::from_secs_checked(millis / 1_000.0).ok_or_else(|| {
            de::Error::custom(format_args!("invalid offset {millis} ms: must be finite and non-negative"))
        })
    }
}

/// (De)serialize a [`Duration`] as fractional seconds
pub mod serde_secs {
    use core::time::Duration;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as seconds
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    /// Deserialize from non-negative seconds
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        super::from_secs_checked(secs).ok_or_else(|| {
            de::Error::custom(format_args!("invalid duration {secs} s: must be finite and non-negative"))
        })
    }
}
