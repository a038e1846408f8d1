//! GPS samples as delivered by the telemetry decoder
//!
//! A [`GpsSample`] is one timestamped fix. The decoder has already
//! normalized units: coordinates in degrees, ground speed in meters/second.
//!
//! Each sample carries two lock notions:
//! - `fix`: what the receiver reported
//! - `resolved_lock`: what the pipeline concluded
//!
//! `resolved_lock` starts as the classification of `fix` and can only be
//! downgraded ([`GpsSample::downgrade`]). There is no way to upgrade a fix
//! the receiver itself reported as not locked.
//!
//! ## Wire format
//!
//! ```json
//! {"timestamp_ms": 55.6, "latitude": 51.5, "longitude": -0.12,
//!  "altitude": 31.0, "ground_speed": 4.2, "dop": 1.3, "fix": "3d"}
//! ```
//!
//! `altitude`, `ground_speed` and `dop` are optional (absent speed and DOP
//! read as zero). `resolved_lock` is never read from input.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::time::Offset;

/// Fix type reported by the receiver
///
/// Serialized as `"none"`, `"2d"` or `"3d"`. Input also takes the
/// receiver's numeric codes `0`, `2` and `3`, as numbers or strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FixRecord")]
pub enum GpsFix {
    /// No position solution
    #[serde(rename = "none")]
    NoFix,
    /// Two-dimensional solution (no usable altitude)
    #[serde(rename = "2d")]
    Fix2D,
    /// Full three-dimensional solution
    #[serde(rename = "3d")]
    Fix3D,
}

/// Fix as it appears in decoder output
#[derive(Deserialize)]
#[serde(untagged)]
enum FixRecord {
    Code(u64),
    Name(String),
}

impl TryFrom<FixRecord> for GpsFix {
    type Error = String;

    fn try_from(record: FixRecord) -> Result<Self, String> {
        match record {
            FixRecord::Code(0) => Ok(Self::NoFix),
            FixRecord::Code(2) => Ok(Self::Fix2D),
            FixRecord::Code(3) => Ok(Self::Fix3D),
            FixRecord::Code(code) => Err(format!("unknown fix code {code}")),
            FixRecord::Name(name) => match name.to_ascii_lowercase().as_str() {
                "none" | "no_fix" | "0" => Ok(Self::NoFix),
                "2d" | "2" => Ok(Self::Fix2D),
                "3d" | "3" => Ok(Self::Fix3D),
                _ => Err(format!("unknown fix type '{name}'")),
            },
        }
    }
}

impl GpsFix {
    /// Fix types that count as locked
    pub const LOCKED: [GpsFix; 2] = [GpsFix::Fix2D, GpsFix::Fix3D];

    /// Whether the receiver claims a position solution
    pub fn is_locked(self) -> bool {
        Self::LOCKED.contains(&self)
    }

    /// Lock classification of this fix type
    pub fn lock_state(self) -> LockState {
        if self.is_locked() {
            LockState::Locked
        } else {
            LockState::NotLocked
        }
    }
}

impl fmt::Display for GpsFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFix => f.write_str("NO_FIX"),
            Self::Fix2D => f.write_str("2D"),
            Self::Fix3D => f.write_str("3D"),
        }
    }
}

/// Binary lock classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// Trusted position
    Locked,
    /// Position must not be trusted
    NotLocked,
}

impl LockState {
    /// True for [`LockState::Locked`]
    pub fn is_locked(self) -> bool {
        self == LockState::Locked
    }
}

/// One timestamped GPS fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleRecord")]
pub struct GpsSample {
    /// Offset from the start of the recording
    #[serde(rename = "timestamp_ms", with = "crate::time::serde_millis")]
    pub timestamp: Offset,

    /// Latitude in degrees, positive north
    pub latitude: f64,

    /// Longitude in degrees, positive east
    pub longitude: f64,

    /// Altitude as decoded (unit chosen upstream)
    pub altitude: Option<f64>,

    /// Ground speed in meters/second
    pub ground_speed: f64,

    /// Dilution of precision, larger is worse
    pub dop: f64,

    /// Fix type reported by the receiver
    pub fix: GpsFix,

    /// Verdict of the pipeline, never better than `fix`
    resolved_lock: LockState,
}

impl GpsSample {
    /// Sample with zero speed, zero DOP and no altitude
    pub fn new(timestamp: Duration, latitude: f64, longitude: f64, fix: GpsFix) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            altitude: None,
            ground_speed: 0.0,
            dop: 0.0,
            fix,
            resolved_lock: fix.lock_state(),
        }
    }

    /// Set altitude
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Set ground speed (m/s)
    pub fn with_speed(mut self, ground_speed: f64) -> Self {
        self.ground_speed = ground_speed;
        self
    }

    /// Set dilution of precision
    pub fn with_dop(mut self, dop: f64) -> Self {
        self.dop = dop;
        self
    }

    /// Pipeline verdict for this sample
    pub fn resolved_lock(&self) -> LockState {
        self.resolved_lock
    }

    /// True when the pipeline still trusts this fix
    pub fn is_locked(&self) -> bool {
        self.resolved_lock.is_locked()
    }

    /// Mark the fix as not locked. Idempotent; there is no inverse.
    pub fn downgrade(&mut self) {
        self.resolved_lock = LockState::NotLocked;
    }
}

/// Input shape of a sample; `resolved_lock` is derived, never read
#[derive(Deserialize)]
struct SampleRecord {
    #[serde(rename = "timestamp_ms", with = "crate::time::serde_millis")]
    timestamp: Duration,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: Option<f64>,
    #[serde(default)]
    ground_speed: f64,
    #[serde(default)]
    dop: f64,
    fix: GpsFix,
}

impl From<SampleRecord> for GpsSample {
    fn from(record: SampleRecord) -> Self {
        let sample = GpsSample::new(record.timestamp, record.latitude, record.longitude, record.fix)
            .with_speed(record.ground_speed)
            .with_dop(record.dop);
        match record.altitude {
            Some(altitude) => sample.with_altitude(altitude),
            None => sample,
        }
    }
}
