//! Speed unit conversion
//!
//! The max-speed threshold is configured in whatever unit the user thinks
//! in (`60 kph`, `40 mph`) but samples arrive in meters/second. Conversion
//! happens once, while the pipeline is built.
//!
//! | Unit | Accepted spellings (case-insensitive) |
//! |---|---|
//! | meters/second | `mps`, `m/s`, `meters_per_second` |
//! | kilometers/hour | `kph`, `kmh`, `km/h`, `kmph`, `kilometers_per_hour` |
//! | miles/hour | `mph`, `miles_per_hour` |
//! | knots | `knot`, `knots`, `kn`, `kt` |
//! | feet/second | `fps`, `ft/s`, `feet_per_second` |

use core::fmt;
use core::str::FromStr;

use crate::{
    constants::units::{MPS_PER_FPS, MPS_PER_KNOT, MPS_PER_KPH, MPS_PER_MPH, MPS_PER_MPS},
    errors::{ConfigError, ConfigResult},
};

/// Supported speed units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    /// Meters per second
    MetersPerSecond,
    /// Kilometers per hour
    KilometersPerHour,
    /// Statute miles per hour
    MilesPerHour,
    /// Nautical miles per hour
    Knots,
    /// Feet per second
    FeetPerSecond,
}

impl SpeedUnit {
    /// Meters/second per one of this unit
    pub fn factor(self) -> f64 {
        match self {
            Self::MetersPerSecond => MPS_PER_MPS,
            Self::KilometersPerHour => MPS_PER_KPH,
            Self::MilesPerHour => MPS_PER_MPH,
            Self::Knots => MPS_PER_KNOT,
            Self::FeetPerSecond => MPS_PER_FPS,
        }
    }

    /// Convert `value` in this unit to meters/second
    pub fn to_mps(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Canonical short name
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MetersPerSecond => "mps",
            Self::KilometersPerHour => "kph",
            Self::MilesPerHour => "mph",
            Self::Knots => "knot",
            Self::FeetPerSecond => "fps",
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "mps" | "m/s" | "meters_per_second" => Self::MetersPerSecond,
            "kph" | "kmh" | "km/h" | "kmph" | "kilometers_per_hour" => Self::KilometersPerHour,
            "mph" | "miles_per_hour" => Self::MilesPerHour,
            "knot" | "knots" | "kn" | "kt" => Self::Knots,
            "fps" | "ft/s" | "feet_per_second" => Self::FeetPerSecond,
            _ => return Err(ConfigError::UnknownUnit { unit: s.to_string() }),
        };
        Ok(unit)
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert a `(value, unit)` pair to meters/second
///
/// Fails on unknown units and on values that are negative or not finite.
pub fn to_meters_per_second(value: f64, unit: &str) -> ConfigResult<f64> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidThreshold { name: "speed_max", value });
    }
    Ok(unit.parse::<SpeedUnit>()?.to_mps(value))
}
