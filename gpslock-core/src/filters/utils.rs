//! Shared helpers for lock filters
//!
//! Pure functions: no state, no allocation, no panics on odd input.
//!
//! ## Implied speed
//!
//! ```text
//! If elapsed = 0:
//!   - distance = 0 → 0 m/s (duplicate report)
//!   - distance > 0 → infinite (same instant, two places)
//! ```

use core::time::Duration;

use crate::{
    constants::gps::EARTH_RADIUS_M,
    errors::{ConfigError, ConfigResult},
};

/// Great-circle distance between two WGS84 positions in meters
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Speed needed to cover `distance_m` in `elapsed`
pub fn implied_speed_mps(distance_m: f64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return if distance_m > 0.0 { f64::INFINITY } else { 0.0 };
    }
    distance_m / elapsed.as_secs_f64()
}

/// Inclusive range check
pub fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Validate a threshold at construction time
pub fn check_threshold(name: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
