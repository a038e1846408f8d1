//! Speed Conversion Factors
//!
//! Multiply a value in the named unit by the factor to get meters/second.

/// Meters per second (identity).
pub const MPS_PER_MPS: f64 = 1.0;

/// Kilometers per hour: 1000 m / 3600 s.
pub const MPS_PER_KPH: f64 = 1_000.0 / 3_600.0;

/// Statute miles per hour: 1609.344 m / 3600 s.
pub const MPS_PER_MPH: f64 = 1_609.344 / 3_600.0;

/// Knots: 1852 m / 3600 s.
pub const MPS_PER_KNOT: f64 = 1_852.0 / 3_600.0;

/// Feet per second: 0.3048 m.
pub const MPS_PER_FPS: f64 = 0.3048;
