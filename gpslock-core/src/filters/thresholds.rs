//! Threshold filters on per-sample quality indicators
//!
//! - [`DopFilter`]: dilution of precision must not exceed the limit
//! - [`MaxSpeedFilter`]: reported ground speed must not exceed the limit
//!
//! Both are stateless and compare inclusively: a value equal to the limit
//! passes. Limits are validated when the filter is built, so evaluation
//! never fails. A NaN reading never passes.

use crate::{
    errors::ConfigResult,
    sample::GpsSample,
    traits::LockFilter,
};

use super::utils;

/// Rejects fixes whose DOP exceeds a limit
#[derive(Debug, Clone)]
pub struct DopFilter {
    max_dop: f64,
}

impl DopFilter {
    /// Filter accepting `dop <= max_dop`
    pub fn new(max_dop: f64) -> ConfigResult<Self> {
        Ok(Self {
            max_dop: utils::check_threshold("dop_max", max_dop)?,
        })
    }

    /// Configured limit
    pub fn max_dop(&self) -> f64 {
        self.max_dop
    }
}

impl LockFilter for DopFilter {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        sample.dop <= self.max_dop
    }

    fn name(&self) -> &'static str {
        "DopFilter"
    }
}

/// Rejects fixes whose ground speed exceeds a limit
///
/// The limit is in meters/second; convert user units with
/// [`units::to_meters_per_second`](crate::units::to_meters_per_second)
/// first.
#[derive(Debug, Clone)]
pub struct MaxSpeedFilter {
    max_speed_mps: f64,
}

impl MaxSpeedFilter {
    /// Filter accepting `ground_speed <= max_speed_mps`
    pub fn new(max_speed_mps: f64) -> ConfigResult<Self> {
        Ok(Self {
            max_speed_mps: utils::check_threshold("speed_max", max_speed_mps)?,
        })
    }

    /// Configured limit in meters/second
    pub fn max_speed_mps(&self) -> f64 {
        self.max_speed_mps
    }
}

impl LockFilter for MaxSpeedFilter {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        sample.ground_speed <= self.max_speed_mps
    }

    fn name(&self) -> &'static str {
        "MaxSpeedFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ConfigError, sample::GpsFix};
    use core::time::Duration;

    fn sample() -> GpsSample {
        GpsSample::new(Duration::ZERO, 0.0, 0.0, GpsFix::Fix3D)
    }

    #[test]
    fn dop_limit_is_inclusive() {
        let mut filter = DopFilter::new(10.0).unwrap();

        assert!(filter.evaluate(&sample().with_dop(5.0)));
        assert!(filter.evaluate(&sample().with_dop(10.0)));
        assert!(!filter.evaluate(&sample().with_dop(15.0)));
        assert!(!filter.evaluate(&sample().with_dop(f64::NAN)));
    }

    #[test]
    fn speed_limit_is_inclusive() {
        let mut filter = MaxSpeedFilter::new(16.0).unwrap();

        assert!(filter.evaluate(&sample().with_speed(1.0)));
        assert!(filter.evaluate(&sample().with_speed(16.0)));
        assert!(!filter.evaluate(&sample().with_speed(16.5)));
    }

    #[test]
    fn negative_limits_fail_at_construction() {
        assert_eq!(
            DopFilter::new(-1.0).unwrap_err(),
            ConfigError::InvalidThreshold { name: "dop_max", value: -1.0 }
        );
        assert!(MaxSpeedFilter::new(-0.1).is_err());
        assert!(MaxSpeedFilter::new(f64::NAN).is_err());
    }
}
