//! Bounding box filter
//!
//! Rejects fixes outside a longitude/latitude rectangle. Useful when the
//! recording is known to stay in one area: a fix on another continent is
//! a receiver glitch, whatever the receiver says about its lock.
//!
//! Bounds are inclusive. Boxes crossing the antimeridian are not supported;
//! `min_lon` must not exceed `max_lon`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    constants::gps::{LATITUDE_LIMIT_DEG, LONGITUDE_LIMIT_DEG},
    errors::{ConfigError, ConfigResult},
    sample::GpsSample,
    traits::LockFilter,
};

use super::utils;

/// Closed longitude/latitude rectangle
///
/// Serialized as `[min_lon, min_lat, max_lon, max_lat]`, the same order the
/// command line takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Create a box, rejecting inverted or out-of-range bounds
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> ConfigResult<Self> {
        if ![min_lon, min_lat, max_lon, max_lat].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidBoundingBox { reason: "bounds must be finite" });
        }
        if min_lon > max_lon {
            return Err(ConfigError::InvalidBoundingBox { reason: "min longitude exceeds max longitude" });
        }
        if min_lat > max_lat {
            return Err(ConfigError::InvalidBoundingBox { reason: "min latitude exceeds max latitude" });
        }
        if min_lon < -LONGITUDE_LIMIT_DEG || max_lon > LONGITUDE_LIMIT_DEG {
            return Err(ConfigError::InvalidBoundingBox { reason: "longitude outside [-180, 180]" });
        }
        if min_lat < -LATITUDE_LIMIT_DEG || max_lat > LATITUDE_LIMIT_DEG {
            return Err(ConfigError::InvalidBoundingBox { reason: "latitude outside [-90, 90]" });
        }

        Ok(Self { min_lon, min_lat, max_lon, max_lat })
    }

    /// Whether the position lies inside (bounds included)
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        utils::within(longitude, self.min_lon, self.max_lon)
            && utils::within(latitude, self.min_lat, self.max_lat)
    }

    /// `(min_lon, min_lat, max_lon, max_lat)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = ConfigError;

    fn try_from(value: [f64; 4]) -> ConfigResult<Self> {
        let [min_lon, min_lat, max_lon, max_lat] = value;
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat]
    }
}

/// Parses `minlon,minlat,maxlon,maxlat`
impl FromStr for BoundingBox {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let mut values = [0.0; 4];
        let mut parts = s.split(',');
        for slot in values.iter_mut() {
            *slot = parts
                .next()
                .and_then(|part| part.trim().parse::<f64>().ok())
                .ok_or(ConfigError::InvalidBoundingBox {
                    reason: "expected minlon,minlat,maxlon,maxlat",
                })?;
        }
        if parts.next().is_some() {
            return Err(ConfigError::InvalidBoundingBox {
                reason: "expected exactly four values",
            });
        }
        Self::try_from(values)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

/// Rejects fixes outside a [`BoundingBox`]
#[derive(Debug, Clone)]
pub struct BoundingBoxFilter {
    bbox: BoundingBox,
}

impl BoundingBoxFilter {
    /// Filter for the given box
    pub fn new(bbox: BoundingBox) -> Self {
        Self { bbox }
    }

    /// The configured box
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
}

impl LockFilter for BoundingBoxFilter {
    fn evaluate(&mut self, sample: &GpsSample) -> bool {
        self.bbox.contains(sample.longitude, sample.latitude)
    }

    fn name(&self) -> &'static str {
        "BoundingBoxFilter"
    }
}
