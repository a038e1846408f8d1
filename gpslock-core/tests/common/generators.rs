//! Synthetic GPS tracks
//!
//! Action cameras report GPS at 18 Hz; these generators default to that
//! cadence so tracker windows see realistic sample counts.

use std::time::Duration;

use gpslock_core::{GpsFix, GpsSample};

/// Meters per degree of latitude on the mean sphere
pub const METERS_PER_DEG_LAT: f64 = 111_194.93;

/// Straight northbound track at constant speed
pub struct TrackGenerator {
    /// Samples per second
    pub rate_hz: u32,
    /// Ground speed in m/s
    pub speed_mps: f64,
    /// Starting latitude
    pub lat: f64,
    /// Constant longitude
    pub lon: f64,
    /// Reported DOP
    pub dop: f64,
    /// Reported fix type
    pub fix: GpsFix,
}

impl Default for TrackGenerator {
    fn default() -> Self {
        Self {
            rate_hz: 18,
            speed_mps: 5.0,
            lat: 51.5,
            lon: -0.12,
            dop: 1.5,
            fix: GpsFix::Fix3D,
        }
    }
}

impl TrackGenerator {
    /// Interval between samples
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.rate_hz
    }

    /// The `i`th sample of the track
    pub fn sample(&self, i: u32) -> GpsSample {
        let t = self.interval() * i;
        let lat = self.lat + self.speed_mps * t.as_secs_f64() / METERS_PER_DEG_LAT;
        GpsSample::new(t, lat, self.lon, self.fix)
            .with_altitude(20.0)
            .with_speed(self.speed_mps)
            .with_dop(self.dop)
    }

    /// `seconds` of track
    pub fn generate(&self, seconds: u32) -> Vec<GpsSample> {
        (0..self.rate_hz * seconds).map(|i| self.sample(i)).collect()
    }
}
