//! Shared helpers for the integration tests
//!
//! - `generators`: synthetic tracks with realistic receiver cadence
//! - `scenarios`: named fault patterns layered onto a clean track

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

use gpslock_core::{GpsSample, LockState};

/// Timestamps of a track point list, in whole seconds
pub fn secs(track: &gpslock_core::TrackDocument) -> Vec<u64> {
    track.iter().map(|p| p.timestamp.as_secs()).collect()
}

/// Resolved lock states of an amended timeline
pub fn resolved(samples: &[GpsSample]) -> Vec<LockState> {
    samples.iter().map(GpsSample::resolved_lock).collect()
}
