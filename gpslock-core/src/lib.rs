//! Core GPS-lock filtering engine for gpslock
//!
//! Turns the ordered GPS samples decoded from a recorded telemetry track into
//! a cleaned, throttled track ready for GPX export.
//!
//! Consumer GPS receivers regularly report "locked" fixes that cannot be
//! true: teleporting positions, absurd dilution of precision, points far
//! outside the area of interest, impossible speeds. This crate downgrades
//! those fixes to not-locked and records why, without touching good data.
//!
//! Data flow:
//!
//! ```text
//! samples → WorstOfFilter(ReportingFilter(..), ..) → TrackAssembler → Exporter → TrackDocument → GPX
//!                        ↓
//!                 RejectionTally
//! ```
//!
//! ```no_run
//! use std::time::Duration;
//! use gpslock_core::{convert, GpsFix, GpsSample, PipelineConfig};
//!
//! let samples = vec![
//!     GpsSample::new(Duration::ZERO, 51.5, -0.12, GpsFix::Fix3D).with_dop(1.2),
//! ];
//! let conversion = convert(samples, &PipelineConfig::default())?;
//! println!("{}", conversion.track.to_gpx_string()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod assembler;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod filters;
pub mod sample;
pub mod tally;
pub mod time;
pub mod traits;
pub mod units;

// Public API
pub use assembler::{AmendedTimeline, TrackAssembler};
pub use config::{convert, Conversion, PipelineConfig};
pub use errors::{ConfigError, ConfigResult, ExportError, ExportResult};
pub use export::{Exporter, TrackDocument, TrackPoint};
pub use filters::{
    BoundingBox,
    BoundingBoxFilter,
    DopFilter,
    HeuristicTracker,
    MaxSpeedFilter,
    NullFilter,
    ReportingFilter,
    TrackerSettings,
    WorstOfFilter,
};
pub use sample::{GpsFix, GpsSample, LockState};
pub use tally::RejectionTally;
pub use traits::LockFilter;
pub use units::SpeedUnit;

/// Crate version, embedded in the GPX `creator` attribute
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
