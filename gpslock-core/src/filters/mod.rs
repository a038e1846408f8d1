//! GPS Lock Filters
//!
//! ## Overview
//!
//! A receiver's own "locked" flag is not enough to trust a fix. Cheap
//! action-camera receivers report locked positions that jump kilometres,
//! carry a DOP of 99, or move faster than the camera ever could. Each filter
//! here looks at one aspect of a fix and votes accept or reject.
//!
//! ## Filter Kinds
//!
//! ### Leaf filters
//! | Filter | Rejects when | State |
//! |---|---|---|
//! | [`NullFilter`] | never | none |
//! | [`BoundingBoxFilter`] | (lon, lat) outside the box | none |
//! | [`DopFilter`] | `dop > max_dop` | none |
//! | [`MaxSpeedFilter`] | `ground_speed > max_speed` | none |
//! | [`HeuristicTracker`] | fix breaks continuity with recent history | rolling |
//!
//! ### Composite filters
//! - [`ReportingFilter`]: runs a callback whenever its inner filter rejects
//! - [`WorstOfFilter`]: runs every child, accepts only if all accept
//!
//! ## Building a Pipeline
//!
//! ```rust
//! use gpslock_core::filters::{DopFilter, HeuristicTracker, NullFilter, ReportingFilter, WorstOfFilter};
//! use gpslock_core::RejectionTally;
//!
//! let mut tally = RejectionTally::new();
//! let pipeline = WorstOfFilter::new()
//!     .with(ReportingFilter::new(HeuristicTracker::default(), tally.register("Heuristics")?))
//!     .with(ReportingFilter::new(NullFilter, tally.register("Outside BBox")?))
//!     .with(ReportingFilter::new(DopFilter::new(10.0)?, tally.register("DOP > 10")?));
//! # Ok::<(), gpslock_core::ConfigError>(())
//! ```
//!
//! Every child of a [`WorstOfFilter`] sees every sample, so a fix that is
//! both too imprecise and too fast counts against both reasons.

mod bbox;
mod null;
mod reporting;
mod thresholds;
mod tracker;
mod utils;
mod worst_of;

pub use bbox::{BoundingBox, BoundingBoxFilter};
pub use null::NullFilter;
pub use reporting::ReportingFilter;
pub use thresholds::{DopFilter, MaxSpeedFilter};
pub use tracker::{Anomaly, HeuristicTracker, TrackerSettings};
pub use utils::haversine_distance_m;
pub use worst_of::WorstOfFilter;
