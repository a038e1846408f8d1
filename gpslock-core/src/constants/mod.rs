//! Constants for gpslock Core
//!
//! Every default and limit the pipeline uses lives here, grouped by domain:
//! - **gps**: receiver behaviour, earth geometry, heuristic tracker defaults
//! - **units**: speed conversion factors
//! - **pipeline**: configuration defaults, reason labels, tally capacity
//!
//! Use these instead of magic numbers, and keep units in the names.

/// GPS receiver characteristics and heuristic tracker defaults.
pub mod gps;

/// Speed unit conversion factors.
pub mod units;

/// Pipeline configuration defaults and diagnostic limits.
pub mod pipeline;

pub use gps::{
    EARTH_RADIUS_M, MAX_TRACKED_TRANSITIONS,
    DEFAULT_FLAP_WINDOW_MS, DEFAULT_MAX_LOCK_TRANSITIONS,
    DEFAULT_FROZEN_SPEED_MPS, DEFAULT_MAX_IMPLIED_SPEED_MPS, DEFAULT_REFERENCE_TIMEOUT_MS,
};

pub use pipeline::{
    DEFAULT_DOP_MAX, DEFAULT_SPEED_MAX, DEFAULT_SPEED_MAX_UNITS,
    MAX_REASONS, MAX_REASON_LABEL_LEN,
    REASON_HEURISTICS, REASON_OUTSIDE_BBOX,
};
