//! Error Types for Pipeline Construction and Track Export
//!
//! ## Design Philosophy
//!
//! The filtering pipeline itself cannot fail: every sample gets a verdict,
//! and a rejected fix is data, not an error. Errors therefore live only at
//! the two edges of a run:
//!
//! 1. **Construction** (`ConfigError`): a bounding box with min > max, a
//!    negative DOP threshold, an unknown speed unit. These are raised while
//!    the filter tree is being built, never during per-sample evaluation.
//!
//! 2. **Export** (`ExportError`): the GPX writer failed to write into the
//!    caller's destination.
//!
//! Out-of-order timestamps are a caller precondition and are not reported.
//! An empty sample stream is not an error either; it yields an empty track.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use gpslock_core::{BoundingBox, ConfigError};
//!
//! match BoundingBox::new(1.0, -1.0, -1.0, 1.0) {
//!     Ok(_) => unreachable!(),
//!     Err(ConfigError::InvalidBoundingBox { reason }) => {
//!         // Tell the user which bound is wrong and stop before decoding
//!         eprintln!("bad --gps-bbox-lon-lat: {reason}");
//!     }
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for pipeline construction
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for track export
pub type ExportResult<T> = Result<T, ExportError>;

/// Malformed configuration, detected while building the pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bounding box bounds are inverted or not finite
    #[error("Invalid bounding box: {reason}")]
    InvalidBoundingBox {
        /// Which constraint the box violates
        reason: &'static str,
    },

    /// A threshold is negative or not a number
    #[error("Invalid {name} threshold {value}: must be finite and non-negative")]
    InvalidThreshold {
        /// Name of the threshold (`dop_max`, `speed_max`, ...)
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Speed unit not known to the unit converter
    #[error("Unknown speed unit '{unit}'")]
    UnknownUnit {
        /// The unit string as given
        unit: String,
    },

    /// Heuristic tracker setting out of range
    #[error("Invalid tracker setting {name}: {reason}")]
    InvalidTrackerSetting {
        /// Setting name
        name: &'static str,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Rejection tally has no room for another reason
    #[error("Rejection tally full: at most {capacity} reasons")]
    TallyFull {
        /// Maximum number of reasons
        capacity: usize,
    },

    /// Reason label longer than the tally can store
    #[error("Reason label is {len} bytes, limit is {max}")]
    ReasonLabelTooLong {
        /// Label length in bytes
        len: usize,
        /// Maximum label length in bytes
        max: usize,
    },
}

/// Failure while rendering or writing the GPX document
#[derive(Error, Debug)]
pub enum ExportError {
    /// Destination rejected the write
    #[error("GPX write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered document was not valid UTF-8
    #[error("GPX output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A point's absolute time does not fit the calendar
    #[error("Timestamp out of range: start + {offset_ms} ms")]
    TimeOutOfRange {
        /// Offset of the point from the recording start
        offset_ms: u128,
    },
}
