//! Pipeline Configuration Defaults
//!
//! Out of the box a DOP above 10 or a speed above 60 km/h downgrades a fix,
//! and every point is exported.

// ===== THRESHOLD DEFAULTS =====

/// Maximum dilution of precision before a fix is considered not locked.
pub const DEFAULT_DOP_MAX: f64 = 10.0;

/// Maximum ground speed before a fix is considered not locked.
pub const DEFAULT_SPEED_MAX: f64 = 60.0;

/// Unit of [`DEFAULT_SPEED_MAX`].
pub const DEFAULT_SPEED_MAX_UNITS: &str = "kph";

// ===== REJECTION REASONS =====

/// Reason recorded when the heuristic tracker rejects a fix.
pub const REASON_HEURISTICS: &str = "Heuristics";

/// Reason recorded when a fix lies outside the bounding box.
pub const REASON_OUTSIDE_BBOX: &str = "Outside BBox";

// ===== TALLY LIMITS =====

/// Maximum number of distinct reasons in one tally.
///
/// The standard pipeline registers four. Power of two as required by the
/// index map.
pub const MAX_REASONS: usize = 16;

/// Maximum reason label length in bytes.
pub const MAX_REASON_LABEL_LEN: usize = 64;
