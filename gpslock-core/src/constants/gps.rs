//! GPS Receiver Constants
//!
//! Values describing the earth model and the defaults of the heuristic
//! continuity tracker. The tracker defaults are tuned for action-camera
//! receivers reporting at roughly 10-18 Hz.

// ===== EARTH MODEL =====

/// Mean earth radius in meters (IUGG), used for haversine distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Valid latitude range in degrees.
pub const LATITUDE_LIMIT_DEG: f64 = 90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_LIMIT_DEG: f64 = 180.0;

// ===== HEURISTIC TRACKER =====

/// Lock state changes the tracker remembers.
///
/// Upper bound of `max_lock_transitions`. Only change times are stored, so
/// the flap window holds at any sample rate.
pub const MAX_TRACKED_TRANSITIONS: usize = 16;

/// Trailing window over which lock transitions are counted (milliseconds).
pub const DEFAULT_FLAP_WINDOW_MS: u64 = 2_000;

/// Lock state changes within the flap window that mark a fix as flapping.
///
/// Two transitions is locked → unlocked → locked.
pub const DEFAULT_MAX_LOCK_TRANSITIONS: usize = 2;

/// Ground speed (m/s) above which a repeated position is considered frozen.
///
/// Below this the receiver may legitimately report the same coordinates
/// while standing still.
pub const DEFAULT_FROZEN_SPEED_MPS: f64 = 1.0;

/// Largest plausible speed implied by consecutive positions (m/s).
///
/// 120 m/s is ~430 km/h: beyond any ground vehicle or skydiver a helmet
/// camera will ride with, while leaving headroom for light aircraft.
pub const DEFAULT_MAX_IMPLIED_SPEED_MPS: f64 = 120.0;

/// Age after which the tracker's reference fix is replaced (milliseconds).
pub const DEFAULT_REFERENCE_TIMEOUT_MS: u64 = 5_000;
