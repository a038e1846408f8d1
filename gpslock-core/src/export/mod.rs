//! Track export
//!
//! Turns the amended timeline into a [`TrackDocument`]:
//!
//! 1. keep samples matching the inclusion predicate (all, or locked only)
//! 2. throttle: with a non-zero `step`, keep a sample only if it is at
//!    least `step` after the previously kept one; the first survivor is
//!    always kept
//! 3. copy position, elevation and timestamp into a [`TrackPoint`]
//!
//! The throttle is greedy and forward-only. It never looks ahead, never
//! fabricates points and never interpolates; with `step = 5 s`, survivors at
//! `[0, 1, 2, 6, 7, 11]` s become `[0, 6, 11]`.
//!
//! An empty timeline gives an empty document, not an error.

mod gpx;

use core::time::Duration;

use chrono::{DateTime, Utc};

use crate::{sample::GpsSample, time::Offset};

/// Inclusion predicate accepting every sample
pub fn include_all(_sample: &GpsSample) -> bool {
    true
}

/// Inclusion predicate accepting samples whose resolved lock is locked
pub fn locked_only(sample: &GpsSample) -> bool {
    sample.is_locked()
}

/// One exported position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation, if the sample had one
    pub elevation: Option<f64>,
    /// Offset from the recording start
    pub timestamp: Offset,
}

impl From<&GpsSample> for TrackPoint {
    fn from(sample: &GpsSample) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
            elevation: sample.altitude,
            timestamp: sample.timestamp,
        }
    }
}

/// Ordered track ready for serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDocument {
    /// Wall-clock start of the recording, if known
    pub start: Option<DateTime<Utc>>,
    /// Points in time order
    pub points: Vec<TrackPoint>,
}

impl TrackDocument {
    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a document without points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate points in order
    pub fn iter(&self) -> core::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }
}

/// Resampling exporter
///
/// ```rust
/// use std::time::Duration;
/// use gpslock_core::{Exporter, GpsFix, GpsSample};
///
/// let samples = [0, 1, 2, 6, 7, 11].map(|s| {
///     GpsSample::new(Duration::from_secs(s), 0.0, 0.0, GpsFix::Fix3D)
/// });
/// let track = Exporter::new(Duration::from_secs(5)).export(samples);
///
/// let secs: Vec<u64> = track.iter().map(|p| p.timestamp.as_secs()).collect();
/// assert_eq!(secs, vec![0, 6, 11]);
/// ```
pub struct Exporter<P> {
    step: Duration,
    include: P,
    start: Option<DateTime<Utc>>,
}

impl Exporter<fn(&GpsSample) -> bool> {
    /// Export every sample, throttled to `step` (zero keeps all)
    pub fn new(step: Duration) -> Self {
        Self { step, include: include_all, start: None }
    }

    /// Export only samples still locked after filtering
    pub fn only_locked(step: Duration) -> Self {
        Self { step, include: locked_only, start: None }
    }
}

impl<P> Exporter<P>
where
    P: FnMut(&GpsSample) -> bool,
{
    /// Replace the inclusion predicate
    pub fn with_filter<Q: FnMut(&GpsSample) -> bool>(self, include: Q) -> Exporter<Q> {
        Exporter { step: self.step, include, start: self.start }
    }

    /// Attach the recording's wall-clock start to the document
    pub fn with_start(mut self, start: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self
    }

    /// Minimum spacing between exported points
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Filter, throttle and convert the timeline
    pub fn export<I>(&mut self, timeline: I) -> TrackDocument
    where
        I: IntoIterator<Item = GpsSample>,
    {
        let step = self.step;
        let mut last_selected: Option<Offset> = None;
        let mut points = Vec::new();

        for sample in timeline {
            if !(self.include)(&sample) {
                continue;
            }

            let due = match last_selected {
                None => true,
                Some(previous) => step.is_zero() || sample.timestamp.saturating_sub(previous) >= step,
            };
            if due {
                last_selected = Some(sample.timestamp);
                points.push(TrackPoint::from(&sample));
            }
        }

        TrackDocument { start: self.start, points }
    }
}
