//! Pipeline configuration and assembly
//!
//! [`PipelineConfig`] is the full configuration surface of one conversion
//! run. It deserializes from JSON with every field optional:
//!
//! ```json
//! {
//!   "only_locked": true,
//!   "dop_max": 5.0,
//!   "speed_max": 40,
//!   "speed_max_units": "mph",
//!   "bbox": [-0.5, 51.3, 0.3, 51.7],
//!   "step": 1.0,
//!   "start": "2023-06-01T12:00:00Z",
//!   "tracker": { "max_implied_speed": 80.0 }
//! }
//! ```
//!
//! ## Standard pipeline
//!
//! [`PipelineConfig::build`] registers four reasons with the tally and
//! wraps each filter in a [`ReportingFilter`], in this order:
//!
//! | # | Reason | Filter |
//! |---|---|---|
//! | 1 | `Heuristics` | [`HeuristicTracker`] |
//! | 2 | `Outside BBox` | [`BoundingBoxFilter`], or [`NullFilter`] without a box |
//! | 3 | `DOP > {dop_max}` | [`DopFilter`] |
//! | 4 | `Speed > {speed_max} {units}` | [`MaxSpeedFilter`] |
//!
//! The bbox reason is registered even when no box is configured, so the
//! summary always lists all four.

use core::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    assembler::TrackAssembler,
    constants::pipeline::{
        DEFAULT_DOP_MAX,
        DEFAULT_SPEED_MAX,
        DEFAULT_SPEED_MAX_UNITS,
        REASON_HEURISTICS,
        REASON_OUTSIDE_BBOX,
    },
    errors::ConfigResult,
    export::{Exporter, TrackDocument},
    filters::{
        BoundingBox,
        BoundingBoxFilter,
        DopFilter,
        HeuristicTracker,
        MaxSpeedFilter,
        NullFilter,
        ReportingFilter,
        TrackerSettings,
        WorstOfFilter,
    },
    sample::GpsSample,
    tally::RejectionTally,
    units::to_meters_per_second,
};

/// Configuration of one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Export only fixes still locked after filtering
    pub only_locked: bool,

    /// Maximum dilution of precision
    pub dop_max: f64,

    /// Maximum ground speed, in `speed_max_units`
    pub speed_max: f64,

    /// Unit of `speed_max`, e.g. `kph`
    pub speed_max_units: String,

    /// Area of interest; fixes outside are downgraded
    pub bbox: Option<BoundingBox>,

    /// Minimum spacing of exported points, in seconds; zero keeps all
    #[serde(with = "crate::time::serde_secs")]
    pub step: Duration,

    /// Wall-clock time of the first sample offset
    pub start: Option<DateTime<Utc>>,

    /// Heuristic tracker tunables
    pub tracker: TrackerSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            only_locked: false,
            dop_max: DEFAULT_DOP_MAX,
            speed_max: DEFAULT_SPEED_MAX,
            speed_max_units: DEFAULT_SPEED_MAX_UNITS.to_string(),
            bbox: None,
            step: Duration::ZERO,
            start: None,
            tracker: TrackerSettings::default(),
        }
    }
}

impl PipelineConfig {
    /// Reason label of the DOP filter
    pub fn dop_reason(&self) -> String {
        format!("DOP > {}", self.dop_max)
    }

    /// Reason label of the max-speed filter
    pub fn speed_reason(&self) -> String {
        format!("Speed > {} {}", self.speed_max, self.speed_max_units)
    }

    /// Build the standard filter tree, registering its reasons in `tally`
    ///
    /// Every threshold, the box and the tracker settings are validated
    /// here. Nothing is registered if validation fails.
    pub fn build(&self, tally: &mut RejectionTally) -> ConfigResult<WorstOfFilter> {
        let tracker = HeuristicTracker::new(self.tracker)?;
        let dop = DopFilter::new(self.dop_max)?;
        let speed = MaxSpeedFilter::new(to_meters_per_second(self.speed_max, &self.speed_max_units)?)?;

        let mut pipeline = WorstOfFilter::new();
        pipeline.push(ReportingFilter::new(tracker, tally.register(REASON_HEURISTICS)?));

        let outside = tally.register(REASON_OUTSIDE_BBOX)?;
        match self.bbox {
            Some(bbox) => pipeline.push(ReportingFilter::new(BoundingBoxFilter::new(bbox), outside)),
            None => pipeline.push(ReportingFilter::new(NullFilter, outside)),
        }

        pipeline.push(ReportingFilter::new(dop, tally.register(&self.dop_reason())?));
        pipeline.push(ReportingFilter::new(speed, tally.register(&self.speed_reason())?));

        Ok(pipeline)
    }

    /// Exporter honouring `only_locked`, `step` and `start`
    pub fn exporter(&self) -> Exporter<fn(&GpsSample) -> bool> {
        let exporter = if self.only_locked {
            Exporter::only_locked(self.step)
        } else {
            Exporter::new(self.step)
        };
        exporter.with_start(self.start)
    }
}

/// Result of [`convert`]
#[derive(Debug)]
pub struct Conversion {
    /// The exported track
    pub track: TrackDocument,
    /// Rejections per reason
    pub tally: RejectionTally,
}

/// Run samples through the standard pipeline and export them
pub fn convert<I>(samples: I, config: &PipelineConfig) -> ConfigResult<Conversion>
where
    I: IntoIterator<Item = GpsSample>,
{
    let mut tally = RejectionTally::new();
    let pipeline = config.build(&mut tally)?;

    let mut timeline = TrackAssembler::new(pipeline).assemble(samples);
    let track = config.exporter().export(timeline.by_ref());

    let total = tally.total();
    if total > 0 {
        log_info!(
            "Note: {} GPS readings were mapped to 'NO_LOCK', for the following reasons:\n{}",
            total,
            tally
        );
    }
    log_debug!(
        "{} fixes downgraded, {} points exported",
        timeline.downgraded(),
        track.len()
    );

    Ok(Conversion { track, tally })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ConfigError, sample::GpsFix, LockFilter};

    fn fix(ms: u64, lat: f64, lon: f64) -> GpsSample {
        GpsSample::new(Duration::from_millis(ms), lat, lon, GpsFix::Fix3D)
            .with_dop(1.0)
            .with_speed(1.0)
    }

    #[test]
    fn default_labels_in_order() {
        let mut tally = RejectionTally::new();
        let pipeline = PipelineConfig::default().build(&mut tally).unwrap();

        let labels: Vec<&str> = tally.entries().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Heuristics", "Outside BBox", "DOP > 10", "Speed > 60 kph"]);
        assert_eq!(pipeline.len(), 4);
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn fractional_thresholds_in_labels() {
        let config = PipelineConfig { dop_max: 2.5, speed_max: 12.5, speed_max_units: "mps".into(), ..Default::default() };
        assert_eq!(config.dop_reason(), "DOP > 2.5");
        assert_eq!(config.speed_reason(), "Speed > 12.5 mps");
    }

    #[test]
    fn outside_bbox_counted() {
        let config = PipelineConfig {
            bbox: Some(BoundingBox::new(-1.0, -1.0, 1.0, 1.0).unwrap()),
            dop_max: 10.0,
            ..Default::default()
        };
        let mut tally = RejectionTally::new();
        let mut pipeline = config.build(&mut tally).unwrap();

        // lat 0, lon 2
        let sample = fix(0, 0.0, 2.0).with_dop(5.0);
        assert!(!pipeline.evaluate(&sample));

        assert_eq!(tally.count("Outside BBox"), Some(1));
        assert_eq!(tally.count("Heuristics"), Some(0));
        assert_eq!(tally.count("DOP > 10"), Some(0));
        assert_eq!(tally.count("Speed > 60 kph"), Some(0));
    }

    #[test]
    fn high_dop_counted() {
        let samples = vec![fix(0, 51.0, 0.0).with_dop(15.0)];
        let conversion = convert(samples, &PipelineConfig::default()).unwrap();

        assert_eq!(conversion.tally.count("DOP > 10"), Some(1));
        assert_eq!(conversion.tally.total(), 1);
        assert_eq!(conversion.track.len(), 1);
    }

    #[test]
    fn speed_threshold_converted() {
        // 60 kph ≈ 16.67 m/s
        let samples = vec![fix(0, 51.0, 0.0).with_speed(16.0), fix(100, 51.0, 0.0001).with_speed(17.0)];
        let config = PipelineConfig { only_locked: true, ..Default::default() };
        let conversion = convert(samples, &config).unwrap();

        assert_eq!(conversion.tally.count("Speed > 60 kph"), Some(1));
        assert_eq!(conversion.track.len(), 1);
    }

    #[test]
    fn invalid_configuration_rejected() {
        let mut tally = RejectionTally::new();

        let bad_unit = PipelineConfig { speed_max_units: "parsecs".into(), ..Default::default() };
        assert!(matches!(bad_unit.build(&mut tally), Err(ConfigError::UnknownUnit { .. })));

        let bad_dop = PipelineConfig { dop_max: -1.0, ..Default::default() };
        assert!(matches!(bad_dop.build(&mut tally), Err(ConfigError::InvalidThreshold { .. })));

        assert!(tally.is_empty());
    }

    #[test]
    fn step_and_start_reach_exporter() {
        let start = "2023-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let config = PipelineConfig { step: Duration::from_secs(5), start: Some(start), ..Default::default() };

        let samples: Vec<GpsSample> = [0u64, 1, 2, 6, 7, 11]
            .iter()
            .map(|&s| GpsSample::new(Duration::from_secs(s), 51.0, 0.0, GpsFix::NoFix))
            .collect();
        let conversion = convert(samples, &config).unwrap();

        let secs: Vec<u64> = conversion.track.iter().map(|p| p.timestamp.as_secs()).collect();
        assert_eq!(secs, vec![0, 6, 11]);
        assert_eq!(conversion.track.start, Some(start));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{ "only_locked": true, "speed_max": 40, "speed_max_units": "mph",
                 "bbox": [-0.5, 51.3, 0.3, 51.7], "step": 1.5 }"#,
        )
        .unwrap();

        assert!(config.only_locked);
        assert_eq!(config.dop_max, DEFAULT_DOP_MAX);
        assert_eq!(config.speed_reason(), "Speed > 40 mph");
        assert_eq!(config.step, Duration::from_millis(1_500));
        assert_eq!(config.bbox.map(<[f64; 4]>::from), Some([-0.5, 51.3, 0.3, 51.7]));
        assert_eq!(config.tracker, TrackerSettings::default());
    }

    #[test]
    fn empty_stream() {
        let conversion = convert(Vec::new(), &PipelineConfig::default()).unwrap();
        assert!(conversion.track.is_empty());
        assert_eq!(conversion.tally.len(), 4);
    }
}
