//! `gps-to-gpx` command line
//!
//! Reads decoded GPS samples as JSON, runs them through the lock pipeline
//! and writes a GPX track. Input is either one JSON array or a stream of
//! sample objects:
//!
//! ```json
//! [
//!   { "timestamp_ms": 0, "latitude": 51.5, "longitude": -0.12, "altitude": 20.0,
//!     "ground_speed": 1.2, "dop": 1.5, "fix": "3d" }
//! ]
//! ```
//!
//! Flags override values loaded with `--config`, which override the
//! built-in defaults.

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use gpslock_core::{convert, BoundingBox, GpsSample, PipelineConfig};
use tracing::{debug, info, warn};

/// Path meaning stdin for input and stdout for output
pub const STDIO_PATH: &str = "-";

/// Convert decoded GPS telemetry into a GPX track, downgrading implausible fixes.
#[derive(Parser, Debug, Clone)]
#[command(name = "gps-to-gpx")]
#[command(version)]
pub struct Args {
    /// Output a point every N seconds. Default is to output all points.
    #[arg(long, value_name = "SECONDS")]
    pub every: Option<u64>,

    /// Only output points where the GPS is still locked after filtering.
    #[arg(long)]
    pub only_locked: bool,

    /// Max DOP. Points with greater DOP are considered 'NO_LOCK' [default: 10]
    #[arg(long, value_name = "DOP")]
    pub gps_dop_max: Option<f64>,

    /// Max speed. Points with greater speed are considered 'NO_LOCK' [default: 60]
    #[arg(long, value_name = "SPEED")]
    pub gps_speed_max: Option<f64>,

    /// Units of --gps-speed-max (mps, kph, mph, knot, fps) [default: kph]
    #[arg(long, value_name = "UNITS")]
    pub gps_speed_max_units: Option<String>,

    /// Points outside this box are considered 'NO_LOCK': minlon,minlat,maxlon,maxlat
    #[arg(long, value_name = "BBOX", allow_hyphen_values = true)]
    pub gps_bbox_lon_lat: Option<BoundingBox>,

    /// Wall-clock time of the first sample (RFC 3339). Default is the Unix epoch.
    #[arg(long, value_name = "TIME")]
    pub start: Option<DateTime<Utc>>,

    /// JSON pipeline configuration to start from.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Decoded samples as JSON, or '-' for stdin.
    pub input: PathBuf,

    /// Output GPX file, or '-' for stdout.
    #[arg(default_value = STDIO_PATH)]
    pub output: PathBuf,
}

impl Args {
    /// Pipeline configuration after applying `--config` and flag overrides
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(every) = self.every {
            config.step = Duration::from_secs(every);
        }
        if self.only_locked {
            config.only_locked = true;
        }
        if let Some(dop_max) = self.gps_dop_max {
            config.dop_max = dop_max;
        }
        if let Some(speed_max) = self.gps_speed_max {
            config.speed_max = speed_max;
        }
        if let Some(units) = &self.gps_speed_max_units {
            config.speed_max_units = units.clone();
        }
        if let Some(bbox) = self.gps_bbox_lon_lat {
            config.bbox = Some(bbox);
        }
        if let Some(start) = self.start {
            config.start = Some(start);
        }

        Ok(config)
    }
}

/// Load a [`PipelineConfig`] from a JSON file
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let file = File::open(path).with_context(|| format!("Failed to open config {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

/// Parse samples from a JSON array or a stream of JSON objects
pub fn parse_samples(text: &str) -> Result<Vec<GpsSample>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("Failed to parse sample array");
    }

    serde_json::Deserializer::from_str(text)
        .into_iter::<GpsSample>()
        .enumerate()
        .map(|(i, sample)| sample.with_context(|| format!("Failed to parse sample #{i}")))
        .collect()
}

fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path == Path::new(STDIO_PATH) {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read samples from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut text))
            .with_context(|| format!("Failed to read samples from {}", path.display()))?;
    }
    Ok(text)
}

/// Run one conversion
pub fn run(args: &Args) -> Result<()> {
    let config = args.pipeline_config()?;
    debug!(?config, "Pipeline configuration");

    info!("Loading GPS samples from {}", args.input.display());
    let samples = parse_samples(&read_input(&args.input)?)?;
    if samples.is_empty() {
        warn!("Input contains no samples, writing an empty track");
    }
    debug!("Read {} samples", samples.len());

    let conversion = convert(samples, &config).context("Invalid pipeline configuration")?;

    info!("Generating GPX");
    if args.output == Path::new(STDIO_PATH) {
        let stdout = io::stdout();
        write_track(&conversion.track, stdout.lock())?;
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        write_track(&conversion.track, BufWriter::new(file))?;
        info!("Wrote {} points to {}", conversion.track.len(), args.output.display());
    }

    Ok(())
}

fn write_track<W: Write>(track: &gpslock_core::TrackDocument, writer: W) -> Result<()> {
    track.write_gpx(writer).context("Failed to write GPX")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_mirror_defaults() {
        let args = Args::try_parse_from(["gps-to-gpx", "in.json"]).unwrap();
        assert_eq!(args.output, PathBuf::from("-"));
        assert_eq!(args.pipeline_config().unwrap(), PipelineConfig::default());
    }

    #[test]
    fn flags_override() {
        let args = Args::try_parse_from([
            "gps-to-gpx",
            "--every",
            "2",
            "--only-locked",
            "--gps-dop-max",
            "5",
            "--gps-speed-max",
            "40",
            "--gps-speed-max-units",
            "mph",
            "--gps-bbox-lon-lat",
            "-0.5,51.3,0.3,51.7",
            "--start",
            "2023-06-01T12:00:00Z",
            "in.json",
            "out.gpx",
        ])
        .unwrap();
        let config = args.pipeline_config().unwrap();

        assert_eq!(config.step, Duration::from_secs(2));
        assert!(config.only_locked);
        assert_eq!(config.dop_reason(), "DOP > 5");
        assert_eq!(config.speed_reason(), "Speed > 40 mph");
        assert_eq!(config.bbox, Some(BoundingBox::new(-0.5, 51.3, 0.3, 51.7).unwrap()));
        assert!(config.start.is_some());
    }

    #[test]
    fn malformed_bbox_rejected() {
        assert!(Args::try_parse_from(["gps-to-gpx", "--gps-bbox-lon-lat", "1,2,3", "in.json"]).is_err());
        assert!(Args::try_parse_from(["gps-to-gpx", "--gps-bbox-lon-lat", "1,1,0,0", "in.json"]).is_err());
    }

    #[test]
    fn samples_from_array_or_stream() {
        let array = r#"[{"timestamp_ms": 0, "latitude": 1, "longitude": 2, "fix": "3d"}]"#;
        let stream = "{\"timestamp_ms\": 0, \"latitude\": 1, \"longitude\": 2, \"fix\": \"2d\"}\n\
                      {\"timestamp_ms\": 50, \"latitude\": 1, \"longitude\": 2, \"fix\": \"none\"}\n";

        assert_eq!(parse_samples(array).unwrap().len(), 1);
        let samples = parse_samples(stream).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].timestamp, Duration::from_millis(50));
        assert!(parse_samples("").unwrap().is_empty());
        assert!(parse_samples("{\"latitude\": 1}").is_err());
    }
}
