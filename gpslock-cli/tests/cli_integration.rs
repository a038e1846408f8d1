//! End-to-end tests: JSON samples on disk to a GPX file on disk

use std::{fs, path::Path};

use clap::Parser;
use gpslock_cli::{run, Args};
use tempfile::TempDir;

/// Two seconds at 10 Hz heading north at 5 m/s, with a DOP spike at 1 s
fn sample_stream() -> String {
    (0..20)
        .map(|i| {
            let lat = 51.5 + i as f64 * 0.5 / 111_195.0;
            let dop = if i == 10 { 30.0 } else { 1.5 };
            format!(
                r#"{{"timestamp_ms": {}, "latitude": {lat}, "longitude": -0.12, "altitude": 20.0, "ground_speed": 5.0, "dop": {dop}, "fix": "3d"}}"#,
                i * 100
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn convert_file(dir: &Path, extra: &[&str]) -> String {
    let input = dir.join("samples.json");
    let output = dir.join("track.gpx");
    fs::write(&input, sample_stream()).unwrap();

    let mut argv = vec!["gps-to-gpx".to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv.push(input.display().to_string());
    argv.push(output.display().to_string());

    let args = Args::try_parse_from(argv).unwrap();
    run(&args).unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_all_points_exported() {
    let dir = TempDir::new().unwrap();
    let gpx = convert_file(dir.path(), &[]);

    assert!(gpx.starts_with("<?xml"));
    assert_eq!(gpx.matches("<trkpt").count(), 20);
    assert!(gpx.contains("<time>1970-01-01T00:00:01.900Z</time>"));
}

#[test]
fn test_only_locked_drops_dop_spike() {
    let dir = TempDir::new().unwrap();
    let gpx = convert_file(dir.path(), &["--only-locked"]);

    assert_eq!(gpx.matches("<trkpt").count(), 19);
    assert!(!gpx.contains("<time>1970-01-01T00:00:01.000Z</time>"));
}

#[test]
fn test_every_second_with_start() {
    let dir = TempDir::new().unwrap();
    let gpx = convert_file(dir.path(), &["--every", "1", "--start", "2024-05-01T08:30:00Z"]);

    assert_eq!(gpx.matches("<trkpt").count(), 2);
    assert!(gpx.contains("<time>2024-05-01T08:30:00.000Z</time>"));
    assert!(gpx.contains("<time>2024-05-01T08:30:01.000Z</time>"));
}

#[test]
fn test_bbox_excludes_track() {
    let dir = TempDir::new().unwrap();
    let gpx = convert_file(dir.path(), &["--only-locked", "--gps-bbox-lon-lat", "10,10,11,11"]);
    assert_eq!(gpx.matches("<trkpt").count(), 0);
}

#[test]
fn test_config_file_with_flag_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{ "only_locked": true, "dop_max": 50.0, "step": 0.5 }"#).unwrap();

    // Config keeps the spike, step 0.5 s leaves 4 points
    let gpx = convert_file(dir.path(), &["--config", config.to_str().unwrap()]);
    assert_eq!(gpx.matches("<trkpt").count(), 4);

    // Flag wins over the config file
    let gpx = convert_file(dir.path(), &["--config", config.to_str().unwrap(), "--gps-dop-max", "10"]);
    assert_eq!(gpx.matches("<trkpt").count(), 4);
    assert!(!gpx.contains("<time>1970-01-01T00:00:01.000Z</time>"));
}

#[test]
fn test_invalid_configuration_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("samples.json");
    fs::write(&input, sample_stream()).unwrap();

    let args = Args::try_parse_from([
        "gps-to-gpx",
        "--gps-speed-max-units",
        "warp",
        input.to_str().unwrap(),
        dir.path().join("out.gpx").to_str().unwrap(),
    ])
    .unwrap();
    let err = run(&args).unwrap_err();
    assert!(format!("{err:#}").contains("warp"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let args = Args::try_parse_from(["gps-to-gpx", missing.to_str().unwrap()]).unwrap();
    assert!(run(&args).is_err());
}
