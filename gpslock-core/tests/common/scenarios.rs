//! Fault patterns seen in real recordings

use gpslock_core::{GpsFix, GpsSample};

use super::generators::TrackGenerator;

/// A named track with the indices expected to be downgraded
pub struct Scenario {
    pub name: &'static str,
    pub samples: Vec<GpsSample>,
    pub expected_downgrades: Vec<usize>,
}

/// Ten clean seconds; nothing should be touched
pub fn clean_walk() -> Scenario {
    Scenario {
        name: "clean_walk",
        samples: TrackGenerator::default().generate(10),
        expected_downgrades: Vec::new(),
    }
}

/// DOP spikes above 10 for a third of a second
pub fn dop_spike() -> Scenario {
    let mut samples = TrackGenerator::default().generate(4);
    for sample in &mut samples[36..42] {
        sample.dop = 25.0;
    }
    Scenario {
        name: "dop_spike",
        samples,
        expected_downgrades: (36..42).collect(),
    }
}

/// One fix lands a kilometre east, then the track resumes
pub fn single_teleport() -> Scenario {
    let mut samples = TrackGenerator::default().generate(4);
    samples[40].longitude += 0.015;
    Scenario {
        name: "single_teleport",
        samples,
        expected_downgrades: vec![40],
    }
}

/// Receiver keeps reporting the last position while moving at speed
pub fn frozen_receiver() -> Scenario {
    let mut samples = TrackGenerator { speed_mps: 8.0, ..Default::default() }.generate(3);
    let (lat, lon) = (samples[20].latitude, samples[20].longitude);
    for sample in &mut samples[21..25] {
        sample.latitude = lat;
        sample.longitude = lon;
    }
    Scenario {
        name: "frozen_receiver",
        samples,
        expected_downgrades: (21..25).collect(),
    }
}

/// Receiver needs a second to acquire a lock
pub fn cold_start() -> Scenario {
    let locked = TrackGenerator::default();
    let unlocked = TrackGenerator { fix: GpsFix::NoFix, dop: 99.0, ..Default::default() };
    let samples = (0..locked.rate_hz * 4)
        .map(|i| if i < locked.rate_hz { unlocked.sample(i) } else { locked.sample(i) })
        .collect();
    Scenario {
        name: "cold_start",
        samples,
        expected_downgrades: Vec::new(),
    }
}

/// Lock drops for a single report; everything within the flap window
/// after the two changes is suspect
pub fn flapping_lock() -> Scenario {
    let locked = TrackGenerator::default();
    let unlocked = TrackGenerator { fix: GpsFix::NoFix, ..Default::default() };
    let samples = (0..locked.rate_hz * 4)
        .map(|i| if i == 20 { unlocked.sample(i) } else { locked.sample(i) })
        .collect();
    // Changes at 20 and 21 (1.11 s); sample 56 is the last within 2 s of sample 20
    Scenario {
        name: "flapping_lock",
        samples,
        expected_downgrades: (21..=56).collect(),
    }
}

/// Every named scenario
pub fn all() -> Vec<Scenario> {
    vec![clean_walk(), dop_spike(), single_teleport(), frozen_receiver(), cold_start(), flapping_lock()]
}
