use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use flock_core::{FlockConfig, FlockSimulation, UpdateMode};
use flock_driver::{capture, load_settings, to_config, Driver, ResizeEvent};
use flock_shared::FlockSnapshot;

fn temp_file(name: &str, contents: &str) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("flock-driver-{}-{}", std::process::id(), name));
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn settings_file_drives_config() -> Result<()> {
    let path = temp_file(
        "settings.json",
        r#"{ "boid_count": 30, "predator_count": 2, "speed_limit": 8.0, "step_mode": "snapshot" }"#,
    )?;

    let config = to_config(&load_settings(&path)?)?;
    fs::remove_file(&path)?;

    assert_eq!(config.boid_count, 30);
    assert_eq!(config.predator_count, 2);
    assert_eq!(config.speed_limit, 8.0);
    assert_eq!(config.update_mode, UpdateMode::Snapshot);
    assert_eq!(config.margin, FlockConfig::default().margin);
    Ok(())
}

#[test]
fn malformed_settings_file_is_an_error() -> Result<()> {
    let path = temp_file("broken.json", "{ boid_count: ")?;
    let result = load_settings(&path);
    fs::remove_file(&path)?;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid settings"));
    Ok(())
}

#[test]
fn missing_settings_file_is_an_error() {
    let path = std::env::temp_dir().join("flock-driver-does-not-exist.json");
    assert!(load_settings(&path).is_err());
}

#[test]
fn driver_runs_requested_frames_and_resizes() -> Result<()> {
    let config = FlockConfig {
        boid_count: 40,
        predator_count: 1,
        record_trails: true,
        ..FlockConfig::default()
    };
    let mut sim = FlockSimulation::new(config);
    sim.init_seeded(800.0, 600.0, 17)?;

    let resizes = vec![ResizeEvent {
        frame: 5,
        width: 1024.0,
        height: 768.0,
    }];
    let mut driver = Driver::new(sim, resizes);
    let summary = driver.run(12);

    assert_eq!(summary.frames, 12);
    assert_eq!(summary.report.frame, 12);
    assert_eq!(summary.report.boid_count, 40);
    assert_eq!(summary.report.predator_count, 1);
    assert!(summary.report.mean_speed <= config.speed_limit + 1e-4);

    let sim = driver.simulation();
    assert_eq!(sim.width(), 1024.0);
    assert_eq!(sim.height(), 768.0);

    let snapshot = capture(sim);
    assert_eq!(snapshot.boids.len(), 40);
    assert!(snapshot.boids.iter().all(|b| b.trail.len() == 12));

    let round_trip = FlockSnapshot::from_json(&snapshot.to_json()?)?;
    assert_eq!(round_trip.frame, 12);
    assert_eq!(round_trip.boids.len(), 40);
    Ok(())
}
