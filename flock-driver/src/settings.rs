use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::{FlockConfig, Flockmates, UpdateMode};
use flock_shared::{FlockSettings, PredatorFlockmates, StepMode};

/// Reads settings from a JSON file. Fields missing from the file keep their
/// defaults.
pub fn load_settings(path: &Path) -> Result<FlockSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings = FlockSettings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

/// Converts file settings into a validated simulation config.
pub fn to_config(settings: &FlockSettings) -> Result<FlockConfig> {
    let config = FlockConfig {
        boid_count: settings.boid_count,
        predator_count: settings.predator_count,
        visual_range: settings.visual_range,
        predator_range_scale: settings.predator_range_scale,
        centering_factor: settings.centering_factor,
        min_distance2: settings.min_distance2,
        avoid_factor: settings.avoid_factor,
        predator_distance2: settings.predator_distance2,
        matching_factor: settings.matching_factor,
        speed_limit: settings.speed_limit,
        margin: settings.margin,
        turn_factor: settings.turn_factor,
        record_trails: settings.record_trails,
        update_mode: match settings.step_mode {
            StepMode::Sequential => UpdateMode::Sequential,
            StepMode::Snapshot => UpdateMode::Snapshot,
        },
        predator_flockmates: match settings.predator_flockmates {
            PredatorFlockmates::Predators => Flockmates::Predators,
            PredatorFlockmates::Boids => Flockmates::Boids,
        },
    };
    config.validate().context("Invalid flock configuration")?;
    Ok(config)
}
