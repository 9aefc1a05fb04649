#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};

/// Represents a 2D point on the simulation plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How agents observe each other within a frame
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    #[default]
    Sequential,
    Snapshot,
}

/// Which population predators gather and align with
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredatorFlockmates {
    #[default]
    Predators,
    Boids,
}

/// Flock simulation settings as stored in a configuration file.
/// Missing fields take their default value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub boid_count: usize,
    pub predator_count: usize,
    pub visual_range: f32,
    pub predator_range_scale: f32,
    pub centering_factor: f32,
    pub min_distance2: f32,
    pub avoid_factor: f32,
    pub predator_distance2: f32,
    pub matching_factor: f32,
    pub speed_limit: f32,
    pub margin: f32,
    pub turn_factor: f32,
    pub record_trails: bool,
    pub step_mode: StepMode,
    pub predator_flockmates: PredatorFlockmates,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            boid_count: 500,
            predator_count: 1,
            visual_range: 75.0,
            predator_range_scale: 4.0,
            centering_factor: 0.005,
            min_distance2: 400.0,
            avoid_factor: 0.02,
            predator_distance2: 10000.0,
            matching_factor: 0.05,
            speed_limit: 15.0,
            margin: 100.0,
            turn_factor: 0.5,
            record_trails: false,
            step_mode: StepMode::Sequential,
            predator_flockmates: PredatorFlockmates::Predators,
        }
    }
}

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Render-facing view of one agent after a step
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub position: Position,
    pub velocity: Position,
    /// Facing angle in radians, `atan2(dy, dx)`
    pub heading: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<Position>,
}

/// Both populations at the end of a frame
#[cfg(feature = "std")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockSnapshot {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub boids: Vec<AgentSnapshot>,
    pub predators: Vec<AgentSnapshot>,
}

#[cfg(feature = "std")]
impl FlockSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Periodic status emitted by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub boid_count: usize,
    pub predator_count: usize,
    pub fps: f32,
    pub mean_speed: f32,
}
