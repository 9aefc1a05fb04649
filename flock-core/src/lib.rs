//! Predator/prey flocking on a bounded 2D plane.
//!
//! Every frame each boid steers by cohesion, separation, predator avoidance,
//! alignment and boundary turning, in that order; predators steer by
//! cohesion, alignment and boundary turning only. Velocities are then capped
//! at the speed limit and positions advance by one explicit Euler step.
//!
//! Neighborhoods are naive all-pairs scans using squared distances.

#![cfg_attr(not(feature = "std"), no_std)]

mod agent;
mod config;
mod flock;
pub mod rules;
#[cfg(feature = "std")]
mod simulation;
mod vector;

pub use agent::{Agent, Trail, TRAIL_LENGTH};
pub use config::{ConfigError, FlockConfig, Flockmates, UpdateMode};
pub use flock::{step_from_snapshot, step_in_place, FixedFlock};
#[cfg(feature = "std")]
pub use simulation::FlockSimulation;
pub use vector::Vector2D;
