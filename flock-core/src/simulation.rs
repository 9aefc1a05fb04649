use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::validate_dimensions;
use crate::flock::{step_from_snapshot, step_in_place};
use crate::{Agent, ConfigError, FlockConfig, UpdateMode};

/// Owns both populations and advances them one frame per [`step`](Self::step).
///
/// Population sizes are fixed by [`init`](Self::init); nothing adds or
/// removes agents afterwards.
#[derive(Debug, Clone)]
pub struct FlockSimulation {
    boids: Vec<Agent>,
    predators: Vec<Agent>,
    config: FlockConfig,
    width: f32,
    height: f32,
    frame: u64,
}

impl FlockSimulation {
    /// An empty simulation. Call one of the `init` methods before stepping.
    pub fn new(config: FlockConfig) -> Self {
        Self {
            boids: Vec::new(),
            predators: Vec::new(),
            config,
            width: 0.0,
            height: 0.0,
            frame: 0,
        }
    }

    /// Builds a simulation from explicit populations. The configured counts
    /// are replaced by the lengths of `boids` and `predators`.
    pub fn from_agents(
        mut config: FlockConfig,
        width: f32,
        height: f32,
        boids: Vec<Agent>,
        predators: Vec<Agent>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_dimensions(width, height)?;
        config.boid_count = boids.len();
        config.predator_count = predators.len();

        Ok(Self {
            boids,
            predators,
            config,
            width,
            height,
            frame: 0,
        })
    }

    /// Populates both classes with randomly placed agents from the thread RNG.
    pub fn init(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.init_with_rng(width, height, &mut rand::thread_rng())
    }

    /// Like [`init`](Self::init) with a deterministic source.
    pub fn init_seeded(&mut self, width: f32, height: f32, seed: u64) -> Result<(), ConfigError> {
        self.init_with_rng(width, height, &mut StdRng::seed_from_u64(seed))
    }

    pub fn init_with_rng<R: Rng + ?Sized>(
        &mut self,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        self.config.validate()?;
        validate_dimensions(width, height)?;

        self.width = width;
        self.height = height;
        self.frame = 0;
        self.boids = (0..self.config.boid_count)
            .map(|_| Agent::random(rng, width, height))
            .collect();
        self.predators = (0..self.config.predator_count)
            .map(|_| Agent::random(rng, width, height))
            .collect();

        Ok(())
    }

    pub fn step(&mut self) {
        match self.config.update_mode {
            UpdateMode::Sequential => step_in_place(
                &mut self.boids,
                &mut self.predators,
                &self.config,
                self.width,
                self.height,
            ),
            UpdateMode::Snapshot => {
                let prev_boids = self.boids.clone();
                let prev_predators = self.predators.clone();
                step_from_snapshot(
                    &mut self.boids,
                    &mut self.predators,
                    &prev_boids,
                    &prev_predators,
                    &self.config,
                    self.width,
                    self.height,
                );
            }
        }
        self.frame += 1;
    }

    /// Updates the plane size without touching agent state.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Indices of the `n` boids closest to boid `index`, nearest first.
    /// Ties keep population order.
    pub fn nearest_boids(&self, index: usize, n: usize) -> Vec<usize> {
        let Some(boid) = self.boids.get(index) else {
            return Vec::new();
        };

        let mut others: Vec<(usize, f32)> = self
            .boids
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(j, other)| (j, boid.position.distance2(&other.position)))
            .collect();
        others.sort_by(|a, b| a.1.total_cmp(&b.1));

        others.into_iter().take(n).map(|(j, _)| j).collect()
    }

    pub fn boids(&self) -> &[Agent] {
        &self.boids
    }

    pub fn predators(&self) -> &[Agent] {
        &self.predators
    }

    /// Boids followed by predators.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.boids.iter().chain(self.predators.iter())
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of completed steps since the last `init`.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
