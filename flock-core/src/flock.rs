use crate::config::validate_dimensions;
use crate::{rules, Agent, ConfigError, FlockConfig, Flockmates, UpdateMode};

/// Advances both populations by one frame in place.
///
/// Boids are processed first, in population order, then predators. Every
/// rule is applied to the agent's velocity before the next rule is evaluated,
/// so later rules and later agents observe the updated state.
pub fn step_in_place(
    boids: &mut [Agent],
    predators: &mut [Agent],
    config: &FlockConfig,
    width: f32,
    height: f32,
) {
    let visual_range2 = config.visual_range2();

    for i in 0..boids.len() {
        let delta = rules::cohesion(&boids[i], boids, visual_range2, config.centering_factor);
        boids[i].velocity += delta;
        let delta = rules::separation(i, boids, config.min_distance2, config.avoid_factor);
        boids[i].velocity += delta;
        let delta = rules::avoid_predators(
            &boids[i],
            predators,
            config.predator_distance2,
            config.avoid_factor,
        );
        boids[i].velocity += delta;
        let delta = rules::alignment(&boids[i], boids, visual_range2, config.matching_factor);
        boids[i].velocity += delta;
        let delta =
            rules::keep_within_bounds(&boids[i], width, height, config.margin, config.turn_factor);
        boids[i].velocity += delta;

        settle(&mut boids[i], config);
    }

    for i in 0..predators.len() {
        let delta = {
            let flockmates = match config.predator_flockmates {
                Flockmates::Predators => &*predators,
                Flockmates::Boids => &*boids,
            };
            rules::cohesion(
                &predators[i],
                flockmates,
                config.predator_range2(),
                config.centering_factor,
            )
        };
        predators[i].velocity += delta;
        let delta = {
            let flockmates = match config.predator_flockmates {
                Flockmates::Predators => &*predators,
                Flockmates::Boids => &*boids,
            };
            rules::alignment(&predators[i], flockmates, visual_range2, config.matching_factor)
        };
        predators[i].velocity += delta;
        let delta = rules::keep_within_bounds(
            &predators[i],
            width,
            height,
            config.margin,
            config.turn_factor,
        );
        predators[i].velocity += delta;

        settle(&mut predators[i], config);
    }
}

/// Advances both populations by one frame, computing every velocity change
/// against `prev_boids` / `prev_predators` (a copy of the state before the
/// frame) and only then applying it.
///
/// The previous-frame slices must be copies of `boids` / `predators`.
pub fn step_from_snapshot(
    boids: &mut [Agent],
    predators: &mut [Agent],
    prev_boids: &[Agent],
    prev_predators: &[Agent],
    config: &FlockConfig,
    width: f32,
    height: f32,
) {
    debug_assert_eq!(boids.len(), prev_boids.len());
    debug_assert_eq!(predators.len(), prev_predators.len());

    for (i, boid) in boids.iter_mut().enumerate() {
        boid.velocity +=
            rules::boid_steering(i, prev_boids, prev_predators, config, width, height);
        settle(boid, config);
    }

    let flockmates = match config.predator_flockmates {
        Flockmates::Predators => prev_predators,
        Flockmates::Boids => prev_boids,
    };
    for (predator, prev) in predators.iter_mut().zip(prev_predators) {
        predator.velocity += rules::predator_steering(prev, flockmates, config, width, height);
        settle(predator, config);
    }
}

/// Speed limit, integration and trail recording, in that order.
fn settle(agent: &mut Agent, config: &FlockConfig) {
    agent.limit_speed(config.speed_limit);
    agent.integrate();
    if config.record_trails {
        agent.record_position();
    }
}

/// A flock with fixed capacity for embedded (no_std) environments
pub struct FixedFlock<const B: usize, const P: usize> {
    boids: heapless::Vec<Agent, B>,
    predators: heapless::Vec<Agent, P>,
    config: FlockConfig,
    width: f32,
    height: f32,
}

impl<const B: usize, const P: usize> FixedFlock<B, P> {
    pub fn new(width: f32, height: f32, config: FlockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_dimensions(width, height)?;

        Ok(Self {
            boids: heapless::Vec::new(),
            predators: heapless::Vec::new(),
            config,
            width,
            height,
        })
    }

    pub fn add_boid(&mut self, boid: Agent) -> Result<(), Agent> {
        self.boids.push(boid)
    }

    pub fn add_predator(&mut self, predator: Agent) -> Result<(), Agent> {
        self.predators.push(predator)
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
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn boids(&self) -> &[Agent] {
        &self.boids
    }

    pub fn predators(&self) -> &[Agent] {
        &self.predators
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector2D;

    #[test]
    fn test_fixed_flock_capacity() {
        let mut flock = FixedFlock::<2, 1>::new(800.0, 600.0, FlockConfig::default()).unwrap();
        let agent = Agent::new(Vector2D::new(400.0, 300.0), Vector2D::zero());

        assert!(flock.add_boid(agent.clone()).is_ok());
        assert!(flock.add_boid(agent.clone()).is_ok());
        assert!(flock.add_boid(agent.clone()).is_err());
        assert!(flock.add_predator(agent.clone()).is_ok());
        assert!(flock.add_predator(agent).is_err());
    }

    #[test]
    fn test_fixed_flock_rejects_bad_config() {
        let config = FlockConfig {
            speed_limit: -3.0,
            ..FlockConfig::default()
        };
        assert!(FixedFlock::<4, 1>::new(800.0, 600.0, config).is_err());
        assert!(FixedFlock::<4, 1>::new(0.0, 600.0, FlockConfig::default()).is_err());
    }

    #[test]
    fn test_fixed_flock_step_moves_agents() {
        let mut flock = FixedFlock::<4, 1>::new(800.0, 600.0, FlockConfig::default()).unwrap();
        flock
            .add_boid(Agent::new(Vector2D::new(400.0, 300.0), Vector2D::new(1.0, 0.0)))
            .unwrap();
        flock
            .add_predator(Agent::new(Vector2D::new(50.0, 50.0), Vector2D::new(0.0, 1.0)))
            .unwrap();

        flock.step();

        assert_eq!(flock.boids()[0].position, Vector2D::new(401.0, 300.0));
        // Predator sits inside both margins and turns back toward the plane.
        assert_eq!(flock.predators()[0].velocity, Vector2D::new(0.5, 1.5));
    }

    #[test]
    fn test_snapshot_mode_differs_from_in_place() {
        let config = FlockConfig::default();
        let start = [
            Agent::new(Vector2D::new(50.0, 500.0), Vector2D::zero()),
            Agent::new(Vector2D::new(60.0, 500.0), Vector2D::zero()),
        ];

        let mut in_place = start.clone();
        step_in_place(&mut in_place, &mut [], &config, 1000.0, 1000.0);

        let mut snapshot = start.clone();
        step_from_snapshot(&mut snapshot, &mut [], &start, &[], &config, 1000.0, 1000.0);

        // In place, boid 1 already sees boid 0 at its new position.
        assert_ne!(in_place[1].velocity, snapshot[1].velocity);
        assert_ne!(in_place[1].position, snapshot[1].position);
    }

    #[test]
    fn test_in_place_later_boid_sees_moved_neighbor() {
        let config = FlockConfig::default();
        let mut boids = [
            Agent::new(Vector2D::new(500.0, 400.0), Vector2D::zero()),
            Agent::new(Vector2D::new(510.0, 400.0), Vector2D::zero()),
        ];

        step_in_place(&mut boids, &mut [], &config, 1000.0, 800.0);

        // Boid 0: cohesion +0.025, separation -0.2, alignment +0.004375.
        assert!((boids[0].velocity.x + 0.170625).abs() < 1e-5);
        assert!((boids[0].position.x - 499.829375).abs() < 1e-4);
        // Boid 1 gathers toward, separates from and aligns with boid 0 at its
        // updated position (499.829375) and velocity.
        assert!((boids[1].velocity.x - 0.169_270_66).abs() < 1e-5);
        assert_eq!(boids[0].velocity.y, 0.0);
        assert_eq!(boids[1].velocity.y, 0.0);
    }
}
