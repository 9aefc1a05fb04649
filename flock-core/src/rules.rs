//! The five steering rules. Each returns the velocity change it contributes;
//! callers decide whether to apply it immediately or accumulate it.
//!
//! Neighborhoods are full scans over the given population. Cohesion and
//! alignment include the agent itself when it is a member of `flockmates`
//! (its squared distance to itself is zero); separation skips it by index.

use crate::{Agent, FlockConfig, Vector2D};

/// Pull toward the centroid of flockmates within `range2`.
pub fn cohesion(agent: &Agent, flockmates: &[Agent], range2: f32, centering_factor: f32) -> Vector2D {
    let mut center = Vector2D::zero();
    let mut count = 0;

    for other in flockmates {
        if agent.position.distance2(&other.position) < range2 {
            center += other.position;
            count += 1;
        }
    }

    if count > 0 {
        center = center / count as f32;
        (center - agent.position) * centering_factor
    } else {
        Vector2D::zero()
    }
}

/// Push away from every other boid closer than `min_distance2`.
///
/// `index` is the pushed boid's own slot in `flockmates`.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `flockmates`.
pub fn separation(index: usize, flockmates: &[Agent], min_distance2: f32, avoid_factor: f32) -> Vector2D {
    let position = flockmates[index].position;
    let mut away = Vector2D::zero();

    for (j, other) in flockmates.iter().enumerate() {
        if j != index && position.distance2(&other.position) < min_distance2 {
            away += position - other.position;
        }
    }

    away * avoid_factor
}

/// Push away from every predator closer than `predator_distance2`.
pub fn avoid_predators(
    agent: &Agent,
    predators: &[Agent],
    predator_distance2: f32,
    avoid_factor: f32,
) -> Vector2D {
    let mut away = Vector2D::zero();

    for predator in predators {
        if agent.position.distance2(&predator.position) < predator_distance2 {
            away += agent.position - predator.position;
        }
    }

    away * avoid_factor
}

/// Steer toward the mean velocity of flockmates within `range2`.
pub fn alignment(agent: &Agent, flockmates: &[Agent], range2: f32, matching_factor: f32) -> Vector2D {
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in flockmates {
        if agent.position.distance2(&other.position) < range2 {
            sum += other.velocity;
            count += 1;
        }
    }

    if count > 0 {
        let average = sum / count as f32;
        (average - agent.velocity) * matching_factor
    } else {
        Vector2D::zero()
    }
}

/// Soft nudge back toward the plane when within `margin` of an edge.
pub fn keep_within_bounds(agent: &Agent, width: f32, height: f32, margin: f32, turn_factor: f32) -> Vector2D {
    let mut turn = Vector2D::zero();

    if agent.position.x < margin {
        turn.x += turn_factor;
    }
    if agent.position.x > width - margin {
        turn.x -= turn_factor;
    }
    if agent.position.y < margin {
        turn.y += turn_factor;
    }
    if agent.position.y > height - margin {
        turn.y -= turn_factor;
    }

    turn
}

/// Sum of all five boid rules evaluated against the same population state.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `boids`.
pub fn boid_steering(
    index: usize,
    boids: &[Agent],
    predators: &[Agent],
    config: &FlockConfig,
    width: f32,
    height: f32,
) -> Vector2D {
    let boid = &boids[index];
    cohesion(boid, boids, config.visual_range2(), config.centering_factor)
        + separation(index, boids, config.min_distance2, config.avoid_factor)
        + avoid_predators(boid, predators, config.predator_distance2, config.avoid_factor)
        + alignment(boid, boids, config.visual_range2(), config.matching_factor)
        + keep_within_bounds(boid, width, height, config.margin, config.turn_factor)
}

/// Sum of the predator rules: cohesion, alignment and bounds.
pub fn predator_steering(
    predator: &Agent,
    flockmates: &[Agent],
    config: &FlockConfig,
    width: f32,
    height: f32,
) -> Vector2D {
    cohesion(predator, flockmates, config.predator_range2(), config.centering_factor)
        + alignment(predator, flockmates, config.visual_range2(), config.matching_factor)
        + keep_within_bounds(predator, width, height, config.margin, config.turn_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f32, y: f32) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_single_agent_rules_are_neutral() {
        let flock = [Agent::new(Vector2D::new(300.0, 300.0), Vector2D::new(2.0, -1.0))];
        let agent = &flock[0];

        assert_eq!(cohesion(agent, &flock, 5625.0, 0.005), Vector2D::zero());
        assert_eq!(separation(0, &flock, 400.0, 0.02), Vector2D::zero());
        assert_eq!(avoid_predators(agent, &[], 10000.0, 0.02), Vector2D::zero());
        assert_eq!(alignment(agent, &flock, 5625.0, 0.05), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_includes_self() {
        let flock = [still(0.0, 0.0), still(30.0, 0.0)];

        let pull = cohesion(&flock[0], &flock, 5625.0, 1.0);

        // Centroid of both agents, not of the neighbor alone.
        assert_eq!(pull, Vector2D::new(15.0, 0.0));
    }

    #[test]
    fn test_cohesion_ignores_out_of_range() {
        let flock = [still(0.0, 0.0), still(100.0, 0.0)];
        assert_eq!(cohesion(&flock[0], &flock, 5625.0, 1.0), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_without_neighbors_is_noop() {
        let agent = still(10.0, 10.0);
        assert_eq!(cohesion(&agent, &[], 5625.0, 0.005), Vector2D::zero());
        assert_eq!(alignment(&agent, &[], 5625.0, 0.05), Vector2D::zero());
    }

    #[test]
    fn test_separation_pushes_apart() {
        let flock = [still(100.0, 100.0), still(106.0, 108.0), still(300.0, 300.0)];

        let push = separation(0, &flock, 400.0, 0.5);

        assert_eq!(push, Vector2D::new(-3.0, -4.0));
    }

    #[test]
    #[should_panic]
    fn test_separation_index_out_of_bounds() {
        let flock = [still(0.0, 0.0)];
        separation(3, &flock, 400.0, 0.02);
    }

    #[test]
    fn test_separation_threshold_is_strict() {
        let flock = [still(0.0, 0.0), still(20.0, 0.0)];
        assert_eq!(separation(0, &flock, 400.0, 0.02), Vector2D::zero());
    }

    #[test]
    fn test_avoid_predators() {
        let boid = still(100.0, 100.0);
        let predators = [still(150.0, 100.0), still(500.0, 500.0)];

        let flee = avoid_predators(&boid, &predators, 10000.0, 0.02);

        assert!((flee.x + 1.0).abs() < 1e-6);
        assert_eq!(flee.y, 0.0);
    }

    #[test]
    fn test_alignment_includes_self() {
        let flock = [
            Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0)),
            Agent::new(Vector2D::new(10.0, 0.0), Vector2D::new(4.0, 2.0)),
        ];

        let steer = alignment(&flock[0], &flock, 5625.0, 1.0);

        assert_eq!(steer, Vector2D::new(2.0, 1.0));
    }

    #[test]
    fn test_keep_within_bounds_near_edges() {
        let margin = 100.0;
        let near_left = still(margin - 1.0, 500.0);
        let near_right = still(1000.0 - margin + 1.0, 500.0);
        let centre = still(500.0, 500.0);
        let corner = still(10.0, 990.0);

        assert_eq!(
            keep_within_bounds(&near_left, 1000.0, 1000.0, margin, 0.5),
            Vector2D::new(0.5, 0.0)
        );
        assert_eq!(
            keep_within_bounds(&near_right, 1000.0, 1000.0, margin, 0.5),
            Vector2D::new(-0.5, 0.0)
        );
        assert_eq!(keep_within_bounds(&centre, 1000.0, 1000.0, margin, 0.5), Vector2D::zero());
        assert_eq!(
            keep_within_bounds(&corner, 1000.0, 1000.0, margin, 0.5),
            Vector2D::new(0.5, -0.5)
        );
    }

    #[test]
    fn test_predator_steering_skips_separation() {
        let config = FlockConfig::default();
        let pack = [still(500.0, 500.0), still(505.0, 500.0)];

        let steer = predator_steering(&pack[0], &pack, &config, 1000.0, 1000.0);

        // Only cohesion pulls: toward the shared centroid, never away.
        assert!(steer.x > 0.0);
        assert_eq!(steer.y, 0.0);
    }
}
