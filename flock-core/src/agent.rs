#[cfg(feature = "std")]
use rand::Rng;

use crate::Vector2D;

/// Number of past positions kept per agent for trail rendering
pub const TRAIL_LENGTH: usize = 50;

/// Sliding window of the most recent positions, oldest first
pub type Trail = heapless::Deque<Vector2D, TRAIL_LENGTH>;

/// A single flock member. Boids and predators share this structure and
/// differ only in which rules the simulation applies to them.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
    history: Trail,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            history: Trail::new(),
        }
    }

    /// Position uniform in `[0, width) x [0, height)`, velocity components
    /// uniform in `[-5, 5)`.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        let position = Vector2D::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        let velocity = Vector2D::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        Self::new(position, velocity)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Facing angle for renderers, `atan2(dy, dx)`.
    pub fn heading(&self) -> f32 {
        self.velocity.angle()
    }

    pub fn limit_speed(&mut self, speed_limit: f32) {
        self.velocity = self.velocity.limit(speed_limit);
    }

    /// Explicit Euler step of one frame unit.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Appends the current position to the trail, dropping the oldest sample
    /// once the window is full.
    pub fn record_position(&mut self) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.history.push_back(self.position);
    }

    pub fn history(&self) -> impl Iterator<Item = &Vector2D> + '_ {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
