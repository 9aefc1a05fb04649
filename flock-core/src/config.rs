use core::fmt;

/// How a frame's velocity updates see each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Agents are updated in place, in population order. An agent sees the
    /// already-updated state of every agent processed before it this frame.
    #[default]
    Sequential,
    /// Every velocity delta is computed against a frozen copy of the previous
    /// frame and applied afterwards. Numerically different from `Sequential`.
    Snapshot,
}

/// Population predators flock with for cohesion and alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flockmates {
    /// Predators gather and align with other predators only.
    #[default]
    Predators,
    /// Predators are drawn to the centroid and mean velocity of the boids,
    /// which makes them chase the flock.
    Boids,
}

/// Configuration for the flock simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub boid_count: usize,
    pub predator_count: usize,
    /// Distance within which agents perceive neighbors for cohesion and alignment
    pub visual_range: f32,
    /// Predators use this multiple of `visual_range^2` for cohesion
    pub predator_range_scale: f32,
    pub centering_factor: f32,
    /// Squared distance boids keep from each other
    pub min_distance2: f32,
    pub avoid_factor: f32,
    /// Squared distance at which boids start fleeing a predator
    pub predator_distance2: f32,
    pub matching_factor: f32,
    pub speed_limit: f32,
    /// Distance from an edge at which agents start turning back
    pub margin: f32,
    pub turn_factor: f32,
    pub record_trails: bool,
    pub update_mode: UpdateMode,
    pub predator_flockmates: Flockmates,
}

impl Default for FlockConfig {
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
            update_mode: UpdateMode::Sequential,
            predator_flockmates: Flockmates::Predators,
        }
    }
}

impl FlockConfig {
    pub fn visual_range2(&self) -> f32 {
        self.visual_range * self.visual_range
    }

    pub fn predator_range2(&self) -> f32 {
        self.predator_range_scale * self.visual_range2()
    }

    /// Rejects tunables that would make the dynamics meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("visual_range", self.visual_range),
            ("predator_range_scale", self.predator_range_scale),
            ("min_distance2", self.min_distance2),
            ("predator_distance2", self.predator_distance2),
            ("speed_limit", self.speed_limit),
            ("margin", self.margin),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let factors = [
            ("centering_factor", self.centering_factor),
            ("avoid_factor", self.avoid_factor),
            ("matching_factor", self.matching_factor),
            ("turn_factor", self.turn_factor),
        ];
        for (field, value) in factors {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        Ok(())
    }
}

/// Rejected configuration or plane dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A distance, range or limit is below zero.
    Negative { field: &'static str, value: f32 },
    /// A tunable is NaN or infinite.
    NonFinite { field: &'static str },
    /// The plane must have a positive, finite width and height.
    InvalidDimensions { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            ConfigError::NonFinite { field } => write!(f, "{} must be a finite number", field),
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "plane must have positive size (got {}x{})", width, height)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

pub(crate) fn validate_dimensions(width: f32, height: f32) -> Result<(), ConfigError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tunables() {
        let config = FlockConfig::default();
        assert_eq!(config.boid_count, 500);
        assert_eq!(config.predator_count, 1);
        assert_eq!(config.visual_range2(), 5625.0);
        assert_eq!(config.predator_range2(), 22500.0);
        assert_eq!(config.update_mode, UpdateMode::Sequential);
        assert!(!config.record_trails);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_speed_limit_rejected() {
        let config = FlockConfig {
            speed_limit: -1.0,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "speed_limit",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_nan_factor_rejected() {
        let config = FlockConfig {
            matching_factor: f32::NAN,
            ..FlockConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "matching_factor"
            })
        );
    }

    #[test]
    fn test_dimensions() {
        assert!(validate_dimensions(800.0, 600.0).is_ok());
        assert!(validate_dimensions(0.0, 600.0).is_err());
        assert!(validate_dimensions(800.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::NonFinite { field: "margin" };
        assert_eq!(err.to_string(), "margin must be a finite number");
    }
}
