//! World parameters for runtime tuning

use ball_physics::{
    is_finite_vec, BodyDistribution, DiagonalLayout, MassDistribution, ARENA_MAX, ARENA_MIN,
    DEFAULT_BODY_COUNT, DEFAULT_COOLDOWN_TICKS, DEFAULT_RESTITUTION, DEFAULT_TICK_DURATION,
    WALL_EPSILON,
};

use crate::error::ConfigError;

/// Initial placement of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Seeded random positions, velocities and masses
    Random(BodyDistribution),
    /// Evenly spaced along a diagonal, all with the same velocity
    Diagonal(DiagonalLayout),
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Random(BodyDistribution::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldParams {
    pub body_count: usize,
    /// Seed for the world's own generator
    pub seed: u64,
    /// Time units per tick; `position += tick_duration * velocity`
    pub tick_duration: f64,
    /// Fraction of normal relative velocity kept by a collision, in (0, 1]
    pub restitution: f64,
    /// Ticks a pair ignores each other after a contact
    pub cooldown_ticks: u32,
    /// Inverse-square attraction strength; `None` disables the pass
    pub attraction: Option<f64>,
    pub placement: Placement,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            body_count: DEFAULT_BODY_COUNT,
            seed: 0,
            tick_duration: DEFAULT_TICK_DURATION,
            restitution: DEFAULT_RESTITUTION,
            cooldown_ticks: DEFAULT_COOLDOWN_TICKS,
            attraction: None,
            placement: Placement::default(),
        }
    }
}

impl WorldParams {
    pub fn with_body_count(mut self, body_count: usize) -> Self {
        self.body_count = body_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_tick_duration(mut self, tick_duration: f64) -> Self {
        self.tick_duration = tick_duration;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_cooldown_ticks(mut self, cooldown_ticks: u32) -> Self {
        self.cooldown_ticks = cooldown_ticks;
        self
    }

    pub fn with_attraction(mut self, strength: Option<f64>) -> Self {
        self.attraction = strength;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Check the stepping parameters only. Used when bodies are supplied
    /// directly instead of generated from `placement`.
    pub fn validate_dynamics(&self) -> Result<(), ConfigError> {
        if !(self.tick_duration.is_finite() && self.tick_duration > 0.0) {
            return Err(ConfigError::InvalidTickDuration(self.tick_duration));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        if self.cooldown_ticks == 0 {
            return Err(ConfigError::ZeroCooldown);
        }
        if let Some(strength) = self.attraction {
            if !(strength.is_finite() && strength >= 0.0) {
                return Err(ConfigError::InvalidAttraction(strength));
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_count == 0 {
            return Err(ConfigError::ZeroBodies);
        }
        self.validate_dynamics()?;

        let half_arena = (ARENA_MAX - ARENA_MIN) / 2.0;
        match self.placement {
            Placement::Random(dist) => {
                match dist.mass {
                    MassDistribution::Fixed(mass) => check_mass(mass)?,
                    MassDistribution::Uniform { min, max } => {
                        check_mass(min)?;
                        check_mass(max)?;
                        if min > max {
                            return Err(ConfigError::InvalidMassRange { min, max });
                        }
                    }
                }
                check_radius(dist.radius_per_mass * dist.mass.min())?;
                let largest = dist.radius_per_mass * dist.mass.max();
                if largest >= half_arena {
                    return Err(ConfigError::BodyTooLarge(largest));
                }
                let speeds_ok = dist.speed_min.is_finite()
                    && dist.speed_max.is_finite()
                    && dist.speed_min >= 0.0
                    && dist.speed_min <= dist.speed_max;
                if !speeds_ok {
                    return Err(ConfigError::InvalidSpeedRange {
                        min: dist.speed_min,
                        max: dist.speed_max,
                    });
                }
            }
            Placement::Diagonal(layout) => {
                check_mass(layout.mass)?;
                check_radius(layout.radius)?;
                if layout.radius + WALL_EPSILON >= half_arena {
                    return Err(ConfigError::BodyTooLarge(layout.radius));
                }
                let finite = is_finite_vec(layout.origin)
                    && is_finite_vec(layout.step)
                    && is_finite_vec(layout.velocity);
                if !finite {
                    return Err(ConfigError::NonFiniteLayout);
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn check_mass(mass: f64) -> Result<(), ConfigError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveMass(mass))
    }
}

pub(crate) fn check_radius(radius: f64) -> Result<(), ConfigError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveRadius(radius))
    }
}
