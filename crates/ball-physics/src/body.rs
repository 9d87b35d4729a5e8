//! Ball state and construction policies

use rand::Rng;

use crate::constants::*;
use crate::vec2::Vec2;

/// Sign policy for randomly drawn velocity components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocitySigns {
    /// Both components positive: everything initially drifts towards the
    /// lower-right corner
    PositiveOnly,
    /// Each component gets an independent random sign
    Either,
}

/// How body masses are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassDistribution {
    Fixed(f64),
    Uniform { min: f64, max: f64 },
}

impl MassDistribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            MassDistribution::Fixed(mass) => mass,
            MassDistribution::Uniform { min, max } => rng.random_range(min..=max),
        }
    }

    pub fn min(&self) -> f64 {
        match *self {
            MassDistribution::Fixed(mass) => mass,
            MassDistribution::Uniform { min, .. } => min,
        }
    }

    pub fn max(&self) -> f64 {
        match *self {
            MassDistribution::Fixed(mass) => mass,
            MassDistribution::Uniform { max, .. } => max,
        }
    }
}

/// Parameters for [`Body::random`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDistribution {
    pub mass: MassDistribution,
    pub radius_per_mass: f64,
    /// Per-component speed range, in arena units per time unit
    pub speed_min: f64,
    pub speed_max: f64,
    pub velocity_signs: VelocitySigns,
}

impl Default for BodyDistribution {
    fn default() -> Self {
        Self {
            mass: MassDistribution::Uniform { min: 0.5, max: 1.5 },
            radius_per_mass: DEFAULT_RADIUS_PER_MASS,
            speed_min: 0.000_05,
            speed_max: 0.000_3,
            velocity_signs: VelocitySigns::Either,
        }
    }
}

/// Deterministic evenly spaced layout along a diagonal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalLayout {
    pub origin: Vec2,
    pub step: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub radius: f64,
}

impl Default for DiagonalLayout {
    fn default() -> Self {
        Self {
            origin: Vec2::new(0.08, 0.0),
            step: Vec2::new(0.05, 0.05),
            velocity: Vec2::new(0.0001, 0.0001),
            mass: 1.0,
            radius: 0.006,
        }
    }
}

/// A ball in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center, in arena coordinates
    pub position: Vec2,
    /// Arena units per time unit
    pub velocity: Vec2,
    pub mass: f64,
    pub radius: f64,
    /// RGB fill, presentation only
    pub color: [f32; 3],
    /// Index of the body this one last collided with, while the cooldown runs
    pub recent_partner: Option<usize>,
    pub recent_partner_ttl: u32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius,
            color: DEFAULT_COLOR,
            recent_partner: None,
            recent_partner_ttl: 0,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Draw a body that starts fully inside the arena. Radius must be below
    /// half the arena side.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, dist: &BodyDistribution) -> Self {
        let mass = dist.mass.sample(rng);
        let radius = dist.radius_per_mass * mass;

        let lo = ARENA_MIN + radius;
        let hi = ARENA_MAX - radius;
        let position = Vec2::new(rng.random_range(lo..=hi), rng.random_range(lo..=hi));

        let mut velocity = Vec2::new(
            rng.random_range(dist.speed_min..=dist.speed_max),
            rng.random_range(dist.speed_min..=dist.speed_max),
        );
        if dist.velocity_signs == VelocitySigns::Either {
            if rng.random::<bool>() {
                velocity.x = -velocity.x;
            }
            if rng.random::<bool>() {
                velocity.y = -velocity.y;
            }
        }

        let color = [
            rng.random_range(0.1..=0.9),
            rng.random_range(0.1..=0.9),
            rng.random_range(0.1..=0.9),
        ];

        Self::new(position, velocity, mass, radius).with_color(color)
    }

    /// Body `index` of a diagonal layout. Positions that would leave the
    /// arena wrap around and are then kept clear of the walls.
    pub fn diagonal(index: usize, layout: &DiagonalLayout) -> Self {
        let raw = layout.origin + (index as f64 + 1.0) * layout.step;
        let lo = ARENA_MIN + layout.radius + WALL_EPSILON;
        let hi = ARENA_MAX - layout.radius - WALL_EPSILON;
        let position = Vec2::new(
            raw.x.rem_euclid(ARENA_MAX).clamp(lo, hi),
            raw.y.rem_euclid(ARENA_MAX).clamp(lo, hi),
        );
        Self::new(position, layout.velocity, layout.mass, layout.radius)
    }

    pub fn inverse_mass(&self) -> f64 {
        1.0 / self.mass
    }

    pub fn momentum(&self) -> Vec2 {
        self.mass * self.velocity
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Still suppressing contacts with `other`
    pub fn is_cooling_with(&self, other: usize) -> bool {
        self.recent_partner == Some(other) && self.recent_partner_ttl > 0
    }

    pub fn start_cooldown(&mut self, partner: usize, ttl: u32) {
        self.recent_partner = Some(partner);
        self.recent_partner_ttl = ttl;
    }

    pub fn clear_cooldown(&mut self) {
        self.recent_partner = None;
        self.recent_partner_ttl = 0;
    }

    /// Count the cooldown down by one tick, forgetting the partner at zero
    pub fn tick_cooldown(&mut self) {
        if self.recent_partner_ttl > 0 {
            self.recent_partner_ttl -= 1;
        }
        if self.recent_partner_ttl == 0 {
            self.recent_partner = None;
        }
    }
}
