//! Numeric constants for the ball arena
//!
//! The arena is the unit square, so every length below is a fraction of the
//! arena side.

/// Lower bound of the arena on both axes
pub const ARENA_MIN: f64 = 0.0;

/// Upper bound of the arena on both axes
pub const ARENA_MAX: f64 = 1.0;

/// Floor for distances and lengths before they are divided by
pub const EPSILON: f64 = 1e-12;

/// Margin kept between a body and a wall after clamping, so the same wall
/// branch does not fire again from rounding alone
pub const WALL_EPSILON: f64 = 1e-9;

/// Simulation time units advanced per tick (integration multiplier)
pub const DEFAULT_TICK_DURATION: f64 = 10.0;

/// Ticks a colliding pair ignores each other after a resolved contact
pub const DEFAULT_COOLDOWN_TICKS: u32 = 8;

/// Perfectly elastic
pub const DEFAULT_RESTITUTION: f64 = 1.0;

/// Radius = RADIUS_PER_MASS * mass
pub const DEFAULT_RADIUS_PER_MASS: f64 = 0.02;

pub const DEFAULT_BODY_COUNT: usize = 23;

/// Fill color used when a body has not been given one
pub const DEFAULT_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
