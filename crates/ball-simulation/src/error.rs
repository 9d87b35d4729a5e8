//! Construction errors
//!
//! The step itself never fails; everything that can go wrong is caught when
//! the world is built.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("body count must be at least 1")]
    ZeroBodies,

    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(f64),

    #[error("radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),

    #[error("mass range {min}..={max} is empty")]
    InvalidMassRange { min: f64, max: f64 },

    /// A body this large cannot fit between the walls
    #[error("radius {0} does not fit in the unit arena")]
    BodyTooLarge(f64),

    #[error("tick duration must be positive and finite, got {0}")]
    InvalidTickDuration(f64),

    #[error("restitution must lie in (0, 1], got {0}")]
    InvalidRestitution(f64),

    #[error("cooldown must last at least 1 tick")]
    ZeroCooldown,

    #[error("attraction strength must be non-negative and finite, got {0}")]
    InvalidAttraction(f64),

    #[error("speed range {min}..={max} is invalid")]
    InvalidSpeedRange { min: f64, max: f64 },

    #[error("diagonal layout has a non-finite origin, step or velocity")]
    NonFiniteLayout,

    #[error("body {index} has a non-finite position or velocity")]
    NonFiniteBody { index: usize },
}
