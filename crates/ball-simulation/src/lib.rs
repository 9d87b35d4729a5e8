//! # Ball Simulation
//!
//! Fixed-step simulation of balls bouncing in the unit square: wall
//! containment, pairwise collisions with a short per-pair cooldown, and
//! optional mutual attraction.

pub mod error;
pub mod params;
pub mod world;

pub use error::*;
pub use params::*;
pub use world::*;
