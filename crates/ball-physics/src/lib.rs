//! # Ball Physics
//!
//! Rigid circular bodies in the unit square: vector helpers, body state and
//! construction, and the pairwise contact and attraction maths used by the
//! simulation.

pub mod body;
pub mod collision;
pub mod constants;
pub mod forces;
pub mod vec2;

pub use body::*;
pub use collision::*;
pub use constants::*;
pub use forces::*;
pub use vec2::*;
