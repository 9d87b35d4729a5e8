//! 2D vector helpers
//!
//! `Vec2` is glam's double precision vector; it already provides addition,
//! subtraction, scaling, dot product and length. The helpers here add the
//! guarded operations the physics needs so that a zero length never turns
//! into NaN or infinity.

use crate::constants::EPSILON;

pub use glam::DVec2 as Vec2;

/// Unit vector along `v`. The length is floored at `EPSILON`, so the zero
/// vector maps to the zero vector.
pub fn normalized(v: Vec2) -> Vec2 {
    v / v.length().max(EPSILON)
}

/// Square root of a squared distance, floored at `EPSILON` both before and
/// after the root so it is always safe to divide by.
pub fn distance_floored(squared: f64) -> f64 {
    squared.max(EPSILON).sqrt().max(EPSILON)
}

pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
