//! Pairwise attraction between balls

use crate::body::Body;
use crate::constants::EPSILON;
use crate::vec2::{normalized, Vec2};

/// Inverse-square attraction acting on `a` towards `b` over `dt` time units,
/// as an impulse. `b` receives the negated impulse.
/// |J| = strength * m1 * m2 / r² * dt
///
/// Returns `None` when the centers coincide (within `EPSILON`).
pub fn attraction_impulse(a: &Body, b: &Body, strength: f64, dt: f64) -> Option<Vec2> {
    let r_vec = b.position - a.position;
    let r_squared = r_vec.length_squared();
    if r_squared < EPSILON {
        return None;
    }

    let magnitude = strength * a.mass * b.mass / r_squared * dt;
    Some(normalized(r_vec) * magnitude)
}

/// Apply the mutual attraction impulse to both bodies. Returns whether
/// anything was applied.
pub fn attract_pair(a: &mut Body, b: &mut Body, strength: f64, dt: f64) -> bool {
    match attraction_impulse(a, b, strength, dt) {
        Some(impulse) => {
            a.velocity += impulse * a.inverse_mass();
            b.velocity -= impulse * b.inverse_mass();
            true
        }
        None => false,
    }
}
