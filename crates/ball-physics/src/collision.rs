//! Pairwise contact between two balls
//!
//! Overlap is removed by moving both bodies apart along the line of centers,
//! split by inverse mass. Approaching pairs then exchange an impulse along
//! the same normal, scaled by the restitution coefficient.

use crate::body::Body;
use crate::constants::EPSILON;
use crate::vec2::{distance_floored, Vec2};

/// Outcome of a resolved overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Overlap that was corrected
    pub depth: f64,
    /// Unit normal pointing from `b` towards `a`
    pub normal: Vec2,
    /// Impulse magnitude, `None` if the pair was already separating
    pub impulse: Option<f64>,
}

/// True if the two circles overlap
pub fn overlapping(a: &Body, b: &Body) -> bool {
    let contact_radius = a.radius + b.radius;
    (a.position - b.position).length_squared() < contact_radius * contact_radius
}

/// Push `a` and `b` apart and, if they approach each other, apply the
/// collision impulse. Returns `None` and leaves both untouched when they do
/// not overlap.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> Option<Contact> {
    let delta = a.position - b.position;
    let squared_distance = delta.length_squared();
    let contact_radius = a.radius + b.radius;
    if squared_distance >= contact_radius * contact_radius {
        return None;
    }

    let distance = distance_floored(squared_distance);
    // Concentric bodies have no line of centers; separate them along x
    let normal = if squared_distance > EPSILON {
        delta / distance
    } else {
        Vec2::X
    };
    let depth = contact_radius - distance;
    let min_translation = depth * normal;

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;

    a.position += (inv_a / inv_sum) * min_translation;
    b.position -= (inv_b / inv_sum) * min_translation;

    let approach = (a.velocity - b.velocity).dot(normal);
    let impulse = if approach < 0.0 {
        let j = -(1.0 + restitution) * approach / inv_sum;
        a.velocity += (j * inv_a) * normal;
        b.velocity -= (j * inv_b) * normal;
        Some(j)
    } else {
        None
    };

    Some(Contact {
        depth,
        normal,
        impulse,
    })
}
