//! Ball world: owns the bodies and advances them one tick at a time
//!
//! Each tick runs four passes in a fixed order:
//! 1. integrate positions from velocities
//! 2. contain bodies inside the arena walls and count cooldowns down
//! 3. resolve overlapping pairs (positional correction + impulse)
//! 4. optional pairwise attraction
//!
//! Pairs are visited once each, so a tick is O(n²) in the body count.

use ball_physics::{
    attract_pair, is_finite_vec, overlapping, resolve_pair, Body, Vec2, ARENA_MAX, ARENA_MIN,
    WALL_EPSILON,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;
use crate::params::{check_mass, check_radius, Placement, WorldParams};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub tick: u64,
    /// Wall clamps, counted per axis
    pub wall_hits: usize,
    /// Overlapping pairs that were pushed apart
    pub contacts: usize,
    /// Contacts that also exchanged an impulse
    pub impulses: usize,
    /// Overlapping pairs skipped because of their cooldown
    pub suppressed: usize,
    pub attractions: usize,
}

/// Owned copy of what a renderer needs from a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    pub radius: f64,
    pub color: [f32; 3],
}

pub struct World {
    params: WorldParams,
    bodies: Vec<Body>,
    tick: u64,
    last_step: StepStats,
}

impl World {
    /// Build a world from `params`, drawing random bodies from a generator
    /// seeded with `params.seed`.
    pub fn new(params: WorldParams) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(params.seed);
        Self::with_rng(params, &mut rng)
    }

    /// Like [`World::new`] but draws from the caller's generator
    pub fn with_rng<R: Rng + ?Sized>(
        params: WorldParams,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        let bodies: Vec<Body> = match params.placement {
            Placement::Random(dist) => (0..params.body_count)
                .map(|_| Body::random(&mut *rng, &dist))
                .collect(),
            Placement::Diagonal(layout) => (0..params.body_count)
                .map(|i| Body::diagonal(i, &layout))
                .collect(),
        };

        log::info!(
            "Initialized world: {} bodies, seed {}, tick duration {}",
            bodies.len(),
            params.seed,
            params.tick_duration
        );

        Ok(Self {
            params,
            bodies,
            tick: 0,
            last_step: StepStats::default(),
        })
    }

    /// Build a world from explicit bodies. `params.body_count` and
    /// `params.placement` are ignored.
    pub fn from_bodies(params: WorldParams, mut bodies: Vec<Body>) -> Result<Self, ConfigError> {
        params.validate_dynamics()?;
        if bodies.is_empty() {
            return Err(ConfigError::ZeroBodies);
        }

        let count = bodies.len();
        let half_arena = (ARENA_MAX - ARENA_MIN) / 2.0;
        for (index, body) in bodies.iter_mut().enumerate() {
            check_mass(body.mass)?;
            check_radius(body.radius)?;
            if body.radius >= half_arena {
                return Err(ConfigError::BodyTooLarge(body.radius));
            }
            if !is_finite_vec(body.position) || !is_finite_vec(body.velocity) {
                return Err(ConfigError::NonFiniteBody { index });
            }
            // A partner must name another body in this world
            match body.recent_partner {
                Some(partner) if partner < count && partner != index => {}
                _ => {
                    body.recent_partner = None;
                    body.recent_partner_ttl = 0;
                }
            }
        }

        log::info!("Initialized world from {} explicit bodies", count);

        Ok(Self {
            params: WorldParams {
                body_count: count,
                ..params
            },
            bodies,
            tick: 0,
            last_step: StepStats::default(),
        })
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        self.tick += 1;
        let mut stats = StepStats {
            tick: self.tick,
            ..Default::default()
        };

        self.integrate();
        stats.wall_hits = self.contain();
        self.collide(&mut stats);
        if let Some(strength) = self.params.attraction {
            stats.attractions = self.attract(strength);
        }
        self.guard_non_finite();

        log::debug!(
            "tick {}: {} contacts ({} impulses, {} suppressed), {} wall hits",
            stats.tick,
            stats.contacts,
            stats.impulses,
            stats.suppressed,
            stats.wall_hits
        );
        self.last_step = stats;
    }

    fn integrate(&mut self) {
        let dt = self.params.tick_duration;
        for body in &mut self.bodies {
            body.position += dt * body.velocity;
        }
    }

    fn contain(&mut self) -> usize {
        let mut hits = 0;
        for body in &mut self.bodies {
            let radius = body.radius;
            if reflect_axis(&mut body.position.x, &mut body.velocity.x, radius) {
                hits += 1;
            }
            if reflect_axis(&mut body.position.y, &mut body.velocity.y, radius) {
                hits += 1;
            }
            body.tick_cooldown();
        }
        hits
    }

    fn collide(&mut self, stats: &mut StepStats) {
        let restitution = self.params.restitution;
        let ttl = self.params.cooldown_ticks;
        let n = self.bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let contact = {
                    let (a, b) = pair_mut(&mut self.bodies, i, j);
                    if a.is_cooling_with(j) || b.is_cooling_with(i) {
                        if overlapping(a, b) {
                            stats.suppressed += 1;
                        }
                        continue;
                    }
                    resolve_pair(a, b, restitution)
                };

                if let Some(contact) = contact {
                    stats.contacts += 1;
                    if contact.impulse.is_some() {
                        stats.impulses += 1;
                    }
                    self.bind_partners(i, j, ttl);
                    log::trace!(
                        "contact {}-{}: depth {:.3e}, impulse {:?}",
                        i,
                        j,
                        contact.depth,
                        contact.impulse
                    );
                }
            }
        }
    }

    /// Make `i` and `j` each other's cooldown partner. A previous partner
    /// that still points back at either of them is released, so partner
    /// records always come in matching pairs.
    fn bind_partners(&mut self, i: usize, j: usize, ttl: u32) {
        for (me, other) in [(i, j), (j, i)] {
            if let Some(old) = self.bodies[me].recent_partner {
                if old != other && self.bodies[old].recent_partner == Some(me) {
                    self.bodies[old].clear_cooldown();
                }
            }
        }
        self.bodies[i].start_cooldown(j, ttl);
        self.bodies[j].start_cooldown(i, ttl);
    }

    fn attract(&mut self, strength: f64) -> usize {
        let dt = self.params.tick_duration;
        let n = self.bodies.len();
        let mut applied = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if attract_pair(a, b, strength, dt) {
                    applied += 1;
                }
            }
        }
        applied
    }

    fn guard_non_finite(&mut self) {
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if !is_finite_vec(body.position) {
                log::warn!("body {} position went non-finite, recentering", index);
                body.position = Vec2::splat((ARENA_MIN + ARENA_MAX) / 2.0);
            }
            if !is_finite_vec(body.velocity) {
                log::warn!("body {} velocity went non-finite, stopping it", index);
                body.velocity = Vec2::ZERO;
            }
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Owned copy of the drawable state, for hand-off to another thread
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|b| BodySnapshot {
                position: b.position,
                radius: b.radius,
                color: b.color,
            })
            .collect()
    }

    /// Info box text for one body
    pub fn overlay_text(&self, index: usize) -> Option<String> {
        self.body(index)
            .map(|b| format!("x = {:.4}\ny = {:.4}", b.position.x, b.position.y))
    }
}

/// Clamp one coordinate into the arena and point its velocity away from the
/// wall that was crossed
fn reflect_axis(position: &mut f64, velocity: &mut f64, radius: f64) -> bool {
    if *position - radius < ARENA_MIN {
        *position = ARENA_MIN + radius + WALL_EPSILON;
        *velocity = velocity.abs();
        true
    } else if *position + radius > ARENA_MAX {
        *position = ARENA_MAX - radius - WALL_EPSILON;
        *velocity = -velocity.abs();
        true
    } else {
        false
    }
}

/// Mutable references to two distinct bodies, `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ball_physics::{BodyDistribution, DiagonalLayout, VelocitySigns};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-8
    }

    /// One time unit per tick, so velocities read as displacement per tick
    fn unit_params() -> WorldParams {
        WorldParams::default().with_tick_duration(1.0)
    }

    fn body(x: f64, y: f64, vx: f64, vy: f64, mass: f64, radius: f64) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), mass, radius)
    }

    #[test]
    fn test_wall_bounce() {
        let bodies = vec![body(0.02, 0.5, -0.01, 0.0, 1.0, 0.05)];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        world.step();

        let b = &world.bodies()[0];
        assert!(approx_eq(b.velocity.x, 0.01));
        assert!(approx_eq(b.position.x, 0.05));
        assert!(b.position.x > 0.05);
        assert_eq!(b.velocity.y, 0.0);
        assert_eq!(b.position.y, 0.5);
        assert_eq!(world.last_step().wall_hits, 1);
    }

    #[test]
    fn test_wall_bounce_right_and_bottom() {
        let bodies = vec![body(0.97, 0.98, 0.01, 0.02, 1.0, 0.05)];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        world.step();

        let b = &world.bodies()[0];
        assert!(approx_eq(b.velocity.x, -0.01));
        assert!(approx_eq(b.velocity.y, -0.02));
        assert!(b.position.x < 0.95 && approx_eq(b.position.x, 0.95));
        assert!(b.position.y < 0.95 && approx_eq(b.position.y, 0.95));
        assert_eq!(world.last_step().wall_hits, 2);
    }

    #[test]
    fn test_containment_after_wall_pass() {
        let bodies = vec![
            body(-0.1, 0.5, 0.0, 0.0, 1.0, 0.05),
            body(1.2, 0.5, 0.0, 0.0, 1.0, 0.03),
            body(0.5, -0.3, 0.0, 0.0, 1.0, 0.04),
            body(0.5, 1.4, 0.0, 0.0, 1.0, 0.02),
        ];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        world.step();

        for b in world.bodies() {
            assert!(b.position.x >= b.radius && b.position.x <= 1.0 - b.radius);
            assert!(b.position.y >= b.radius && b.position.y <= 1.0 - b.radius);
        }
    }

    #[test]
    fn test_head_on_collision() {
        let bodies = vec![
            body(0.3, 0.5, 0.01, 0.0, 1.0, 0.05),
            body(0.5, 0.5, -0.01, 0.0, 1.0, 0.05),
        ];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();

        let mut collided = false;
        for _ in 0..20 {
            world.step();
            if world.last_step().contacts > 0 {
                collided = true;
                break;
            }
        }
        assert!(collided);
        assert_eq!(world.last_step().impulses, 1);

        let (a, b) = (&world.bodies()[0], &world.bodies()[1]);
        assert!(approx_eq(a.velocity.x, -0.01));
        assert!(approx_eq(b.velocity.x, 0.01));
        assert!((b.position - a.position).length() >= 0.1 - 1e-9);
        assert!(world.total_momentum().length() < 1e-12);
    }

    #[test]
    fn test_cooldown_is_symmetric_and_counts_down() {
        let bodies = vec![
            body(0.3, 0.5, 0.01, 0.0, 1.0, 0.05),
            body(0.5, 0.5, -0.01, 0.0, 1.0, 0.05),
        ];
        let params = unit_params().with_cooldown_ticks(4);
        let mut world = World::from_bodies(params, bodies).unwrap();
        while world.last_step().contacts == 0 {
            world.step();
        }

        let (a, b) = (&world.bodies()[0], &world.bodies()[1]);
        assert_eq!(a.recent_partner, Some(1));
        assert_eq!(b.recent_partner, Some(0));
        assert_eq!(a.recent_partner_ttl, 4);
        assert_eq!(b.recent_partner_ttl, 4);

        for expected in (0..4).rev() {
            world.step();
            assert_eq!(world.last_step().contacts, 0);
            assert_eq!(world.bodies()[0].recent_partner_ttl, expected);
            assert_eq!(world.bodies()[1].recent_partner_ttl, expected);
        }
        assert_eq!(world.bodies()[0].recent_partner, None);
        assert_eq!(world.bodies()[1].recent_partner, None);
    }

    #[test]
    fn test_cooldown_suppresses_contact() {
        let mut a = body(0.45, 0.5, 0.001, 0.0, 1.0, 0.05);
        let mut b = body(0.53, 0.5, -0.001, 0.0, 1.0, 0.05);
        a.start_cooldown(1, 3);
        b.start_cooldown(0, 3);
        let mut world = World::from_bodies(unit_params(), vec![a, b]).unwrap();
        world.step();

        let stats = world.last_step();
        assert_eq!(stats.contacts, 0);
        assert_eq!(stats.impulses, 0);
        assert_eq!(stats.suppressed, 1);
        assert_eq!(world.bodies()[0].velocity.x, 0.001);
        assert_eq!(world.bodies()[1].velocity.x, -0.001);
        assert_eq!(world.bodies()[0].recent_partner_ttl, 2);
    }

    #[test]
    fn test_cooldown_expiry_allows_contact() {
        let mut a = body(0.45, 0.5, 0.001, 0.0, 1.0, 0.05);
        let mut b = body(0.53, 0.5, -0.001, 0.0, 1.0, 0.05);
        a.start_cooldown(1, 1);
        b.start_cooldown(0, 1);
        let mut world = World::from_bodies(unit_params(), vec![a, b]).unwrap();
        world.step();

        assert_eq!(world.last_step().contacts, 1);
        assert_eq!(world.last_step().impulses, 1);
    }

    fn assert_partners_match(world: &World) {
        for (index, b) in world.bodies().iter().enumerate() {
            if let Some(partner) = b.recent_partner {
                let other = &world.bodies()[partner];
                assert_eq!(other.recent_partner, Some(index));
                assert_eq!(other.recent_partner_ttl, b.recent_partner_ttl);
            }
        }
    }

    #[test]
    fn test_new_partner_releases_old_one() {
        let bodies = vec![
            body(0.42, 0.5, 0.001, 0.0, 1.0, 0.05),
            body(0.50, 0.5, 0.0, 0.0, 1.0, 0.05),
            body(0.58, 0.5, -0.001, 0.0, 1.0, 0.05),
        ];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        world.step();

        // 0-1 touch first, then 1-2 takes body 1 away from body 0
        assert_eq!(world.last_step().contacts, 2);
        assert_eq!(world.bodies()[0].recent_partner, None);
        assert_eq!(world.bodies()[0].recent_partner_ttl, 0);
        assert_eq!(world.bodies()[1].recent_partner, Some(2));
        assert_eq!(world.bodies()[2].recent_partner, Some(1));
        assert_partners_match(&world);
    }

    #[test]
    fn test_partners_stay_paired_in_crowded_world() {
        let params = WorldParams::default().with_body_count(40).with_seed(9);
        let mut world = World::new(params).unwrap();
        for _ in 0..500 {
            world.step();
            assert_partners_match(&world);
        }
    }

    #[test]
    fn test_dangling_partner_is_dropped() {
        let mut a = body(0.3, 0.5, 0.0, 0.0, 1.0, 0.05);
        a.start_cooldown(7, 5);
        let world = World::from_bodies(unit_params(), vec![a]).unwrap();
        assert_eq!(world.bodies()[0].recent_partner, None);
        assert_eq!(world.bodies()[0].recent_partner_ttl, 0);
    }

    #[test]
    fn test_momentum_conserved_away_from_walls() {
        let bodies = vec![
            body(0.40, 0.50, 0.004, 0.001, 2.0, 0.05),
            body(0.48, 0.52, -0.003, 0.0, 0.7, 0.04),
            body(0.20, 0.80, 0.0, -0.001, 1.0, 0.03),
        ];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        let before = world.total_momentum();
        world.step();
        assert_eq!(world.last_step().impulses, 1);
        assert!((world.total_momentum() - before).length() < 1e-12);
    }

    #[test]
    fn test_no_overlap_after_contact() {
        let bodies = vec![
            body(0.40, 0.50, 0.0, 0.0, 3.0, 0.05),
            body(0.45, 0.51, 0.0, 0.0, 1.0, 0.05),
        ];
        let mut world = World::from_bodies(unit_params(), bodies).unwrap();
        world.step();

        let (a, b) = (&world.bodies()[0], &world.bodies()[1]);
        let contact_radius = a.radius + b.radius;
        let squared = (a.position - b.position).length_squared();
        assert!(squared >= contact_radius * contact_radius - 1e-12);
    }

    #[test]
    fn test_concentric_bodies_stay_finite() {
        let bodies = vec![
            body(0.5, 0.5, 0.0, 0.0, 1.0, 0.05),
            body(0.5, 0.5, 0.0, 0.0, 1.0, 0.05),
        ];
        let params = unit_params().with_attraction(Some(1e-7));
        let mut world = World::from_bodies(params, bodies).unwrap();
        for _ in 0..10 {
            world.step();
        }
        for b in world.bodies() {
            assert!(is_finite_vec(b.position));
            assert!(is_finite_vec(b.velocity));
        }
        assert!((world.bodies()[0].position - world.bodies()[1].position).length() > 0.05);
    }

    #[test]
    fn test_attraction_pulls_together() {
        let bodies = vec![
            body(0.2, 0.5, 0.0, 0.0, 1.0, 0.02),
            body(0.8, 0.5, 0.0, 0.0, 2.0, 0.02),
        ];
        let params = unit_params().with_attraction(Some(1e-5));
        let mut world = World::from_bodies(params, bodies).unwrap();
        world.step();

        assert_eq!(world.last_step().attractions, 1);
        assert!(world.bodies()[0].velocity.x > 0.0);
        assert!(world.bodies()[1].velocity.x < 0.0);
        assert!(world.total_momentum().length() < 1e-12);
    }

    #[test]
    fn test_energy_never_grows() {
        let params = WorldParams::default().with_body_count(30).with_seed(42);
        let mut world = World::new(params).unwrap();
        let initial = world.total_kinetic_energy();
        for _ in 0..2000 {
            world.step();
            assert!(world.total_kinetic_energy() <= initial * (1.0 + 1e-9));
            for b in world.bodies() {
                assert!(is_finite_vec(b.position) && is_finite_vec(b.velocity));
            }
        }
        assert_eq!(world.tick(), 2000);
    }

    #[test]
    fn test_seeded_worlds_are_reproducible() {
        let params = WorldParams::default().with_seed(1234);
        let a = World::new(params).unwrap();
        let b = World::new(params).unwrap();
        assert_eq!(a.bodies(), b.bodies());

        let c = World::new(params.with_seed(4321)).unwrap();
        assert_ne!(a.bodies(), c.bodies());
    }

    #[test]
    fn test_positive_only_placement_biases_motion() {
        let dist = BodyDistribution {
            velocity_signs: VelocitySigns::PositiveOnly,
            ..Default::default()
        };
        let params = WorldParams::default()
            .with_body_count(50)
            .with_placement(Placement::Random(dist));
        let world = World::new(params).unwrap();
        let momentum = world.total_momentum();
        assert!(momentum.x > 0.0 && momentum.y > 0.0);
        assert!(world
            .bodies()
            .iter()
            .all(|b| b.velocity.x > 0.0 && b.velocity.y > 0.0));
    }

    #[test]
    fn test_diagonal_placement() {
        let params = WorldParams::default()
            .with_body_count(23)
            .with_placement(Placement::Diagonal(DiagonalLayout::default()));
        let world = World::new(params).unwrap();
        assert_eq!(world.len(), 23);
        for b in world.bodies() {
            assert!(b.position.x > b.radius && b.position.x < 1.0 - b.radius);
            assert!(b.position.y > b.radius && b.position.y < 1.0 - b.radius);
        }
    }

    #[test]
    fn test_rejects_invalid_bodies() {
        assert_eq!(
            World::from_bodies(unit_params(), Vec::new()).err(),
            Some(ConfigError::ZeroBodies)
        );
        assert_eq!(
            World::from_bodies(unit_params(), vec![body(0.5, 0.5, 0.0, 0.0, 0.0, 0.05)]).err(),
            Some(ConfigError::NonPositiveMass(0.0))
        );
        assert_eq!(
            World::from_bodies(unit_params(), vec![body(0.5, 0.5, 0.0, 0.0, 1.0, -0.1)]).err(),
            Some(ConfigError::NonPositiveRadius(-0.1))
        );
        assert_eq!(
            World::from_bodies(unit_params(), vec![body(f64::NAN, 0.5, 0.0, 0.0, 1.0, 0.05)]).err(),
            Some(ConfigError::NonFiniteBody { index: 0 })
        );
        assert!(World::new(WorldParams::default().with_body_count(0)).is_err());

        let layout = DiagonalLayout {
            velocity: Vec2::new(f64::INFINITY, 0.0),
            ..Default::default()
        };
        let params = WorldParams::default()
            .with_body_count(2)
            .with_placement(Placement::Diagonal(layout));
        assert_eq!(World::new(params).err(), Some(ConfigError::NonFiniteLayout));
    }

    #[test]
    fn test_snapshot_and_overlay() {
        let bodies = vec![body(0.25, 0.75, 0.0, 0.0, 1.0, 0.05).with_color([1.0, 0.0, 0.0])];
        let world = World::from_bodies(unit_params(), bodies).unwrap();

        let snapshot = world.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].position, Vec2::new(0.25, 0.75));
        assert_eq!(snapshot[0].radius, 0.05);
        assert_eq!(snapshot[0].color, [1.0, 0.0, 0.0]);

        assert_eq!(world.overlay_text(0).as_deref(), Some("x = 0.2500\ny = 0.7500"));
        assert_eq!(world.overlay_text(1), None);
    }
}
