//! Physics world
//!
//! Owns all bodies, advances the simulation on a fixed 60 Hz timestep and
//! detects/resolves AABB collisions. Resolution runs as a single pass per
//! step: every dynamic-vs-static pair first, then every dynamic-vs-dynamic
//! pair, in registration order. Multi-body stacks may keep a small residual
//! overlap; that soft feel is intentional.

use std::cmp::Ordering;

use glam::Vec2;

use crate::consts::{FIXED_TIMESTEP_MS, FRAME_RATE};
use crate::tuning::PhysicsTuning;

use super::body::{Body, BodyId, BodySpec, Contact, InvalidBodySpec};
use super::collision::{self, Rect};

/// Penetration tolerated before the dynamic-pair positional correction kicks in
const CORRECTION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration corrected per step
const CORRECTION_PERCENT: f32 = 0.2;

/// A raycast hit, nearest first after sorting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub body: BodyId,
    pub distance: f32,
    pub point: Vec2,
}

/// The simulation world: dynamic and static body collections plus the
/// fixed-timestep accumulator
pub struct PhysicsWorld {
    tuning: PhysicsTuning,
    dynamic: Vec<Body>,
    statics: Vec<Body>,
    accumulator: f32,
    next_id: u32,
}

impl PhysicsWorld {
    pub fn new(tuning: PhysicsTuning) -> Self {
        Self {
            tuning,
            dynamic: Vec::new(),
            statics: Vec::new(),
            accumulator: 0.0,
            next_id: 1,
        }
    }

    pub fn tuning(&self) -> &PhysicsTuning {
        &self.tuning
    }

    /// Register a body, filling unset material fields from the world tuning.
    ///
    /// Rejects non-positive mass and degenerate boxes; gameplay code treats
    /// that as malformed level data and skips the object.
    pub fn create_body(&mut self, spec: BodySpec) -> Result<BodyId, InvalidBodySpec> {
        if spec.mass <= 0.0 {
            return Err(InvalidBodySpec::NonPositiveMass(spec.mass));
        }
        if spec.width <= 0.0 || spec.height <= 0.0 {
            return Err(InvalidBodySpec::NonPositiveSize(spec.width, spec.height));
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;

        let body = Body {
            id,
            pos: Vec2::new(spec.x, spec.y),
            size: Vec2::new(spec.width, spec.height),
            vel: Vec2::new(spec.vx, spec.vy),
            acc: Vec2::ZERO,
            mass: spec.mass,
            restitution: spec.restitution.unwrap_or(self.tuning.bounce_restitution),
            friction: spec.friction.unwrap_or(self.tuning.friction),
            gravity_scale: spec.gravity_scale,
            is_static: spec.is_static,
            is_sensor: spec.is_sensor,
            one_way: spec.one_way,
            category: spec.category,
            mask: spec.mask,
            on_ground: false,
            user_data: spec.user_data,
            on_collision: spec.on_collision,
        };

        if body.is_static {
            self.statics.push(body);
        } else {
            self.dynamic.push(body);
        }
        Ok(id)
    }

    /// Remove a body from whichever collection holds it; no-op if absent
    pub fn remove_body(&mut self, id: BodyId) {
        self.dynamic.retain(|b| b.id != id);
        self.statics.retain(|b| b.id != id);
    }

    /// Empty both collections (level restart)
    pub fn clear(&mut self) {
        self.dynamic.clear();
        self.statics.clear();
        self.accumulator = 0.0;
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.dynamic
            .iter()
            .chain(self.statics.iter())
            .find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.dynamic
            .iter_mut()
            .chain(self.statics.iter_mut())
            .find(|b| b.id == id)
    }

    /// Accumulate a force; applied (scaled by mass) at the next step
    pub fn apply_force(&mut self, id: BodyId, fx: f32, fy: f32) {
        if let Some(body) = self.body_mut(id) {
            if !body.is_static {
                body.acc += Vec2::new(fx, fy) / body.mass;
            }
        }
    }

    /// Instant velocity change scaled by mass
    pub fn apply_impulse(&mut self, id: BodyId, ix: f32, iy: f32) {
        if let Some(body) = self.body_mut(id) {
            if !body.is_static {
                body.vel += Vec2::new(ix, iy) / body.mass;
            }
        }
    }

    /// Direct velocity overwrite; no-op on static bodies
    pub fn set_velocity(&mut self, id: BodyId, vx: f32, vy: f32) {
        if let Some(body) = self.body_mut(id) {
            if !body.is_static {
                body.vel = Vec2::new(vx, vy);
            }
        }
    }

    /// Advance the simulation by a wall-clock delta.
    ///
    /// Runs as many fixed 60 Hz steps as the accumulator allows, carrying
    /// the remainder forward. A very large delta (backgrounded tab) runs
    /// its steps back to back before the next render; that visible
    /// catch-up is a property, not a defect.
    pub fn step(&mut self, delta_ms: f32) {
        self.accumulator += delta_ms;
        while self.accumulator >= FIXED_TIMESTEP_MS {
            self.fixed_step(FIXED_TIMESTEP_MS / 1000.0);
            self.accumulator -= FIXED_TIMESTEP_MS;
        }
    }

    fn fixed_step(&mut self, dt: f32) {
        let tuning = self.tuning;
        for body in &mut self.dynamic {
            body.acc.y += tuning.gravity * body.gravity_scale;

            // Velocity integration normalized to the 60 fps reference rate
            body.vel += body.acc * dt * FRAME_RATE;
            body.vel *= tuning.air_resistance;
            body.vel = body.vel.clamp(
                Vec2::splat(-tuning.max_velocity),
                Vec2::splat(tuning.max_velocity),
            );

            // Positions advance in per-frame units
            body.pos += body.vel;

            body.acc = Vec2::ZERO;
            body.on_ground = false;
        }

        self.check_collisions();
    }

    fn check_collisions(&mut self) {
        // Dynamic vs static
        for i in 0..self.dynamic.len() {
            for j in 0..self.statics.len() {
                let (a, b) = (&self.dynamic[i], &self.statics[j]);
                if !a.can_collide(b) {
                    continue;
                }
                let Some(contact) = contact_between(&a.rect(), &b.rect()) else {
                    continue;
                };
                self.resolve_static(i, j, contact);
            }
        }

        // Dynamic vs dynamic
        for i in 0..self.dynamic.len() {
            for j in (i + 1)..self.dynamic.len() {
                let (a, b) = (&self.dynamic[i], &self.dynamic[j]);
                if !a.can_collide(b) {
                    continue;
                }
                let Some(contact) = contact_between(&a.rect(), &b.rect()) else {
                    continue;
                };
                self.resolve_dynamic(i, j, contact);
            }
        }
    }

    fn resolve_static(&mut self, i: usize, j: usize, contact: Contact) {
        // Callbacks fire for every detected pair, resolved or not
        if let Some(mut cb) = self.dynamic[i].on_collision.take() {
            cb(&self.statics[j], &contact);
            self.dynamic[i].on_collision = Some(cb);
        }
        if let Some(mut cb) = self.statics[j].on_collision.take() {
            cb(&self.dynamic[i], &contact);
            self.statics[j].on_collision = Some(cb);
        }

        if self.dynamic[i].is_sensor || self.statics[j].is_sensor {
            return;
        }

        // One-way platforms only catch a body landing from above
        if self.statics[j].one_way
            && !(contact.normal.y < 0.0 && self.dynamic[i].vel.y >= 0.0)
        {
            return;
        }

        let body = &mut self.dynamic[i];
        if contact.normal.x != 0.0 {
            body.pos.x += contact.overlap.x * contact.normal.x;
            body.vel.x *= -body.restitution;
        }
        if contact.normal.y != 0.0 {
            body.pos.y += contact.overlap.y * contact.normal.y;
            if contact.normal.y < 0.0 {
                // Landing on top
                body.on_ground = true;
                body.vel.y = 0.0;
                body.vel.x *= body.friction;
            } else {
                // Bonked from underneath
                body.vel.y *= -body.restitution;
            }
        }
    }

    fn resolve_dynamic(&mut self, i: usize, j: usize, contact: Contact) {
        let (left, right) = self.dynamic.split_at_mut(j);
        let a = &mut left[i];
        let b = &mut right[0];

        if let Some(mut cb) = a.on_collision.take() {
            cb(&*b, &contact);
            a.on_collision = Some(cb);
        }
        if let Some(mut cb) = b.on_collision.take() {
            cb(&*a, &contact);
            b.on_collision = Some(cb);
        }

        if a.is_sensor || b.is_sensor {
            return;
        }

        let vel_along_normal = (a.vel - b.vel).dot(contact.normal);
        if vel_along_normal > 0.0 {
            // Already separating
            return;
        }

        // 1-D elastic impulse along the contact normal, lesser restitution,
        // distributed inversely by mass
        let restitution = a.restitution.min(b.restitution);
        let total_mass = a.mass + b.mass;
        let impulse = -(1.0 + restitution) * vel_along_normal / total_mass;

        a.vel += contact.normal * impulse * b.mass;
        b.vel -= contact.normal * impulse * a.mass;

        // Positional correction against sustained overlap jitter
        let correction =
            (contact.penetration() - CORRECTION_SLOP).max(0.0) / total_mass * CORRECTION_PERCENT;
        a.pos += contact.normal * correction * b.mass;
        b.pos -= contact.normal * correction * a.mass;
    }

    /// Raycast against every body's AABB via the slab method.
    ///
    /// Hits are sorted ascending by distance; a body is reported only when
    /// the intersection lies within `[0, max_distance]`.
    pub fn raycast(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Vec<RayHit> {
        let length = dir.length();
        if length <= f32::EPSILON {
            return Vec::new();
        }
        let dir = dir / length;

        let mut hits: Vec<RayHit> = self
            .dynamic
            .iter()
            .chain(self.statics.iter())
            .filter_map(|body| {
                raycast_aabb(origin, dir, max_distance, &body.rect()).map(|(distance, point)| {
                    RayHit {
                        body: body.id,
                        distance,
                        point,
                    }
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        hits
    }

    /// Bodies whose boxes contain the point (linear scan)
    pub fn bodies_at_point(&self, point: Vec2) -> Vec<BodyId> {
        self.dynamic
            .iter()
            .chain(self.statics.iter())
            .filter(|b| collision::point_in_rect(point, &b.rect()))
            .map(|b| b.id)
            .collect()
    }

    /// Bodies whose boxes intersect the area (linear scan)
    pub fn bodies_in_area(&self, area: &Rect) -> Vec<BodyId> {
        self.dynamic
            .iter()
            .chain(self.statics.iter())
            .filter(|b| collision::aabbs_intersect(&b.rect(), area))
            .map(|b| b.id)
            .collect()
    }
}

/// Overlap test plus the minimum-translation-vector normal: the axis with
/// the smaller overlap separates, signed by relative center position
fn contact_between(a: &Rect, b: &Rect) -> Option<Contact> {
    let overlap = collision::aabb_overlap(a, b)?;
    let normal = if overlap.x < overlap.y {
        let nx = if a.center().x < b.center().x { -1.0 } else { 1.0 };
        Vec2::new(nx, 0.0)
    } else {
        let ny = if a.center().y < b.center().y { -1.0 } else { 1.0 };
        Vec2::new(0.0, ny)
    };
    Some(Contact {
        normal,
        overlap: Vec2::new(overlap.x, overlap.y),
    })
}

/// Slab test of a normalized ray against one AABB
fn raycast_aabb(origin: Vec2, dir: Vec2, max_dist: f32, rect: &Rect) -> Option<(f32, Vec2)> {
    let mut tmin: f32 = 0.0;
    let mut tmax: f32 = max_dist;

    if dir.x != 0.0 {
        let tx1 = (rect.x - origin.x) / dir.x;
        let tx2 = (rect.right() - origin.x) / dir.x;
        tmin = tmin.max(tx1.min(tx2));
        tmax = tmax.min(tx1.max(tx2));
    } else if origin.x < rect.x || origin.x > rect.right() {
        return None;
    }

    if dir.y != 0.0 {
        let ty1 = (rect.y - origin.y) / dir.y;
        let ty2 = (rect.bottom() - origin.y) / dir.y;
        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));
    } else if origin.y < rect.y || origin.y > rect.bottom() {
        return None;
    }

    if tmax >= tmin && tmin >= 0.0 {
        return Some((tmin, origin + dir * tmin));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Tuning with no drag or gravity, for exact impulse arithmetic
    fn vacuum() -> PhysicsTuning {
        PhysicsTuning {
            gravity: 0.0,
            friction: 1.0,
            air_resistance: 1.0,
            bounce_restitution: 0.5,
            max_velocity: 100.0,
        }
    }

    fn step_once(world: &mut PhysicsWorld) {
        world.step(FIXED_TIMESTEP_MS);
    }

    #[test]
    fn gravity_trajectory_matches_discretized_motion() {
        let tuning = PhysicsTuning::PLATFORMER;
        let mut world = PhysicsWorld::new(tuning);
        let id = world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                ..Default::default()
            })
            .unwrap();

        // Expected motion replays the integrator's own recurrence
        let mut vy = 0.0f32;
        let mut y = 0.0f32;
        for _ in 0..30 {
            step_once(&mut world);
            vy = ((vy + tuning.gravity) * tuning.air_resistance).min(tuning.max_velocity);
            y += vy;
        }

        let body = world.body(id).unwrap();
        assert!((body.pos.y - y).abs() < 1e-3, "{} vs {}", body.pos.y, y);
        assert_eq!(body.pos.x, 0.0);
    }

    #[test]
    fn integration_is_deterministic_across_runs() {
        let run = || {
            let mut world = PhysicsWorld::new(PhysicsTuning::PLATFORMER);
            let id = world
                .create_body(BodySpec {
                    x: 12.5,
                    y: -3.0,
                    vx: 2.0,
                    ..Default::default()
                })
                .unwrap();
            for _ in 0..120 {
                step_once(&mut world);
            }
            world.body(id).unwrap().pos
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn static_bodies_never_move() {
        let mut world = PhysicsWorld::new(PhysicsTuning::default());
        let id = world
            .create_body(BodySpec {
                x: 50.0,
                y: 50.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        // A dynamic body resting on it must not displace it either
        world
            .create_body(BodySpec {
                x: 50.0,
                y: 5.0,
                ..Default::default()
            })
            .unwrap();

        for _ in 0..120 {
            step_once(&mut world);
        }

        let platform = world.body(id).unwrap();
        assert_eq!(platform.pos, Vec2::new(50.0, 50.0));
        assert_eq!(platform.vel, Vec2::ZERO);
    }

    #[test]
    fn landing_sets_on_ground_and_zeroes_vy() {
        let mut world = PhysicsWorld::new(PhysicsTuning::PLATFORMER);
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 100.0,
                width: 200.0,
                height: 20.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 80.0,
                y: 20.0,
                ..Default::default()
            })
            .unwrap();

        for _ in 0..120 {
            step_once(&mut world);
        }

        let body = world.body(id).unwrap();
        assert!(body.on_ground);
        assert_eq!(body.vel.y, 0.0);
        // Resolution pushes the body flush with the platform top
        assert!((body.rect().bottom() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn restitution_reflects_velocity_into_a_wall() {
        let mut world = PhysicsWorld::new(vacuum());
        world
            .create_body(BodySpec {
                x: 100.0,
                y: 0.0,
                width: 20.0,
                height: 100.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 55.0,
                y: 30.0,
                vx: 8.0,
                restitution: Some(0.5),
                ..Default::default()
            })
            .unwrap();

        step_once(&mut world);

        let body = world.body(id).unwrap();
        assert!((body.vel.x - (-4.0)).abs() < 1e-4);
    }

    #[test]
    fn bonk_from_below_reflects_vertical_velocity() {
        let mut world = PhysicsWorld::new(vacuum());
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                width: 200.0,
                height: 20.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 80.0,
                y: 25.0,
                vy: -8.0,
                restitution: Some(0.5),
                ..Default::default()
            })
            .unwrap();

        step_once(&mut world);

        let body = world.body(id).unwrap();
        assert!((body.vel.y - 4.0).abs() < 1e-4);
        assert!(!body.on_ground);
    }

    #[test]
    fn disjoint_filters_suppress_resolution_and_callbacks() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = calls.clone();

        let mut world = PhysicsWorld::new(vacuum());
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 100.0,
                is_static: true,
                category: 0x0002,
                mask: 0x0002,
                on_collision: Some(Box::new(move |_, _| counter.set(counter.get() + 1))),
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 30.0,
                y: 30.0,
                category: 0x0001,
                mask: 0x0001,
                ..Default::default()
            })
            .unwrap();

        let before = world.body(id).unwrap().pos;
        step_once(&mut world);

        assert_eq!(calls.get(), 0);
        assert_eq!(world.body(id).unwrap().pos, before);
    }

    #[test]
    fn sensors_report_overlap_without_displacing() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = calls.clone();

        let mut world = PhysicsWorld::new(vacuum());
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 100.0,
                is_static: true,
                is_sensor: true,
                on_collision: Some(Box::new(move |_, _| counter.set(counter.get() + 1))),
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 30.0,
                y: 30.0,
                vx: 1.0,
                ..Default::default()
            })
            .unwrap();

        step_once(&mut world);

        assert_eq!(calls.get(), 1);
        let body = world.body(id).unwrap();
        // Moved by its own velocity only, never pushed out
        assert_eq!(body.pos, Vec2::new(31.0, 30.0));
        assert_eq!(body.vel.x, 1.0);
    }

    #[test]
    fn equal_mass_elastic_pair_swaps_velocities() {
        let tuning = PhysicsTuning {
            bounce_restitution: 1.0,
            ..vacuum()
        };
        let mut world = PhysicsWorld::new(tuning);
        let a = world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                vx: 2.0,
                ..Default::default()
            })
            .unwrap();
        let b = world
            .create_body(BodySpec {
                x: 11.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                vx: -2.0,
                ..Default::default()
            })
            .unwrap();

        step_once(&mut world);

        assert!((world.body(a).unwrap().vel.x - (-2.0)).abs() < 1e-4);
        assert!((world.body(b).unwrap().vel.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn one_way_platform_passes_rising_bodies() {
        let mut world = PhysicsWorld::new(vacuum());
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 100.0,
                width: 200.0,
                height: 10.0,
                is_static: true,
                one_way: true,
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 80.0,
                y: 104.0,
                vy: -6.0,
                ..Default::default()
            })
            .unwrap();

        step_once(&mut world);

        let body = world.body(id).unwrap();
        // Jumped up through the platform, velocity untouched
        assert_eq!(body.vel.y, -6.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn one_way_platform_catches_falling_bodies() {
        let mut world = PhysicsWorld::new(PhysicsTuning::PLATFORMER);
        world
            .create_body(BodySpec {
                x: 0.0,
                y: 100.0,
                width: 200.0,
                height: 10.0,
                is_static: true,
                one_way: true,
                ..Default::default()
            })
            .unwrap();
        let id = world
            .create_body(BodySpec {
                x: 80.0,
                y: 30.0,
                ..Default::default()
            })
            .unwrap();

        for _ in 0..120 {
            step_once(&mut world);
        }

        let body = world.body(id).unwrap();
        assert!(body.on_ground);
        assert!((body.rect().bottom() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn velocity_clamp_bounds_free_fall() {
        let mut world = PhysicsWorld::new(PhysicsTuning::PLATFORMER);
        let id = world.create_body(BodySpec::default()).unwrap();

        for _ in 0..600 {
            step_once(&mut world);
        }

        let body = world.body(id).unwrap();
        assert!(body.vel.y <= PhysicsTuning::PLATFORMER.max_velocity + 1e-4);
    }

    #[test]
    fn mutators_ignore_static_bodies() {
        let mut world = PhysicsWorld::new(PhysicsTuning::default());
        let id = world
            .create_body(BodySpec {
                is_static: true,
                ..Default::default()
            })
            .unwrap();

        world.apply_force(id, 100.0, 0.0);
        world.apply_impulse(id, 100.0, 0.0);
        world.set_velocity(id, 9.0, 9.0);

        assert_eq!(world.body(id).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut world = PhysicsWorld::new(PhysicsTuning::default());
        assert_eq!(
            world.create_body(BodySpec {
                mass: 0.0,
                ..Default::default()
            }),
            Err(InvalidBodySpec::NonPositiveMass(0.0))
        );
        assert_eq!(
            world.create_body(BodySpec {
                width: -4.0,
                ..Default::default()
            }),
            Err(InvalidBodySpec::NonPositiveSize(-4.0, 40.0))
        );
    }

    #[test]
    fn user_data_rides_along_with_the_body() {
        let mut world = PhysicsWorld::new(PhysicsTuning::default());
        let id = world
            .create_body(BodySpec {
                user_data: Some(Box::new("checkpoint")),
                ..Default::default()
            })
            .unwrap();

        let tag = world
            .body(id)
            .and_then(|b| b.user_data.as_ref())
            .and_then(|d| d.downcast_ref::<&str>());
        assert_eq!(tag, Some(&"checkpoint"));
    }

    #[test]
    fn remove_body_is_noop_when_absent() {
        let mut world = PhysicsWorld::new(PhysicsTuning::default());
        let id = world.create_body(BodySpec::default()).unwrap();
        world.remove_body(id);
        world.remove_body(id);
        assert!(world.body(id).is_none());
    }

    #[test]
    fn raycast_reports_nearest_first_within_range() {
        let mut world = PhysicsWorld::new(vacuum());
        let far = world
            .create_body(BodySpec {
                x: 200.0,
                y: -10.0,
                width: 20.0,
                height: 20.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        let near = world
            .create_body(BodySpec {
                x: 50.0,
                y: -10.0,
                width: 20.0,
                height: 20.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();

        let hits = world.raycast(Vec2::ZERO, Vec2::new(1.0, 0.0), 1000.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].body, near);
        assert_eq!(hits[1].body, far);
        assert!((hits[0].distance - 50.0).abs() < 1e-4);
        assert_eq!(hits[0].point, Vec2::new(50.0, 0.0));

        // Out of range: the far box drops off
        let hits = world.raycast(Vec2::ZERO, Vec2::new(1.0, 0.0), 100.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].body, near);

        // Behind the origin: nothing
        let hits = world.raycast(Vec2::ZERO, Vec2::new(-1.0, 0.0), 1000.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn point_and_area_queries() {
        let mut world = PhysicsWorld::new(vacuum());
        let a = world
            .create_body(BodySpec {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                is_static: true,
                ..Default::default()
            })
            .unwrap();
        let b = world
            .create_body(BodySpec {
                x: 100.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(world.bodies_at_point(Vec2::new(5.0, 5.0)), vec![a]);
        assert_eq!(
            world.bodies_in_area(&Rect::new(-5.0, -5.0, 120.0, 20.0)),
            vec![b, a]
        );
        assert!(world.bodies_at_point(Vec2::new(50.0, 50.0)).is_empty());
    }
}
