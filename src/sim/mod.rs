//! Deterministic simulation module
//!
//! All physics and effects live here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only for cosmetic particles)
//! - No rendering backends or platform dependencies

pub mod body;
pub mod collision;
pub mod particles;
pub mod world;

pub use body::{Body, BodyId, BodySpec, CollisionCallback, Contact, InvalidBodySpec};
pub use collision::{Circle, Overlap, Rect, SegmentHit};
pub use particles::{Emitter, EmitterId, Particle, ParticleOptions, ParticleShape, ParticleSystem};
pub use world::{PhysicsWorld, RayHit};
