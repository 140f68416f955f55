//! Physics body model
//!
//! Bodies are owned exclusively by the [`PhysicsWorld`](super::PhysicsWorld)
//! and referenced from the outside by [`BodyId`]. A body is dynamic or
//! static for its whole lifetime; only dynamic bodies are integrated.

use std::any::Any;
use std::fmt;

use glam::Vec2;
use thiserror::Error;

use super::collision::Rect;

/// Opaque handle to a body registered with a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) u32);

/// Contact info passed to collision callbacks
///
/// `normal` is a unit vector along the separation axis (the axis with the
/// smaller overlap), pointing in the direction the first body moves to
/// separate. `overlap` holds the positive penetration on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec2,
    pub overlap: Vec2,
}

impl Contact {
    /// Penetration depth along the separation axis
    pub fn penetration(&self) -> f32 {
        if self.normal.x != 0.0 {
            self.overlap.x
        } else {
            self.overlap.y
        }
    }
}

/// Per-body collision callback, invoked for every detected pair whether or
/// not the pair was physically resolved
pub type CollisionCallback = Box<dyn FnMut(&Body, &Contact)>;

/// Rejected body construction
#[derive(Debug, Error, PartialEq)]
pub enum InvalidBodySpec {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f32),
    #[error("body size must be positive, got {0}x{1}")]
    NonPositiveSize(f32, f32),
}

/// Construction parameters for [`PhysicsWorld::create_body`](super::PhysicsWorld::create_body)
///
/// Build with struct update syntax over `Default`. `restitution` and
/// `friction` fall back to the world tuning when unset.
pub struct BodySpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub mass: f32,
    pub restitution: Option<f32>,
    pub friction: Option<f32>,
    pub gravity_scale: f32,
    pub is_static: bool,
    pub is_sensor: bool,
    /// Static platforms only: resolve only landings from above
    pub one_way: bool,
    pub category: u16,
    pub mask: u16,
    pub user_data: Option<Box<dyn Any>>,
    pub on_collision: Option<CollisionCallback>,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 40.0,
            vx: 0.0,
            vy: 0.0,
            mass: 1.0,
            restitution: None,
            friction: None,
            gravity_scale: 1.0,
            is_static: false,
            is_sensor: false,
            one_way: false,
            category: 0x0001,
            mask: 0xFFFF,
            user_data: None,
            on_collision: None,
        }
    }
}

/// A simulated rectangular body
pub struct Body {
    pub(crate) id: BodyId,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub(crate) acc: Vec2,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub gravity_scale: f32,
    pub is_static: bool,
    pub is_sensor: bool,
    pub one_way: bool,
    pub category: u16,
    pub mask: u16,
    /// Touched a body from above during the last step; reset every step
    pub on_ground: bool,
    pub user_data: Option<Box<dyn Any>>,
    pub(crate) on_collision: Option<CollisionCallback>,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Two bodies may collide only if each one's mask intersects the
    /// other's category
    pub fn can_collide(&self, other: &Body) -> bool {
        (self.mask & other.category) != 0 && (other.mask & self.category) != 0
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("vel", &self.vel)
            .field("is_static", &self.is_static)
            .field("is_sensor", &self.is_sensor)
            .finish_non_exhaustive()
    }
}
