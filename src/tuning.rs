//! Data-driven physics tuning
//!
//! Each game genre runs the same physics world with different global
//! parameters. Only the platformer loop ships in this crate; the other
//! presets parameterize the world for the project's remaining genres.

use serde::{Deserialize, Serialize};

/// Global physics parameters for a [`crate::sim::PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsTuning {
    /// Downward acceleration added to every dynamic body each step,
    /// scaled by the body's `gravity_scale`
    pub gravity: f32,
    /// Default ground friction for bodies that don't specify one
    pub friction: f32,
    /// Multiplicative velocity decay applied every step (< 1.0 slows)
    pub air_resistance: f32,
    /// Default restitution for bodies that don't specify one
    pub bounce_restitution: f32,
    /// Symmetric per-axis velocity clamp
    pub max_velocity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            friction: 0.8,
            air_resistance: 0.99,
            bounce_restitution: 0.5,
            max_velocity: 15.0,
        }
    }
}

impl PhysicsTuning {
    pub const PLATFORMER: Self = Self {
        gravity: 0.6,
        friction: 0.8,
        air_resistance: 0.99,
        bounce_restitution: 0.3,
        max_velocity: 15.0,
    };

    pub const RACING: Self = Self {
        gravity: 0.0,
        friction: 0.95,
        air_resistance: 0.98,
        bounce_restitution: 0.5,
        max_velocity: 12.0,
    };

    pub const MARBLE_RUN: Self = Self {
        gravity: 0.4,
        friction: 0.99,
        air_resistance: 0.995,
        bounce_restitution: 0.6,
        max_velocity: 20.0,
    };

    pub const SPACE: Self = Self {
        gravity: 0.0,
        friction: 1.0,
        air_resistance: 1.0,
        bounce_restitution: 0.8,
        max_velocity: 10.0,
    };

    pub const SKI: Self = Self {
        gravity: 0.3,
        friction: 0.98,
        air_resistance: 0.99,
        bounce_restitution: 0.2,
        max_velocity: 18.0,
    };

    pub const UNDERWATER: Self = Self {
        gravity: 0.1,
        friction: 0.7,
        air_resistance: 0.95,
        bounce_restitution: 0.4,
        max_velocity: 8.0,
    };
}
