//! Playkit - physics and platformer core for a kids' game construction kit
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision math, physics world, particles)
//! - `game`: Platformer game loop driving an authored level to a win/lose outcome
//! - `level`: Serializable level document produced by the editor
//! - `host`: Side-effect hooks fired on game events (sound, music, storage, screens)
//! - `render`: Painter abstraction the game loop and particles draw through
//! - `tuning`: Data-driven physics presets per game genre

pub mod game;
pub mod host;
pub mod level;
pub mod render;
pub mod sim;
pub mod tuning;

pub use game::{FrameInput, GamePhase, Outcome, PlatformerGame};
pub use host::{GameHost, NullHost, Sound, WinStats};
pub use level::{BlockRole, LevelDocument};
pub use sim::{BodyId, BodySpec, ParticleSystem, PhysicsWorld};
pub use tuning::PhysicsTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz), in milliseconds
    pub const FIXED_TIMESTEP_MS: f32 = 1000.0 / 60.0;
    /// Reference frame rate the integrator is normalized to
    pub const FRAME_RATE: f32 = 60.0;

    /// Player collision box
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Player spawn point (also the respawn point after a hazard hit)
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    pub const PLAYER_FRICTION: f32 = 0.8;

    /// Horizontal run speed, units per frame
    pub const RUN_SPEED: f32 = 5.0;
    /// Horizontal velocity decay per frame when no direction is held
    pub const IDLE_DECAY: f32 = 0.8;
    /// Vertical velocity applied on jump (screen coords, negative = up)
    pub const JUMP_SPEED: f32 = -14.0;
    /// Upward bounce after stomping an enemy
    pub const STOMP_BOUNCE_SPEED: f32 = -10.0;
    /// Score awarded for a stomped enemy
    pub const STOMP_SCORE: u32 = 100;

    /// Enemy patrol speed, units per frame
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Default patrol range around the enemy spawn x
    pub const ENEMY_RANGE: f32 = 100.0;

    /// Falling this far past the level bottom counts as a hazard hit
    pub const FALL_MARGIN: f32 = 100.0;
    /// Delay before the automatic restart after a game over
    pub const GAME_OVER_RESTART_MS: f32 = 2000.0;
    /// Fraction of the remaining distance the camera covers each frame
    pub const CAMERA_LERP: f32 = 0.1;
    /// Lifetime of a floating score popup
    pub const POPUP_LIFETIME_MS: f32 = 1000.0;

    pub const DEFAULT_LIVES: u32 = 3;
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}
