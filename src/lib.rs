//! Arena Shooter - simulation core for a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (motion, spawning, collisions, game mode)
//! - `session`: Frame clock and spawn timer ownership around a running game
//! - `settings`: Data-driven gameplay tuning

pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, Snapshot};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Seconds between enemy spawn attempts
    pub const SPAWN_INTERVAL_SECS: f32 = 1.0;

    /// Player defaults (pixels, pixels per tick)
    pub const PLAYER_SIZE: f32 = 100.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_DECELERATION: f32 = 0.5;
    pub const PLAYER_MAX_SPEED: f32 = 5.0;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 7.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 100.0;
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_MAX_SPEED: f32 = 2.0;
    /// Hard cap on live enemies
    pub const MAX_ENEMIES: usize = 20;
    /// Minimum center-to-center distance from the player at spawn time
    pub const MIN_SPAWN_DISTANCE: f32 = 400.0;
    /// Placement attempts before a spawn is skipped
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;
    /// Inward inset applied to enemy hitboxes for lethal contact
    pub const DEATH_INSET: f32 = 35.0;

    /// Default world bounds
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;
}

/// Unit direction vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Sign of `v` with zero mapped to zero (unlike `f32::signum`)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
