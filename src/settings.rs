//! Gameplay tuning
//!
//! Every constant the simulation reads lives here so a run can be re-tuned
//! from JSON without recompiling. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating [`Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Player width/height in pixels
    pub player_size: Vec2,
    /// Velocity gained per tick while a direction is held
    pub acceleration: f32,
    /// Velocity shed per tick while no direction is held
    pub deceleration: f32,
    /// Per-axis velocity cap
    pub max_speed: f32,

    // === Bullets ===
    pub bullet_size: Vec2,
    pub bullet_speed: f32,

    // === Enemies ===
    pub enemy_size: Vec2,
    /// Spawn speed range, `[min, max)`
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub max_enemies: usize,
    pub min_spawn_distance: f32,
    pub max_spawn_attempts: u32,
    /// Forgiving margin applied to each side of an enemy hitbox
    pub death_inset: f32,

    // === Timing ===
    /// Seconds per simulation tick
    pub tick_secs: f32,
    /// Seconds between spawn attempts
    pub spawn_interval_secs: f32,
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_size: Vec2::splat(PLAYER_SIZE),
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            max_speed: PLAYER_MAX_SPEED,

            bullet_size: Vec2::splat(BULLET_SIZE),
            bullet_speed: BULLET_SPEED,

            enemy_size: Vec2::splat(ENEMY_SIZE),
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            max_enemies: MAX_ENEMIES,
            min_spawn_distance: MIN_SPAWN_DISTANCE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            death_inset: DEATH_INSET,

            tick_secs: SIM_DT,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive_size(field: &'static str, v: Vec2) -> Result<(), SettingsError> {
            if v.is_finite() && v.x > 0.0 && v.y > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite and positive",
                })
            }
        }

        fn positive(field: &'static str, v: f32) -> Result<(), SettingsError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite and positive",
                })
            }
        }

        positive_size("player_size", self.player_size)?;
        positive_size("bullet_size", self.bullet_size)?;
        positive_size("enemy_size", self.enemy_size)?;
        positive("acceleration", self.acceleration)?;
        positive("deceleration", self.deceleration)?;
        positive("max_speed", self.max_speed)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("enemy_min_speed", self.enemy_min_speed)?;
        positive("enemy_max_speed", self.enemy_max_speed)?;
        positive("tick_secs", self.tick_secs)?;
        positive("spawn_interval_secs", self.spawn_interval_secs)?;

        if self.enemy_min_speed >= self.enemy_max_speed {
            return Err(SettingsError::Invalid {
                field: "enemy_max_speed",
                reason: "must be greater than enemy_min_speed",
            });
        }
        if !self.min_spawn_distance.is_finite() || self.min_spawn_distance < 0.0 {
            return Err(SettingsError::Invalid {
                field: "min_spawn_distance",
                reason: "must be finite and non-negative",
            });
        }
        if !self.death_inset.is_finite() || self.death_inset < 0.0 {
            return Err(SettingsError::Invalid {
                field: "death_inset",
                reason: "must be finite and non-negative",
            });
        }
        if self.max_spawn_attempts == 0 {
            return Err(SettingsError::Invalid {
                field: "max_spawn_attempts",
                reason: "must be at least 1",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
