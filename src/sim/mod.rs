//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Subsystems take slices and return fresh collections
//! - No rendering or platform dependencies

pub mod bullets;
pub mod collision;
pub mod enemies;
pub mod geometry;
pub mod player;
pub mod state;
pub mod tick;

pub use bullets::advance_bullets;
pub use collision::{CollisionResult, check_player_death, resolve_bullet_enemy_collisions};
pub use enemies::{advance_enemies, try_spawn};
pub use geometry::{Rect, rects_overlap};
pub use player::step_player;
pub use state::{
    Bounds, Bullet, Enemy, GameEvent, GameMode, GameState, HeldDirections, MAX_PENDING_EVENTS,
    Player, RngState,
};
pub use tick::{TickInput, fire, reset, spawn_enemy, tick, toggle_pause};
