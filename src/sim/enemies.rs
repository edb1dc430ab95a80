//! Enemy spawning and wall-bounce movement

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, Enemy, GameMode};
use crate::heading;
use crate::settings::Settings;

/// Try to place a new enemy away from the player.
///
/// Does nothing unless the game is running and below the enemy cap.
/// Candidate positions are rejection-sampled until the enemy's center is at
/// least `min_spawn_distance` from `player_center`; after
/// `max_spawn_attempts` misses the spawn is skipped.
pub fn try_spawn<R: Rng>(
    rng: &mut R,
    id: u32,
    mode: GameMode,
    live_enemies: usize,
    player_center: Vec2,
    bounds: Bounds,
    settings: &Settings,
) -> Option<Enemy> {
    if mode != GameMode::Running || live_enemies >= settings.max_enemies {
        return None;
    }

    let size = settings.enemy_size;
    let max = bounds.max_pos(size);

    let pos = (0..settings.max_spawn_attempts).find_map(|_| {
        let candidate = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
        let center = candidate + size / 2.0;
        (center.distance(player_center) >= settings.min_spawn_distance).then_some(candidate)
    });

    let Some(pos) = pos else {
        log::debug!(
            "Skipping spawn: no position {} px from player in {}x{} after {} attempts",
            settings.min_spawn_distance,
            bounds.width,
            bounds.height,
            settings.max_spawn_attempts
        );
        return None;
    };

    let angle = rng.random::<f32>() * TAU;
    let speed = settings.enemy_min_speed
        + rng.random::<f32>() * (settings.enemy_max_speed - settings.enemy_min_speed);

    Some(Enemy {
        id,
        pos,
        vel: heading(angle) * speed,
        size,
    })
}

/// Move one enemy, reflecting off any wall it would cross
fn bounce(enemy: &Enemy, bounds: Bounds) -> Enemy {
    let max = bounds.max_pos(enemy.size);
    let mut pos = enemy.pos + enemy.vel;
    let mut vel = enemy.vel;

    if pos.x < 0.0 || pos.x > max.x {
        vel.x = -vel.x;
        pos.x = pos.x.clamp(0.0, max.x);
    }
    if pos.y < 0.0 || pos.y > max.y {
        vel.y = -vel.y;
        pos.y = pos.y.clamp(0.0, max.y);
    }

    Enemy { pos, vel, ..*enemy }
}

/// Move every enemy one tick
pub fn advance_enemies(enemies: &[Enemy], bounds: Bounds) -> Vec<Enemy> {
    enemies.iter().map(|e| bounce(e, bounds)).collect()
}
