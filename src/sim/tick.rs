//! Fixed timestep simulation tick
//!
//! Each tick threads fresh entity collections through the subsystems in a
//! fixed order: player motion, enemy movement, bullet movement, bullet-enemy
//! resolution, then the player death check.

use glam::Vec2;

use super::bullets::{advance_bullets, fire as spawn_bullet};
use super::collision::{find_lethal_enemy, resolve_bullet_enemy_collisions};
use super::enemies::{advance_enemies, try_spawn};
use super::player::step_player;
use super::state::{GameEvent, GameMode, GameState, HeldDirections, Player};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys currently held
    pub held: HeldDirections,
    /// Fire toward this point (pointer-down position)
    pub fire_at: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Restart the run
    pub reset: bool,
}

/// Flip between Running and Paused. Ignored once the game is over.
pub fn toggle_pause(state: &mut GameState) {
    match state.mode {
        GameMode::Running => {
            state.mode = GameMode::Paused;
            state.push_event(GameEvent::Paused);
            log::info!("Paused at tick {}", state.time_ticks);
        }
        GameMode::Paused => {
            state.mode = GameMode::Running;
            state.push_event(GameEvent::Resumed);
            log::info!("Resumed at tick {}", state.time_ticks);
        }
        GameMode::GameOver => {}
    }
}

/// Start a fresh run: no enemies or bullets, player centered and at rest.
/// Valid from any mode.
pub fn reset(state: &mut GameState) {
    state.enemies.clear();
    state.bullets.clear();
    state.player = Player::centered(state.bounds, state.settings.player_size);
    state.mode = GameMode::Running;
    state.time_ticks = 0;
    state.enemies_destroyed = 0;
    state.push_event(GameEvent::Reset);
    log::info!("Game reset");
}

/// Fire a bullet from the player's center toward `target`.
///
/// Returns `false` without side effects if the game is not running or the
/// target is not a finite point.
pub fn fire(state: &mut GameState, target: Vec2) -> bool {
    if state.mode != GameMode::Running {
        return false;
    }
    if !target.is_finite() {
        log::warn!("Ignoring fire toward non-finite target {:?}", target);
        return false;
    }

    let id = state.next_entity_id();
    match spawn_bullet(id, state.player.center(), target, &state.settings) {
        Some(bullet) => {
            state.bullets.push(bullet);
            state.push_event(GameEvent::BulletFired { id });
            true
        }
        None => false,
    }
}

/// Attempt one enemy spawn. Called by the spawn timer, never by `tick`.
pub fn spawn_enemy(state: &mut GameState) -> bool {
    if state.mode != GameMode::Running || state.enemies.len() >= state.settings.max_enemies {
        return false;
    }

    let id = state.next_entity_id();
    let spawned = try_spawn(
        &mut state.rng,
        id,
        state.mode,
        state.enemies.len(),
        state.player.center(),
        state.bounds,
        &state.settings,
    );

    match spawned {
        Some(enemy) => {
            log::debug!("Enemy {} spawned at {:?}", enemy.id, enemy.pos);
            state.push_event(GameEvent::EnemySpawned {
                id: enemy.id,
                pos: enemy.pos,
            });
            state.enemies.push(enemy);
            true
        }
        None => false,
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.reset {
        reset(state);
    }

    if input.pause {
        toggle_pause(state);
    }

    // Don't tick if paused or game over
    if state.mode != GameMode::Running {
        return;
    }

    if let Some(target) = input.fire_at {
        fire(state, target);
    }

    state.time_ticks += 1;
    let bounds = state.bounds;

    let player = step_player(&state.player, input.held, &state.settings, bounds);
    let enemies = advance_enemies(&state.enemies, bounds);
    let bullets = advance_bullets(&state.bullets, bounds);
    let resolved = resolve_bullet_enemy_collisions(&bullets, &enemies);

    for &(id, bullet_id) in &resolved.hits {
        log::debug!("Enemy {} destroyed by bullet {}", id, bullet_id);
        state.push_event(GameEvent::EnemyDestroyed { id, bullet_id });
    }
    state.enemies_destroyed += resolved.hits.len() as u32;

    let lethal = find_lethal_enemy(&player.rect(), &resolved.enemies, state.settings.death_inset)
        .map(|e| e.id);

    state.player = player;
    state.enemies = resolved.enemies;
    state.bullets = resolved.bullets;

    if let Some(enemy_id) = lethal {
        state.mode = GameMode::GameOver;
        state.push_event(GameEvent::PlayerHit { enemy_id });
        log::info!(
            "Game over at tick {} ({} enemies destroyed)",
            state.time_ticks,
            state.enemies_destroyed
        );
    }
}
