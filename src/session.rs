//! Running game session
//!
//! Owns the game state together with the two clocks that drive it: a
//! fixed-step frame loop and the enemy spawn timer. Both are acquired when
//! the session starts and released together on [`Session::shutdown`] or drop,
//! after which nothing mutates the state.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{
    self, Bounds, Bullet, Enemy, GameEvent, GameMode, GameState, HeldDirections, Player,
    TickInput,
};

/// Longest frame delta accepted, in seconds
const MAX_FRAME_SECS: f32 = 0.1;

/// Fixed-step tick scheduler
#[derive(Debug, Clone)]
struct FrameLoop {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

/// Fixed-interval spawn scheduler
#[derive(Debug, Clone)]
struct SpawnTimer {
    interval: f32,
    elapsed: f32,
}

/// Read-only view of the world for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub player: Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub mode: GameMode,
    pub bounds: Bounds,
    pub enemies_destroyed: u32,
}

/// A game plus the clocks advancing it
#[derive(Debug)]
pub struct Session {
    state: GameState,
    held: HeldDirections,
    frame: Option<FrameLoop>,
    spawner: Option<SpawnTimer>,
}

impl Session {
    /// Start a session around a fresh game
    pub fn new(seed: u64, settings: Settings, bounds: Bounds) -> Self {
        Self::from_state(GameState::new(seed, settings, bounds))
    }

    /// Start a session around an existing game state
    pub fn from_state(state: GameState) -> Self {
        let frame = FrameLoop {
            step: state.settings.tick_secs,
            max_substeps: state.settings.max_substeps,
            accumulator: 0.0,
        };
        let spawner = SpawnTimer {
            interval: state.settings.spawn_interval_secs,
            elapsed: 0.0,
        };
        log::info!(
            "Session started (seed {}, {}x{})",
            state.rng_state.seed,
            state.bounds.width,
            state.bounds.height
        );
        Self {
            state,
            held: HeldDirections::empty(),
            frame: Some(frame),
            spawner: Some(spawner),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    /// True until the session is shut down
    pub fn is_active(&self) -> bool {
        self.frame.is_some() && self.spawner.is_some()
    }

    /// Current renderer view
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: self.state.player,
            enemies: &self.state.enemies,
            bullets: &self.state.bullets,
            mode: self.state.mode,
            bounds: self.state.bounds,
            enemies_destroyed: self.state.enemies_destroyed,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Replace the set of held movement keys
    pub fn set_held(&mut self, held: HeldDirections) {
        self.held = held;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Fire toward a pointer position. Returns `true` if a bullet was spawned.
    pub fn fire(&mut self, target: Vec2) -> bool {
        self.is_active() && sim::fire(&mut self.state, target)
    }

    pub fn toggle_pause(&mut self) {
        if self.is_active() {
            sim::toggle_pause(&mut self.state);
        }
    }

    pub fn reset(&mut self) {
        if self.is_active() {
            sim::reset(&mut self.state);
        }
    }

    /// Advance wall-clock time by `dt` seconds.
    ///
    /// Runs every tick and spawn that falls due within `dt`, in time order,
    /// each to completion before the next. Ticks and spawns per call are each
    /// capped at `max_substeps`. Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let (Some(frame), Some(spawner)) = (self.frame.as_mut(), self.spawner.as_mut()) else {
            return 0;
        };

        let mut remaining = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_SECS)
        } else {
            0.0
        };
        let input = TickInput {
            held: self.held,
            ..Default::default()
        };
        let mut substeps = 0;
        let mut spawns = 0;

        loop {
            let until_tick = (frame.step - frame.accumulator).max(0.0);
            let until_spawn = (spawner.interval - spawner.elapsed).max(0.0);
            let tick_due = substeps < frame.max_substeps && until_tick <= remaining;
            let spawn_due = spawns < frame.max_substeps && until_spawn <= remaining;

            match (tick_due, spawn_due) {
                (false, false) => {
                    frame.accumulator += remaining;
                    spawner.elapsed += remaining;
                    break;
                }
                // Ties go to the tick
                (true, _) if !spawn_due || until_tick <= until_spawn => {
                    remaining -= until_tick;
                    spawner.elapsed += until_tick;
                    frame.accumulator = 0.0;
                    sim::tick(&mut self.state, &input);
                    substeps += 1;
                }
                _ => {
                    remaining -= until_spawn;
                    frame.accumulator += until_spawn;
                    spawner.elapsed = 0.0;
                    sim::spawn_enemy(&mut self.state);
                    spawns += 1;
                }
            }
        }

        substeps
    }

    /// Cancel the frame loop and spawn timer together
    pub fn shutdown(&mut self) {
        let frame = self.frame.take();
        let spawner = self.spawner.take();
        if frame.is_some() || spawner.is_some() {
            log::info!(
                "Session stopped after {} ticks ({} enemies destroyed)",
                self.state.time_ticks,
                self.state.enemies_destroyed
            );
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
