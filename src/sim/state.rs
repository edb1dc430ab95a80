//! Game state and core simulation types
//!
//! Everything the renderer reads and every subsystem threads forward lives here.

use std::collections::VecDeque;

use bitflags::bitflags;
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::settings::Settings;

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Active gameplay
    #[default]
    Running,
    /// Frozen until the pause toggle is pressed again
    Paused,
    /// Player was caught; frozen until reset
    GameOver,
}

bitflags! {
    /// Movement keys currently held by the player
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
    pub struct HeldDirections: u8 {
        const UP = 0b0001;
        const DOWN = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl HeldDirections {
    /// Net direction per axis in {-1, 0, 1}. Screen space, so UP is -y.
    pub fn axis(self) -> Vec2 {
        let x = self.contains(Self::RIGHT) as i8 - self.contains(Self::LEFT) as i8;
        let y = self.contains(Self::DOWN) as i8 - self.contains(Self::UP) as i8;
        Vec2::new(x as f32, y as f32)
    }
}

/// Playable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `None` for non-finite or non-positive dimensions
    pub fn checked(width: f32, height: f32) -> Option<Self> {
        (width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0)
            .then_some(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Largest top-left position a box of `size` can take and stay inside.
    /// Floors at zero when the box is larger than the arena.
    #[inline]
    pub fn max_pos(&self, size: Vec2) -> Vec2 {
        (self.size() - size).max(Vec2::ZERO)
    }

    /// Clamp a box's top-left position so the box stays inside
    #[inline]
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_pos(size))
    }

    /// True if a point lies inside the arena, edges included
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: Vec2,
}

impl Player {
    /// A stationary player centered in `bounds`
    pub fn centered(bounds: Bounds, size: Vec2) -> Self {
        Self {
            pos: bounds.clamp_box(bounds.center() - size / 2.0, size),
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A bouncing enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Enemy {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A projectile travelling in a straight line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction
    pub dir: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub size: Vec2,
}

impl Bullet {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyDestroyed { id: u32, bullet_id: u32 },
    BulletFired { id: u32 },
    PlayerHit { enemy_id: u32 },
    Paused,
    Resumed,
    Reset,
}

/// Most events held for the host before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    pub rng: Pcg32,
    pub settings: Settings,
    pub bounds: Bounds,
    pub mode: GameMode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Simulation ticks advanced while running
    pub time_ticks: u64,
    pub enemies_destroyed: u32,
    /// Events since the last drain, capped at [`MAX_PENDING_EVENTS`]
    events: VecDeque<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64, settings: Settings, bounds: Bounds) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let player = Player::centered(bounds, settings.player_size);
        Self {
            rng_state,
            rng,
            settings,
            bounds,
            mode: GameMode::Running,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            time_ticks: 0,
            enemies_destroyed: 0,
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Apply a resize notification. Invalid dimensions are ignored; the
    /// player is re-clamped by the next tick's motion step.
    pub fn resize(&mut self, width: f32, height: f32) {
        match Bounds::checked(width, height) {
            Some(bounds) => {
                log::debug!("Bounds resized to {}x{}", width, height);
                self.bounds = bounds;
            }
            None => log::warn!("Ignoring invalid resize {}x{}", width, height),
        }
    }

    /// Record an event for the host. Hosts that never drain only lose the
    /// oldest entries.
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events recorded since the last drain, oldest first
    pub fn pending_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(1, Settings::default(), Bounds::new(1280.0, 720.0))
    }

    #[test]
    fn test_held_directions_axis() {
        assert_eq!(HeldDirections::empty().axis(), Vec2::ZERO);
        assert_eq!(HeldDirections::RIGHT.axis(), Vec2::new(1.0, 0.0));
        assert_eq!(
            (HeldDirections::UP | HeldDirections::LEFT).axis(),
            Vec2::new(-1.0, -1.0)
        );
        // Opposing keys cancel
        assert_eq!(
            (HeldDirections::LEFT | HeldDirections::RIGHT | HeldDirections::DOWN).axis(),
            Vec2::new(0.0, 1.0)
        );
    }

    #[test]
    fn test_player_centered() {
        let player = Player::centered(Bounds::new(1000.0, 800.0), Vec2::splat(100.0));
        assert_eq!(player.pos, Vec2::new(450.0, 350.0));
        assert_eq!(player.center(), Vec2::new(500.0, 400.0));
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_box_in_tiny_arena() {
        let bounds = Bounds::new(50.0, 50.0);
        let pos = bounds.clamp_box(Vec2::new(30.0, -10.0), Vec2::splat(100.0));
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_bounds_checked() {
        assert!(Bounds::checked(800.0, 600.0).is_some());
        assert!(Bounds::checked(0.0, 600.0).is_none());
        assert!(Bounds::checked(f32::NAN, 600.0).is_none());
        assert!(Bounds::checked(800.0, f32::INFINITY).is_none());
    }

    #[test]
    fn test_resize_ignores_invalid() {
        let mut state = new_state();
        let before = state.bounds;
        state.resize(-5.0, 100.0);
        assert_eq!(state.bounds, before);
        state.resize(640.0, 480.0);
        assert_eq!(state.bounds, Bounds::new(640.0, 480.0));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = new_state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_event_queue_drops_oldest_when_full() {
        let mut state = new_state();
        for id in 0..(MAX_PENDING_EVENTS as u32 + 10) {
            state.push_event(GameEvent::BulletFired { id });
        }
        assert_eq!(state.pending_events().count(), MAX_PENDING_EVENTS);
        assert_eq!(
            state.pending_events().next(),
            Some(&GameEvent::BulletFired { id: 10 })
        );

        let drained = state.drain_events();
        assert_eq!(drained.len(), MAX_PENDING_EVENTS);
        assert_eq!(state.pending_events().count(), 0);
    }
}
