//! Collision resolution between bullets, enemies, and the player

use super::geometry::{Rect, rects_overlap};
use super::state::{Bullet, Enemy};

/// Survivors of a bullet-vs-enemy pass
#[derive(Debug, Clone, Default)]
pub struct CollisionResult {
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// `(enemy_id, bullet_id)` for every enemy destroyed this pass
    pub hits: Vec<(u32, u32)>,
}

/// Remove every enemy that overlaps a bullet, consuming one bullet per enemy.
///
/// Each enemy scans the bullets still alive, newest first, and takes the
/// first one it overlaps. A bullet spent on one enemy cannot destroy another.
pub fn resolve_bullet_enemy_collisions(bullets: &[Bullet], enemies: &[Enemy]) -> CollisionResult {
    let mut bullets = bullets.to_vec();
    let mut survivors = Vec::with_capacity(enemies.len());
    let mut hits = Vec::new();

    for enemy in enemies {
        let enemy_rect = enemy.rect();
        let hit = bullets
            .iter()
            .rposition(|b| rects_overlap(&b.rect(), &enemy_rect));

        match hit {
            Some(idx) => {
                let bullet = bullets.remove(idx);
                hits.push((enemy.id, bullet.id));
            }
            None => survivors.push(*enemy),
        }
    }

    CollisionResult {
        bullets,
        enemies: survivors,
        hits,
    }
}

/// First enemy whose inset hitbox overlaps the player, if any.
///
/// The inset makes lethal contact stricter than a bounding-box touch. An
/// enemy no larger than twice the inset has no hitbox left and is harmless.
pub fn find_lethal_enemy<'a>(player: &Rect, enemies: &'a [Enemy], inset: f32) -> Option<&'a Enemy> {
    enemies
        .iter()
        .find(|e| rects_overlap(player, &e.rect().inset(inset)))
}

/// True if any enemy has caught the player this tick
pub fn check_player_death(player: &Rect, enemies: &[Enemy], inset: f32) -> bool {
    find_lethal_enemy(player, enemies, inset).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bullet(id: u32, x: f32, y: f32) -> Bullet {
        Bullet {
            id,
            pos: Vec2::new(x, y),
            dir: Vec2::X,
            speed: 10.0,
            size: Vec2::splat(7.0),
        }
    }

    fn enemy(id: u32, x: f32, y: f32, size: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::new(1.0, 0.0),
            size: Vec2::splat(size),
        }
    }

    #[test]
    fn test_single_hit_removes_pair_only() {
        let bullets = vec![bullet(1, 500.0, 500.0), bullet(2, 10.0, 10.0), bullet(3, 900.0, 10.0)];
        let enemies = vec![
            enemy(10, 200.0, 200.0, 100.0),
            enemy(11, 10.0, 10.0, 7.0),
            enemy(12, 600.0, 600.0, 100.0),
        ];

        let result = resolve_bullet_enemy_collisions(&bullets, &enemies);

        assert_eq!(result.hits, vec![(11, 2)]);
        let bullet_ids: Vec<u32> = result.bullets.iter().map(|b| b.id).collect();
        assert_eq!(bullet_ids, vec![1, 3]);
        let enemy_ids: Vec<u32> = result.enemies.iter().map(|e| e.id).collect();
        assert_eq!(enemy_ids, vec![10, 12]);
    }

    #[test]
    fn test_enemy_consumes_newest_bullet_only() {
        let bullets = vec![bullet(1, 20.0, 20.0), bullet(2, 30.0, 30.0), bullet(3, 40.0, 40.0)];
        let enemies = vec![enemy(10, 0.0, 0.0, 100.0)];

        let result = resolve_bullet_enemy_collisions(&bullets, &enemies);

        assert_eq!(result.hits, vec![(10, 3)]);
        let bullet_ids: Vec<u32> = result.bullets.iter().map(|b| b.id).collect();
        assert_eq!(bullet_ids, vec![1, 2]);
        assert!(result.enemies.is_empty());
    }

    #[test]
    fn test_one_bullet_cannot_kill_two_enemies() {
        // Two overlapping enemies, one bullet inside both
        let bullets = vec![bullet(1, 60.0, 60.0)];
        let enemies = vec![enemy(10, 0.0, 0.0, 100.0), enemy(11, 50.0, 50.0, 100.0)];

        let result = resolve_bullet_enemy_collisions(&bullets, &enemies);

        assert_eq!(result.hits, vec![(10, 1)]);
        assert!(result.bullets.is_empty());
        assert_eq!(result.enemies.len(), 1);
        assert_eq!(result.enemies[0].id, 11);
    }

    #[test]
    fn test_empty_inputs() {
        let result = resolve_bullet_enemy_collisions(&[], &[]);
        assert!(result.bullets.is_empty() && result.enemies.is_empty() && result.hits.is_empty());

        let result = resolve_bullet_enemy_collisions(&[bullet(1, 0.0, 0.0)], &[]);
        assert_eq!(result.bullets.len(), 1);
    }

    #[test]
    fn test_player_death_with_inset() {
        let player = Rect::new(100.0, 100.0, 100.0, 100.0);

        // Fully on top of the player
        assert!(check_player_death(&player, &[enemy(1, 100.0, 100.0, 100.0)], 35.0));

        // Bounding boxes overlap by 30 px, which the 35 px margin forgives
        assert!(!check_player_death(&player, &[enemy(1, 170.0, 100.0, 100.0)], 35.0));

        // Overlap of 40 px gets past the margin
        assert!(check_player_death(&player, &[enemy(1, 160.0, 100.0, 100.0)], 35.0));
    }

    #[test]
    fn test_small_enemy_is_harmless() {
        let player = Rect::new(100.0, 100.0, 100.0, 100.0);
        let small = enemy(1, 120.0, 120.0, 60.0);
        assert!(!check_player_death(&player, &[small], 35.0));

        // Exactly twice the inset leaves a zero-area hitbox
        let edge = enemy(2, 120.0, 120.0, 70.0);
        assert!(!check_player_death(&player, &[edge], 35.0));
    }

    #[test]
    fn test_lethal_enemy_reported() {
        let player = Rect::new(0.0, 0.0, 100.0, 100.0);
        let enemies = [enemy(1, 900.0, 900.0, 100.0), enemy(2, 0.0, 0.0, 100.0)];
        let lethal = find_lethal_enemy(&player, &enemies, 35.0).map(|e| e.id);
        assert_eq!(lethal, Some(2));
        assert!(!check_player_death(&player, &[], 35.0));
    }
}
