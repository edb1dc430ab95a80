//! Bullet lifecycle: spawn on fire, straight-line travel, off-screen culling

use glam::Vec2;

use super::state::{Bounds, Bullet};
use crate::heading;
use crate::settings::Settings;

/// Create a bullet leaving `origin` (the shooter's center) toward `target`.
///
/// Returns `None` if either point is non-finite, so NaN never reaches
/// simulation state. A target equal to the origin fires along +x.
pub fn fire(id: u32, origin: Vec2, target: Vec2, settings: &Settings) -> Option<Bullet> {
    if !origin.is_finite() || !target.is_finite() {
        return None;
    }

    let delta = target - origin;
    let dir = heading(delta.y.atan2(delta.x));

    Some(Bullet {
        id,
        pos: origin - settings.bullet_size / 2.0,
        dir,
        speed: settings.bullet_speed,
        size: settings.bullet_size,
    })
}

/// Move every bullet one tick and drop those that left the arena.
/// Survivors keep their relative order.
pub fn advance_bullets(bullets: &[Bullet], bounds: Bounds) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            pos: b.pos + b.dir * b.speed,
            ..*b
        })
        .filter(|b| bounds.contains_point(b.pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_toward_right() {
        let settings = Settings::default();
        let bullet = fire(1, Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), &settings)
            .expect("finite target");
        assert_eq!(bullet.dir, Vec2::new(1.0, 0.0));
        assert_eq!(bullet.pos, Vec2::new(96.5, 96.5));
        assert_eq!(bullet.speed, 10.0);

        let bounds = Bounds::new(1000.0, 1000.0);
        let mut bullets = vec![bullet];
        for _ in 0..5 {
            bullets = advance_bullets(&bullets, bounds);
        }
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pos.x, 100.0 - 3.5 + 50.0);
        assert_eq!(bullets[0].pos.y, 96.5);
    }

    #[test]
    fn test_fire_direction_is_unit() {
        let settings = Settings::default();
        let bullet = fire(1, Vec2::new(10.0, 10.0), Vec2::new(-30.0, 40.0), &settings)
            .expect("finite target");
        assert!((bullet.dir.length() - 1.0).abs() < 1e-6);
        assert!(bullet.dir.x < 0.0 && bullet.dir.y > 0.0);
    }

    #[test]
    fn test_fire_rejects_nan_target() {
        let settings = Settings::default();
        assert!(fire(1, Vec2::new(10.0, 10.0), Vec2::new(f32::NAN, 0.0), &settings).is_none());
        assert!(fire(1, Vec2::new(10.0, 10.0), Vec2::new(0.0, f32::INFINITY), &settings).is_none());
    }

    #[test]
    fn test_target_outside_arena_is_valid() {
        let settings = Settings::default();
        let bullet = fire(1, Vec2::new(10.0, 10.0), Vec2::new(5000.0, -5000.0), &settings);
        assert!(bullet.is_some());
    }

    #[test]
    fn test_offscreen_bullets_culled_in_order() {
        let bounds = Bounds::new(100.0, 100.0);
        let make = |id, x: f32, dir: Vec2| Bullet {
            id,
            pos: Vec2::new(x, 50.0),
            dir,
            speed: 10.0,
            size: Vec2::splat(7.0),
        };
        let bullets = vec![
            make(1, 50.0, Vec2::X),
            make(2, 95.0, Vec2::X),
            make(3, 5.0, Vec2::NEG_X),
            make(4, 20.0, Vec2::NEG_X),
            make(5, 90.0, Vec2::X),
        ];

        let survivors = advance_bullets(&bullets, bounds);
        let ids: Vec<u32> = survivors.iter().map(|b| b.id).collect();
        // Landing exactly on the edge still counts as inside
        assert_eq!(ids, vec![1, 4, 5]);
        assert!(survivors.iter().all(|b| bounds.contains_point(b.pos)));
    }

    #[test]
    fn test_empty_advance() {
        assert!(advance_bullets(&[], Bounds::new(10.0, 10.0)).is_empty());
    }
}
