//! Input-driven player motion
//!
//! Held directions accelerate the avatar, releasing them bleeds speed off,
//! and the result is integrated and clamped into the arena each tick.

use super::state::{Bounds, HeldDirections, Player};
use crate::settings::Settings;
use crate::sign;

/// Advance one velocity component.
///
/// With no direction held the component decays by `deceleration` toward
/// zero. Any decay step that would cross zero starts from `|v| < deceleration`,
/// so it lands inside the snap band and is zeroed on the same tick.
fn step_axis(vel: f32, dir: f32, settings: &Settings) -> f32 {
    let mut v = if dir != 0.0 {
        vel + settings.acceleration * dir
    } else {
        vel - settings.deceleration * sign(vel)
    };

    v = v.clamp(-settings.max_speed, settings.max_speed);

    if dir == 0.0 && v.abs() < settings.deceleration {
        v = 0.0;
    }
    v
}

/// Compute the player's next velocity and position
pub fn step_player(
    player: &Player,
    held: HeldDirections,
    settings: &Settings,
    bounds: Bounds,
) -> Player {
    let dir = held.axis();
    let mut vel = player.vel;
    vel.x = step_axis(vel.x, dir.x, settings);
    vel.y = step_axis(vel.y, dir.y, settings);

    let pos = bounds.clamp_box(player.pos + vel, player.size);

    Player { pos, vel, ..*player }
}
