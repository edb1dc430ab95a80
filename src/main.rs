//! Arena Shooter headless runner
//!
//! Drives a session with a simple autopilot and logs how it went. Useful for
//! soak-testing tuning files without a renderer.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info arena-shooter --seconds 60
//! arena-shooter --settings tuning.json --seed 42 --snapshot
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use arena_shooter::sim::{Bounds, GameEvent, GameMode, HeldDirections};
use arena_shooter::{Session, Settings, consts};

#[derive(Parser)]
#[command(name = "arena-shooter")]
#[command(version, about = "Headless arena shooter simulation")]
struct Args {
    /// JSON tuning file (defaults are used for missing fields)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed for the run
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value = "30")]
    seconds: f32,

    /// Arena width in pixels
    #[arg(long, default_value_t = consts::DEFAULT_WIDTH)]
    width: f32,

    /// Arena height in pixels
    #[arg(long, default_value_t = consts::DEFAULT_HEIGHT)]
    height: f32,

    /// Frames between autopilot shots
    #[arg(long, default_value = "12")]
    fire_every: u64,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

/// Steer away from the nearest enemy and aim at it
fn autopilot(session: &Session) -> (HeldDirections, Option<Vec2>) {
    let state = session.state();
    let me = state.player.center();

    let Some(nearest) = state
        .enemies
        .iter()
        .min_by(|a, b| a.center().distance_squared(me).total_cmp(&b.center().distance_squared(me)))
    else {
        return (HeldDirections::empty(), None);
    };

    let away = me - nearest.center();
    let mut held = HeldDirections::empty();
    if away.x > 0.0 {
        held |= HeldDirections::RIGHT;
    } else if away.x < 0.0 {
        held |= HeldDirections::LEFT;
    }
    if away.y > 0.0 {
        held |= HeldDirections::DOWN;
    } else if away.y < 0.0 {
        held |= HeldDirections::UP;
    }

    (held, Some(nearest.center()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let bounds = Bounds::checked(args.width, args.height)
        .with_context(|| format!("invalid arena size {}x{}", args.width, args.height))?;

    let frame_secs = settings.tick_secs;
    let frames = (args.seconds.max(0.0) / frame_secs).ceil() as u64;
    let mut session = Session::new(args.seed, settings, bounds);

    let mut deaths = 0u32;
    let mut kills = 0u32;
    let mut shots = 0u32;

    for frame in 0..frames {
        let (held, aim) = autopilot(&session);
        session.set_held(held);
        if let Some(target) = aim
            && args.fire_every > 0
            && frame % args.fire_every == 0
        {
            session.fire(target);
        }

        session.advance(frame_secs);

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::BulletFired { .. } => shots += 1,
                GameEvent::PlayerHit { enemy_id } => {
                    deaths += 1;
                    log::info!("Caught by enemy {} on frame {}", enemy_id, frame);
                }
                _ => {}
            }
        }

        if session.mode() == GameMode::GameOver {
            session.reset();
        }
    }

    if args.snapshot {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        println!("{json}");
    }

    session.shutdown();
    log::info!(
        "Ran {} frames: {} shots, {} kills, {} deaths",
        frames,
        shots,
        kills,
        deaths
    );
    Ok(())
}
