//! Rock Breaker headless runner
//!
//! Plays a scripted autopilot session against the simulation core and logs the
//! outcome. Usage: `rock-breaker [config.json]`, verbosity via `RUST_LOG`.

use std::process::ExitCode;

use rock_breaker::sim::{EntityType, GameEvent, GameManager, PointerButton, VectorExt};
use rock_breaker::{GameConfig, SimError};

/// Fixed step for the scripted session
const DT: f32 = 1.0 / 60.0;
/// Ten simulated minutes
const MAX_TICKS: u32 = 60 * 60 * 10;

fn load_config() -> Result<GameConfig, SimError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| SimError::InvalidConfig {
                field: "path",
                reason: format!("{path}: {e}"),
            })?;
            GameConfig::from_json_str(&json)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Aim at the nearest asteroid and fire whenever the weapon is ready
fn autopilot(game: &mut GameManager) {
    let Some(ship_pos) = game.ship().map(|s| s.position) else {
        return;
    };
    let nearest = game
        .world()
        .entities_of(EntityType::Asteroid)
        .min_by(|a, b| {
            a.position
                .distance_to(ship_pos)
                .total_cmp(&b.position.distance_to(ship_pos))
        })
        .map(|a| a.position);

    if let Some(target) = nearest {
        game.update_mouse_position(target);
        if game.can_fire() {
            game.handle_pointer_down(PointerButton::Left, target);
        }
    }
}

fn run() -> Result<(), SimError> {
    let config = load_config()?;
    let mut game = GameManager::new(config)?;
    game.start_new_game()?;

    let mut shots = 0u32;
    let mut kills = 0u32;
    for tick in 0..MAX_TICKS {
        if game.is_game_over() {
            break;
        }
        if game.ship().is_none() {
            game.restart_level()?;
        }

        autopilot(&mut game);
        game.update(DT)?;

        for event in game.drain_events() {
            match event {
                GameEvent::BulletFired { .. } => shots += 1,
                GameEvent::AsteroidDestroyed { .. } => kills += 1,
                GameEvent::LevelStarted { level, asteroids } => {
                    log::info!("t={:.1}s level {} ({} asteroids)", tick as f32 * DT, level, asteroids)
                }
                GameEvent::ShipDestroyed { .. } => {
                    log::info!("t={:.1}s ship lost, {} lives left", tick as f32 * DT, game.lives())
                }
                GameEvent::GameOver { .. } => {}
            }
        }
    }

    log::info!(
        "Session finished: score {}, level {}, lives {}, {} shots, {} kills",
        game.score(),
        game.level(),
        game.lives(),
        shots,
        kills
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
