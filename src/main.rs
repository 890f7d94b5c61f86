//! Brick Breaker entry point
//!
//! Runs a headless demo game: the autopilot plays against an in-memory
//! canvas until the game ends or the time cap passes.

use anyhow::Result;

use brick_breaker::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use brick_breaker::platform::Autopilot;
use brick_breaker::renderer::{Scene, shapes};
use brick_breaker::{Driver, Settings};

/// Env var naming an optional JSON settings file
const SETTINGS_ENV: &str = "BRICK_BREAKER_SETTINGS";
/// Give up after ten simulated minutes
const MAX_RUN_MS: u64 = 10 * 60 * 1000;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let settings = match std::env::var_os(SETTINGS_ENV) {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };

    let canvas = Scene::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
    let frame_ms = settings.tick_interval_ms;
    let mut driver = Driver::new(settings, canvas);
    let pilot = Autopilot::new(10.0);

    while !driver.is_finished() && driver.now_ms() < MAX_RUN_MS {
        if let Some(input) = pilot.next_key(driver.state()).and_then(|k| k.input()) {
            driver.handle_input(input);
        }
        driver.advance(frame_ms);
    }

    let state = driver.state();
    let vertices = shapes::tessellate(driver.canvas());
    let frame_bytes: &[u8] = bytemuck::cast_slice(&vertices);
    log::info!(
        "Finished in {:?} at {} ms: score={} lives={} bricks left={}",
        state.phase,
        driver.now_ms(),
        state.score,
        state.lives,
        state.brick_count()
    );
    log::info!(
        "Last frame: {} primitives, {} vertices ({} bytes)",
        driver.canvas().len(),
        vertices.len(),
        frame_bytes.len()
    );
    Ok(())
}
