//! Game settings
//!
//! Tunable timings, speeds and seed. Loaded from an optional JSON file;
//! missing fields fall back to their defaults. The playfield size, brick grid
//! and starting lives are fixed in `consts` and cannot be overridden.

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // === Timing (ms) ===
    pub tick_interval_ms: u64,
    pub respawn_delay_ms: u64,
    pub spark_lifetime_ms: u64,

    // === Gameplay ===
    /// Paddle travel per move input
    pub paddle_step: f32,
    /// Ball travel per tick
    pub ball_speed: f32,
    /// Coin fall per tick
    pub coin_fall_speed: f32,

    /// Seed for spark bursts
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            spark_lifetime_ms: SPARK_LIFETIME_MS,

            paddle_step: PADDLE_STEP,
            ball_speed: BALL_SPEED,
            coin_fall_speed: COIN_FALL_SPEED,

            seed: 0,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if self.ball_speed <= 0.0 || self.coin_fall_speed <= 0.0 || self.paddle_step <= 0.0 {
            bail!("ball_speed, coin_fall_speed and paddle_step must be positive");
        }
        Ok(())
    }
}
