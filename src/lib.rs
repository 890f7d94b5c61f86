//! Brick Breaker - a single-screen paddle and bricks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `driver`: Single-threaded timer loop that ticks, renders and schedules
//! - `renderer`: Canvas abstraction, in-memory scene and tessellation
//! - `platform`: Key mapping and scripted input sources
//! - `settings`: Tunable game constants

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::Driver;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 610.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Tick interval (ms) between simulation steps
    pub const TICK_INTERVAL_MS: u64 = 50;
    /// Delay (ms) between losing a ball and the next serve
    pub const RESPAWN_DELAY_MS: u64 = 1000;
    /// Lifetime (ms) of a spark burst
    pub const SPARK_LIFETIME_MS: u64 = 200;

    pub const STARTING_LIVES: u8 = 3;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 10.0;
    /// Vertical position of a freshly served ball
    pub const BALL_SERVE_Y: f32 = 310.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = 326.0;
    pub const PADDLE_STEP: f32 = 10.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Horizontal inset of the first column's left edge
    pub const BRICK_GRID_MARGIN: f32 = 5.0;
    /// Row centres paired with starting hit counts, top to bottom
    pub const BRICK_ROWS: [(f32, u8); 3] = [(50.0, 3), (70.0, 2), (90.0, 1)];

    /// Coin defaults
    pub const COIN_SIZE: f32 = 15.0;
    pub const COIN_FALL_SPEED: f32 = 5.0;

    /// Sparks (visual only)
    pub const SPARKS_PER_BURST: usize = 10;
    pub const SPARK_SPREAD: i32 = 10;
    pub const SPARK_SIZE: f32 = 4.0;
}
