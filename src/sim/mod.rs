//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (by body handle)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use body::{Aabb, BodyId, Shape};
pub use collision::{Bounce, bounce_off, coin_caught, resolve_bounce};
pub use entity::{Ball, Brick, BrickHit, Coin, CoinStep, Entity, EntityKind, Paddle};
pub use state::{GameEvent, GamePhase, GameState, Spark};
pub use tick::{InputEvent, apply_input, tick};
