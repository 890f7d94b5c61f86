//! Platform abstraction layer
//!
//! Handles the glue between a host and the game:
//! - Key events to game inputs
//! - Scripted input sources for headless runs

use glam::Vec2;

use crate::sim::{Aabb, GamePhase, GameState, InputEvent};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
    Other,
}

impl Key {
    /// Parse a host key name ("Left", "ArrowLeft", "space", ...)
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "space" | " " => Key::Space,
            _ => Key::Other,
        }
    }

    /// Game input bound to this key
    pub fn input(self) -> Option<InputEvent> {
        match self {
            Key::Left => Some(InputEvent::MoveLeft),
            Key::Right => Some(InputEvent::MoveRight),
            Key::Space => Some(InputEvent::Launch),
            Key::Other => None,
        }
    }
}

/// Demo player that serves and keeps the paddle under the ball
///
/// Used by the headless binary; it has no knowledge beyond the current state.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Horizontal slack before the paddle bothers to move
    pub dead_zone: f32,
}

impl Autopilot {
    pub fn new(dead_zone: f32) -> Self {
        Self { dead_zone }
    }

    /// Next key press for the current state, if any
    pub fn next_key(&self, state: &GameState) -> Option<Key> {
        match state.phase {
            GamePhase::Setup => Some(Key::Space),
            GamePhase::Running => {
                let ball_x = state.ball()?.pos.x;
                let paddle_x = state.paddle().pos.x;
                let slack = Aabb::from_center(
                    Vec2::new(paddle_x, 0.0),
                    Vec2::new(2.0 * self.dead_zone, 0.0),
                );
                if slack.spans_x(ball_x) {
                    None
                } else if ball_x < paddle_x {
                    Some(Key::Left)
                } else {
                    Some(Key::Right)
                }
            }
            GamePhase::RoundLost | GamePhase::Won | GamePhase::GameOver => None,
        }
    }
}
