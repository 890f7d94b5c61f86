//! Game entities: ball, paddle, bricks and coins
//!
//! Each entity owns its centre and a collision shape. Behaviour common to
//! all kinds is dispatched through the closed [`Entity`] enum.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, BodyId, Shape};
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading, each component is +1 or -1
    pub direction: Vec2,
    /// Distance travelled per tick, `None` once the round is over
    pub speed: Option<f32>,
}

impl Ball {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            radius: BALL_RADIUS,
            direction: Vec2::new(1.0, -1.0),
            speed: Some(speed),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Shape::Circle {
            radius: self.radius,
        }
        .bounds_at(self.pos)
    }

    pub fn is_stopped(&self) -> bool {
        self.speed.is_none()
    }

    pub fn stop(&mut self) {
        self.speed = None;
    }

    /// Reflect off the side and top walls, then advance one step
    ///
    /// The reflection test runs before the move, so the ball may sink past a
    /// wall for one tick before turning around.
    pub fn update(&mut self, width: f32) {
        let Some(speed) = self.speed else {
            return;
        };
        let bounds = self.bounds();
        if bounds.left() <= 0.0 || bounds.right() >= width {
            self.direction.x *= -1.0;
        }
        if bounds.top() <= 0.0 {
            self.direction.y *= -1.0;
        }
        self.pos += self.direction * speed;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Ball resting on the paddle before launch (not owned)
    pub held_ball: Option<BodyId>,
}

impl Paddle {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            held_ball: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Shift horizontally by `offset`
    ///
    /// The whole move is rejected if the paddle would leave `[0, width]`.
    /// Returns whether the paddle moved.
    pub fn move_by(&mut self, offset: f32, width: f32) -> bool {
        let moved = self.bounds().translate(Vec2::new(offset, 0.0));
        if moved.left() >= 0.0 && moved.right() <= width {
            self.pos.x += offset;
            true
        } else {
            false
        }
    }
}

/// Outcome of a single brick hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    Damaged { remaining: u8 },
    Destroyed,
}

/// A breakable brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub size: Vec2,
    pub hits: u8,
    /// Grid slot (column, row)
    pub slot: (u32, u32),
}

impl Brick {
    pub fn new(pos: Vec2, hits: u8, slot: (u32, u32)) -> Self {
        Self {
            pos,
            size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            hits,
            slot,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Take one hit
    ///
    /// # Panics
    /// If the brick has no hits left; a destroyed brick must never be hit.
    pub fn hit(&mut self) -> BrickHit {
        assert!(self.hits > 0, "hit on a destroyed brick at {:?}", self.slot);
        self.hits -= 1;
        if self.hits == 0 {
            BrickHit::Destroyed
        } else {
            BrickHit::Damaged {
                remaining: self.hits,
            }
        }
    }
}

/// Result of advancing a coin one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinStep {
    Falling,
    /// Bottom edge passed the playfield floor
    Fell,
}

/// A falling coin dropped by a destroyed brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: f32,
    pub fall_speed: f32,
}

impl Coin {
    pub fn new(pos: Vec2, fall_speed: f32) -> Self {
        Self {
            pos,
            size: COIN_SIZE,
            fall_speed,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Shape::Circle {
            radius: self.size / 2.0,
        }
        .bounds_at(self.pos)
    }

    pub fn update(&mut self, height: f32) -> CoinStep {
        self.pos.y += self.fall_speed;
        if self.bounds().bottom() > height {
            CoinStep::Fell
        } else {
            CoinStep::Falling
        }
    }
}

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
    Coin,
}

/// Any entity living in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Ball(Ball),
    Paddle(Paddle),
    Brick(Brick),
    Coin(Coin),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ball(_) => EntityKind::Ball,
            Entity::Paddle(_) => EntityKind::Paddle,
            Entity::Brick(_) => EntityKind::Brick,
            Entity::Coin(_) => EntityKind::Coin,
        }
    }

    pub fn center(&self) -> Vec2 {
        match self {
            Entity::Ball(b) => b.pos,
            Entity::Paddle(p) => p.pos,
            Entity::Brick(b) => b.pos,
            Entity::Coin(c) => c.pos,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Entity::Ball(b) => Shape::Circle { radius: b.radius },
            Entity::Paddle(p) => Shape::Rect { size: p.size },
            Entity::Brick(b) => Shape::Rect { size: b.size },
            Entity::Coin(c) => Shape::Circle {
                radius: c.size / 2.0,
            },
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.shape().bounds_at(self.center())
    }

    /// Move without any bounds checks
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Entity::Ball(b) => b.pos += delta,
            Entity::Paddle(p) => p.pos += delta,
            Entity::Brick(b) => b.pos += delta,
            Entity::Coin(c) => c.pos += delta,
        }
    }

    /// Whether the ball bounces off this entity
    pub fn is_collidable(&self) -> bool {
        matches!(self, Entity::Paddle(_) | Entity::Brick(_))
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            Entity::Ball(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match self {
            Entity::Paddle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_brick(&self) -> Option<&Brick> {
        match self {
            Entity::Brick(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_brick_mut(&mut self) -> Option<&mut Brick> {
        match self {
            Entity::Brick(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_coin(&self) -> Option<&Coin> {
        match self {
            Entity::Coin(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_coin_mut(&mut self) -> Option<&mut Coin> {
        match self {
            Entity::Coin(c) => Some(c),
            _ => None,
        }
    }
}
