//! Collision response for the ball and coin capture
//!
//! Bouncing is a discrete choice rather than a true reflection: the ball's
//! heading is either flipped vertically or forced left/right depending on
//! where its centre lies relative to the box it struck.

use glam::Vec2;

use super::body::Aabb;

/// How the ball's heading changes after a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    /// Nothing touched
    None,
    FlipVertical,
    /// Force the horizontal heading to +1
    Right,
    /// Force the horizontal heading to -1
    Left,
}

impl Bounce {
    pub fn apply(self, direction: &mut Vec2) {
        match self {
            Bounce::None => {}
            Bounce::FlipVertical => direction.y *= -1.0,
            Bounce::Right => direction.x = 1.0,
            Bounce::Left => direction.x = -1.0,
        }
    }
}

/// Response to striking a single box
///
/// A ball centred past the box's right edge is sent right, past the left
/// edge is sent left, otherwise it bounces vertically.
pub fn bounce_off(ball_center_x: f32, target: &Aabb) -> Bounce {
    if ball_center_x > target.right() {
        Bounce::Right
    } else if ball_center_x < target.left() {
        Bounce::Left
    } else {
        Bounce::FlipVertical
    }
}

/// Response to the full set of boxes overlapping the ball this tick
///
/// Touching two or more boxes at once (wedged between bricks, or brick and
/// paddle) only flips the vertical heading.
pub fn resolve_bounce(ball_center_x: f32, touching: &[Aabb]) -> Bounce {
    match touching {
        [] => Bounce::None,
        [single] => bounce_off(ball_center_x, single),
        _ => Bounce::FlipVertical,
    }
}

/// Whether the paddle catches a coin
///
/// Requires horizontal overlap and the paddle's top edge above the coin's
/// bottom edge. The coin's top edge is never compared with the paddle's
/// bottom, so a coin that has already slipped below the paddle still counts.
pub fn coin_caught(paddle: &Aabb, coin: &Aabb) -> bool {
    paddle.left() < coin.right() && paddle.right() > coin.left() && paddle.top() < coin.bottom()
}
