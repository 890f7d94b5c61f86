//! Body geometry for collision detection
//!
//! Every entity is approximated by an axis-aligned bounding box. Screen
//! coordinates: x grows to the right, y grows downward, origin top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle identifying a body in the arena
///
/// Handles are allocated monotonically and never recycled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BodyId(pub u32);

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Centre of the bottom edge
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.center().x, self.max.y)
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Overlap test, touching edges count as overlapping
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Whether `x` lies within the horizontal span (inclusive); y is ignored
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }
}

/// Collision shape of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Bounding box of this shape centred at `center`
    pub fn bounds_at(&self, center: Vec2) -> Aabb {
        match *self {
            Shape::Rect { size } => Aabb::from_center(center, size),
            Shape::Circle { radius } => Aabb::from_center(center, Vec2::splat(radius * 2.0)),
        }
    }

    pub fn is_round(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }
}
