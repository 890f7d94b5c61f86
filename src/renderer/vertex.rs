//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA colour, components in 0..=1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    /// Opaque colour from a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Color {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const BACKGROUND: Color = hex(0xD6D1F5);
    pub const BALL: Color = hex(0xFFFFFF);
    pub const PADDLE: Color = hex(0xFFD500);
    pub const COIN: Color = hex(0xFFD700);
    pub const SPARK: Color = hex(0xFF0000);
    pub const TEXT: Color = hex(0x000000);

    pub const BRICK_ONE_HIT: Color = hex(0xC98DAC);
    pub const BRICK_TWO_HITS: Color = hex(0x75425C);
    pub const BRICK_THREE_HITS: Color = hex(0x4A2B46);

    /// Brick colour for its remaining hit count
    pub fn brick(hits: u8) -> Color {
        match hits {
            0 | 1 => BRICK_ONE_HIT,
            2 => BRICK_TWO_HITS,
            _ => BRICK_THREE_HITS,
        }
    }
}
