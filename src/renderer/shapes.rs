//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::Canvas;
use super::scene::{PrimitiveKind, Scene};
use super::vertex::{Color, Vertex};
use crate::sim::Aabb;

/// Segments used for ovals; enough for the small sizes in play
pub const OVAL_SEGMENTS: u32 = 24;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(bounds: &Aabb, color: Color) -> Vec<Vertex> {
    let (min, max) = (bounds.min, bounds.max);
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled ellipse inscribed in `bounds`
pub fn ellipse(bounds: &Aabb, color: Color, segments: u32) -> Vec<Vertex> {
    let center = bounds.center();
    let radii: Vec2 = bounds.size() * 0.5;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Triangulate a whole scene, background first, in draw order
///
/// Text items are skipped; glyphs belong to the platform's font renderer.
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let surface = Aabb::new(Vec2::ZERO, Vec2::new(scene.width(), scene.height()));
    let mut vertices = rect(&surface, scene.background);

    for (_, primitive) in scene.iter() {
        match primitive.kind {
            PrimitiveKind::Rectangle => vertices.extend(rect(&primitive.bounds, primitive.fill)),
            PrimitiveKind::Oval => {
                vertices.extend(ellipse(&primitive.bounds, primitive.fill, OVAL_SEGMENTS))
            }
            PrimitiveKind::Text { .. } => {}
        }
    }

    vertices
}
