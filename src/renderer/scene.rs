//! In-memory retained canvas

use std::collections::BTreeMap;

use glam::Vec2;

use super::vertex::{Color, colors};
use super::{Canvas, PrimitiveId};
use crate::sim::Aabb;

/// What a primitive draws
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveKind {
    Rectangle,
    Oval,
    Text { content: String, size: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Text items use a zero-size box at their anchor
    pub bounds: Aabb,
    pub fill: Color,
    pub tag: Option<&'static str>,
}

/// Canvas that keeps every primitive in memory
///
/// Primitives are stored in creation order, which is also draw order.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f32,
    height: f32,
    pub background: Color,
    primitives: BTreeMap<PrimitiveId, Primitive>,
    next_id: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: colors::BACKGROUND,
            primitives: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(&id)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in draw order
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> {
        self.primitives.iter().map(|(id, p)| (*id, p))
    }

    pub fn find_with_tag(&self, tag: &str) -> Vec<PrimitiveId> {
        self.iter()
            .filter(|(_, p)| p.tag == Some(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// Contents of every text item, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.primitives
            .values()
            .filter_map(|p| match &p.kind {
                PrimitiveKind::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn add(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, primitive);
        id
    }
}

impl Canvas for Scene {
    fn create_rectangle(
        &mut self,
        bounds: Aabb,
        fill: Color,
        tag: Option<&'static str>,
    ) -> PrimitiveId {
        self.add(Primitive {
            kind: PrimitiveKind::Rectangle,
            bounds,
            fill,
            tag,
        })
    }

    fn create_oval(&mut self, bounds: Aabb, fill: Color, tag: Option<&'static str>) -> PrimitiveId {
        self.add(Primitive {
            kind: PrimitiveKind::Oval,
            bounds,
            fill,
            tag,
        })
    }

    fn create_text(
        &mut self,
        anchor: Vec2,
        text: &str,
        size: u32,
        tag: Option<&'static str>,
    ) -> PrimitiveId {
        self.add(Primitive {
            kind: PrimitiveKind::Text {
                content: text.to_string(),
                size,
            },
            bounds: Aabb::new(anchor, anchor),
            fill: colors::TEXT,
            tag,
        })
    }

    fn move_by(&mut self, id: PrimitiveId, delta: Vec2) {
        if let Some(p) = self.primitives.get_mut(&id) {
            p.bounds = p.bounds.translate(delta);
        }
    }

    fn coords(&self, id: PrimitiveId) -> Option<Aabb> {
        self.primitives.get(&id).map(|p| p.bounds)
    }

    fn delete(&mut self, id: PrimitiveId) {
        self.primitives.remove(&id);
    }

    fn find_overlapping(&self, bounds: &Aabb) -> Vec<PrimitiveId> {
        self.iter()
            .filter(|(_, p)| p.bounds.overlaps(bounds))
            .map(|(id, _)| id)
            .collect()
    }

    fn set_text(&mut self, id: PrimitiveId, text: &str) {
        if let Some(Primitive {
            kind: PrimitiveKind::Text { content, .. },
            ..
        }) = self.primitives.get_mut(&id)
        {
            *content = text.to_string();
        }
    }

    fn set_fill(&mut self, id: PrimitiveId, fill: Color) {
        if let Some(p) = self.primitives.get_mut(&id) {
            p.fill = fill;
        }
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
