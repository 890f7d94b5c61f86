//! Rendering module
//!
//! The game draws through the [`Canvas`] trait: a retained set of
//! rectangles, ovals and text items that can be moved, restyled and queried.
//! [`Scene`] is the in-memory canvas, [`View`] mirrors a `GameState` onto
//! any canvas, and [`shapes::tessellate`] turns a scene into triangles for a
//! GPU backend.

pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod view;

pub use scene::Scene;
pub use vertex::{Color, Vertex};
pub use view::View;

use glam::Vec2;

use crate::sim::Aabb;

/// Handle to a primitive on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimitiveId(pub u32);

/// Drawing surface the game renders into
pub trait Canvas {
    /// Filled rectangle covering `bounds`
    fn create_rectangle(
        &mut self,
        bounds: Aabb,
        fill: Color,
        tag: Option<&'static str>,
    ) -> PrimitiveId;

    /// Filled ellipse inscribed in `bounds`
    fn create_oval(&mut self, bounds: Aabb, fill: Color, tag: Option<&'static str>) -> PrimitiveId;

    /// Text centred on `anchor`
    fn create_text(
        &mut self,
        anchor: Vec2,
        text: &str,
        size: u32,
        tag: Option<&'static str>,
    ) -> PrimitiveId;

    fn move_by(&mut self, id: PrimitiveId, delta: Vec2);

    /// Current bounding box, `None` for deleted primitives
    fn coords(&self, id: PrimitiveId) -> Option<Aabb>;

    fn delete(&mut self, id: PrimitiveId);

    /// Every primitive whose box overlaps `bounds`, oldest first
    fn find_overlapping(&self, bounds: &Aabb) -> Vec<PrimitiveId>;

    fn set_text(&mut self, id: PrimitiveId, text: &str);

    fn set_fill(&mut self, id: PrimitiveId, fill: Color);

    fn width(&self) -> f32;

    fn height(&self) -> f32;
}
