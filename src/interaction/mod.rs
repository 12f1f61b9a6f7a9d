//! Pointer-driven hover and selection on built solids.
//!
//! The renderer owns device input and camera projection. Once per frame it
//! hands over a [`PointerSample`]; clicks arrive as discrete events.

mod edge_hover;
mod mesh_hover;
mod style;

pub use edge_hover::{nearest_edge, EdgeHover};
pub use mesh_hover::MeshHover;
pub use style::{box_edge_styles, mesh_edge_styles, EdgeStyle, MeshHighlight, StyledEdge};

use crate::math::ray::Ray;
use crate::math::Point3;
use crate::shape::EdgeId;
use crate::solid::Solid;

/// Largest distance between a resolved hit and the surface it belongs to.
pub const HIT_TOLERANCE: f64 = 1e-6;

/// Pointer state for one interaction tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// A world-space ray to cast against each solid.
    Ray(Ray),
    /// An intersection point the renderer already resolved. It only applies
    /// to the solid whose surface it lies on.
    Hit(Point3),
    /// The pointer is not over anything.
    Miss,
}

impl PointerSample {
    /// The point where this sample meets `solid`, if any.
    #[must_use]
    pub fn resolve(&self, solid: &Solid) -> Option<Point3> {
        match self {
            Self::Ray(ray) => solid.cast(ray).map(|hit| hit.point),
            Self::Hit(point) => solid.touches(point, HIT_TOLERANCE).then_some(*point),
            Self::Miss => None,
        }
    }
}

/// Emitted when the user clicks while an edge is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSelected(pub EdgeId);
