//! Immutable solids built from box specs, point clouds or extruded outlines.

mod cache;
mod convex_hull;
mod cuboid;
mod extrusion;
mod skeleton;

pub use cache::SolidCache;
pub use convex_hull::BuildConvexHull;
pub use cuboid::{BuildCuboid, CUBOID_EDGES};
pub use extrusion::BuildExtrusion;

use crate::math::ray::{ray_triangle_intersect, Ray};
use crate::math::triangle_3d::distance_to_triangle;
use crate::math::Point3;
use crate::shape::EdgeId;
use crate::tessellation::TriangleMesh;

/// Which builder produced a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    Cuboid,
    ConvexHull,
    Extrusion,
}

/// A straight skeleton edge between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidEdge {
    pub id: EdgeId,
    pub start: Point3,
    pub end: Point3,
}

/// First intersection of a ray with a solid's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub t: f64,
    pub point: Point3,
}

/// Built geometry: skeleton vertices and edges plus a render mesh.
///
/// Solids are values. Changing the source box means building a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    kind: SolidKind,
    vertices: Vec<Point3>,
    edges: Vec<SolidEdge>,
    mesh: TriangleMesh,
}

impl Solid {
    pub(crate) fn new(kind: SolidKind, vertices: Vec<Point3>, edges: Vec<SolidEdge>, mesh: TriangleMesh) -> Self {
        Self {
            kind,
            vertices,
            edges,
            mesh,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    /// Skeleton vertices. Cuboids keep the canonical 8-corner order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Skeleton edges in id order.
    #[must_use]
    pub fn edges(&self) -> &[SolidEdge] {
        &self.edges
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&SolidEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Nearest intersection of `ray` with the render mesh.
    #[must_use]
    pub fn cast(&self, ray: &Ray) -> Option<RayHit> {
        self.mesh
            .triangles()
            .filter_map(|[a, b, c]| ray_triangle_intersect(ray, &a, &b, &c))
            .min_by(f64::total_cmp)
            .map(|t| RayHit { t, point: ray.at(t) })
    }

    /// Whether `point` lies on the render mesh within `tolerance`.
    #[must_use]
    pub fn touches(&self, point: &Point3, tolerance: f64) -> bool {
        self.mesh
            .triangles()
            .any(|[a, b, c]| distance_to_triangle(point, &a, &b, &c) <= tolerance)
    }
}
