mod uv_projection;

pub use uv_projection::{project_uv, project_uvs};

use crate::math::{Point2, Point3, Vector3};

/// A triangle mesh with flat per-face normals.
///
/// Faces do not share vertices, so every vertex carries the normal of the
/// face it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates; empty until projected.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Appends a convex planar polygon as a triangle fan.
    ///
    /// Winding is chosen so that the geometric normal agrees with `normal`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_polygon(&mut self, points: &[Point3], normal: Vector3) {
        if points.len() < 3 {
            return;
        }
        let geometric = (points[1] - points[0]).cross(&(points[2] - points[0]));
        let flip = geometric.dot(&normal) < 0.0;

        let base = self.vertices.len() as u32;
        for p in points {
            self.vertices.push(*p);
            self.normals.push(normal);
        }
        for i in 1..points.len() as u32 - 1 {
            if flip {
                self.indices.push([base, base + i + 1, base + i]);
            } else {
                self.indices.push([base, base + i, base + i + 1]);
            }
        }
    }

    /// Iterates over triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            [
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ]
        })
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }
}
