use crate::error::Result;
use crate::math::{euler_xyz, Point3, Vector3};
use crate::shape::{BoxSpec, EdgeId};
use crate::tessellation::TriangleMesh;

use super::{Solid, SolidEdge, SolidKind};

/// Canonical cuboid edge table: `(id, start corner, end corner)`.
///
/// Bottom 1–4, top 5–8, verticals 9–12 running from top to bottom.
pub const CUBOID_EDGES: [(u32, usize, usize); 12] = [
    (1, 0, 1),
    (2, 1, 2),
    (3, 2, 3),
    (4, 3, 0),
    (5, 4, 5),
    (6, 5, 6),
    (7, 6, 7),
    (8, 7, 4),
    (9, 4, 0),
    (10, 5, 1),
    (11, 6, 2),
    (12, 7, 3),
];

/// Corner quads of each face with its unrotated outward normal.
const CUBOID_FACES: [([usize; 4], [f64; 3]); 6] = [
    ([0, 1, 2, 3], [0.0, -1.0, 0.0]),
    ([4, 5, 6, 7], [0.0, 1.0, 0.0]),
    ([0, 1, 5, 4], [0.0, 0.0, -1.0]),
    ([3, 2, 6, 7], [0.0, 0.0, 1.0]),
    ([0, 3, 7, 4], [-1.0, 0.0, 0.0]),
    ([1, 2, 6, 5], [1.0, 0.0, 0.0]),
];

/// Builds the cuboid described by a [`BoxSpec`].
///
/// The position anchors the centre of the box in X, its base in Y and its
/// front face in Z. Corners 0–3 form the bottom face, 4–7 sit directly above
/// them.
pub struct BuildCuboid<'a> {
    spec: &'a BoxSpec,
}

impl<'a> BuildCuboid<'a> {
    /// Creates a new `BuildCuboid` operation.
    #[must_use]
    pub fn new(spec: &'a BoxSpec) -> Self {
        Self { spec }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if any dimension is not positive or a
    /// selectable edge id is outside 1..=12.
    pub fn execute(&self) -> Result<Solid> {
        self.spec.validate()?;
        let BoxSpec {
            width,
            height,
            depth,
            position,
            ..
        } = *self.spec;

        let half = width / 2.0;
        let local = [
            Vector3::new(-half, 0.0, 0.0),
            Vector3::new(half, 0.0, 0.0),
            Vector3::new(half, 0.0, depth),
            Vector3::new(-half, 0.0, depth),
            Vector3::new(-half, height, 0.0),
            Vector3::new(half, height, 0.0),
            Vector3::new(half, height, depth),
            Vector3::new(-half, height, depth),
        ];
        let rotation = self.spec.rotation.as_ref().map(euler_xyz);
        let orient = |v: Vector3| rotation.map_or(v, |r| r * v);

        let corners: Vec<Point3> = local.iter().map(|&offset| position + orient(offset)).collect();

        let edges = CUBOID_EDGES
            .iter()
            .map(|&(id, a, b)| SolidEdge {
                id: EdgeId(id),
                start: corners[a],
                end: corners[b],
            })
            .collect();

        let mut mesh = TriangleMesh::default();
        for (quad, [nx, ny, nz]) in CUBOID_FACES {
            let points = quad.map(|i| corners[i]);
            mesh.push_polygon(&points, orient(Vector3::new(nx, ny, nz)));
        }

        Ok(Solid::new(SolidKind::Cuboid, corners, edges, mesh))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn corners_follow_canonical_order() {
        let spec = BoxSpec::new(100.0, 10.0, 70.0, p(0.0, 0.0, 0.0));
        let solid = BuildCuboid::new(&spec).execute().unwrap();
        let expected = [
            p(-50.0, 0.0, 0.0),
            p(50.0, 0.0, 0.0),
            p(50.0, 0.0, 70.0),
            p(-50.0, 0.0, 70.0),
            p(-50.0, 10.0, 0.0),
            p(50.0, 10.0, 0.0),
            p(50.0, 10.0, 70.0),
            p(-50.0, 10.0, 70.0),
        ];
        assert_eq!(solid.vertices(), expected);
    }

    #[test]
    fn twelve_edges_match_table_for_many_boxes() {
        for (w, h, d, x) in [(1.0, 1.0, 1.0, 0.0), (10.0, 180.0, 70.0, -55.0), (0.5, 3.0, 0.25, 7.5)] {
            let spec = BoxSpec::new(w, h, d, p(x, 2.0, -1.0));
            let solid = BuildCuboid::new(&spec).execute().unwrap();
            assert_eq!(solid.vertices().len(), 8);
            assert_eq!(solid.edges().len(), 12);
            for (edge, &(id, a, b)) in solid.edges().iter().zip(&CUBOID_EDGES) {
                assert_eq!(edge.id, EdgeId(id));
                assert_eq!(edge.start, solid.vertices()[a]);
                assert_eq!(edge.end, solid.vertices()[b]);
            }
        }
    }

    #[test]
    fn mesh_is_closed_box_with_outward_normals() {
        let spec = BoxSpec::new(2.0, 4.0, 6.0, p(1.0, 1.0, 1.0));
        let solid = BuildCuboid::new(&spec).execute().unwrap();
        let mesh = solid.mesh();
        assert_eq!(mesh.triangle_count(), 12);
        assert_relative_eq!(mesh.area(), 2.0 * (2.0 * 4.0 + 2.0 * 6.0 + 4.0 * 6.0));

        let centre = p(1.0, 3.0, 4.0);
        for (i, [a, b, c]) in mesh.triangles().enumerate() {
            let normal = mesh.normals[mesh.indices[i][0] as usize];
            let centroid = p((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0, (a.z + b.z + c.z) / 3.0);
            assert!(normal.dot(&(centroid - centre)) > 0.0);
        }
    }

    #[test]
    fn rotation_turns_about_anchor() {
        let spec = BoxSpec::new(2.0, 1.0, 1.0, p(5.0, 0.0, 0.0)).with_rotation(Vector3::new(0.0, FRAC_PI_2, 0.0));
        let solid = BuildCuboid::new(&spec).execute().unwrap();
        // Corner 1 sits at local (+1, 0, 0); a quarter turn about Y sends it to (0, 0, -1).
        assert_relative_eq!(solid.vertices()[1], p(5.0, 0.0, -1.0), epsilon = 1e-12);
        assert_eq!(solid.edges().len(), 12);
    }

    #[test]
    fn non_positive_dimension_fails() {
        let spec = BoxSpec::new(1.0, 0.0, 1.0, p(0.0, 0.0, 0.0));
        assert!(BuildCuboid::new(&spec).execute().is_err());
    }
}
