use crate::math::{Point2, Point3, Vector3};

use super::TriangleMesh;

/// Texture coordinate for a vertex, chosen by the dominant axis of its normal.
///
/// X-dominant maps to `(z, y)`, Y-dominant to `(x, z)`, Z-dominant to
/// `(x, y)`. The axes are tested in X, Y, Z order and a later match
/// overwrites an earlier one, so on ties Z beats Y and Y beats X.
#[must_use]
pub fn project_uv(position: &Point3, normal: &Vector3) -> Point2 {
    let nx = normal.x.abs();
    let ny = normal.y.abs();
    let nz = normal.z.abs();

    let mut uv = Point2::origin();
    if nx >= ny && nx >= nz {
        uv = Point2::new(position.z, position.y);
    }
    if ny >= nx && ny >= nz {
        uv = Point2::new(position.x, position.z);
    }
    if nz >= nx && nz >= ny {
        uv = Point2::new(position.x, position.y);
    }
    uv
}

/// Rewrites the UVs of every vertex in `mesh` from its normal.
pub fn project_uvs(mesh: &mut TriangleMesh) {
    mesh.uvs = mesh
        .vertices
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| project_uv(p, n))
        .collect();
}
