//! Quickhull over an arbitrary point cloud.
//!
//! 1. Build a tetrahedron from extreme points.
//! 2. Assign every other point to the first face it lies in front of.
//! 3. Repeatedly take the farthest outside point of some face, remove every
//!    face it can see and stitch the horizon to it.

use std::collections::HashMap;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::tessellation::TriangleMesh;

use super::skeleton::feature_edges;
use super::{Solid, SolidKind};

/// Normals closer than this angle are treated as one planar face.
const HULL_FEATURE_ANGLE_DEG: f64 = 1.0;

/// Builds the convex hull solid of a point cloud.
pub struct BuildConvexHull {
    points: Vec<Point3>,
}

impl BuildConvexHull {
    /// Creates a new `BuildConvexHull` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] when fewer than four distinct
    /// points are given or all points are collinear or coplanar.
    pub fn execute(&self) -> Result<Solid> {
        let points = dedup(&self.points);
        if points.len() < 4 {
            return Err(GeometryError::Degenerate(format!(
                "convex hull needs at least 4 distinct points, got {}",
                points.len()
            ))
            .into());
        }

        let eps = hull_epsilon(&points);
        let faces = quickhull(&points, eps)?;

        let mut mesh = TriangleMesh::default();
        for face in &faces {
            mesh.push_polygon(&face.vertices.map(|i| points[i]), face.normal);
        }
        let (vertices, edges) = feature_edges(&mesh, HULL_FEATURE_ANGLE_DEG);
        Ok(Solid::new(SolidKind::ConvexHull, vertices, edges, mesh))
    }
}

#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    normal: Vector3,
    offset: f64,
    outside: Vec<usize>,
}

impl HullFace {
    /// Face through `a, b, c` oriented away from `interior`.
    fn new(a: usize, b: usize, c: usize, interior: &Point3, points: &[Point3]) -> Self {
        let mut vertices = [a, b, c];
        let mut normal = (points[b] - points[a]).cross(&(points[c] - points[a]));
        if normal.dot(&(interior - points[a])) > 0.0 {
            vertices = [a, c, b];
            normal = -normal;
        }
        let len = normal.norm();
        if len > 0.0 {
            normal /= len;
        }
        Self {
            vertices,
            normal,
            offset: normal.dot(&points[a].coords),
            outside: Vec::new(),
        }
    }

    fn distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.offset
    }
}

fn dedup(points: &[Point3]) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|u| (u - p).norm() < TOLERANCE) {
            unique.push(*p);
        }
    }
    unique
}

/// Distance tolerance scaled to the extent of the cloud.
fn hull_epsilon(points: &[Point3]) -> f64 {
    let extent = points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
        .fold(1.0_f64, f64::max);
    extent * 1e-9
}

fn quickhull(points: &[Point3], eps: f64) -> Result<Vec<HullFace>> {
    let [p0, p1, p2, p3] = initial_simplex(points, eps)?;
    let interior = Point3::from((points[p0].coords + points[p1].coords + points[p2].coords + points[p3].coords) / 4.0);

    let mut faces = vec![
        HullFace::new(p0, p1, p2, &interior, points),
        HullFace::new(p0, p2, p3, &interior, points),
        HullFace::new(p0, p3, p1, &interior, points),
        HullFace::new(p1, p3, p2, &interior, points),
    ];
    let remaining = (0..points.len()).filter(|i| ![p0, p1, p2, p3].contains(i));
    assign(&mut faces, remaining, points, eps);

    while let Some(face_idx) = faces.iter().position(|f| !f.outside.is_empty()) {
        let face = &faces[face_idx];
        let Some(eye) = face
            .outside
            .iter()
            .copied()
            .max_by(|&a, &b| face.distance(&points[a]).total_cmp(&face.distance(&points[b])))
        else {
            break;
        };

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.distance(&points[eye]) > eps)
            .map(|(i, _)| i)
            .collect();

        let horizon = horizon_edges(&faces, &visible);

        let mut orphans = Vec::new();
        for &idx in visible.iter().rev() {
            let removed = faces.swap_remove(idx);
            orphans.extend(removed.outside.into_iter().filter(|&p| p != eye));
        }

        for (a, b) in horizon {
            faces.push(HullFace::new(a, b, eye, &interior, points));
        }
        assign(&mut faces, orphans.into_iter(), points, eps);
    }

    Ok(faces)
}

fn assign(faces: &mut [HullFace], candidates: impl Iterator<Item = usize>, points: &[Point3], eps: f64) {
    for idx in candidates {
        if let Some(face) = faces.iter_mut().find(|f| f.distance(&points[idx]) > eps) {
            face.outside.push(idx);
        }
    }
}

/// Edges of the visible region that border a non-visible face, in the
/// winding of the visible face.
fn horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut count: HashMap<(usize, usize), usize> = HashMap::new();
    let directed = |f: &HullFace| {
        let [a, b, c] = f.vertices;
        [(a, b), (b, c), (c, a)]
    };
    for &idx in visible {
        for (a, b) in directed(&faces[idx]) {
            *count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    visible
        .iter()
        .flat_map(|&idx| directed(&faces[idx]))
        .filter(|&(a, b)| count.get(&(a.min(b), a.max(b))) == Some(&1))
        .collect()
}

fn initial_simplex(points: &[Point3], eps: f64) -> Result<[usize; 4]> {
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[axis * 2]][axis] {
                extremes[axis * 2] = i;
            }
            if p[axis] > points[extremes[axis * 2 + 1]][axis] {
                extremes[axis * 2 + 1] = i;
            }
        }
    }

    let mut best = (extremes[0], extremes[1], 0.0);
    for (k, &a) in extremes.iter().enumerate() {
        for &b in &extremes[k + 1..] {
            let d = (points[a] - points[b]).norm_squared();
            if d > best.2 {
                best = (a, b, d);
            }
        }
    }
    let (p0, p1, _) = best;
    if best.2.sqrt() < eps {
        return Err(GeometryError::Degenerate("all points coincide".into()).into());
    }

    let dir = (points[p1] - points[p0]).normalize();
    let p2 = farthest(points, |p| {
        let v = p - points[p0];
        (v - dir * v.dot(&dir)).norm()
    })
    .filter(|&(_, d)| d > eps)
    .map(|(i, _)| i)
    .ok_or_else(|| GeometryError::Degenerate("all points are collinear".into()))?;

    let normal = (points[p1] - points[p0])
        .cross(&(points[p2] - points[p0]))
        .normalize();
    let p3 = farthest(points, |p| normal.dot(&(p - points[p0])).abs())
        .filter(|&(_, d)| d > eps)
        .map(|(i, _)| i)
        .ok_or_else(|| GeometryError::Degenerate("all points are coplanar".into()))?;

    Ok([p0, p1, p2, p3])
}

fn farthest(points: &[Point3], metric: impl Fn(&Point3) -> f64) -> Option<(usize, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, metric(p)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RecessError;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn cube() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(0.0, 1.0, 1.0),
        ]
    }

    fn is_closed_and_outward(solid: &Solid, inside: &Point3) {
        let mesh = solid.mesh();
        for (i, [a, b, c]) in mesh.triangles().enumerate() {
            let n = mesh.normals[mesh.indices[i][0] as usize];
            assert!(n.dot(&(a - inside)) > 0.0);
            assert!((b - a).cross(&(c - a)).dot(&n) > 0.0);
        }
    }

    #[test]
    fn tetrahedron() {
        let solid = BuildConvexHull::new(vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.5, 1.0, 0.0),
            p(0.5, 0.5, 1.0),
        ])
        .execute()
        .unwrap();
        assert_eq!(solid.mesh().triangle_count(), 4);
        assert_eq!(solid.vertices().len(), 4);
        assert_eq!(solid.edges().len(), 6);
        is_closed_and_outward(&solid, &p(0.5, 0.4, 0.2));
    }

    #[test]
    fn cube_with_interior_and_duplicate_points() {
        let mut points = cube();
        points.push(p(0.5, 0.5, 0.5));
        points.push(p(1.0, 1.0, 1.0));
        let solid = BuildConvexHull::new(points).execute().unwrap();
        assert_eq!(solid.kind(), SolidKind::ConvexHull);
        assert_eq!(solid.mesh().triangle_count(), 12);
        assert_eq!(solid.vertices().len(), 8);
        assert_eq!(solid.edges().len(), 12);
        assert_relative_eq!(solid.mesh().area(), 6.0, epsilon = 1e-9);
        is_closed_and_outward(&solid, &p(0.5, 0.5, 0.5));
    }

    #[test]
    fn octahedron_from_noisy_cloud() {
        let mut points = vec![
            p(1.0, 0.0, 0.0),
            p(-1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, -1.0, 0.0),
            p(0.0, 0.0, 1.0),
            p(0.0, 0.0, -1.0),
        ];
        points.extend([p(0.1, 0.1, 0.1), p(-0.2, 0.1, 0.3), p(0.0, -0.3, -0.2)]);
        let solid = BuildConvexHull::new(points).execute().unwrap();
        assert_eq!(solid.mesh().triangle_count(), 8);
        assert_eq!(solid.edges().len(), 12);
        is_closed_and_outward(&solid, &Point3::origin());
    }

    #[test]
    fn degenerate_inputs_fail() {
        let too_few = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let repeated = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0)];
        let collinear = (0..5).map(|i| p(f64::from(i), 0.0, 0.0)).collect();
        let coplanar = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0), p(0.5, 0.2, 0.0)];
        for points in [too_few, repeated, collinear, coplanar] {
            let err = BuildConvexHull::new(points).execute().unwrap_err();
            assert!(matches!(err, RecessError::Geometry(GeometryError::Degenerate(_))));
        }
    }
}
