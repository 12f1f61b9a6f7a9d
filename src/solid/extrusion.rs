use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::error::{GeometryError, OperationError, Result};
use crate::math::polygon_2d::{contains_point, open_ring, oriented, signed_area};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::tessellation::{project_uvs, TriangleMesh};

use super::skeleton::feature_edges;
use super::{Solid, SolidKind};

/// Outline corners sharper than this are drawn as skeleton edges.
const EXTRUSION_FEATURE_ANGLE_DEG: f64 = 15.0;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Extrudes a closed XY outline, with an optional hole, along +Z.
///
/// The front cap lies on `z = 0`, the back cap on `z = depth`. The mesh
/// carries UVs projected from the face normals.
pub struct BuildExtrusion {
    perimeter: Vec<Point2>,
    internal_perimeter: Vec<Point2>,
    depth: f64,
}

impl BuildExtrusion {
    /// Creates a new `BuildExtrusion` operation without a hole.
    #[must_use]
    pub fn new(perimeter: Vec<Point2>, depth: f64) -> Self {
        Self {
            perimeter,
            internal_perimeter: Vec::new(),
            depth,
        }
    }

    /// Cuts `internal_perimeter` out of both caps. An empty outline means no hole.
    #[must_use]
    pub fn with_hole(mut self, internal_perimeter: Vec<Point2>) -> Self {
        self.internal_perimeter = internal_perimeter;
        self
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for outlines with fewer than
    /// three points, [`GeometryError::NonPositiveDimension`] for a
    /// non-positive depth and [`GeometryError::Degenerate`] for zero-area
    /// or self-intersecting outlines.
    pub fn execute(&self) -> Result<Solid> {
        if !(self.depth > 0.0 && self.depth.is_finite()) {
            return Err(GeometryError::NonPositiveDimension {
                dimension: "depth",
                value: self.depth,
            }
            .into());
        }
        let outer = checked_ring(&self.perimeter, "perimeter")?;
        let hole = if self.internal_perimeter.is_empty() {
            None
        } else {
            Some(checked_ring(&self.internal_perimeter, "internal perimeter")?)
        };
        if let Some(ring) = &hole {
            if !ring.iter().all(|p| contains_point(&outer, p)) {
                return Err(GeometryError::Degenerate("internal perimeter is not inside the perimeter".into()).into());
            }
        }

        // Outer ring counter-clockwise, hole clockwise: the right-hand normal
        // of every ring segment then points out of the material.
        let outer = oriented(&outer, true);
        let hole = hole.map(|ring| oriented(&ring, false));

        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &outer)?;
        if let Some(ring) = &hole {
            insert_constraint_loop(&mut cdt, ring)?;
        }
        let material = material_faces(&cdt);

        let mut mesh = TriangleMesh::default();
        let front = -Vector3::z();
        let back = Vector3::z();
        for face in cdt.inner_faces() {
            if !material.contains(&face.fix().index()) {
                continue;
            }
            let tri = face.vertices().map(|v| {
                let p = v.position();
                Point2::new(p.x, p.y)
            });
            mesh.push_polygon(&tri.map(|p| Point3::new(p.x, p.y, 0.0)), front);
            mesh.push_polygon(&tri.map(|p| Point3::new(p.x, p.y, self.depth)), back);
        }

        for ring in std::iter::once(&outer).chain(hole.as_ref()) {
            self.push_walls(&mut mesh, ring);
        }

        project_uvs(&mut mesh);
        let (vertices, edges) = feature_edges(&mesh, EXTRUSION_FEATURE_ANGLE_DEG);
        Ok(Solid::new(SolidKind::Extrusion, vertices, edges, mesh))
    }

    fn push_walls(&self, mesh: &mut TriangleMesh, ring: &[Point2]) {
        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            let d = b - a;
            let len = d.norm();
            if len < TOLERANCE {
                continue;
            }
            let normal = Vector3::new(d.y / len, -d.x / len, 0.0);
            let quad = [
                Point3::new(a.x, a.y, 0.0),
                Point3::new(b.x, b.y, 0.0),
                Point3::new(b.x, b.y, self.depth),
                Point3::new(a.x, a.y, self.depth),
            ];
            mesh.push_polygon(&quad, normal);
        }
    }
}

fn checked_ring(points: &[Point2], what: &str) -> Result<Vec<Point2>> {
    let ring = open_ring(points);
    if ring.len() < 3 {
        return Err(OperationError::InvalidInput(format!(
            "{what} needs at least 3 points, got {}",
            ring.len()
        ))
        .into());
    }
    if signed_area(&ring).abs() < TOLERANCE {
        return Err(GeometryError::Degenerate(format!("{what} encloses no area")).into());
    }
    Ok(ring)
}

/// Inserts a closed loop of constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[Point2]) -> Result<()> {
    let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| OperationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(GeometryError::Degenerate("outline intersects itself or the other outline".into()).into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Indices of the inner faces that lie in material.
///
/// A face is material when any path to it from outside the triangulation
/// crosses an odd number of outline edges. Nested, non-crossing rings make
/// that parity independent of the path taken.
fn material_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut pending: Vec<(FixedFaceHandle<InnerTag>, bool)> = cdt
        .directed_edges()
        .filter(|edge| edge.face().as_inner().is_none())
        .filter_map(|edge| {
            let face = edge.rev().face().as_inner()?;
            Some((face.fix(), cdt.is_constraint_edge(edge.as_undirected().fix())))
        })
        .collect();

    let mut parity: HashMap<usize, bool> = HashMap::new();
    while let Some((fix, inside)) = pending.pop() {
        if parity.contains_key(&fix.index()) {
            continue;
        }
        parity.insert(fix.index(), inside);
        for edge in cdt.face(fix).adjacent_edges() {
            if let Some(next) = edge.rev().face().as_inner() {
                if !parity.contains_key(&next.fix().index()) {
                    let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
                    pending.push((next.fix(), inside != crossed));
                }
            }
        }
    }

    parity
        .into_iter()
        .filter_map(|(index, inside)| inside.then_some(index))
        .collect()
}
