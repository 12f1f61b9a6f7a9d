use std::collections::HashMap;

use crate::math::{Point3, Vector3, TOLERANCE};
use crate::shape::EdgeId;
use crate::tessellation::TriangleMesh;

use super::SolidEdge;

/// Welding resolution for matching coincident vertices across faces.
const WELD_SCALE: f64 = 1e9;

type WeldKey = [i64; 3];

#[allow(clippy::cast_possible_truncation)]
fn weld_key(p: &Point3) -> WeldKey {
    [
        (p.x * WELD_SCALE).round() as i64,
        (p.y * WELD_SCALE).round() as i64,
        (p.z * WELD_SCALE).round() as i64,
    ]
}

struct EdgeRecord {
    start: Point3,
    end: Point3,
    normals: Vec<Vector3>,
}

/// Feature edges of a flat-shaded mesh.
///
/// An edge is kept when it borders a single triangle or when the normals of
/// the triangles on either side differ by more than `threshold_deg`. Edges
/// are numbered from 1 in first-encounter order. Returns the welded vertex
/// positions alongside the edges.
#[must_use]
pub fn feature_edges(mesh: &TriangleMesh, threshold_deg: f64) -> (Vec<Point3>, Vec<SolidEdge>) {
    let cos_threshold = threshold_deg.to_radians().cos();

    let mut vertex_index: HashMap<WeldKey, usize> = HashMap::new();
    let mut vertices = Vec::new();
    let mut weld = |p: &Point3| {
        *vertex_index.entry(weld_key(p)).or_insert_with(|| {
            vertices.push(*p);
            vertices.len() - 1
        })
    };

    let mut order: Vec<(usize, usize)> = Vec::new();
    let mut records: HashMap<(usize, usize), EdgeRecord> = HashMap::new();

    for [a, b, c] in mesh.triangles() {
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if len < TOLERANCE {
            continue;
        }
        let normal = normal / len;
        let ids = [weld(&a), weld(&b), weld(&c)];
        let points = [a, b, c];
        for k in 0..3 {
            let (i, j) = (ids[k], ids[(k + 1) % 3]);
            let key = (i.min(j), i.max(j));
            records
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    EdgeRecord {
                        start: points[k],
                        end: points[(k + 1) % 3],
                        normals: Vec::new(),
                    }
                })
                .normals
                .push(normal);
        }
    }

    let mut edges = Vec::new();
    for key in order {
        let Some(record) = records.get(&key) else {
            continue;
        };
        let sharp = match record.normals.as_slice() {
            [_] => true,
            [n0, rest @ ..] => rest.iter().any(|n| n0.dot(n) < cos_threshold),
            [] => false,
        };
        if sharp {
            let id = u32::try_from(edges.len() + 1).unwrap_or(u32::MAX);
            edges.push(SolidEdge {
                id: EdgeId(id),
                start: record.start,
                end: record.end,
            });
        }
    }

    (vertices, edges)
}
