use super::{Point3, TOLERANCE};

/// Orthogonal projection of `point` onto the infinite line through `a` and `b`.
///
/// The result is not clamped to the segment. A degenerate line (coincident
/// endpoints) projects everything onto `a`.
#[must_use]
pub fn project_onto_line(point: &Point3, a: &Point3, b: &Point3) -> Point3 {
    let dir = b - a;
    let len = dir.norm();
    if len < TOLERANCE {
        return *a;
    }
    let dir = dir / len;
    a + dir * (point - a).dot(&dir)
}

/// Euclidean distance from `point` to the infinite line through `a` and `b`.
#[must_use]
pub fn distance_to_line(point: &Point3, a: &Point3, b: &Point3) -> f64 {
    (point - project_onto_line(point, a, b)).norm()
}
