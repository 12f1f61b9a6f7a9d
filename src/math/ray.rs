use super::{Point3, Vector3, TOLERANCE};

/// A pointer ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    /// Creates a ray. The direction does not need to be normalized.
    #[must_use]
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Ray/triangle intersection (Möller–Trumbore), double sided.
///
/// Returns the ray parameter `t` of the hit, or `None` when the ray misses,
/// runs parallel to the triangle, or the hit lies behind the origin.
#[must_use]
pub fn ray_triangle_intersect(ray: &Ray, a: &Point3, b: &Point3, c: &Point3) -> Option<f64> {
    let e1 = b - a;
    let e2 = c - a;
    let h = ray.direction.cross(&e2);
    let det = e1.dot(&h);
    if det.abs() < TOLERANCE {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - a;
    let u = inv * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(&e1);
    let v = inv * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = inv * e2.dot(&q);
    (t > TOLERANCE).then_some(t)
}
