use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Drops a trailing point that repeats the first one.
///
/// Outlines are closed implicitly; callers may still pass an explicitly
/// closed ring.
#[must_use]
pub fn open_ring(points: &[Point2]) -> Vec<Point2> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && (first - last).norm() < TOLERANCE => {
            points[..points.len() - 1].to_vec()
        }
        _ => points.to_vec(),
    }
}

/// Returns the ring with counter-clockwise orientation if `ccw`, clockwise otherwise.
#[must_use]
pub fn oriented(points: &[Point2], ccw: bool) -> Vec<Point2> {
    if (signed_area(points) > 0.0) == ccw {
        points.to_vec()
    } else {
        points.iter().rev().copied().collect()
    }
}

/// Point-in-polygon test using the winding number. Boundary points may
/// report either side.
#[must_use]
pub fn contains_point(polygon: &[Point2], point: &Point2) -> bool {
    let n = polygon.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
        if a.y <= point.y {
            if b.y > point.y && cross > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && cross < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn area_sign_follows_orientation() {
        let sq = square();
        assert_relative_eq!(signed_area(&sq), 16.0);
        let cw: Vec<_> = sq.iter().rev().copied().collect();
        assert_relative_eq!(signed_area(&cw), -16.0);
        assert_relative_eq!(signed_area(&oriented(&cw, true)), 16.0);
    }

    #[test]
    fn explicit_closing_point_is_dropped() {
        let mut sq = square();
        sq.push(Point2::new(0.0, 0.0));
        assert_eq!(open_ring(&sq).len(), 4);
        assert_eq!(open_ring(&square()).len(), 4);
    }

    #[test]
    fn containment() {
        let sq = square();
        assert!(contains_point(&sq, &Point2::new(2.0, 2.0)));
        assert!(!contains_point(&sq, &Point2::new(5.0, 2.0)));
    }
}
