use crate::math::line_3d::distance_to_line;
use crate::math::Point3;
use crate::shape::EdgeId;
use crate::solid::{Solid, SolidEdge};

use super::{EdgeSelected, PointerSample};

/// Edge whose infinite line passes closest to `point`.
///
/// Ties keep the earlier edge in enumeration order.
#[must_use]
pub fn nearest_edge(point: &Point3, edges: &[SolidEdge]) -> Option<EdgeId> {
    let mut best: Option<(EdgeId, f64)> = None;
    for edge in edges {
        let distance = distance_to_line(point, &edge.start, &edge.end);
        let closer = match best {
            Some((_, d)) => distance < d,
            None => true,
        };
        if closer {
            best = Some((edge.id, distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Hover/selection state of one solid's edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeHover {
    hovered: Option<EdgeId>,
}

impl EdgeHover {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<EdgeId> {
        self.hovered
    }

    /// Recomputes the hovered edge for this frame.
    ///
    /// A sample that does not meet the solid clears the hover regardless of
    /// the previous state.
    pub fn tick(&mut self, solid: &Solid, pointer: &PointerSample) -> Option<EdgeId> {
        self.hovered = pointer
            .resolve(solid)
            .and_then(|point| nearest_edge(&point, solid.edges()));
        self.hovered
    }

    /// Selection event for a click; `None` when nothing is hovered.
    #[must_use]
    pub fn click(&self) -> Option<EdgeSelected> {
        self.hovered.map(EdgeSelected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::ray::Ray;
    use crate::math::Vector3;
    use crate::shape::BoxSpec;
    use crate::solid::{BuildCuboid, CUBOID_EDGES};

    fn cube() -> Solid {
        // x [-1, 1], y [0, 2], z [0, 2]
        BuildCuboid::new(&BoxSpec::new(2.0, 2.0, 2.0, Point3::origin()))
            .execute()
            .unwrap()
    }

    #[test]
    fn point_on_an_edge_line_selects_that_edge() {
        let solid = cube();
        let v = solid.vertices();
        for &(id, a, b) in &CUBOID_EDGES {
            // A quarter of the way along the edge: distance 0 to its own line and
            // strictly positive to every other edge line.
            let along = v[b] - v[a];
            let point = v[a] + along * 0.25;
            let mut hover = EdgeHover::new();
            assert_eq!(hover.tick(&solid, &PointerSample::Hit(point)), Some(EdgeId(id)));
        }
    }

    #[test]
    fn projection_uses_infinite_lines() {
        let solid = cube();
        // Far beyond the segment of edge 1 (y = 0, z = 0) but on its line.
        let point = Point3::new(25.0, 0.0, 0.0);
        assert_eq!(nearest_edge(&point, solid.edges()), Some(EdgeId(1)));
    }

    #[test]
    fn ties_keep_the_lower_id() {
        let solid = cube();
        // Bottom-face centre: equidistant from edges 1-4.
        let point = Point3::new(0.0, 0.0, 1.0);
        assert_eq!(nearest_edge(&point, solid.edges()), Some(EdgeId(1)));
    }

    #[test]
    fn ray_hit_near_top_back_edge() {
        let solid = cube();
        // Straight down onto the top face close to the back edge (z = 2).
        let ray = Ray::new(Point3::new(0.2, 10.0, 1.9), Vector3::new(0.0, -1.0, 0.0));
        let mut hover = EdgeHover::new();
        assert_eq!(hover.tick(&solid, &PointerSample::Ray(ray)), Some(EdgeId(7)));
        assert_eq!(hover.click(), Some(EdgeSelected(EdgeId(7))));
    }

    #[test]
    fn miss_clears_previous_hover() {
        let solid = cube();
        let mut hover = EdgeHover::new();
        hover.tick(&solid, &PointerSample::Hit(Point3::new(0.0, 0.0, 0.0)));
        assert!(hover.hovered().is_some());

        let away = Ray::new(Point3::new(5.0, 5.0, 5.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(hover.tick(&solid, &PointerSample::Ray(away)), None);
        hover.tick(&solid, &PointerSample::Hit(Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(hover.tick(&solid, &PointerSample::Miss), None);
        assert_eq!(hover.click(), None);
    }
}
