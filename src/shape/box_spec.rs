use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Identifier of a solid edge.
///
/// Cuboid edges always use the canonical numbering 1..=12; other solids
/// number their skeleton edges sequentially from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Highest canonical cuboid edge id.
    pub const CUBOID_MAX: u32 = 12;
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A CSS-style color name or hex string, passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Declarative description of one rigid cuboid to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub position: Point3,
    /// Euler angles in radians, applied X then Y then Z about `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vector3>,
    pub color: Color,
    pub edge_color: Color,
    pub edge_hover_color: Color,
    pub edge_thickness: f64,
    #[serde(default)]
    pub selectable_edge: BTreeSet<EdgeId>,
}

impl BoxSpec {
    /// A box with the given size at `position`, styled with renderer defaults
    /// (`green` fill, `red` edges, `yellow` hover, thickness 1).
    #[must_use]
    pub fn new(width: f64, height: f64, depth: f64, position: Point3) -> Self {
        Self {
            width,
            height,
            depth,
            position,
            rotation: None,
            color: "green".into(),
            edge_color: "red".into(),
            edge_hover_color: "yellow".into(),
            edge_thickness: 1.0,
            selectable_edge: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_edge_style(mut self, edge: impl Into<Color>, hover: impl Into<Color>, thickness: f64) -> Self {
        self.edge_color = edge.into();
        self.edge_hover_color = hover.into();
        self.edge_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Vector3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_selectable(mut self, edges: impl IntoIterator<Item = u32>) -> Self {
        self.selectable_edge = edges.into_iter().map(EdgeId).collect();
        self
    }

    /// Whether `edge` gets hover/selected styling on this box.
    #[must_use]
    pub fn is_selectable(&self, edge: EdgeId) -> bool {
        self.selectable_edge.contains(&edge)
    }

    /// Checks the box invariants: positive finite dimensions and selectable
    /// ids within the canonical range.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositiveDimension`] or
    /// [`GeometryError::EdgeOutOfRange`].
    pub fn validate(&self) -> Result<()> {
        for (dimension, value) in [("width", self.width), ("height", self.height), ("depth", self.depth)] {
            // NaN fails this comparison too.
            if !(value > 0.0 && value.is_finite()) {
                return Err(GeometryError::NonPositiveDimension { dimension, value }.into());
            }
        }
        if let Some(bad) = self
            .selectable_edge
            .iter()
            .find(|id| id.0 == 0 || id.0 > EdgeId::CUBOID_MAX)
        {
            return Err(GeometryError::EdgeOutOfRange(bad.0).into());
        }
        Ok(())
    }
}
