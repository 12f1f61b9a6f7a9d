use serde::{Deserialize, Serialize};

use crate::shape::{BoxSpec, Color, EdgeId};
use crate::solid::Solid;

/// Line color and width for one drawn edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    pub thickness: f64,
}

impl EdgeStyle {
    #[must_use]
    pub fn new(color: impl Into<Color>, thickness: f64) -> Self {
        Self {
            color: color.into(),
            thickness,
        }
    }

    /// Style for edges that never react to hover.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new("#000", 1.0)
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Base/hover color pair for whole-mesh highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshHighlight {
    pub base: Color,
    pub hover: Color,
}

impl MeshHighlight {
    #[must_use]
    pub fn pick(&self, hovered: bool) -> &Color {
        if hovered {
            &self.hover
        } else {
            &self.base
        }
    }
}

impl Default for MeshHighlight {
    fn default() -> Self {
        Self {
            base: "black".into(),
            hover: "#c02040".into(),
        }
    }
}

/// An edge paired with the style it should be drawn in this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledEdge {
    pub id: EdgeId,
    pub style: EdgeStyle,
}

/// Edge styles for a box with selectable edges.
///
/// Selectable edges use the hover color while hovered and the edge color
/// otherwise; all other edges use `neutral`.
#[must_use]
pub fn box_edge_styles(solid: &Solid, spec: &BoxSpec, hovered: Option<EdgeId>, neutral: &EdgeStyle) -> Vec<StyledEdge> {
    solid
        .edges()
        .iter()
        .map(|edge| {
            let style = if spec.is_selectable(edge.id) {
                let color = if hovered == Some(edge.id) {
                    &spec.edge_hover_color
                } else {
                    &spec.edge_color
                };
                EdgeStyle::new(color.clone(), spec.edge_thickness)
            } else {
                neutral.clone()
            };
            StyledEdge { id: edge.id, style }
        })
        .collect()
}

/// Edge styles for a whole-mesh solid: every skeleton edge follows the
/// mesh hover flag.
#[must_use]
pub fn mesh_edge_styles(solid: &Solid, highlight: &MeshHighlight, hovered: bool) -> Vec<StyledEdge> {
    let style = EdgeStyle::new(highlight.pick(hovered).clone(), 1.0);
    solid
        .edges()
        .iter()
        .map(|edge| StyledEdge {
            id: edge.id,
            style: style.clone(),
        })
        .collect()
}
