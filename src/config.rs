use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};
use crate::interaction::{EdgeStyle, MeshHighlight};

/// How the editor draws the boxes of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Per-edge hover on each box's selectable edges.
    #[default]
    SelectableEdges,
    /// Whole-mesh hover with flat fills.
    WholeMesh,
    /// Whole-mesh hover with the glass preset.
    Transparent,
}

/// Options passed in by whoever embeds the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Show only the parameter document until the first edit.
    pub json_view: bool,
    pub render_mode: RenderMode,
    /// Style of edges that never react to hover.
    pub neutral_edge: EdgeStyle,
    /// Whole-mesh edge and outline colors.
    pub mesh_highlight: MeshHighlight,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            json_view: false,
            render_mode: RenderMode::default(),
            neutral_edge: EdgeStyle::neutral(),
            mesh_highlight: MeshHighlight::default(),
        }
    }
}

impl EditorConfig {
    /// Parses a (possibly partial) JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Json`] for malformed input.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ParameterError::Json(e).into())
    }
}
