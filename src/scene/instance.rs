use std::rc::Rc;

use crate::interaction::{
    box_edge_styles, mesh_edge_styles, EdgeHover, EdgeSelected, EdgeStyle, MeshHighlight, MeshHover, PointerSample,
    StyledEdge,
};
use crate::material::{Material, MaterialSlot, PhysicalMaterial, TextureSpec};
use crate::shape::{BoxSpec, Color, EdgeId};
use crate::solid::Solid;

use super::InstanceId;

/// Presentation of a solid that is highlighted as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct WholeMeshStyle {
    /// Fill color, also the fallback while a texture loads.
    pub fill: Color,
    /// Fill color while hovered; `None` keeps `fill`.
    pub fill_hover: Option<Color>,
    /// Edge and outline colors.
    pub highlight: MeshHighlight,
    /// Draw with the physical glass preset instead of a flat fill.
    pub transparent: bool,
    pub texture: Option<TextureSpec>,
}

impl WholeMeshStyle {
    #[must_use]
    pub fn new(fill: impl Into<Color>) -> Self {
        Self {
            fill: fill.into(),
            fill_hover: None,
            highlight: MeshHighlight::default(),
            transparent: false,
            texture: None,
        }
    }
}

/// How an instance reacts to the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceKind {
    /// Per-edge hover restricted to the box's selectable edges.
    SelectableBox(BoxSpec),
    /// One hover flag for the whole mesh.
    WholeMesh(WholeMeshStyle),
}

/// Everything the renderer needs for one instance this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: InstanceId,
    pub solid: Rc<Solid>,
    pub material: Material,
    /// Outline color; `None` when no outline is drawn.
    pub outline: Option<Color>,
    pub edges: Vec<StyledEdge>,
}

#[derive(Debug)]
pub(super) struct Instance {
    pub(super) solid: Rc<Solid>,
    pub(super) kind: InstanceKind,
    pub(super) material: MaterialSlot,
    edge_hover: EdgeHover,
    mesh_hover: MeshHover,
}

impl Instance {
    pub(super) fn selectable_box(solid: Rc<Solid>, spec: BoxSpec) -> Self {
        let material = MaterialSlot::new(Material::Flat {
            color: spec.color.clone(),
        });
        Self {
            solid,
            kind: InstanceKind::SelectableBox(spec),
            material,
            edge_hover: EdgeHover::new(),
            mesh_hover: MeshHover::new(),
        }
    }

    pub(super) fn whole_mesh(solid: Rc<Solid>, style: WholeMeshStyle) -> Self {
        let material = if style.transparent {
            MaterialSlot::new(Material::Physical(PhysicalMaterial::transparent()))
        } else if let Some(texture) = &style.texture {
            MaterialSlot::awaiting(style.fill.clone(), texture.clone())
        } else {
            MaterialSlot::new(Material::Flat {
                color: style.fill.clone(),
            })
        };
        Self {
            solid,
            kind: InstanceKind::WholeMesh(style),
            material,
            edge_hover: EdgeHover::new(),
            mesh_hover: MeshHover::new(),
        }
    }

    pub(super) fn tick(&mut self, pointer: &PointerSample) {
        match self.kind {
            InstanceKind::SelectableBox(_) => {
                self.edge_hover.tick(&self.solid, pointer);
            }
            InstanceKind::WholeMesh(_) => {
                self.mesh_hover.tick(&self.solid, pointer);
            }
        }
    }

    pub(super) fn set_mesh_hover(&mut self, hovered: bool) {
        if matches!(self.kind, InstanceKind::WholeMesh(_)) {
            if hovered {
                self.mesh_hover.pointer_enter();
            } else {
                self.mesh_hover.pointer_leave();
            }
        }
    }

    pub(super) fn hovered_edge(&self) -> Option<EdgeId> {
        match self.kind {
            InstanceKind::SelectableBox(_) => self.edge_hover.hovered(),
            InstanceKind::WholeMesh(_) => None,
        }
    }

    pub(super) fn is_mesh_hovered(&self) -> bool {
        matches!(self.kind, InstanceKind::WholeMesh(_)) && self.mesh_hover.is_hovered()
    }

    pub(super) fn click(&self) -> Option<EdgeSelected> {
        match self.kind {
            InstanceKind::SelectableBox(_) => self.edge_hover.click(),
            InstanceKind::WholeMesh(_) => None,
        }
    }

    pub(super) fn render(&self, id: InstanceId, neutral: &EdgeStyle) -> RenderItem {
        match &self.kind {
            InstanceKind::SelectableBox(spec) => RenderItem {
                id,
                solid: Rc::clone(&self.solid),
                material: self.material.current().clone(),
                outline: None,
                edges: box_edge_styles(&self.solid, spec, self.edge_hover.hovered(), neutral),
            },
            InstanceKind::WholeMesh(style) => {
                let hovered = self.mesh_hover.is_hovered();
                let material = match (self.material.current(), &style.fill_hover) {
                    (Material::Flat { .. }, Some(hover)) if hovered => Material::Flat { color: hover.clone() },
                    (current, _) => current.clone(),
                };
                RenderItem {
                    id,
                    solid: Rc::clone(&self.solid),
                    material,
                    outline: (!style.transparent).then(|| style.highlight.pick(hovered).clone()),
                    edges: mesh_edge_styles(&self.solid, &style.highlight, hovered),
                }
            }
        }
    }
}
