//! Arena of rendered solid instances and their interaction state.

mod instance;

pub use instance::{InstanceKind, RenderItem, WholeMeshStyle};

use std::rc::Rc;

use slotmap::SlotMap;

use crate::error::TextureError;
use crate::interaction::{EdgeStyle, PointerSample};
use crate::material::{TextureHandle, TextureSpec};
use crate::shape::{BoxSpec, EdgeId};
use crate::solid::Solid;

use instance::Instance;

slotmap::new_key_type! {
    /// Unique identifier for an instance in the scene.
    pub struct InstanceId;
}

/// Work handed to the external texture loader.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    pub instance: InstanceId,
    pub texture: TextureSpec,
}

/// An edge click on a specific instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSelected {
    pub instance: InstanceId,
    pub edge: EdgeId,
}

/// Owns every instance currently on screen.
///
/// Instance ids are generational: once an instance is removed, its id never
/// resolves again, so late callbacks holding it become no-ops.
#[derive(Debug, Default)]
pub struct Scene {
    instances: SlotMap<InstanceId, Instance>,
    order: Vec<InstanceId>,
    neutral_edge: EdgeStyle,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scene drawing non-selectable box edges in `neutral_edge`.
    #[must_use]
    pub fn with_neutral_edge(neutral_edge: EdgeStyle) -> Self {
        Self {
            neutral_edge,
            ..Self::default()
        }
    }

    /// Adds a box whose `selectable_edge` ids react to hover and clicks.
    pub fn insert_box(&mut self, solid: Rc<Solid>, spec: BoxSpec) -> InstanceId {
        self.insert(Instance::selectable_box(solid, spec))
    }

    /// Adds a solid highlighted as a whole. A textured style also returns the
    /// request the loader has to fulfil.
    pub fn insert_whole_mesh(&mut self, solid: Rc<Solid>, style: WholeMeshStyle) -> (InstanceId, Option<TextureRequest>) {
        let instance = Instance::whole_mesh(solid, style);
        let texture = instance.material.pending().cloned();
        let id = self.insert(instance);
        (id, texture.map(|texture| TextureRequest { instance: id, texture }))
    }

    fn insert(&mut self, instance: Instance) -> InstanceId {
        let id = self.instances.insert(instance);
        self.order.push(id);
        id
    }

    /// Removes an instance. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        self.order.retain(|&o| o != id);
        self.instances.remove(id).is_some()
    }

    /// Removes every instance.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.order.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instance ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[InstanceId] {
        &self.order
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(id)
    }

    #[must_use]
    pub fn solid(&self, id: InstanceId) -> Option<&Rc<Solid>> {
        self.instances.get(id).map(|i| &i.solid)
    }

    /// How an instance reacts to the pointer.
    #[must_use]
    pub fn kind(&self, id: InstanceId) -> Option<&InstanceKind> {
        self.instances.get(id).map(|i| &i.kind)
    }

    /// Hovered edge of a selectable box.
    #[must_use]
    pub fn hovered_edge(&self, id: InstanceId) -> Option<EdgeId> {
        self.instances.get(id).and_then(Instance::hovered_edge)
    }

    /// Whole-mesh hover flag; `false` for boxes and unknown ids.
    #[must_use]
    pub fn is_hovered(&self, id: InstanceId) -> bool {
        self.instances.get(id).is_some_and(Instance::is_mesh_hovered)
    }

    /// Per-frame hover update for every instance.
    pub fn tick(&mut self, pointer: &PointerSample) {
        for instance in self.instances.values_mut() {
            instance.tick(pointer);
        }
    }

    /// Pointer-enter event for a whole-mesh instance.
    pub fn pointer_enter(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(id) {
            instance.set_mesh_hover(true);
        }
    }

    /// Pointer-leave event for a whole-mesh instance.
    pub fn pointer_leave(&mut self, id: InstanceId) {
        if let Some(instance) = self.instances.get_mut(id) {
            instance.set_mesh_hover(false);
        }
    }

    /// Click event: one selection per box with a hovered edge.
    pub fn click(&self) -> Vec<EdgeSelected> {
        self.order
            .iter()
            .filter_map(|&id| {
                let selected = self.instances.get(id)?.click()?;
                tracing::info!(edge = %selected.0, "edge clicked");
                Some(EdgeSelected {
                    instance: id,
                    edge: selected.0,
                })
            })
            .collect()
    }

    /// Delivers a texture load outcome. Returns `true` if a material changed.
    ///
    /// Outcomes for instances that no longer exist are dropped.
    pub fn complete_texture(&mut self, instance: InstanceId, outcome: Result<TextureHandle, TextureError>) -> bool {
        let Some(target) = self.instances.get_mut(instance) else {
            tracing::debug!(?instance, "texture completed for a discarded instance");
            return false;
        };
        target.material.resolve(outcome)
    }

    /// What to draw this frame, in insertion order.
    #[must_use]
    pub fn render(&self) -> Vec<RenderItem> {
        self.order
            .iter()
            .filter_map(|&id| self.instances.get(id).map(|i| i.render(id, &self.neutral_edge)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::interaction::MeshHighlight;
    use crate::material::Material;
    use crate::math::ray::Ray;
    use crate::math::{Point2, Point3, Vector3};
    use crate::shape::{Niche, ShapeDefinition};
    use crate::solid::{BuildCuboid, BuildExtrusion};

    fn shelf_spec() -> BoxSpec {
        BoxSpec::new(100.0, 10.0, 70.0, Point3::origin())
            .with_edge_style("red", "blue", 2.0)
            .with_selectable([7])
    }

    fn shelf(scene: &mut Scene) -> InstanceId {
        let spec = shelf_spec();
        let solid = Rc::new(BuildCuboid::new(&spec).execute().unwrap());
        scene.insert_box(solid, spec)
    }

    fn slab() -> Rc<Solid> {
        let outline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        Rc::new(BuildExtrusion::new(outline, 2.0).execute().unwrap())
    }

    fn textured_style() -> WholeMeshStyle {
        WholeMeshStyle {
            texture: Some(TextureSpec::new("brick.png")),
            ..WholeMeshStyle::new("blue")
        }
    }

    #[test]
    fn hovering_selectable_edge_then_click_emits_selection() {
        let mut scene = Scene::new();
        let id = shelf(&mut scene);
        // Top face near its back edge.
        let ray = Ray::new(Point3::new(0.0, 50.0, 69.0), -Vector3::y());
        scene.tick(&PointerSample::Ray(ray));
        assert_eq!(scene.hovered_edge(id), Some(EdgeId(7)));
        assert_eq!(scene.click(), vec![EdgeSelected { instance: id, edge: EdgeId(7) }]);

        let item = &scene.render()[0];
        let seven = item.edges.iter().find(|e| e.id == EdgeId(7)).unwrap();
        assert_eq!(seven.style, EdgeStyle::new("blue", 2.0));
    }

    #[test]
    fn resolved_hit_only_hovers_the_touched_box() {
        let mut scene = Scene::new();
        let params = [("width", 100.0), ("height", 180.0), ("depth", 70.0)]
            .into_iter()
            .collect();
        let ids: Vec<_> = Niche
            .geometry(&params)
            .unwrap()
            .into_iter()
            .map(|spec| {
                let solid = Rc::new(BuildCuboid::new(&spec).execute().unwrap());
                scene.insert_box(solid, spec)
            })
            .collect();

        // On the shelf's top back edge, away from every other box.
        scene.tick(&PointerSample::Hit(Point3::new(0.0, 10.0, 70.0)));
        assert_eq!(scene.hovered_edge(ids[0]), Some(EdgeId(7)));
        assert!(ids[1..].iter().all(|&id| scene.hovered_edge(id).is_none()));
        assert_eq!(scene.click(), vec![EdgeSelected { instance: ids[0], edge: EdgeId(7) }]);
        assert!(matches!(
            scene.kind(ids[3]),
            Some(InstanceKind::SelectableBox(spec)) if spec.selectable_edge.is_empty()
        ));
    }

    #[test]
    fn click_without_hover_is_a_no_op() {
        let mut scene = Scene::new();
        shelf(&mut scene);
        scene.tick(&PointerSample::Miss);
        assert!(scene.click().is_empty());
    }

    #[test]
    fn textured_mesh_falls_back_then_swaps() {
        let mut scene = Scene::new();
        let (id, request) = scene.insert_whole_mesh(slab(), textured_style());
        let request = request.unwrap();
        assert_eq!(request.instance, id);
        assert_eq!(scene.render()[0].material, Material::flat("blue"));

        assert!(scene.complete_texture(id, Ok(TextureHandle(3))));
        assert!(matches!(scene.render()[0].material, Material::Textured { texture: TextureHandle(3), .. }));
    }

    #[test]
    fn late_completion_for_removed_instance_is_ignored() {
        let mut scene = Scene::new();
        let (old, request) = scene.insert_whole_mesh(slab(), textured_style());
        assert!(scene.remove(old));
        let (fresh, _) = scene.insert_whole_mesh(slab(), textured_style());

        assert!(!scene.complete_texture(request.unwrap().instance, Ok(TextureHandle(1))));
        assert!(!scene.contains(old));
        assert_eq!(scene.render()[0].id, fresh);
        assert_eq!(scene.render()[0].material, Material::flat("blue"));
    }

    #[test]
    fn failed_texture_keeps_mesh_interactive() {
        let mut scene = Scene::new();
        let (id, _) = scene.insert_whole_mesh(slab(), textured_style());
        let err = TextureError::Load {
            url: "brick.png".into(),
            reason: "timeout".into(),
        };
        assert!(!scene.complete_texture(id, Err(err)));
        scene.tick(&PointerSample::Hit(Point3::new(5.0, 5.0, 0.0)));
        assert!(scene.is_hovered(id));
        let item = &scene.render()[0];
        assert_eq!(item.outline.as_ref().unwrap(), &MeshHighlight::default().hover);
    }

    #[test]
    fn enter_and_leave_events_toggle_whole_mesh() {
        let mut scene = Scene::new();
        let (id, request) = scene.insert_whole_mesh(slab(), WholeMeshStyle::new("grey"));
        assert!(request.is_none());
        assert!(matches!(scene.kind(id), Some(InstanceKind::WholeMesh(_))));
        scene.pointer_enter(id);
        assert!(scene.is_hovered(id));
        assert!(scene.render()[0].edges.iter().all(|e| e.style.color.as_str() == "#c02040"));
        scene.pointer_leave(id);
        assert!(!scene.is_hovered(id));
    }
}
