use std::cell::Cell;
use std::rc::Rc;

use crate::config::{EditorConfig, RenderMode};
use crate::error::Result;
use crate::interaction::PointerSample;
use crate::params::{ParameterField, ParameterSet};
use crate::scene::{EdgeSelected, InstanceId, RenderItem, Scene, WholeMeshStyle};
use crate::shape::{BoxSpec, Template};
use crate::solid::{Solid, SolidCache};

/// What the editor shows.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorView {
    /// Only the parameter document.
    Json(String),
    /// Numeric inputs, parameter document and the 3D scene.
    Full {
        fields: Vec<ParameterField>,
        json: String,
        items: Vec<RenderItem>,
    },
}

/// Live editor for one template: parameter edits rebuild the scene
/// synchronously, pointer ticks drive hover and clicks select edges.
#[derive(Debug)]
pub struct Editor {
    template: Template,
    config: EditorConfig,
    scene: Scene,
    cache: SolidCache,
    boxes: Vec<BoxSpec>,
    instances: Vec<InstanceId>,
    changed: Rc<Cell<bool>>,
}

impl Editor {
    /// Takes over `template` and builds the initial scene.
    ///
    /// The editor installs itself as the store's change handler, replacing
    /// any handler registered before.
    ///
    /// # Errors
    ///
    /// Fails if the initial geometry cannot be built.
    pub fn new(mut template: Template, config: EditorConfig) -> Result<Self> {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        template.store_mut().set_change_handler(move |_| flag.set(true));

        let mut editor = Self {
            template,
            scene: Scene::with_neutral_edge(config.neutral_edge.clone()),
            config,
            cache: SolidCache::new(),
            boxes: Vec::new(),
            instances: Vec::new(),
            changed,
        };
        editor.rebuild()?;
        Ok(editor)
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Box specs currently on screen.
    #[must_use]
    pub fn boxes(&self) -> &[BoxSpec] {
        &self.boxes
    }

    /// Scene instances in box order.
    #[must_use]
    pub fn instances(&self) -> &[InstanceId] {
        &self.instances
    }

    /// Applies a UI edit given in display units.
    ///
    /// # Errors
    ///
    /// Fails for non-finite values or if the new parameters produce invalid
    /// geometry. The store and the scene keep their previous state then.
    pub fn set_parameter(&mut self, name: &str, display_value: f64) -> Result<()> {
        let snapshot = self.template.store().parameters().clone();
        self.template.store_mut().set_parameter(name, display_value)?;
        self.after_edit(snapshot)
    }

    /// Merges raw values into the parameter set.
    ///
    /// # Errors
    ///
    /// Fails if the new parameters produce invalid geometry. The store and
    /// the scene keep their previous state then.
    pub fn set_parameters(&mut self, partial: &ParameterSet) -> Result<()> {
        let snapshot = self.template.store().parameters().clone();
        self.template.store_mut().set_parameters(partial);
        self.after_edit(snapshot)
    }

    /// Per-frame pointer update.
    pub fn tick(&mut self, pointer: &PointerSample) {
        self.scene.tick(pointer);
    }

    /// Click event.
    pub fn click(&self) -> Vec<EdgeSelected> {
        self.scene.click()
    }

    /// Current view, honoring the JSON-only flag.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn view(&self) -> Result<EditorView> {
        let view = self.template.parameter_view()?;
        if self.config.json_view {
            return Ok(EditorView::Json(view.json));
        }
        Ok(EditorView::Full {
            fields: view.fields,
            json: view.json,
            items: self.scene.render(),
        })
    }

    fn after_edit(&mut self, snapshot: ParameterSet) -> Result<()> {
        if !self.changed.replace(false) {
            return Ok(());
        }
        // Any edit leaves the JSON-only view.
        self.config.json_view = false;
        if let Err(err) = self.rebuild() {
            tracing::warn!(error = %err, "rejected parameter edit");
            self.template.store_mut().restore(snapshot);
            return Err(err);
        }
        Ok(())
    }

    fn rebuild(&mut self) -> Result<()> {
        let boxes = self.template.define_geometry()?;
        let solids = boxes
            .iter()
            .map(|spec| self.cache.get_or_build(spec))
            .collect::<Result<Vec<Rc<Solid>>>>()?;

        for id in self.instances.drain(..) {
            self.scene.remove(id);
        }
        for (spec, solid) in boxes.iter().zip(solids) {
            let id = match self.config.render_mode {
                RenderMode::SelectableEdges => self.scene.insert_box(solid, spec.clone()),
                RenderMode::WholeMesh | RenderMode::Transparent => {
                    let style = WholeMeshStyle {
                        highlight: self.config.mesh_highlight.clone(),
                        transparent: self.config.render_mode == RenderMode::Transparent,
                        ..WholeMeshStyle::new(spec.color.clone())
                    };
                    self.scene.insert_whole_mesh(solid, style).0
                }
            };
            self.instances.push(id);
        }
        self.cache.retain(&boxes);

        tracing::debug!(
            template = self.template.store().template_name(),
            boxes = boxes.len(),
            cached = self.cache.len(),
            "rebuilt geometry"
        );
        self.boxes = boxes;
        Ok(())
    }
}
