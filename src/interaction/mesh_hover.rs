use crate::solid::Solid;

use super::PointerSample;

/// Whole-mesh hover flag, used by solids without selectable edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshHover {
    hovered: bool,
}

impl MeshHover {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Hovered when the sample meets the solid.
    pub fn tick(&mut self, solid: &Solid, pointer: &PointerSample) -> bool {
        self.hovered = pointer.resolve(solid).is_some();
        self.hovered
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }
}
