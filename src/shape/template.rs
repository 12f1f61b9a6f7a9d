use crate::error::Result;
use crate::params::{ParameterSet, ParameterStore, ParameterView};

use super::{family, BoxSpec, ShapeDefinition};

/// A parameter store bound to the family that turns it into geometry.
pub struct Template {
    store: ParameterStore,
    definition: Box<dyn ShapeDefinition>,
}

impl Template {
    /// Binds `initial` to `definition` and checks that the family can
    /// produce geometry for it.
    ///
    /// # Errors
    ///
    /// Fails if the family does not implement geometry or rejects the
    /// initial parameters; nothing should be rendered in that case.
    pub fn new(definition: Box<dyn ShapeDefinition>, initial: ParameterSet) -> Result<Self> {
        definition.geometry(&initial)?;
        let store = ParameterStore::new(initial, definition.template_name());
        Ok(Self { store, definition })
    }

    /// Builds a template for a registered family name.
    ///
    /// # Errors
    ///
    /// Fails for unknown families or unusable parameters.
    pub fn for_family(name: &str, initial: ParameterSet) -> Result<Self> {
        Self::new(family(name)?, initial)
    }

    #[must_use]
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    #[must_use]
    pub fn definition(&self) -> &dyn ShapeDefinition {
        self.definition.as_ref()
    }

    /// Box specs for the current parameters.
    ///
    /// # Errors
    ///
    /// Propagates family errors.
    pub fn define_geometry(&self) -> Result<Vec<BoxSpec>> {
        self.definition.geometry(self.store.parameters())
    }

    /// Convenience for [`ParameterStore::parameter_view`].
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn parameter_view(&self) -> Result<ParameterView> {
        self.store.parameter_view()
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("template", &self.definition.template_name())
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{RecessError, TemplateError};

    struct Abstract;

    impl ShapeDefinition for Abstract {
        fn template_name(&self) -> &str {
            "default"
        }
    }

    fn niche_params() -> ParameterSet {
        [("width", 100.0), ("height", 180.0), ("depth", 70.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn construction_fails_without_geometry() {
        let err = Template::new(Box::new(Abstract), niche_params()).unwrap_err();
        assert!(matches!(
            err,
            RecessError::Template(TemplateError::GeometryNotImplemented { .. })
        ));
    }

    #[test]
    fn edits_flow_into_geometry() {
        let mut template = Template::for_family("niche", niche_params()).unwrap();
        assert_eq!(template.store().template_name(), "niche");
        template.store_mut().set_parameter("width", 2000.0).unwrap();
        let boxes = template.define_geometry().unwrap();
        assert!((boxes[0].width - 200.0).abs() < 1e-9);
        assert!((boxes[2].position.x - 105.0).abs() < 1e-9);
    }
}
