//! Fixture families: pure mappings from a parameter set to box specs.

mod box_spec;
mod niche;
mod template;

pub use box_spec::{BoxSpec, Color, EdgeId};
pub use niche::Niche;
pub use template::Template;

use crate::error::{Result, TemplateError};
use crate::params::ParameterSet;

/// One fixture family.
///
/// `geometry` must be deterministic and side-effect free. A family that does
/// not override it reports [`TemplateError::GeometryNotImplemented`].
pub trait ShapeDefinition {
    /// Name written into the parameter document.
    fn template_name(&self) -> &str;

    /// Ordered box specs for `params`.
    ///
    /// # Errors
    ///
    /// The default implementation always fails; families return
    /// parameter errors for missing keys.
    fn geometry(&self, _params: &ParameterSet) -> Result<Vec<BoxSpec>> {
        Err(TemplateError::GeometryNotImplemented {
            template: self.template_name().to_owned(),
        }
        .into())
    }
}

/// Looks up a built-in family by template name.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownFamily`] for unregistered names.
pub fn family(name: &str) -> Result<Box<dyn ShapeDefinition>> {
    match name {
        Niche::TEMPLATE => Ok(Box::new(Niche)),
        other => Err(TemplateError::UnknownFamily(other.to_owned()).into()),
    }
}
