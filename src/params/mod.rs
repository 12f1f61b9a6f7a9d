//! Named dimensional parameters of a shape instance.
//!
//! Values are stored in an internal unit one tenth of the display unit:
//! the UI edits millimetres, the geometry consumes centimetres.

mod set;
mod store;
mod view;

pub use set::ParameterSet;
pub use store::ParameterStore;
pub use view::{ParameterDocument, ParameterField, ParameterView};

/// Display value = raw value × `DISPLAY_SCALE`.
pub const DISPLAY_SCALE: f64 = 10.0;

/// Unit reported for every displayed value.
pub const MEASUREMENT_UNIT: &str = "mm";
