pub mod config;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod material;
pub mod math;
pub mod params;
pub mod scene;
pub mod shape;
pub mod solid;
pub mod tessellation;

pub use config::{EditorConfig, RenderMode};
pub use editor::{Editor, EditorView};
pub use error::{RecessError, Result};
