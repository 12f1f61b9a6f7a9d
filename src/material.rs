//! Surface materials and the texture-loading contract.
//!
//! Texture loading happens outside the kernel. A textured solid renders
//! with its flat fallback until the loader reports back; a failed load is
//! logged and the fallback stays.

use serde::{Deserialize, Serialize};

use crate::error::TextureError;
use crate::shape::Color;

/// Default UV repeat for tiled textures.
pub const DEFAULT_TEXTURE_REPEAT: [f64; 2] = [0.01, 0.01];

/// Opaque handle to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// Where to fetch a texture and how to tile it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSpec {
    pub url: String,
    #[serde(default = "default_repeat")]
    pub repeat: [f64; 2],
}

fn default_repeat() -> [f64; 2] {
    DEFAULT_TEXTURE_REPEAT
}

impl TextureSpec {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            repeat: DEFAULT_TEXTURE_REPEAT,
        }
    }
}

/// Static optical parameters of the transparent rendering variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMaterial {
    pub color: Color,
    pub roughness: f64,
    pub metalness: f64,
    pub ior: f64,
    pub clearcoat: f64,
    pub clearcoat_roughness: f64,
    pub transmission: f64,
    pub reflectivity: f64,
    pub thickness: f64,
    pub env_map_intensity: f64,
}

impl PhysicalMaterial {
    /// Frosted-glass preset used for transparent solids.
    #[must_use]
    pub fn transparent() -> Self {
        Self {
            color: "#99ccff".into(),
            roughness: 1.0,
            metalness: 0.0,
            ior: 1.5,
            clearcoat: 1.0,
            clearcoat_roughness: 0.1,
            transmission: 0.8,
            reflectivity: 0.05,
            thickness: 0.001,
            env_map_intensity: 0.0,
        }
    }
}

/// Material a solid is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    Flat {
        color: Color,
    },
    Textured {
        texture: TextureHandle,
        repeat: [f64; 2],
        roughness: f64,
        metalness: f64,
    },
    Physical(PhysicalMaterial),
}

impl Material {
    #[must_use]
    pub fn flat(color: impl Into<Color>) -> Self {
        Self::Flat { color: color.into() }
    }
}

/// A solid's current material plus the texture it is waiting for.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSlot {
    current: Material,
    pending: Option<TextureSpec>,
}

impl MaterialSlot {
    #[must_use]
    pub fn new(material: Material) -> Self {
        Self {
            current: material,
            pending: None,
        }
    }

    /// A flat-colored slot that will switch to `texture` once it loads.
    #[must_use]
    pub fn awaiting(fallback: Color, texture: TextureSpec) -> Self {
        Self {
            current: Material::Flat { color: fallback },
            pending: Some(texture),
        }
    }

    #[must_use]
    pub fn current(&self) -> &Material {
        &self.current
    }

    #[must_use]
    pub fn pending(&self) -> Option<&TextureSpec> {
        self.pending.as_ref()
    }

    /// Applies the loader's outcome. Returns `true` if the material changed.
    ///
    /// Outcomes arriving when nothing is pending are ignored.
    pub fn resolve(&mut self, outcome: Result<TextureHandle, TextureError>) -> bool {
        let Some(spec) = self.pending.take() else {
            tracing::debug!("texture completion with nothing pending, ignoring");
            return false;
        };
        match outcome {
            Ok(texture) => {
                tracing::debug!(url = %spec.url, ?texture, "texture loaded");
                self.current = Material::Textured {
                    texture,
                    repeat: spec.repeat,
                    roughness: 1.0,
                    metalness: 0.0,
                };
                true
            }
            Err(err) => {
                tracing::error!(url = %spec.url, error = %err, "texture load failed, keeping flat material");
                false
            }
        }
    }
}
