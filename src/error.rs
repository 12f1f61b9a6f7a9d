use thiserror::Error;

/// Top-level error type for the recess kernel.
#[derive(Debug, Error)]
pub enum RecessError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while editing or serializing a parameter set.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter {name} = {value} is not a finite number")]
    NonFinite { name: String, value: f64 },

    #[error("parameter {0} is missing")]
    Missing(String),

    #[error("unsupported measurement unit {0:?}")]
    UnsupportedUnit(String),

    #[error("malformed parameter document: {0}")]
    Malformed(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised when a template cannot produce geometry.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {template:?} does not implement define_geometry")]
    GeometryNotImplemented { template: String },

    #[error("unknown shape family {0:?}")]
    UnknownFamily(String),
}

/// Errors related to geometric preconditions.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{dimension} must be positive, got {value}")]
    NonPositiveDimension { dimension: &'static str, value: f64 },

    #[error("edge id {0} is outside the canonical range 1..=12")]
    EdgeOutOfRange(u32),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to solid-building operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Failure reported by the external texture loader.
///
/// Never fatal: the owning solid keeps its flat fallback material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("failed to load texture {url}: {reason}")]
    Load { url: String, reason: String },
}

/// Convenience type alias for results using [`RecessError`].
pub type Result<T> = std::result::Result<T, RecessError>;
