//! Error type for render requests.

use lumen_math::GeometryError;
use thiserror::Error;

/// Errors that abort a render.
///
/// A failed render never delivers buffers to the observer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error("Degenerate geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
