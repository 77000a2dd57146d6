//! Render-time configuration errors.

use thiserror::Error;

/// Errors raised before any pixel is traced.
///
/// Degenerate geometry is never an error: the intersection routines
/// resolve it to a miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("scene has no camera; call Scene::set_camera before rendering")]
    MissingCamera,

    #[error("scene has no primitives")]
    EmptyScene,

    #[error("invalid camera resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("camera eye and look-at point coincide; no view direction")]
    DegenerateView,
}

pub type Result<T> = std::result::Result<T, RenderError>;
