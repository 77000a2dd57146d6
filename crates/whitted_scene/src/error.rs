//! Scene loading errors.

use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Triangle at object {index} has {count} vertices, expected 3")]
    InvalidTriangle { index: usize, count: usize },

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Scene has no camera")]
    MissingCamera,
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;
