/// Error taxonomy for the transform pipeline
use thiserror::Error;

/// Failures raised while building or inverting transform matrices
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("matrix is singular (determinant {determinant})")]
    Singular { determinant: f32 },
    #[error("invalid projection parameters: {0}")]
    InvalidProjection(String),
}

/// Failures that abort a single frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
}
