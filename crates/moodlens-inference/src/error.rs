//! Error types for inference operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Errors that can occur while normalizing images or scoring emotions.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Invalid model output: {0}")]
    InvalidOutput(String),

    #[error("Inference session error: {0}")]
    Session(String),
}

impl InferenceError {
    /// Create a model load error.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create a session error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }
}
