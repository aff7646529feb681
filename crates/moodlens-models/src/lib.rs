//! Shared data models for the MoodLens emotion service.
//!
//! This crate provides Serde-serializable types for:
//! - Emotion labels and their canonical ordering
//! - Prediction results (top label, confidence, per-label scores)

pub mod label;
pub mod prediction;

// Re-export common types
pub use label::{EmotionLabel, EmotionLabelParseError};
pub use prediction::Prediction;
