//! Image normalization and ONNX emotion scoring.
//!
//! Two stages compose the inference path:
//! - [`normalizer`]: raw encoded image bytes -> 48x48 grayscale `[0,1]` tensor
//! - [`scorer`]: normalized tensor -> per-label scores -> [`Prediction`]
//!
//! The classifier is loaded once and shared read-only for the process
//! lifetime; see [`classifier::OnnxClassifier`].
//!
//! [`Prediction`]: moodlens_models::Prediction

pub mod classifier;
pub mod error;
pub mod normalizer;
pub mod scorer;

pub use classifier::{EmotionModel, OnnxClassifier};
pub use error::{InferenceError, InferenceResult};
pub use normalizer::{normalize, INPUT_SIZE};
pub use scorer::predict;
