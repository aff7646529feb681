//! Application state.

use std::sync::Arc;

use tracing::warn;

use moodlens_inference::{EmotionModel, InferenceError, OnnxClassifier};

use crate::config::ApiConfig;

/// Shared application state.
///
/// The classifier is loaded once here and treated as read-only shared state
/// for the process lifetime; there is no reload path.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub model: Option<Arc<dyn EmotionModel>>,
}

impl AppState {
    /// Create new application state, attempting the one startup model load.
    ///
    /// A missing model file leaves the service running with the classifier
    /// unloaded; predictions then fail fast with 503 until restart. A model
    /// file that exists but cannot be loaded aborts startup instead.
    pub fn new(config: ApiConfig) -> Result<Self, InferenceError> {
        let model = match OnnxClassifier::load(&config.model_path) {
            Ok(classifier) => Some(Arc::new(classifier) as Arc<dyn EmotionModel>),
            Err(InferenceError::ModelNotFound(path)) => {
                warn!(
                    model_path = %path.display(),
                    "Model file not found; serving without a classifier"
                );
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self { config, model })
    }

    /// Build state around an already-constructed model.
    pub fn with_model(config: ApiConfig, model: Option<Arc<dyn EmotionModel>>) -> Self {
        Self { config, model }
    }
}
