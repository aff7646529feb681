//! ONNX-backed emotion classifier.
//!
//! Wraps an ONNX Runtime session behind the [`EmotionModel`] seam so scoring
//! logic and HTTP handlers can be exercised with stub models.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, Value};
use tracing::info;

use moodlens_models::EmotionLabel;

use crate::error::{InferenceError, InferenceResult};
use crate::normalizer::INPUT_SIZE;

/// Anything that maps a normalized tensor to per-label scores.
pub trait EmotionModel: Send + Sync {
    /// Raw scores in classifier output order, one per emotion label.
    fn scores(&self, input: &Array4<f32>) -> InferenceResult<Vec<f32>>;
}

/// Emotion classifier backed by an ONNX Runtime session.
///
/// The session is created once at load and never mutated afterwards; `run`
/// serializes through an internal mutex because the ort session API requires
/// exclusive access per invocation.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    /// Load the classifier from an ONNX model file.
    ///
    /// Returns [`InferenceError::ModelNotFound`] if the file is absent and
    /// [`InferenceError::ModelLoad`] on any runtime failure. A warm-up pass
    /// validates that the model emits exactly one score per emotion label
    /// before the classifier is handed out.
    pub fn load(model_path: &Path) -> InferenceResult<Self> {
        if !model_path.exists() {
            return Err(InferenceError::ModelNotFound(model_path.to_path_buf()));
        }

        let model_bytes = std::fs::read(model_path)
            .map_err(|e| InferenceError::model_load(format!("read model file: {e}")))?;

        let session = Session::builder()
            .map_err(|e| InferenceError::model_load(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::model_load(format!("optimization level: {e}")))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| InferenceError::model_load(format!("load ONNX model: {e}")))?;

        let classifier = Self {
            session: Mutex::new(session),
        };

        // Warm-up pass doubles as an output-shape check: a model that does
        // not emit one score per label would silently mislabel predictions.
        let size = INPUT_SIZE as usize;
        let probe = Array4::<f32>::zeros((1, size, size, 1));
        let emitted = classifier.run(&probe)?.len();
        if emitted != EmotionLabel::COUNT {
            return Err(InferenceError::invalid_output(format!(
                "model emits {emitted} scores, expected {} (one per emotion label)",
                EmotionLabel::COUNT
            )));
        }

        info!(
            model_path = %model_path.display(),
            classes = EmotionLabel::COUNT,
            "Emotion classifier initialized"
        );

        Ok(classifier)
    }

    /// Run one forward pass.
    fn run(&self, input: &Array4<f32>) -> InferenceResult<Vec<f32>> {
        let shape: Vec<usize> = input.shape().to_vec();
        let data: Vec<f32> = input.iter().copied().collect();
        let tensor: Value = Tensor::from_array((shape, data.into_boxed_slice()))
            .map(Value::from)
            .map_err(|e| InferenceError::session(format!("create input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::session("session lock poisoned"))?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| InferenceError::session(format!("inference failed: {e}")))?;

        let (_, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| InferenceError::invalid_output("model returned no outputs"))?;

        let extracted = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::invalid_output(format!("extract output tensor: {e}")))?;

        Ok(extracted.1.to_vec())
    }
}

impl EmotionModel for OnnxClassifier {
    fn scores(&self, input: &Array4<f32>) -> InferenceResult<Vec<f32>> {
        self.run(input)
    }
}
