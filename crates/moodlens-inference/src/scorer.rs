//! Emotion scoring on normalized tensors.

use ndarray::Array4;

use moodlens_models::{EmotionLabel, Prediction};

use crate::classifier::EmotionModel;
use crate::error::{InferenceError, InferenceResult};

/// How far a score sum may drift from 1 before the output is treated as
/// logits rather than probabilities.
const SUM_TOLERANCE: f32 = 1e-3;

/// Score a normalized tensor and map the result to labeled confidences.
///
/// The returned prediction carries the top label, its confidence, and the
/// full label-to-score map; scores always form a probability distribution.
pub fn predict(model: &dyn EmotionModel, input: &Array4<f32>) -> InferenceResult<Prediction> {
    let mut scores = model.scores(input)?;

    if scores.len() != EmotionLabel::COUNT {
        return Err(InferenceError::invalid_output(format!(
            "expected {} scores, got {}",
            EmotionLabel::COUNT,
            scores.len()
        )));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(InferenceError::invalid_output(
            "score vector contains non-finite values",
        ));
    }

    // Models exported without the trailing softmax emit logits.
    let sum: f32 = scores.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        softmax(&mut scores);
    }

    Prediction::from_scores(&scores)
        .ok_or_else(|| InferenceError::invalid_output("score vector could not be labeled"))
}

/// Numerically stable in-place softmax.
fn softmax(scores: &mut [f32]) {
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0;
    for s in scores.iter_mut() {
        *s = (*s - max).exp();
        sum += *s;
    }
    for s in scores.iter_mut() {
        *s /= sum;
    }
}
