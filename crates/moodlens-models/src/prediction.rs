//! Prediction result types.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::label::EmotionLabel;

/// A classified emotion with its confidence and the full per-label score map.
///
/// Serializes to the wire shape the frontend consumes:
/// `{"mood": "Happy", "confidence": 0.93, "all_scores": {"Angry": ..., ...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Prediction {
    /// Top-scoring emotion label
    pub mood: EmotionLabel,
    /// Score of the top label, in [0, 1]
    pub confidence: f32,
    /// Score for every label; keys iterate in classifier output order
    pub all_scores: BTreeMap<EmotionLabel, f32>,
}

impl Prediction {
    /// Build a prediction from a score vector in classifier output order.
    ///
    /// Returns `None` unless exactly one score per label is provided.
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        if scores.len() != EmotionLabel::COUNT {
            return None;
        }

        let (max_index, max_score) = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))?;

        let mood = EmotionLabel::from_index(max_index)?;
        let all_scores = EmotionLabel::ALL
            .iter()
            .zip(scores.iter())
            .map(|(label, score)| (*label, *score))
            .collect();

        Some(Self {
            mood,
            confidence: *max_score,
            all_scores,
        })
    }
}
