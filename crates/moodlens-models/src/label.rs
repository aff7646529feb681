//! Emotion label definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The seven emotion classes the classifier was trained on.
///
/// Declaration order matches the FER-2013 class folder order (alphabetical),
/// which is the order the classifier emits its scores in. Index i of a score
/// vector corresponds to `EmotionLabel::ALL[i]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum EmotionLabel {
    Angry,
    Disgust,
    Fear,
    Happy,
    Neutral,
    Sad,
    Surprise,
}

impl EmotionLabel {
    /// All labels in classifier output order.
    pub const ALL: &'static [EmotionLabel] = &[
        EmotionLabel::Angry,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happy,
        EmotionLabel::Neutral,
        EmotionLabel::Sad,
        EmotionLabel::Surprise,
    ];

    /// Number of emotion classes.
    pub const COUNT: usize = Self::ALL.len();

    /// Label for a classifier output index, if in range.
    pub fn from_index(index: usize) -> Option<EmotionLabel> {
        Self::ALL.get(index).copied()
    }

    /// Position of this label in the classifier output.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Fear => "Fear",
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Surprise => "Surprise",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = EmotionLabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angry" => Ok(EmotionLabel::Angry),
            "disgust" => Ok(EmotionLabel::Disgust),
            "fear" => Ok(EmotionLabel::Fear),
            "happy" => Ok(EmotionLabel::Happy),
            "neutral" => Ok(EmotionLabel::Neutral),
            "sad" => Ok(EmotionLabel::Sad),
            "surprise" => Ok(EmotionLabel::Surprise),
            _ => Err(EmotionLabelParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown emotion label: {0}")]
pub struct EmotionLabelParseError(String);
