//! Detection result types.

use serde::{Deserialize, Serialize};

/// Explanation attached to the fallback result.
pub const FALLBACK_EXPLANATION: &str =
    "Analysis failed due to repeated errors. Defaulting to Human classification.";

/// The two-value verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// The voice is synthetic.
    AiGenerated,
    /// The voice is (or is presumed) human.
    Human,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::AiGenerated => write!(f, "AI_GENERATED"),
            Classification::Human => write!(f, "HUMAN"),
        }
    }
}

/// The JSON shape the LLM is instructed to return. Untrusted until it
/// deserializes; extra fields are ignored, missing or mistyped fields fail.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionResult {
    /// True if the voice is AI-generated.
    pub is_ai_generated: bool,
    /// Confidence between 0.0 and 1.0 (clamped on conversion).
    pub confidence_score: f64,
    /// Short explanation of the decision.
    pub explanation: String,
}

/// A validated detection outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// The verdict.
    pub classification: Classification,
    /// Confidence in [0.0, 1.0].
    pub confidence_score: f64,
    /// Short human-readable reason.
    pub explanation: String,
}

impl Detection {
    /// The result returned when analysis cannot be completed.
    ///
    /// Biased toward HUMAN: when the detector is uncertain or broken it must
    /// not accuse a real person of being synthetic.
    pub fn fallback() -> Self {
        Self {
            classification: Classification::Human,
            confidence_score: 0.0,
            explanation: FALLBACK_EXPLANATION.to_string(),
        }
    }
}

impl From<DetectionResult> for Detection {
    fn from(result: DetectionResult) -> Self {
        Self {
            classification: if result.is_ai_generated {
                Classification::AiGenerated
            } else {
                Classification::Human
            },
            confidence_score: result.confidence_score.clamp(0.0, 1.0),
            explanation: result.explanation,
        }
    }
}
