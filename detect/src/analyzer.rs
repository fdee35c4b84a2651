//! Analyzer variants.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use voxcheck_acoustic::extract_features;
use voxcheck_llm::{GenerateRequest, Generator, LlmError};

use crate::parse::{parse_detection, ParseError};
use crate::prompt;
use crate::retry::RetryPolicy;
use crate::types::Detection;

/// One failed attempt inside the retry loop. Both kinds are retryable.
#[derive(Debug, Error)]
enum AttemptError {
    #[error("{0}")]
    Llm(#[from] LlmError),
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Common contract for the detector variants.
///
/// Infallible by construction: exhausted retries and impossible analysis
/// degrade to [`Detection::fallback`], so callers never handle detection
/// errors.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Classifies a clip of MP3 bytes.
    async fn analyze(&self, audio: &[u8]) -> Detection;
}

/// Runs the attempt loop shared by both variants.
async fn analyze_with(
    generator: &dyn Generator,
    policy: &RetryPolicy,
    req: &GenerateRequest,
) -> Detection {
    let result = policy
        .run(|_attempt| async move {
            let reply = generator.generate(req).await.map_err(AttemptError::Llm)?;
            parse_detection(&reply).map_err(AttemptError::from)
        })
        .await;

    match result {
        Ok(detection) => detection,
        Err(e) => {
            tracing::warn!("all detection attempts failed, using fallback: {}", e);
            Detection::fallback()
        }
    }
}

/// Variant A: ships the clip itself to a multimodal backend as inline
/// `audio/mp3` data.
pub struct AudioAnalyzer {
    generator: Arc<dyn Generator>,
    policy: RetryPolicy,
}

impl AudioAnalyzer {
    /// Creates an analyzer with the default retry policy.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self::with_policy(generator, RetryPolicy::default())
    }

    /// Creates an analyzer with an explicit retry policy.
    pub fn with_policy(generator: Arc<dyn Generator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }
}

#[async_trait]
impl Analyzer for AudioAnalyzer {
    async fn analyze(&self, audio: &[u8]) -> Detection {
        let req = GenerateRequest::new()
            .text(prompt::audio_prompt())
            .blob("audio/mp3", audio.to_vec());
        analyze_with(self.generator.as_ref(), &self.policy, &req).await
    }
}

/// Variant B: reduces the clip to scalar acoustic descriptors and sends a
/// text-only summary. The audio never leaves the process.
pub struct FeatureAnalyzer {
    generator: Arc<dyn Generator>,
    policy: RetryPolicy,
}

impl FeatureAnalyzer {
    /// Creates an analyzer with the default retry policy.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self::with_policy(generator, RetryPolicy::default())
    }

    /// Creates an analyzer with an explicit retry policy.
    pub fn with_policy(generator: Arc<dyn Generator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }
}

#[async_trait]
impl Analyzer for FeatureAnalyzer {
    async fn analyze(&self, audio: &[u8]) -> Detection {
        // Extraction failure is not retryable: the clip will not get more
        // decodable, so fall back without burning LLM attempts.
        let features = match extract_features(audio) {
            Ok(features) => features,
            Err(e) => {
                tracing::warn!("feature extraction failed, using fallback: {}", e);
                return Detection::fallback();
            }
        };

        let req = GenerateRequest::new().text(prompt::feature_prompt(&features));
        analyze_with(self.generator.as_ref(), &self.policy, &req).await
    }
}
