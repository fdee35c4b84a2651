//! Environment-driven configuration.

use std::sync::Arc;

use clap::ValueEnum;
use thiserror::Error;

use voxcheck_detect::{Analyzer, AudioAnalyzer, FeatureAnalyzer};
use voxcheck_llm::gemini::{GeminiConfig, GeminiGenerator};
use voxcheck_llm::openai::{OpenAiConfig, OpenAiGenerator};

/// Configuration error raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Detector backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Gemini multimodal: the (trimmed) audio itself is sent to the model.
    GeminiAudio,
    /// OpenAI-compatible: only extracted acoustic features are sent.
    OpenaiFeatures,
}

/// Backend-specific credentials and model choice.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    GeminiAudio(GeminiConfig),
    OpenaiFeatures(OpenAiConfig),
}

/// Resolved server configuration.
///
/// The caller-auth secret has no default: an unset `VOXCHECK_API_KEY` fails
/// startup instead of silently accepting a well-known test value.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Shared secret compared against the `x-api-key` header.
    pub api_key: String,
    /// Selected detector backend with its credentials.
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Loads configuration from the environment for the chosen backend.
    ///
    /// Environment variables:
    /// - `VOXCHECK_API_KEY` (required)
    /// - `GEMINI_API_KEY` (required for `gemini-audio`), `GEMINI_MODEL`
    /// - `OPENAI_API_KEY` (required for `openai-features`),
    ///   `OPENAI_BASE_URL`, `OPENAI_MODEL`
    pub fn from_env(backend: Backend) -> Result<Self, ConfigError> {
        let api_key = require("VOXCHECK_API_KEY")?;
        let backend = match backend {
            Backend::GeminiAudio => BackendConfig::GeminiAudio(GeminiConfig {
                api_key: require("GEMINI_API_KEY")?,
                model: env_or("GEMINI_MODEL", GeminiConfig::default().model),
            }),
            Backend::OpenaiFeatures => {
                let defaults = OpenAiConfig::default();
                BackendConfig::OpenaiFeatures(OpenAiConfig {
                    api_key: require("OPENAI_API_KEY")?,
                    base_url: env_or("OPENAI_BASE_URL", defaults.base_url),
                    model: env_or("OPENAI_MODEL", defaults.model),
                })
            }
        };
        Ok(Self { api_key, backend })
    }

    /// Builds the analyzer for the configured backend.
    pub fn build_analyzer(&self) -> Arc<dyn Analyzer> {
        match &self.backend {
            BackendConfig::GeminiAudio(cfg) => Arc::new(AudioAnalyzer::new(Arc::new(
                GeminiGenerator::new(cfg.clone()),
            ))),
            BackendConfig::OpenaiFeatures(cfg) => Arc::new(FeatureAnalyzer::new(Arc::new(
                OpenAiGenerator::new(cfg.clone()),
            ))),
        }
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
