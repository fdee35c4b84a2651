//! Minimal LLM client layer.
//!
//! A reduced generation interface for services that make one blocking LLM
//! call at a time: no streaming, no tool calling, just multi-part content in
//! and the model's raw text reply out.
//!
//! # Modules
//!
//! - [`types`]: request content types (text and binary parts)
//! - [`error`]: error type
//! - [`gemini`]: Google Gemini backend (multimodal)
//! - [`openai`]: OpenAI-compatible chat-completions backend (text only)
//!
//! # Example
//!
//! ```rust,ignore
//! use voxcheck_llm::{GenerateRequest, Generator};
//! use voxcheck_llm::gemini::{GeminiConfig, GeminiGenerator};
//!
//! let generator = GeminiGenerator::new(GeminiConfig {
//!     api_key: "AIza...".to_string(),
//!     ..Default::default()
//! });
//!
//! let req = GenerateRequest::new()
//!     .with_system("You are an audio forensics analyst.")
//!     .text("Classify this clip.")
//!     .blob("audio/mp3", mp3_bytes);
//!
//! let reply = generator.generate(&req).await?;
//! ```

pub mod error;
pub mod gemini;
pub mod openai;
pub mod types;

pub use error::LlmError;
pub use types::{Blob, GenerateRequest, Part};

use async_trait::async_trait;

/// Trait for LLM text generation backends.
///
/// One invocation, one reply. Retry behavior belongs to callers.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a single text reply for the request.
    async fn generate(&self, req: &GenerateRequest) -> Result<String, LlmError>;
}
