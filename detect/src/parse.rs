//! Parsing of untrusted LLM replies.

use thiserror::Error;

use crate::types::{Detection, DetectionResult};

/// Error parsing an LLM reply into a detection result.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The reply was not valid JSON or failed schema validation.
    #[error("reply failed detection schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Strips a Markdown code fence wrapping, if present.
///
/// Models routinely wrap JSON in ```json ... ``` despite instructions not
/// to; the payload inside is what gets parsed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest.strip_suffix("```").unwrap_or(rest).trim()
    } else {
        trimmed
    }
}

/// Parses and validates a raw LLM reply.
///
/// Field presence and types are enforced by deserialization; the confidence
/// score is clamped into [0.0, 1.0] on conversion rather than rejected.
pub fn parse_detection(reply: &str) -> Result<Detection, ParseError> {
    let result: DetectionResult = serde_json::from_str(strip_code_fence(reply))?;
    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Classification;

    const VALID: &str =
        r#"{"is_ai_generated": true, "confidence_score": 0.87, "explanation": "Flat spectral artifacts detected"}"#;

    #[test]
    fn test_parse_bare_json() {
        let detection = parse_detection(VALID).unwrap();
        assert_eq!(detection.classification, Classification::AiGenerated);
        assert_eq!(detection.confidence_score, 0.87);
        assert_eq!(detection.explanation, "Flat spectral artifacts detected");
    }

    #[test]
    fn test_parse_json_fence() {
        let fenced = format!("```json\n{}\n```", VALID);
        let detection = parse_detection(&fenced).unwrap();
        assert_eq!(detection.classification, Classification::AiGenerated);
    }

    #[test]
    fn test_parse_plain_fence() {
        let fenced = format!("```\n{}\n```", VALID);
        assert!(parse_detection(&fenced).is_ok());
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let padded = format!("\n  {}  \n", VALID);
        assert!(parse_detection(&padded).is_ok());
    }

    #[test]
    fn test_missing_field_fails() {
        let reply = r#"{"is_ai_generated": true, "explanation": "no score"}"#;
        assert!(parse_detection(reply).is_err());
    }

    #[test]
    fn test_wrong_type_fails() {
        let reply =
            r#"{"is_ai_generated": "yes", "confidence_score": 0.5, "explanation": "x"}"#;
        assert!(parse_detection(reply).is_err());
    }

    #[test]
    fn test_prose_reply_fails() {
        assert!(parse_detection("The voice sounds human to me.").is_err());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let reply = r#"{"is_ai_generated": false, "confidence_score": 0.6, "explanation": "x", "notes": "extra"}"#;
        assert!(parse_detection(reply).is_ok());
    }

    #[test]
    fn test_strip_fence_passthrough() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }
}
