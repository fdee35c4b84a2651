//! HTTP surface.
//!
//! One endpoint does the work:
//! - POST /api/voice-detection - classify a base64 MP3 clip
//! - GET  /healthz             - liveness probe
//!
//! Every detection response is HTTP 200 with a `status` field; failures are
//! error bodies, never 5xx, and never fatal to the process.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use voxcheck_audio::{decode_audio, trim_audio, DEFAULT_MAX_DURATION};
use voxcheck_detect::{Analyzer, Classification};

/// Shared per-process state, injected into handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    api_key: String,
    analyzer: Arc<dyn Analyzer>,
}

impl AppState {
    /// Creates state from the configured secret and analyzer.
    pub fn new(api_key: String, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            inner: Arc::new(Inner { api_key, analyzer }),
        }
    }
}

/// Detection request body.
#[derive(Debug, Deserialize)]
pub struct DetectionRequest {
    pub language: String,
    #[serde(rename = "audioFormat")]
    pub audio_format: String,
    #[serde(rename = "audioBase64")]
    pub audio_base64: String,
}

/// Detection response body. Always paired with HTTP 200.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DetectionResponse {
    Success {
        language: String,
        classification: Classification,
        #[serde(rename = "confidenceScore")]
        confidence_score: f64,
        explanation: String,
    },
    Error {
        message: String,
    },
}

impl DetectionResponse {
    fn error(message: impl Into<String>) -> Self {
        DetectionResponse::Error {
            message: message.into(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/voice-detection", post(detect_voice))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until shutdown.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let addr = parse_addr(addr)?;
    let app = router(state);

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse address string to SocketAddr, allowing the ":8000" shorthand.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn detect_voice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DetectionRequest>,
) -> Json<DetectionResponse> {
    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if provided != Some(state.inner.api_key.as_str()) {
        return Json(DetectionResponse::error("Invalid API key"));
    }

    if !body.audio_format.eq_ignore_ascii_case("mp3") {
        return Json(DetectionResponse::error("Only mp3 format is supported"));
    }

    // Decode and trim off the async runtime; both are CPU-bound.
    let payload = body.audio_base64;
    let prepared = tokio::task::spawn_blocking(move || {
        let bytes = decode_audio(&payload).map_err(|e| e.to_string())?;
        trim_audio(&bytes, DEFAULT_MAX_DURATION).map_err(|e| e.to_string())
    })
    .await;

    let audio = match prepared {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(message)) => return Json(DetectionResponse::error(message)),
        Err(e) => {
            return Json(DetectionResponse::error(format!(
                "Internal Server Error: {}",
                e
            )))
        }
    };

    let detection = state.inner.analyzer.analyze(&audio).await;
    tracing::info!(
        language = %body.language,
        classification = %detection.classification,
        confidence = detection.confidence_score,
        "clip classified"
    );

    Json(DetectionResponse::Success {
        language: body.language,
        classification: detection.classification,
        confidence_score: detection.confidence_score,
        explanation: detection.explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use base64::Engine;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tower::ServiceExt;

    use voxcheck_audio::codec::mp3::{decode_mp3, encode_mp3};
    use voxcheck_audio::pcm::PcmClip;
    use voxcheck_detect::{AudioAnalyzer, Detection};
    use voxcheck_llm::{GenerateRequest, Generator, LlmError};

    /// Fixed-verdict analyzer that counts invocations.
    struct MockAnalyzer {
        detection: Detection,
        calls: AtomicU32,
    }

    impl MockAnalyzer {
        fn new(detection: Detection) -> Arc<Self> {
            Arc::new(Self {
                detection,
                calls: AtomicU32::new(0),
            })
        }

        fn human() -> Arc<Self> {
            Self::new(Detection {
                classification: Classification::Human,
                confidence_score: 0.75,
                explanation: "Natural breathing and pacing".to_string(),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Analyzer for MockAnalyzer {
        async fn analyze(&self, _audio: &[u8]) -> Detection {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.detection.clone()
        }
    }

    /// Generator that records the request and replies with canned JSON.
    struct CapturingGenerator {
        reply: String,
        last_request: Mutex<Option<GenerateRequest>>,
    }

    impl CapturingGenerator {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Generator for CapturingGenerator {
        async fn generate(&self, req: &GenerateRequest) -> Result<String, LlmError> {
            *self.last_request.lock().unwrap() = Some(req.clone());
            Ok(self.reply.clone())
        }
    }

    const TEST_KEY: &str = "sk_live_test";

    fn app(analyzer: Arc<dyn Analyzer>) -> Router {
        router(AppState::new(TEST_KEY.to_string(), analyzer))
    }

    fn sine_mp3(seconds: u32) -> Vec<u8> {
        let sample_rate = 16000u32;
        let samples: Vec<i16> = (0..sample_rate as u64 * seconds as u64)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                ((2.0 * std::f64::consts::PI * 220.0 * t).sin() * 0.8 * i16::MAX as f64) as i16
            })
            .collect();
        encode_mp3(&PcmClip::new(samples, sample_rate, 1)).unwrap()
    }

    fn b64(bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    async fn post_detection(
        app: Router,
        api_key: Option<&str>,
        body: serde_json::Value,
    ) -> serde_json::Value {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/voice-detection")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request_body(format: &str, audio: &str) -> serde_json::Value {
        serde_json::json!({
            "language": "en",
            "audioFormat": format,
            "audioBase64": audio,
        })
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected_before_analysis() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            None,
            request_body("mp3", &b64(&sine_mp3(1))),
        )
        .await;

        assert_eq!(reply["status"], "error");
        assert_eq!(reply["message"], "Invalid API key");
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_api_key_rejected_before_analysis() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some("sk_wrong"),
            request_body("mp3", &b64(&sine_mp3(1))),
        )
        .await;

        assert_eq!(reply["status"], "error");
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_format_rejected() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some(TEST_KEY),
            request_body("wav", &b64(&sine_mp3(1))),
        )
        .await;

        assert_eq!(reply["status"], "error");
        assert_eq!(reply["message"], "Only mp3 format is supported");
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_format_check_is_case_insensitive() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some(TEST_KEY),
            request_body("MP3", &b64(&sine_mp3(1))),
        )
        .await;

        assert_eq!(reply["status"], "success");
        assert_eq!(analyzer.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_base64_reported() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some(TEST_KEY),
            request_body("mp3", "@@not base64@@"),
        )
        .await;

        assert_eq!(reply["status"], "error");
        assert!(reply["message"]
            .as_str()
            .unwrap()
            .contains("invalid base64 audio data"));
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_mp3_bytes_reported() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some(TEST_KEY),
            request_body("mp3", &b64(b"these bytes are not audio")),
        )
        .await;

        assert_eq!(reply["status"], "error");
        assert!(reply["message"]
            .as_str()
            .unwrap()
            .contains("error trimming audio"));
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_echoes_language_and_wire_names() {
        let analyzer = MockAnalyzer::human();
        let reply = post_detection(
            app(analyzer.clone()),
            Some(TEST_KEY),
            serde_json::json!({
                "language": "pt-BR",
                "audioFormat": "mp3",
                "audioBase64": b64(&sine_mp3(1)),
            }),
        )
        .await;

        assert_eq!(reply["status"], "success");
        assert_eq!(reply["language"], "pt-BR");
        assert_eq!(reply["classification"], "HUMAN");
        assert_eq!(reply["confidenceScore"], 0.75);
        assert_eq!(reply["explanation"], "Natural breathing and pacing");
        assert_eq!(analyzer.calls(), 1);
    }

    #[tokio::test]
    async fn test_end_to_end_long_clip_is_trimmed_for_the_model() {
        let generator = CapturingGenerator::new(
            r#"{"is_ai_generated": true, "confidence_score": 0.87, "explanation": "Flat spectral artifacts detected"}"#,
        );
        let analyzer: Arc<dyn Analyzer> = Arc::new(AudioAnalyzer::new(generator.clone()));

        let reply = post_detection(
            app(analyzer),
            Some(TEST_KEY),
            request_body("mp3", &b64(&sine_mp3(45))),
        )
        .await;

        assert_eq!(reply["status"], "success");
        assert_eq!(reply["language"], "en");
        assert_eq!(reply["classification"], "AI_GENERATED");
        assert_eq!(reply["confidenceScore"], 0.87);
        assert_eq!(reply["explanation"], "Flat spectral artifacts detected");

        // The model must never see more than the 30s cap.
        let req = generator.last_request.lock().unwrap().clone().unwrap();
        let blob = req
            .parts
            .iter()
            .find_map(|p| p.as_blob())
            .expect("audio blob sent to model");
        let clip = decode_mp3(&blob.data).unwrap();
        let secs = clip.duration().as_secs_f64();
        assert!(
            secs <= 30.6 && secs >= 29.0,
            "model saw {}s of audio, expected ~30s",
            secs
        );
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app(MockAnalyzer::human())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_parse_addr_shorthand() {
        assert_eq!(
            parse_addr(":8000").unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
        assert!(parse_addr("not an addr").is_err());
    }
}
