//! voxcheck - HTTP service classifying voice clips as AI-generated or human.

use clap::Parser;

mod config;
mod server;

use config::{Backend, ServerConfig};

/// HTTP voice AI-detection service.
///
/// Accepts base64-encoded MP3 clips on POST /api/voice-detection and returns
/// an AI_GENERATED/HUMAN classification produced by the configured LLM
/// backend. Credentials come from the environment; see `ServerConfig`.
#[derive(Parser)]
#[command(name = "voxcheck")]
#[command(about = "HTTP service classifying voice clips as AI-generated or human")]
#[command(version)]
struct Cli {
    /// Listen address (host:port, or :port for 0.0.0.0)
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: String,

    /// Detector backend
    #[arg(long, value_enum, default_value_t = Backend::GeminiAudio)]
    backend: Backend,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env(cli.backend)?;
    let state = server::AppState::new(config.api_key.clone(), config.build_analyzer());

    server::serve(&cli.addr, state).await
}
