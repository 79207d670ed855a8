#![allow(dead_code)]

use gemini::config::Config;
use gemini::v1beta::response::Response;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Sample image used by the multimodal demos.
pub const SAMPLE_IMAGE_URL: &str =
    "https://storage.googleapis.com/generativeai-downloads/images/scones.jpg";

/// Logs to stderr, `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Loads `.env`, sets up logging and reads the configuration.
pub fn setup() -> Result<Config, BoxError> {
    dotenv::dotenv().ok();
    init_tracing();
    Config::from_env().map_err(|e| {
        error!("{e}");
        e.into()
    })
}

/// Logs `err` before handing it back, so `?` in `main` exits with a logged message.
pub fn fatal<E: Into<BoxError>>(context: &str) -> impl FnOnce(E) -> BoxError + '_ {
    move |err| {
        let err = err.into();
        error!("{context}: {err}");
        err
    }
}

/// Prints every part of every candidate, one per line.
pub fn print_response(response: &Response) {
    for (i, candidate) in response.candidates.iter().enumerate() {
        if response.candidates.len() > 1 {
            println!("--- candidate {i} ---");
        }
        if let Some(content) = &candidate.content {
            for part in &content.parts {
                println!("{part}");
            }
        }
        if let Some(reason) = candidate.finish_reason {
            tracing::debug!(?reason, "finished");
        }
    }
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            println!("prompt blocked: {reason:?}");
        }
    }
    if let Some(usage) = &response.usage_metadata {
        tracing::info!(
            prompt = usage.prompt_token_count,
            candidates = usage.candidates_token_count,
            total = usage.total_token_count,
            "token usage"
        );
    }
}
