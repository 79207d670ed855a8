//! Typed client for the Gemini REST API, driving the sample programs under `demos/`.
//!
//! [`v1beta::rest::Client`] wraps the HTTP endpoints one-to-one (generate, stream,
//! count tokens, embed, list models). [`v1beta::model::GenerativeModel`] decorates a
//! client with generation and safety settings, and [`v1beta::chat::ChatSession`] keeps
//! the history of a multi-turn conversation. [`config::Config`] loads credentials from
//! the environment and [`media`] turns local or remote images into prompt parts.
//!
//! ## Example
//!
//! ```no_run
//! use gemini::config::Config;
//! use gemini::v1beta::{model::GenerativeModel, request::GenerationConfig, Part};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let model = GenerativeModel::new(config.client())
//!     .with_generation_config(GenerationConfig::new().with_max_output_tokens(64u32));
//!
//! let response = model.generate_content(vec![Part::text("Hello")]).await?;
//! println!("{}", response.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod media;
pub mod v1beta;

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
