//! Environment-driven settings shared by the demo programs.

use crate::v1beta::rest::Client;
use thiserror::Error;

/// Variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const EMBEDDING_MODEL_VAR: &str = "GEMINI_EMBEDDING_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing API key: set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,
    #[error("invalid GEMINI_API_BASE `{value}`: {source}")]
    InvalidApiBase {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("GEMINI_API_BASE `{value}` must be an http or https URL")]
    UnsupportedApiBaseScheme { value: String },
}

#[derive(Clone)]
pub struct Config {
    api_key: String,
    model: String,
    embedding_model: String,
    api_base: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with `lookup` standing in for the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| non_empty(*name))
            .ok_or(Error::MissingApiKey)?;

        let api_base = match non_empty(API_BASE_VAR) {
            Some(value) => {
                let url = url::Url::parse(&value).map_err(|source| Error::InvalidApiBase {
                    value: value.clone(),
                    source,
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(Error::UnsupportedApiBaseScheme { value });
                }
                value
            }
            None => crate::API_BASE.to_string(),
        };

        Ok(Self {
            api_key,
            model: non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            embedding_model: non_empty(EMBEDDING_MODEL_VAR)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            api_base,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Client for the generation model.
    pub fn client(&self) -> Client {
        self.client_for(&self.model)
    }

    pub fn embedding_client(&self) -> Client {
        self.client_for(&self.embedding_model)
    }

    pub fn client_for(&self, model: &str) -> Client {
        Client::new(self.api_key.as_str(), model).with_api_base(self.api_base.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn missing_key_fails() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn falls_back_to_api_key_var() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.api_key(), "fallback");
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.embedding_model(), DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.api_base(), crate::API_BASE);
    }

    #[test]
    fn gemini_key_takes_precedence() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "fallback"),
            ("GEMINI_API_KEY", "primary"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
        ]))
        .unwrap();
        assert_eq!(config.api_key(), "primary");
        assert_eq!(config.client().model(), "gemini-1.5-flash");
    }

    #[test]
    fn rejects_relative_api_base() {
        let err = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "localhost/v1beta"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidApiBase { .. }));
    }

    #[test]
    fn rejects_non_http_api_base() {
        for base in ["localhost:8080/v1beta", "ftp://example.com/v1beta/models"] {
            let err = Config::from_lookup(lookup(&[
                ("GEMINI_API_KEY", "k"),
                ("GEMINI_API_BASE", base),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedApiBaseScheme { .. }),
                "{base}: {err:?}"
            );
        }

        let config = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "http://127.0.0.1:8080/v1beta/models"),
        ]))
        .unwrap();
        assert_eq!(config.api_base(), "http://127.0.0.1:8080/v1beta/models");
    }

    #[test]
    fn debug_hides_key() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
        assert!(!format!("{:?}", config.client()).contains("secret"));
    }
}
