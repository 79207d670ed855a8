//! Model metadata returned by `models.list` and `models.get`.

use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Resource name, e.g. `models/gemini-pro`.
    pub name: String,
    #[serde(default)]
    pub base_model_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_token_limit: Option<u32>,
    #[serde(default)]
    pub output_token_limit: Option<u32>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub top_k: Option<u32>,
}

impl Model {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Query parameters for a single `models.list` page.
#[derive(Debug, Clone, Default, Serialize, new, Setters)]
#[setters(prefix = "with_", into, strip_option)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    page_token: Option<String>,
}
