use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensRequest {
    #[new(into)]
    pub(crate) contents: Vec<super::Content>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    #[serde(default)]
    pub total_tokens: u32,
    #[serde(default)]
    pub cached_content_token_count: Option<u32>,
}
