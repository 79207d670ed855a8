//! Request and response bodies for `embedContent` and `batchEmbedContents`.

use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Maximum number of inputs accepted by a single `batchEmbedContents` call.
pub const MAX_BATCH_EMBED_ITEMS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    TaskTypeUnspecified,
    RetrievalQuery,
    RetrievalDocument,
    SemanticSimilarity,
    Classification,
    Clustering,
}

#[derive(Debug, Clone, Serialize, new, Setters)]
#[setters(prefix = "with_", into, strip_option)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest {
    /// Fully qualified (`models/...`). Filled in by the client for batch calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    pub(crate) model: Option<String>,
    #[setters(skip)]
    pub(crate) content: super::Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    task_type: Option<TaskType>,
    /// Only honoured together with [`TaskType::RetrievalDocument`].
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[new(default)]
    output_dimensionality: Option<u32>,
}

impl EmbedContentRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(super::Content::new(None, vec![super::Part::text(text)]))
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ContentEmbedding {
    #[serde(default)]
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedContentResponse {
    pub embedding: ContentEmbedding,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct BatchEmbedContentsRequest {
    pub(crate) requests: Vec<EmbedContentRequest>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BatchEmbedContentsResponse {
    #[serde(default)]
    pub embeddings: Vec<ContentEmbedding>,
}
