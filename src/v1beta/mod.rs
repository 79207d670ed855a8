use base64::{Engine as _, engine::general_purpose};
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, new)]
pub struct Content {
    /// `None` for system instructions and embedding inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    #[new(into)]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    #[new(into)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: impl Into<Vec<Part>>) -> Self {
        Self::new(Role::User, parts)
    }

    pub fn model(parts: impl Into<Vec<Part>>) -> Self {
        Self::new(Role::Model, parts)
    }

    /// Concatenation of every text part, in order.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match &part.data {
                PartData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PartData {
    Text(String),
    InlineData(InlineData),
    FileData(FileData),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, new, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", into, strip_option)]
pub struct Part {
    #[serde(flatten)]
    #[setters(skip)]
    pub data: PartData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[new(default)]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(PartData::Text(text.into()))
    }

    /// Builds an inline media part, base64 encoding `bytes`.
    pub fn inline_data(mime_type: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        Self::new(PartData::InlineData(InlineData::from_bytes(mime_type, bytes)))
    }

    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Self::new(PartData::FileData(FileData::new(mime_type, file_uri)))
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            PartData::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.data {
            PartData::Text(text) => f.write_str(text),
            PartData::InlineData(inline) => {
                write!(f, "[{}: {} bytes]", inline.mime_type, inline.decoded_len())
            }
            PartData::FileData(file) => write!(f, "[{}: {}]", file.mime_type, file.file_uri),
        }
    }
}

#[derive(Clone, PartialEq, Deserialize, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[new(into)]
    pub(crate) mime_type: String,
    #[new(into)]
    pub(crate) data: String, // Base64 encoded string
}

impl InlineData {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        Self::new(mime_type, general_purpose::STANDARD.encode(bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload as sent on the wire.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(&self.data)
    }

    fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }
}

impl std::fmt::Debug for InlineData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineData")
            .field("mime_type", &self.mime_type)
            .field("data", &"[BASE64_DATA_REMOVED_FOR_LOGGING]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    #[new(into)]
    mime_type: String,
    #[new(into)]
    file_uri: String,
}

impl FileData {
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_uri(&self) -> &str {
        &self.file_uri
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

pub mod safety {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum HarmCategory {
        HarmCategoryUnspecified,
        HarmCategorySexuallyExplicit,
        HarmCategoryHateSpeech,
        HarmCategoryHarassment,
        HarmCategoryDangerousContent,
        HarmCategoryCivicIntegrity,
        /// Any category this crate does not know about yet.
        #[serde(other)]
        Unknown,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum HarmProbability {
        HarmProbabilityUnspecified,
        Negligible,
        Low,
        Medium,
        High,
        #[serde(other)]
        Unknown,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum HarmBlockThreshold {
        HarmBlockThresholdUnspecified,
        BlockLowAndAbove,
        BlockMediumAndAbove,
        BlockOnlyHigh,
        BlockNone,
        Off,
    }
}

pub mod request {
    use derive_new::new;
    use derive_setters::Setters;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Deserialize, Serialize, new, Setters)]
    #[setters(prefix = "with_")]
    #[setters(into, strip_option)]
    #[serde(rename_all = "camelCase")]
    pub struct Request {
        #[setters(skip)]
        #[new(into)]
        contents: Vec<super::Content>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        #[serde(default)]
        #[new(default)]
        safety_settings: Vec<SafetySetting>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        generation_config: Option<GenerationConfig>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        system_instruction: Option<super::Content>,
    }

    impl Request {
        pub fn contents(&self) -> &[super::Content] {
            &self.contents
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, new)]
    #[serde(rename_all = "camelCase")]
    pub struct SafetySetting {
        pub category: super::safety::HarmCategory,
        pub threshold: super::safety::HarmBlockThreshold,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Setters, new, Default)]
    #[setters(prefix = "with_")]
    #[setters(into, strip_option)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerationConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        temperature: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        top_p: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        top_k: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        candidate_count: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        max_output_tokens: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        stop_sequences: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        response_mime_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[new(default)]
        response_schema: Option<serde_json::Value>, // OpenAPI Schema
    }
}

pub mod response {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Response {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
        #[serde(default)]
        pub prompt_feedback: Option<PromptFeedback>,
        #[serde(default)]
        pub usage_metadata: Option<UsageMetadata>,
    }

    impl Response {
        /// Text of the first candidate, `None` when nothing was generated.
        pub fn text(&self) -> Option<String> {
            self.candidates.first().and_then(Candidate::text)
        }
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Candidate {
        #[serde(default)]
        pub content: Option<super::Content>,
        #[serde(default)]
        pub finish_reason: Option<FinishReason>,
        #[serde(default)]
        pub index: Option<u32>,
        #[serde(default)]
        pub safety_ratings: Vec<SafetyRating>,
        #[serde(default)]
        pub token_count: Option<u32>,
    }

    impl Candidate {
        pub fn text(&self) -> Option<String> {
            self.content.as_ref().map(super::Content::text)
        }
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct UsageMetadata {
        pub prompt_token_count: Option<u32>,
        pub candidates_token_count: Option<u32>,
        pub cached_content_token_count: Option<u32>,
        pub total_token_count: Option<u32>,
    }

    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct PromptFeedback {
        #[serde(default)]
        pub block_reason: Option<BlockReason>,
        #[serde(default)]
        pub safety_ratings: Vec<SafetyRating>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SafetyRating {
        pub category: super::safety::HarmCategory,
        pub probability: super::safety::HarmProbability,
        #[serde(default)]
        pub blocked: bool,
    }

    #[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum BlockReason {
        BlockReasonUnspecified,
        Safety,
        Other,
        Blocklist,
        ProhibitedContent,
        #[serde(other)]
        Unknown,
    }

    #[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum FinishReason {
        FinishReasonUnspecified,
        Stop,
        MaxTokens,
        Safety,
        Recitation,
        Language,
        Other,
        Blocklist,
        ProhibitedContent,
        Spii,
        #[serde(other)]
        Unknown,
    }
}

pub mod chat;
pub mod embedding;
pub mod model;
pub mod models;
pub mod rest;
mod sse;
pub mod tokens;
