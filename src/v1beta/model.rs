use super::chat::ChatSession;
use super::request::{GenerationConfig, Request, SafetySetting};
use super::rest::{Client, Error, ResponseStream};
use super::safety::{HarmBlockThreshold, HarmCategory};
use super::tokens::CountTokensResponse;
use super::{Content, Part, response};
use derive_new::new;
use derive_setters::Setters;

/// A [`Client`] decorated with the settings every request to the model should carry.
///
/// Generation config, safety settings and the system instruction are attached to
/// each request built by [`GenerativeModel::request`]; nothing is sent until one of
/// the async operations is awaited.
#[derive(Debug, Clone, new, Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct GenerativeModel {
    #[setters(skip)]
    client: Client,
    #[new(default)]
    generation_config: Option<GenerationConfig>,
    #[new(default)]
    #[setters(skip)]
    safety_settings: Vec<SafetySetting>,
    #[new(default)]
    system_instruction: Option<Content>,
}

impl GenerativeModel {
    /// Sets the block threshold for `category`, replacing an earlier one for the same category.
    pub fn with_safety_setting(
        mut self,
        category: HarmCategory,
        threshold: HarmBlockThreshold,
    ) -> Self {
        self.safety_settings.retain(|s| s.category != category);
        self.safety_settings
            .push(SafetySetting::new(category, threshold));
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    /// Builds the request for `contents` with this model's settings applied.
    pub fn request(&self, contents: impl Into<Vec<Content>>) -> Request {
        let mut request = Request::new(contents).with_safety_settings(self.safety_settings.clone());
        if let Some(config) = &self.generation_config {
            request = request.with_generation_config(config.clone());
        }
        if let Some(instruction) = &self.system_instruction {
            request = request.with_system_instruction(instruction.clone());
        }
        request
    }

    /// Single-turn generation; `parts` form one user turn in the given order.
    pub async fn generate_content(
        &self,
        parts: impl Into<Vec<Part>>,
    ) -> Result<response::Response, Error> {
        let request = self.request(vec![Content::user(parts)]);
        self.client.generate_content(request).await
    }

    pub async fn stream_generate_content(
        &self,
        parts: impl Into<Vec<Part>>,
    ) -> Result<ResponseStream, Error> {
        let request = self.request(vec![Content::user(parts)]);
        self.client.stream_content(request).await
    }

    pub async fn count_tokens(
        &self,
        parts: impl Into<Vec<Part>>,
    ) -> Result<CountTokensResponse, Error> {
        self.client.count_tokens(vec![Content::user(parts)]).await
    }

    pub fn start_chat(&self) -> ChatSession {
        ChatSession::new(self.clone())
    }
}
