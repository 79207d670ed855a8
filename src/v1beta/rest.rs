use super::embedding::{
    BatchEmbedContentsRequest, BatchEmbedContentsResponse, EmbedContentRequest,
    EmbedContentResponse, MAX_BATCH_EMBED_ITEMS,
};
use super::models::{ListModelsParams, ListModelsResponse, Model};
use super::tokens::{CountTokensRequest, CountTokensResponse};
use super::{Content, sse};
use super::{request, response};
use crate::API_BASE;
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::StreamExt;
use tracing::{debug, error};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum Error {
    #[error("gemini api error ({status}): {body}")]
    ApiError {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("malformed event stream: {0}")]
    Stream(String),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A boxed stream of partial responses from `streamGenerateContent`.
pub type ResponseStream =
    Pin<Box<dyn tokio_stream::Stream<Item = Result<response::Response, Error>> + Send>>;

/// Error body the service sends on failures, including mid-stream ones.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Clone, new, Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct Client {
    #[setters(skip)]
    #[new(into)]
    api_key: String,
    #[setters(skip)]
    #[new(into)]
    model: String,
    #[new(value = "API_BASE.to_string()")]
    api_base: String,
    #[new(value = "reqwest::Client::new()")]
    client: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Model id without the `models/` resource prefix.
    pub fn model(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{api_base}/{model}:{method}",
            api_base = self.api_base.trim_end_matches('/'),
            model = self.model(),
        )
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = request
            .header(reqwest::header::USER_AGENT, env!("CARGO_CRATE_NAME"))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error body: {}", e));
            error!(%status, "gemini api returned an error");
            return Err(Error::ApiError { status, body });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to parse gemini response");
            Error::from(e)
        })
    }

    async fn post<Req: Serialize + ?Sized, Resp: DeserializeOwned>(
        &self,
        method: &str,
        body: &Req,
    ) -> Result<Resp, Error> {
        debug!(model = self.model(), method, "POST");
        let response = self
            .send(self.client.post(self.method_url(method)).json(body))
            .await?;
        Self::read_json(response).await
    }

    pub async fn generate_content(
        &self,
        request: request::Request,
    ) -> Result<response::Response, Error> {
        self.post("generateContent", &request).await
    }

    /// Streams partial responses as the model produces them.
    ///
    /// The stream ends when the server closes the event stream; each item is one
    /// incremental response whose candidates carry only the newly generated parts.
    pub async fn stream_content(&self, request: request::Request) -> Result<ResponseStream, Error> {
        debug!(model = self.model(), method = "streamGenerateContent", "POST");
        let response = self
            .send(
                self.client
                    .post(self.method_url("streamGenerateContent"))
                    .query(&[("alt", "sse")])
                    .json(&request),
            )
            .await?;

        let stream = sse::events(response.bytes_stream())
            .map(|event| event.and_then(|payload| parse_stream_chunk(&payload)))
            .fuse();
        Ok(Box::pin(stream))
    }

    pub async fn count_tokens(
        &self,
        contents: impl Into<Vec<Content>>,
    ) -> Result<CountTokensResponse, Error> {
        self.post("countTokens", &CountTokensRequest::new(contents))
            .await
    }

    pub async fn embed_content(
        &self,
        request: EmbedContentRequest,
    ) -> Result<EmbedContentResponse, Error> {
        self.post("embedContent", &request).await
    }

    /// Embeds up to [`MAX_BATCH_EMBED_ITEMS`] inputs in one call, preserving input order.
    pub async fn batch_embed_contents(
        &self,
        requests: Vec<EmbedContentRequest>,
    ) -> Result<BatchEmbedContentsResponse, Error> {
        if requests.is_empty() {
            return Ok(BatchEmbedContentsResponse::default());
        }
        if requests.len() > MAX_BATCH_EMBED_ITEMS {
            return Err(Error::InvalidRequest(format!(
                "batchEmbedContents allows at most {} inputs per request (got {})",
                MAX_BATCH_EMBED_ITEMS,
                requests.len()
            )));
        }

        // Every item has to name the model it is embedded with.
        let model = format!("models/{}", self.model());
        let expected = requests.len();
        let body = BatchEmbedContentsRequest {
            requests: requests
                .into_iter()
                .map(|mut request| {
                    if request.model.is_none() {
                        request.model = Some(model.clone());
                    }
                    request
                })
                .collect(),
        };

        let response: BatchEmbedContentsResponse = self.post("batchEmbedContents", &body).await?;
        if response.embeddings.len() != expected {
            return Err(Error::UnexpectedResponse(format!(
                "expected {} embeddings, got {}",
                expected,
                response.embeddings.len()
            )));
        }
        Ok(response)
    }

    /// Fetches one page of the models available to this API key.
    pub async fn list_models(&self, params: ListModelsParams) -> Result<ListModelsResponse, Error> {
        debug!(method = "models.list", "GET");
        let response = self
            .send(
                self.client
                    .get(self.api_base.trim_end_matches('/'))
                    .query(&params),
            )
            .await?;
        Self::read_json(response).await
    }

    /// Follows `nextPageToken` until every model has been listed.
    pub async fn list_all_models(&self) -> Result<Vec<Model>, Error> {
        let mut models = Vec::new();
        let mut params = ListModelsParams::new();
        loop {
            let page = self.list_models(params).await?;
            models.extend(page.models);
            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    params = ListModelsParams::new().with_page_token(token)
                }
                _ => return Ok(models),
            }
        }
    }

    /// Looks up a single model; `name` may carry the `models/` prefix or not.
    pub async fn get_model(&self, name: &str) -> Result<Model, Error> {
        let name = name.strip_prefix("models/").unwrap_or(name);
        debug!(model = name, method = "models.get", "GET");
        let url = format!("{}/{}", self.api_base.trim_end_matches('/'), name);
        let response = self.send(self.client.get(url)).await?;
        Self::read_json(response).await
    }
}

fn parse_stream_chunk(payload: &str) -> Result<response::Response, Error> {
    if let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(payload) {
        let status = reqwest::StatusCode::from_u16(error.code)
            .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        return Err(Error::ApiError {
            status,
            body: error.message,
        });
    }
    Ok(serde_json::from_str(payload)?)
}
