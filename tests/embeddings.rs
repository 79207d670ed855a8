use gemini::v1beta::{
    embedding::{EmbedContentRequest, MAX_BATCH_EMBED_ITEMS, TaskType},
    rest::{Client, Error},
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "embedding-001";

fn client(server: &MockServer) -> Client {
    Client::new("test-key", MODEL).with_api_base(format!("{}/v1beta/models", server.uri()))
}

#[tokio::test]
async fn embed_content_returns_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/embedding-001:embedContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "content": {"parts": [{"text": "The quick brown fox"}]},
            "taskType": "RETRIEVAL_DOCUMENT",
            "title": "Fox"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"embedding": {"values": [0.25, -0.5, 1.0]}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = EmbedContentRequest::text("The quick brown fox")
        .with_task_type(TaskType::RetrievalDocument)
        .with_title("Fox");
    let resp = client(&server).embed_content(request).await.unwrap();
    assert_eq!(resp.embedding.values, vec![0.25, -0.5, 1.0]);
}

#[tokio::test]
async fn batch_embed_sends_fully_qualified_model_per_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/embedding-001:batchEmbedContents"))
        .and(body_partial_json(json!({
            "requests": [
                {"model": "models/embedding-001", "content": {"parts": [{"text": "alpha"}]}},
                {"model": "models/embedding-001", "content": {"parts": [{"text": "beta"}]}}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [{"values": [0.5, 0.6]}, {"values": [0.7, 0.8]}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .batch_embed_contents(vec![
            EmbedContentRequest::text("alpha"),
            EmbedContentRequest::text("beta"),
        ])
        .await
        .unwrap();
    let values: Vec<Vec<f32>> = resp.embeddings.into_iter().map(|e| e.values).collect();
    assert_eq!(values, vec![vec![0.5, 0.6], vec![0.7, 0.8]]);
}

#[tokio::test]
async fn batch_embed_rejects_count_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"embeddings": [{"values": [0.5]}]})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .batch_embed_contents(vec![
            EmbedContentRequest::text("alpha"),
            EmbedContentRequest::text("beta"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)));
}

#[tokio::test]
async fn batch_embed_short_circuits_without_network() {
    let server = MockServer::start().await;
    let client = client(&server);

    let empty = client.batch_embed_contents(Vec::new()).await.unwrap();
    assert!(empty.embeddings.is_empty());

    let too_many = (0..=MAX_BATCH_EMBED_ITEMS)
        .map(|i| EmbedContentRequest::text(format!("word-{i}")))
        .collect();
    let err = client.batch_embed_contents(too_many).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));

    assert!(server.received_requests().await.unwrap().is_empty());
}
