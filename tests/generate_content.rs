use gemini::v1beta::{
    Content, Part, PartData, Role,
    model::GenerativeModel,
    request::{self, GenerationConfig},
    rest::{Client, Error},
    safety::{HarmBlockThreshold, HarmCategory},
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_server(
    body: &'static [u8],
    status: &'static str,
) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status_line = status.to_string();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await;
        let headers = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        stream.write_all(headers.as_bytes()).await.unwrap();
        stream.write_all(body).await.unwrap();
    });
    (addr, handle)
}

fn hello() -> request::Request {
    request::Request::new(vec![Content::new(
        Role::User,
        vec![Part::new(PartData::Text("hi".into()))],
    )])
}

#[tokio::test]
async fn generate_content_success() {
    let body = b"{\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"hi\"}], \"role\": \"model\"}}]}";
    let (addr, handle) = start_server(body, "200 OK").await;

    let client = Client::new("key", "test").with_api_base(format!("http://{}/v1beta/models", addr));
    let resp = client.generate_content(hello()).await.expect("ok");
    handle.abort();
    assert_eq!(resp.candidates.len(), 1);
    assert_eq!(resp.text().as_deref(), Some("hi"));
}

#[tokio::test]
async fn generate_content_error_status() {
    let (addr, handle) = start_server(b"bad", "400 BAD REQUEST").await;
    let client = Client::new("key", "test").with_api_base(format!("http://{}/v1beta/models", addr));

    let err = client
        .generate_content(request::Request::new(vec![]))
        .await
        .unwrap_err();
    handle.abort();
    match err {
        Error::ApiError { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, "bad");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn generate_content_invalid_json() {
    let (addr, handle) = start_server(b"invalid", "200 OK").await;
    let client = Client::new("key", "test").with_api_base(format!("http://{}/v1beta/models", addr));

    let err = client
        .generate_content(request::Request::new(vec![]))
        .await
        .unwrap_err();
    handle.abort();
    match err {
        Error::Json(_) => {}
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn api_key_is_sent_as_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test:generateContent"))
        .and(header("x-goog-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new("secret", "models/test")
        .with_api_base(format!("{}/v1beta/models", server.uri()));
    client.generate_content(hello()).await.expect("ok");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn model_decorations_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Write a haiku"}]}],
            "generationConfig": {"maxOutputTokens": 32, "stopSequences": ["x", "y"]},
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"}
            ],
            "systemInstruction": {"parts": [{"text": "You are a poet."}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "old pond"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        Client::new("key", "test").with_api_base(format!("{}/v1beta/models", server.uri()));
    let model = GenerativeModel::new(client)
        .with_generation_config(
            GenerationConfig::new()
                .with_max_output_tokens(32u32)
                .with_stop_sequences(vec!["x".to_string(), "y".to_string()]),
        )
        .with_safety_setting(
            HarmCategory::HarmCategoryHarassment,
            HarmBlockThreshold::BlockNone,
        )
        .with_system_instruction(Content::new(None, vec![Part::text("You are a poet.")]));

    let resp = model
        .generate_content(vec![Part::text("Write a haiku")])
        .await
        .expect("ok");
    assert_eq!(resp.text().as_deref(), Some("old pond"));
}

#[tokio::test]
async fn count_tokens_posts_contents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test:countTokens"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "how many?"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalTokens": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        Client::new("key", "test").with_api_base(format!("{}/v1beta/models", server.uri()));
    let model = GenerativeModel::new(client);
    let resp = model
        .count_tokens(vec![Part::text("how many?")])
        .await
        .expect("ok");
    assert_eq!(resp.total_tokens, 3);
}
