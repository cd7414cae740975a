// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OllamaProvider against a mocked Ollama server.

use rehearse_config::LocalConfig;
use rehearse_core::{
    ChatRequest, HealthStatus, ModelProvider, PluginAdapter, RehearseError, StructuredRequest,
};
use rehearse_ollama::OllamaProvider;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(base_url: &str) -> OllamaProvider {
    OllamaProvider::new(&LocalConfig {
        enabled: true,
        base_url: base_url.to_string(),
        ..LocalConfig::default()
    })
    .unwrap()
}

fn chat_request(model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        system_instruction: Some("You are an interviewer.".into()),
        history: Vec::new(),
        message: "Hello".into(),
    }
}

#[tokio::test]
async fn chat_returns_assistant_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3",
            "stream": false,
            "messages": [
                {"role": "system", "content": "You are an interviewer."},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3",
            "message": {"role": "assistant", "content": "Let's start."},
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server.uri()).chat(chat_request("llama3")).await.unwrap();
    assert_eq!(text, "Let's start.");
}

#[tokio::test]
async fn generate_json_sets_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({"format": "json", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3",
            "response": "{\"ok\":true}",
            "done": true
        })))
        .mount(&server)
        .await;

    let text = provider(&server.uri())
        .generate_json(StructuredRequest {
            model: "llama3".into(),
            prompt: "Evaluate.".into(),
        })
        .await
        .unwrap();
    assert_eq!(text, "{\"ok\":true}");
}

#[tokio::test]
async fn tags_become_generation_capable_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{"name": "llama3:latest"}, {"name": "mistral:7b"}]
        })))
        .mount(&server)
        .await;

    let p = provider(&server.uri());
    let models = p.list_models().await.unwrap();
    assert_eq!(models.len(), 2);
    assert!(models.iter().all(|m| m.supports_generation));
    assert_eq!(p.health_check().await.unwrap(), HealthStatus::Healthy);
}

#[tokio::test]
async fn busy_server_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({"error": "server busy"})),
        )
        .mount(&server)
        .await;

    let err = provider(&server.uri())
        .chat(chat_request("llama3"))
        .await
        .unwrap_err();
    assert!(err.is_retriable());
}

#[tokio::test]
async fn missing_model_is_not_retriable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            serde_json::json!({"error": "model \"phi\" not found, try pulling it first"}),
        ))
        .mount(&server)
        .await;

    let err = provider(&server.uri())
        .chat(chat_request("phi"))
        .await
        .unwrap_err();
    assert!(!err.is_retriable());
    assert!(matches!(err, RehearseError::Provider { .. }));
}

#[tokio::test]
async fn unreachable_server_is_unhealthy() {
    // Port 9 (discard) is not an Ollama server.
    let p = provider("http://127.0.0.1:9");
    assert!(matches!(
        p.health_check().await.unwrap(),
        HealthStatus::Unhealthy(_)
    ));
}

#[tokio::test]
async fn truncated_body_is_provider_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 512\r\n\r\n{\"message\":")
            .await;
    });

    let err = provider(&format!("http://{addr}"))
        .chat(chat_request("llama3"))
        .await
        .unwrap_err();
    match err {
        RehearseError::Provider { message, .. } => {
            assert!(message.starts_with("failed to read local model response"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
