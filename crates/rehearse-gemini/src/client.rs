// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini REST API.
//!
//! [`GeminiClient`] handles authentication, model listing, and content
//! generation. It does not retry: quota failures are surfaced as
//! [`RehearseError::RateLimited`] so the caller can rotate models.

use std::time::Duration;

use rehearse_core::RehearseError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{
    ApiErrorResponse, ApiModel, GenerateContentRequest, GenerateContentResponse,
    ListModelsResponse,
};

/// Upper bound on listing pages, in case the API keeps returning tokens.
const MAX_LIST_PAGES: usize = 10;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a client authenticating with `api_key` against `base_url`
    /// (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, RehearseError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| RehearseError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RehearseError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Lists every model visible to the API key, following page tokens.
    pub async fn list_models(&self) -> Result<Vec<ApiModel>, RehearseError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_LIST_PAGES {
            let mut request = self.client.get(&url).query(&[("pageSize", "100")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }
            let response = request.send().await.map_err(|e| self.transport_error(e))?;

            let status = response.status();
            debug!(status = %status, "model listing response received");
            let body = read_body(response).await?;
            if !status.is_success() {
                return Err(api_error("models", status, &body));
            }

            let page: ListModelsResponse =
                serde_json::from_str(&body).map_err(|e| RehearseError::Provider {
                    message: format!("failed to parse model listing: {e}"),
                    source: Some(Box::new(e)),
                })?;
            models.extend(page.models);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }

    /// Runs `generateContent` on `model` (with or without the `models/` prefix).
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RehearseError> {
        let url = format!("{}/{}:generateContent", self.base_url, qualified(model));

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = read_body(response).await?;

        if !status.is_success() {
            return Err(api_error(model, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| RehearseError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> RehearseError {
        if e.is_timeout() {
            RehearseError::Timeout {
                duration: self.timeout,
            }
        } else {
            RehearseError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// Model path segment; the API addresses models as `models/{id}`.
fn qualified(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

/// Maps a non-2xx response to an error. Quota exhaustion becomes
/// [`RehearseError::RateLimited`].
async fn read_body(response: reqwest::Response) -> Result<String, RehearseError> {
    response.text().await.map_err(|e| RehearseError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })
}

fn api_error(model: &str, status: StatusCode, body: &str) -> RehearseError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = match &parsed {
        Some(err) => format!("Gemini API error ({}): {}", err.error.status, err.error.message),
        None => format!("API returned {status}: {body}"),
    };

    let exhausted = parsed
        .as_ref()
        .is_some_and(|err| err.error.status == "RESOURCE_EXHAUSTED");
    if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
        RehearseError::RateLimited {
            model: model.to_string(),
            message,
        }
    } else {
        RehearseError::Provider {
            message,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Content;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new("test-api-key", base_url, Duration::from_secs(5)).unwrap()
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "Hello")],
            system_instruction: None,
            generation_config: None,
        }
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}]
        })
    }

    #[test]
    fn qualifies_bare_model_names() {
        assert_eq!(qualified("gemini-pro"), "models/gemini-pro");
        assert_eq!(qualified("models/gemini-pro"), "models/gemini-pro");
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let resp = client
            .generate_content("models/gemini-1.5-flash", &test_request())
            .await
            .unwrap();
        assert_eq!(resp.text().as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn status_429_is_rate_limited_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content("gemini-pro", &test_request())
            .await
            .unwrap_err();
        assert!(err.is_retriable());
        assert!(
            matches!(&err, RehearseError::RateLimited { model, .. } if model == "gemini-pro"),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn status_400_is_not_retriable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .generate_content("gemini-pro", &test_request())
            .await
            .unwrap_err();
        assert!(!err.is_retriable());
        assert!(err.to_string().contains("INVALID_ARGUMENT"), "got: {err}");
    }

    #[tokio::test]
    async fn list_models_follows_page_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent"]}],
                "nextPageToken": "next"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let models = test_client(&server.uri()).list_models().await.unwrap();
        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["models/gemini-2.0-flash", "models/gemini-pro"]);
    }

    #[tokio::test]
    async fn list_models_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_models().await.unwrap_err();
        assert!(matches!(err, RehearseError::Provider { .. }));
    }

    /// Serves one response whose body stops short of its declared length.
    async fn truncated_body_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 512\r\n\r\n{\"models\": [")
                .await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn list_models_body_read_failure_is_provider_error() {
        let base_url = truncated_body_server().await;
        let err = test_client(&base_url).list_models().await.unwrap_err();
        match err {
            RehearseError::Provider { message, source } => {
                assert!(message.starts_with("failed to read response body"), "{message}");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
