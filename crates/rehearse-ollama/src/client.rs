// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama server.

use std::time::Duration;

use rehearse_core::RehearseError;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{ChatBody, ChatReply, ErrorReply, GenerateBody, GenerateReply, TagsReply};

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RehearseError> {
        let client = reqwest::Client::builder()
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

    pub async fn tags(&self) -> Result<TagsReply, RehearseError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        decode("tags", response).await
    }

    pub async fn chat(&self, body: &ChatBody) -> Result<ChatReply, RehearseError> {
        self.post(&body.model, "/api/chat", body).await
    }

    pub async fn generate(&self, body: &GenerateBody) -> Result<GenerateReply, RehearseError> {
        self.post(&body.model, "/api/generate", body).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        model: &str,
        endpoint: &str,
        body: &B,
    ) -> Result<T, RehearseError> {
        let response = self
            .client
            .post(format!("{}{endpoint}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        decode(model, response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> RehearseError {
        if e.is_timeout() {
            RehearseError::Timeout {
                duration: self.timeout,
            }
        } else {
            RehearseError::Provider {
                message: format!("local model server unreachable: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(
    model: &str,
    response: reqwest::Response,
) -> Result<T, RehearseError> {
    let status = response.status();
    debug!(status = %status, model, "local model response received");
    let body = response.text().await.map_err(|e| RehearseError::Provider {
        message: format!("failed to read local model response: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorReply>(&body)
            .map(|e| format!("Ollama error ({status}): {}", e.error))
            .unwrap_or_else(|_| format!("Ollama returned {status}: {body}"));
        // A busy server answers 503; treat it like a quota rejection.
        return Err(
            if matches!(
                status,
                StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
            ) {
                RehearseError::RateLimited {
                    model: model.to_string(),
                    message,
                }
            } else {
                RehearseError::provider(message)
            },
        );
    }

    serde_json::from_str(&body).map_err(|e| RehearseError::Provider {
        message: format!("failed to parse Ollama response: {e}"),
        source: Some(Box::new(e)),
    })
}
