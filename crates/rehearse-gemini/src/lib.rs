// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider for the Rehearse interview simulator.
//!
//! Implements [`ModelProvider`] over the Gemini REST API: model listing,
//! multi-turn chat with a system instruction, and JSON-mode generation.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use rehearse_config::GeminiConfig;
use rehearse_core::error::RehearseError;
use rehearse_core::traits::{ModelProvider, PluginAdapter};
use rehearse_core::types::{
    AdapterType, ChatRequest, ChatRole, HealthStatus, ModelInfo, StructuredRequest,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

/// Environment variable consulted when `gemini.api_key` is unset.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini provider implementing [`ModelProvider`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig) -> Result<Self, RehearseError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        info!(base_url = %config.base_url, "Gemini provider initialized");
        Ok(Self { client })
    }

    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<String, RehearseError> {
        let response = self.client.generate_content(model, &request).await?;
        extract_text(model, &response)
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<String, RehearseError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            RehearseError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or {API_KEY_ENV} environment variable."
            ))
        })
}

fn extract_text(model: &str, response: &GenerateContentResponse) -> Result<String, RehearseError> {
    if let Some(text) = response.text() {
        return Ok(text);
    }

    let reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
        .or_else(|| response.candidates.first().and_then(|c| c.finish_reason.clone()))
        .unwrap_or_else(|| "no candidates".to_string());
    Err(RehearseError::provider(format!(
        "model {model} returned no text ({reason})"
    )))
}

fn to_contents(request: &ChatRequest) -> Vec<Content> {
    request
        .history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Model => "model",
            };
            Content::text(Some(role), turn.text.clone())
        })
        .chain(std::iter::once(Content::text(
            Some("user"),
            request.message.clone(),
        )))
        .collect()
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, RehearseError> {
        match self.client.list_models().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), RehearseError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, RehearseError> {
        let models = self.client.list_models().await?;
        Ok(models
            .into_iter()
            .map(|m| ModelInfo {
                supports_generation: m.supports_generation(),
                name: m.name,
            })
            .collect())
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, RehearseError> {
        let body = GenerateContentRequest {
            contents: to_contents(&request),
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|s| Content::text(None, s)),
            generation_config: None,
        };
        self.generate(&request.model, body).await
    }

    async fn generate_json(&self, request: StructuredRequest) -> Result<String, RehearseError> {
        let body = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), request.prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };
        self.generate(&request.model, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::types::ChatTurn;

    #[test]
    fn resolve_api_key_from_config() {
        assert_eq!(
            resolve_api_key(&Some("key-123".into())).unwrap(),
            "key-123"
        );
    }

    #[test]
    fn resolve_api_key_none_falls_back_to_env() {
        // Succeeds only when GEMINI_API_KEY is set in the environment.
        if let Err(err) = resolve_api_key(&None) {
            assert!(err.to_string().contains("API key not found"), "got: {err}");
        }
    }

    #[test]
    fn contents_append_message_after_history() {
        let request = ChatRequest {
            model: "gemini-pro".into(),
            system_instruction: None,
            history: vec![ChatTurn::model("Welcome."), ChatTurn::user("Hi.")],
            message: "Ready.".into(),
        };
        let contents = to_contents(&request);
        let roles: Vec<_> = contents.iter().map(|c| c.role.as_deref()).collect();
        assert_eq!(roles, vec![Some("model"), Some("user"), Some("user")]);
        assert_eq!(contents[2].parts[0].text.as_deref(), Some("Ready."));
    }

    #[test]
    fn empty_response_is_provider_error() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        let err = extract_text("gemini-pro", &response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
        assert!(!err.is_retriable());
    }
}
