// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local model provider backed by an Ollama server.
//!
//! Every installed model is treated as generation-capable. Chat turns go
//! through `/api/chat`; structured output uses `/api/generate` with
//! `format: "json"`.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use rehearse_config::LocalConfig;
use rehearse_core::error::RehearseError;
use rehearse_core::traits::{ModelProvider, PluginAdapter};
use rehearse_core::types::{
    AdapterType, ChatRequest, ChatRole, HealthStatus, ModelInfo, StructuredRequest,
};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::{ChatBody, ChatMessage, GenerateBody};

pub struct OllamaProvider {
    client: OllamaClient,
}

impl OllamaProvider {
    pub fn new(config: &LocalConfig) -> Result<Self, RehearseError> {
        let client = OllamaClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        info!(base_url = %config.base_url, "Ollama provider initialized");
        Ok(Self { client })
    }
}

fn to_messages(request: &ChatRequest) -> Vec<ChatMessage> {
    let system = request.system_instruction.iter().map(|s| ChatMessage {
        role: "system".to_string(),
        content: s.clone(),
    });
    let history = request.history.iter().map(|turn| ChatMessage {
        role: match turn.role {
            ChatRole::User => "user",
            ChatRole::Model => "assistant",
        }
        .to_string(),
        content: turn.text.clone(),
    });
    let latest = std::iter::once(ChatMessage {
        role: "user".to_string(),
        content: request.message.clone(),
    });
    system.chain(history).chain(latest).collect()
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, RehearseError> {
        match self.client.tags().await {
            Ok(tags) if tags.models.is_empty() => {
                Ok(HealthStatus::Degraded("no local models installed".into()))
            }
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), RehearseError> {
        debug!("Ollama provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, RehearseError> {
        let tags = self.client.tags().await?;
        Ok(tags
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                supports_generation: true,
            })
            .collect())
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, RehearseError> {
        let body = ChatBody {
            messages: to_messages(&request),
            model: request.model,
            stream: false,
        };
        Ok(self.client.chat(&body).await?.message.content)
    }

    async fn generate_json(&self, request: StructuredRequest) -> Result<String, RehearseError> {
        let body = GenerateBody {
            model: request.model,
            prompt: request.prompt,
            stream: false,
            format: Some("json".to_string()),
        };
        Ok(self.client.generate(&body).await?.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::types::ChatTurn;

    #[test]
    fn messages_put_system_first_and_map_roles() {
        let request = ChatRequest {
            model: "llama3".into(),
            system_instruction: Some("Be an interviewer.".into()),
            history: vec![ChatTurn::model("Hello."), ChatTurn::user("Hi.")],
            message: "Go on.".into(),
        };
        let roles: Vec<String> = to_messages(&request).into_iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "assistant", "user", "user"]);
    }

    #[test]
    fn no_system_message_without_instruction() {
        let request = ChatRequest {
            model: "llama3".into(),
            system_instruction: None,
            history: Vec::new(),
            message: "Go on.".into(),
        };
        assert_eq!(to_messages(&request).len(), 1);
    }
}
