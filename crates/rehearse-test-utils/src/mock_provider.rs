// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted model provider for deterministic testing.
//!
//! `MockProvider` implements `ModelProvider` without network access. Each
//! model can be scripted to succeed, hit a rate limit, or fail outright, and
//! every call is recorded so tests can assert on the rotation order.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rehearse_core::traits::{ModelProvider, PluginAdapter};
use rehearse_core::types::{
    AdapterType, ChatRequest, HealthStatus, ModelInfo, StructuredRequest,
};
use rehearse_core::RehearseError;

/// Scripted result for calls against one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Succeeds with this text.
    Text(String),
    /// Fails with [`RehearseError::RateLimited`].
    RateLimited,
    /// Fails with a non-retriable provider error carrying this message.
    Fail(String),
}

/// A mock provider with per-model outcomes and a FIFO reply queue.
///
/// Models without a scripted outcome pop the next queued reply, or return
/// `"mock response"` when the queue is empty.
pub struct MockProvider {
    models: Vec<ModelInfo>,
    listing_error: Option<String>,
    outcomes: HashMap<String, Outcome>,
    responses: Arc<Mutex<VecDeque<String>>>,
    attempts: Arc<Mutex<Vec<String>>>,
    chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
    structured_requests: Arc<Mutex<Vec<StructuredRequest>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            listing_error: None,
            outcomes: HashMap::new(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            attempts: Arc::new(Mutex::new(Vec::new())),
            chat_requests: Arc::new(Mutex::new(Vec::new())),
            structured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock pre-loaded with queued replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let mock = Self::new();
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..mock
        }
    }

    /// Models advertised by `list_models`, all generation-capable.
    pub fn with_models<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = names
            .into_iter()
            .map(|name| ModelInfo {
                name: name.into(),
                supports_generation: true,
            })
            .collect();
        self
    }

    /// Adds one advertised model with an explicit capability flag.
    pub fn with_model_info(mut self, name: impl Into<String>, supports_generation: bool) -> Self {
        self.models.push(ModelInfo {
            name: name.into(),
            supports_generation,
        });
        self
    }

    /// Makes `list_models` fail with a provider error.
    pub fn with_listing_error(mut self, message: impl Into<String>) -> Self {
        self.listing_error = Some(message.into());
        self
    }

    /// Scripts every call against `model`.
    pub fn on_model(mut self, model: impl Into<String>, outcome: Outcome) -> Self {
        self.outcomes.insert(model.into(), outcome);
        self
    }

    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Model names in the order they were called (chat and JSON calls).
    pub async fn attempts(&self) -> Vec<String> {
        self.attempts.lock().await.clone()
    }

    pub async fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().await.clone()
    }

    pub async fn structured_requests(&self) -> Vec<StructuredRequest> {
        self.structured_requests.lock().await.clone()
    }

    async fn run(&self, model: &str) -> Result<String, RehearseError> {
        self.attempts.lock().await.push(model.to_string());
        match self.outcomes.get(model) {
            Some(Outcome::Text(text)) => Ok(text.clone()),
            Some(Outcome::RateLimited) => Err(RehearseError::RateLimited {
                model: model.to_string(),
                message: "429 Resource has been exhausted (e.g. check quota).".to_string(),
            }),
            Some(Outcome::Fail(message)) => Err(RehearseError::provider(message.clone())),
            None => Ok(self
                .responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| "mock response".to_string())),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, RehearseError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RehearseError> {
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, RehearseError> {
        match &self.listing_error {
            Some(message) => Err(RehearseError::provider(message.clone())),
            None => Ok(self.models.clone()),
        }
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, RehearseError> {
        let model = request.model.clone();
        self.chat_requests.lock().await.push(request);
        self.run(&model).await
    }

    async fn generate_json(&self, request: StructuredRequest) -> Result<String, RehearseError> {
        let model = request.model.clone();
        self.structured_requests.lock().await.push(request);
        self.run(&model).await
    }
}
