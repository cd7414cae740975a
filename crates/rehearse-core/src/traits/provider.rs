// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model provider trait for hosted and local language-model backends.

use async_trait::async_trait;

use crate::error::RehearseError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatRequest, ModelInfo, StructuredRequest};

/// A language-model backend that can list its models and generate text.
///
/// Implementations map quota and rate-limit responses to
/// [`RehearseError::RateLimited`] (or a provider error whose message carries a
/// rate-limit marker) so callers can rotate to another model.
#[async_trait]
pub trait ModelProvider: PluginAdapter {
    /// Lists the models this provider exposes.
    async fn list_models(&self) -> Result<Vec<ModelInfo>, RehearseError>;

    /// Runs one chat turn with prior history and returns the reply text.
    async fn chat(&self, request: ChatRequest) -> Result<String, RehearseError>;

    /// Runs a one-shot prompt constrained to JSON output and returns the raw text.
    async fn generate_json(&self, request: StructuredRequest) -> Result<String, RehearseError>;
}
