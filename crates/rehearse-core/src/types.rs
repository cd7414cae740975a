// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by providers, responders, and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for an interview session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random (UUID v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    /// Remote or local language-model backend.
    Provider,
    /// HTTP surface exposed to callers.
    Gateway,
}

/// Which tier produced (or is configured to produce) interviewer output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EngineMode {
    /// Hosted model provider (Gemini).
    Cloud,
    /// Local model backend (Ollama).
    Local,
    /// Deterministic offline responder, no network.
    Static,
}

// --- Model provider types ---

/// A model advertised by a provider's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider-qualified model name, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    /// Whether the model supports content generation.
    pub supports_generation: bool,
}

/// Speaker of a turn in a provider conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The candidate.
    User,
    /// The interviewer (assistant).
    Model,
}

/// One prior turn in a provider conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A multi-turn chat call: prior history plus one new user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Model to run.
    pub model: String,
    /// System-level instruction applied to the whole conversation.
    pub system_instruction: Option<String>,
    /// Prior turns, oldest first.
    pub history: Vec<ChatTurn>,
    /// The new user turn.
    pub message: String,
}

/// A one-shot prompt whose output must be JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRequest {
    /// Model to run.
    pub model: String,
    /// Full prompt text.
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn engine_mode_parses_case_insensitively() {
        assert_eq!(EngineMode::from_str("Cloud").unwrap(), EngineMode::Cloud);
        assert_eq!(EngineMode::from_str("STATIC").unwrap(), EngineMode::Static);
        assert_eq!(EngineMode::Local.to_string(), "local");
        assert!(EngineMode::from_str("hybrid").is_err());
    }

    #[test]
    fn engine_mode_serializes_lowercase() {
        let json = serde_json::to_string(&EngineMode::Static).unwrap();
        assert_eq!(json, "\"static\"");
    }

    #[test]
    fn session_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn chat_turn_constructors_set_role() {
        assert_eq!(ChatTurn::user("hi").role, ChatRole::User);
        assert_eq!(ChatTurn::model("hello").role, ChatRole::Model);
    }
}
