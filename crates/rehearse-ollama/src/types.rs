// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama HTTP API types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    pub content: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

/// Non-streaming reply from `/api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub message: ChatMessage,
}

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateBody {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    /// `"json"` constrains output to valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateReply {
    pub response: String,
}

/// Reply from `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsReply {
    #[serde(default)]
    pub models: Vec<LocalModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalModel {
    /// e.g. `llama3:latest`.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
