// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Rehearse interview simulator.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use rehearse_core::EngineMode;
use serde::{Deserialize, Serialize};

/// Top-level Rehearse configuration.
///
/// All sections are optional and default to values that run a local gateway
/// against the hosted Gemini API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RehearseConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    /// Hosted model tier.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Local model tier (Ollama).
    #[serde(default)]
    pub local: LocalConfig,

    /// HTTP gateway bind settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl RehearseConfig {
    /// A copy safe to print: API keys are replaced by a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.gemini.api_key.is_some() {
            copy.gemini.api_key = Some("<redacted>".to_string());
        }
        copy
    }
}

/// Interview engine behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Highest tier the engine starts from.
    #[serde(default = "default_mode")]
    pub mode: EngineMode,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum number of live sessions held by the gateway.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Word ceiling for interviewer replies, embedded in the system prompt.
    #[serde(default = "default_max_response_words")]
    pub max_response_words: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            log_level: default_log_level(),
            max_sessions: default_max_sessions(),
            max_response_words: default_max_response_words(),
        }
    }
}

fn default_mode() -> EngineMode {
    EngineMode::Cloud
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_sessions() -> usize {
    1000
}

fn default_max_response_words() -> u32 {
    150
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Ordered model-name substrings used to rank available models.
    #[serde(default = "default_gemini_preferred")]
    pub preferred_models: Vec<String>,

    /// Used when listing fails or matches nothing.
    #[serde(default = "default_gemini_fallback")]
    pub fallback_models: Vec<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            preferred_models: default_gemini_preferred(),
            fallback_models: default_gemini_fallback(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_preferred() -> Vec<String> {
    ["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_gemini_fallback() -> Vec<String> {
    ["models/gemini-2.0-flash", "models/gemini-1.5-flash"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Local (Ollama) backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocalConfig {
    /// Adds the local tier behind the cloud tier in `cloud` mode.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_local_base_url")]
    pub base_url: String,

    #[serde(default = "default_local_preferred")]
    pub preferred_models: Vec<String>,

    #[serde(default = "default_local_fallback")]
    pub fallback_models: Vec<String>,

    #[serde(default = "default_local_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_local_base_url(),
            preferred_models: default_local_preferred(),
            fallback_models: default_local_fallback(),
            request_timeout_secs: default_local_timeout_secs(),
        }
    }
}

fn default_local_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_local_preferred() -> Vec<String> {
    ["llama3", "mistral"].into_iter().map(String::from).collect()
}

fn default_local_fallback() -> Vec<String> {
    vec!["llama3".to_string()]
}

fn default_local_timeout_secs() -> u64 {
    120
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}
