// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::RehearseConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first one.
pub fn validate_config(config: &RehearseConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.engine.log_level.to_lowercase().as_str()) {
        fail(format!(
            "engine.log_level `{}` is not one of {}",
            config.engine.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.engine.max_sessions == 0 {
        fail("engine.max_sessions must be at least 1".to_string());
    }

    if config.engine.max_response_words == 0 {
        fail("engine.max_response_words must be at least 1".to_string());
    }

    for (section, fallback, base_url, timeout) in [
        (
            "gemini",
            &config.gemini.fallback_models,
            &config.gemini.base_url,
            config.gemini.request_timeout_secs,
        ),
        (
            "local",
            &config.local.fallback_models,
            &config.local.base_url,
            config.local.request_timeout_secs,
        ),
    ] {
        if fallback.iter().all(|m| m.trim().is_empty()) {
            fail(format!(
                "{section}.fallback_models must contain at least one model name"
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            fail(format!(
                "{section}.base_url `{base_url}` must start with http:// or https://"
            ));
        }
        if timeout == 0 {
            fail(format!("{section}.request_timeout_secs must be at least 1"));
        }
    }

    if let Some(key) = &config.gemini.api_key
        && key.trim().is_empty()
    {
        fail("gemini.api_key must not be empty when set".to_string());
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.gateway.port == 0 {
        fail("gateway.port must not be 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
