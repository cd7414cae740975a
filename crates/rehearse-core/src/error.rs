// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rehearse interview engine.

use thiserror::Error;

/// Substrings that mark a provider failure as rate-limit or quota class.
///
/// Matched case-insensitively against the provider's error message. A bare
/// `429` is not a marker; it only counts in a status position.
const RETRIABLE_MARKERS: &[&str] = &[
    "(429)",
    "code 429",
    "error 429",
    "http 429",
    "returned 429",
    "status 429",
    "quota",
    "rate limit",
    "rate-limit",
    "ratelimit",
    "rate_limit",
    "resource exhausted",
    "resource_exhausted",
    "too many requests",
];

/// The primary error type used across all Rehearse crates.
#[derive(Debug, Error)]
pub enum RehearseError {
    /// Configuration errors (missing API key, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Model provider errors (HTTP failure, unexpected response shape, auth).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider rejected the call for quota or rate-limit reasons.
    #[error("rate limited on model {model}: {message}")]
    RateLimited { model: String, message: String },

    /// Every model in the priority list failed with a retriable error.
    #[error("all models exhausted after {attempts} attempt(s)")]
    ModelsExhausted { attempts: usize },

    /// The model returned evaluation output that is not the expected JSON.
    #[error("evaluation output could not be parsed: {message}")]
    EvaluationParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No session exists with the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Caller-supplied input was rejected (unknown company, level, round type).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RehearseError {
    /// Returns true when the error belongs to the rate-limit/quota class and
    /// the call should be retried against the next model.
    pub fn is_retriable(&self) -> bool {
        match self {
            RehearseError::RateLimited { .. } => true,
            RehearseError::Provider { message, .. } => {
                let lower = message.to_lowercase();
                RETRIABLE_MARKERS.iter().any(|marker| lower.contains(marker))
            }
            _ => false,
        }
    }

    /// Convenience constructor for provider errors without a source.
    pub fn provider(message: impl Into<String>) -> Self {
        RehearseError::Provider {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rate_limited_is_retriable() {
        let err = RehearseError::RateLimited {
            model: "models/gemini-2.0-flash".into(),
            message: "slow down".into(),
        };
        assert!(err.is_retriable());
    }

    #[test]
    fn provider_quota_message_is_retriable() {
        for message in [
            "API returned 429 Too Many Requests",
            "Quota exceeded for metric generate_content_requests",
            "RESOURCE_EXHAUSTED: try again later",
            "Rate limit reached",
        ] {
            assert!(
                RehearseError::provider(message).is_retriable(),
                "expected retriable: {message}"
            );
        }
    }

    #[test]
    fn other_provider_errors_are_not_retriable() {
        assert!(!RehearseError::provider("API key not valid").is_retriable());
        assert!(!RehearseError::provider("400 Bad Request: malformed").is_retriable());
    }

    #[test]
    fn status_429_is_retriable_only_in_status_position() {
        for message in ["HTTP 429", "upstream returned 429", "error (429)", "status 429: slow down"] {
            assert!(
                RehearseError::provider(message).is_retriable(),
                "expected retriable: {message}"
            );
        }
        for message in [
            "request req-14290 failed: invalid argument",
            "prompt has 4429 tokens, limit is 4096",
            "invalid JSON at line 429",
        ] {
            assert!(
                !RehearseError::provider(message).is_retriable(),
                "expected fatal: {message}"
            );
        }
    }

    #[test]
    fn non_provider_variants_are_not_retriable() {
        assert!(!RehearseError::ModelsExhausted { attempts: 3 }.is_retriable());
        assert!(!RehearseError::Config("missing key".into()).is_retriable());
        assert!(
            !RehearseError::EvaluationParse {
                message: "expected value".into(),
                source: None,
            }
            .is_retriable()
        );
    }

    #[test]
    fn exhausted_display_mentions_attempts() {
        let err = RehearseError::ModelsExhausted { attempts: 4 };
        assert_eq!(err.to_string(), "all models exhausted after 4 attempt(s)");
    }

    proptest! {
        #[test]
        fn quota_marker_anywhere_is_retriable(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let err = RehearseError::provider(format!("{prefix}RESOURCE_EXHAUSTED{suffix}"));
            prop_assert!(err.is_retriable());
        }
    }
}
