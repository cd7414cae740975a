// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview engine: ordered responder tiers with an offline last resort.
//!
//! Both public operations are total. A tier that errors (rate-limit
//! exhaustion, provider failure, unparsable evaluation) or returns an empty
//! reply is logged and skipped; the offline responder answers when every
//! model tier has failed.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rehearse_config::RehearseConfig;
use rehearse_core::{EngineMode, Evaluation, ModelProvider, Responder, Session};
use rehearse_gemini::GeminiProvider;
use rehearse_ollama::OllamaProvider;
use tracing::{info, warn};

use crate::offline::{OfflineResponder, offline_evaluation};
use crate::responder::ModelResponder;

/// Priority list reported for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierModels {
    pub mode: EngineMode,
    pub models: Vec<String>,
}

pub struct InterviewEngine {
    tiers: Vec<Box<dyn Responder>>,
    offline: OfflineResponder,
    configured: EngineMode,
    /// Tier that served the most recent call.
    active: ArcSwap<EngineMode>,
}

impl InterviewEngine {
    /// Engine over explicit tiers, tried in order before `offline`.
    pub fn new(
        configured: EngineMode,
        tiers: Vec<Box<dyn Responder>>,
        offline: OfflineResponder,
    ) -> Self {
        let initial = tiers.first().map(|t| t.mode()).unwrap_or(EngineMode::Static);
        Self {
            tiers,
            offline,
            configured,
            active: ArcSwap::from_pointee(initial),
        }
    }

    /// Engine that only uses the offline responder.
    pub fn offline() -> Self {
        Self::new(EngineMode::Static, Vec::new(), OfflineResponder::default())
    }

    /// Builds the tiers for the configured mode, probing each provider.
    ///
    /// Never fails: a tier whose provider cannot be constructed is left out,
    /// down to an offline-only engine.
    pub async fn from_config(config: &RehearseConfig) -> Self {
        let configured = config.engine.mode;
        let words = config.engine.max_response_words;
        let mut tiers: Vec<Box<dyn Responder>> = Vec::new();

        if configured == EngineMode::Cloud {
            match GeminiProvider::new(&config.gemini) {
                Ok(provider) => {
                    let provider: Arc<dyn ModelProvider> = Arc::new(provider);
                    let tier = ModelResponder::probe(
                        EngineMode::Cloud,
                        provider,
                        &config.gemini.preferred_models,
                        &config.gemini.fallback_models,
                        words,
                    )
                    .await;
                    tiers.push(Box::new(tier));
                }
                Err(e) => warn!(error = %e, "cloud tier unavailable"),
            }
        }

        let wants_local = configured == EngineMode::Local
            || (configured == EngineMode::Cloud && config.local.enabled);
        if wants_local {
            match OllamaProvider::new(&config.local) {
                Ok(provider) => {
                    let provider: Arc<dyn ModelProvider> = Arc::new(provider);
                    let tier = ModelResponder::probe(
                        EngineMode::Local,
                        provider,
                        &config.local.preferred_models,
                        &config.local.fallback_models,
                        words,
                    )
                    .await;
                    tiers.push(Box::new(tier));
                }
                Err(e) => warn!(error = %e, "local tier unavailable"),
            }
        }

        if tiers.is_empty() && configured != EngineMode::Static {
            warn!(configured = %configured, "no model tier available, starting in static mode");
        }

        let engine = Self::new(configured, tiers, OfflineResponder::default());
        info!(
            configured = %configured,
            active = %engine.active_mode(),
            tiers = engine.tiers.len(),
            "interview engine ready"
        );
        engine
    }

    pub fn configured_mode(&self) -> EngineMode {
        self.configured
    }

    /// Tier that served the most recent call.
    pub fn active_mode(&self) -> EngineMode {
        **self.active.load()
    }

    /// Priority list of every model tier, in fallback order.
    pub fn priority_lists(&self) -> Vec<TierModels> {
        self.tiers
            .iter()
            .map(|t| TierModels {
                mode: t.mode(),
                models: t.priority_list(),
            })
            .collect()
    }

    fn mark_active(&self, mode: EngineMode) {
        if self.active_mode() != mode {
            info!(from = %self.active_mode(), to = %mode, "active engine mode changed");
        }
        self.active.store(Arc::new(mode));
    }

    /// Next interviewer message for `input`. Always returns non-empty text.
    ///
    /// The caller records `input` and the returned message in the session
    /// history; this only adds system markers.
    pub async fn get_interviewer_response(&self, session: &mut Session, input: &str) -> String {
        for tier in &self.tiers {
            match tier.respond(session, input).await {
                Ok(reply) if !reply.trim().is_empty() => {
                    self.mark_active(tier.mode());
                    return reply;
                }
                Ok(_) => warn!(
                    session_id = %session.id(),
                    mode = %tier.mode(),
                    "tier returned an empty reply, falling back"
                ),
                Err(e) => warn!(
                    session_id = %session.id(),
                    mode = %tier.mode(),
                    error = %e,
                    "tier failed, falling back"
                ),
            }
        }

        if !self.tiers.is_empty() {
            warn!(session_id = %session.id(), "all model tiers failed, using offline responder");
        }
        self.mark_active(EngineMode::Static);
        self.offline.reply(session, input)
    }

    /// Evaluation of the session's round. Always returns a well-formed object.
    pub async fn evaluate_round(&self, session: &Session) -> Evaluation {
        for tier in &self.tiers {
            match tier.evaluate(session).await {
                Ok(evaluation) => {
                    self.mark_active(tier.mode());
                    return evaluation;
                }
                Err(e) => warn!(
                    session_id = %session.id(),
                    mode = %tier.mode(),
                    error = %e,
                    "evaluation failed, falling back"
                ),
            }
        }

        self.mark_active(EngineMode::Static);
        offline_evaluation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::{Level, Role, RoundType};
    use rehearse_test_utils::{MockProvider, Outcome, fixtures};
    use tracing_test::traced_test;

    fn tier(mode: EngineMode, mock: Arc<MockProvider>, models: &[&str]) -> Box<dyn Responder> {
        Box::new(ModelResponder::new(
            mode,
            mock,
            models.iter().map(|s| s.to_string()).collect(),
            150,
        ))
    }

    #[tokio::test]
    async fn first_healthy_tier_answers() {
        let cloud = Arc::new(MockProvider::new().on_model("c", Outcome::Text("cloud says hi".into())));
        let engine = InterviewEngine::new(
            EngineMode::Cloud,
            vec![tier(EngineMode::Cloud, cloud, &["c"])],
            OfflineResponder::default(),
        );
        let mut session = fixtures::started_session(RoundType::Coding);

        let reply = engine.get_interviewer_response(&mut session, "hello").await;
        assert_eq!(reply, "cloud says hi");
        assert_eq!(engine.active_mode(), EngineMode::Cloud);
    }

    #[tokio::test]
    #[traced_test]
    async fn exhausted_cloud_falls_to_local_then_offline() {
        let cloud = Arc::new(
            MockProvider::new()
                .on_model("c1", Outcome::RateLimited)
                .on_model("c2", Outcome::RateLimited),
        );
        let local = Arc::new(MockProvider::new().on_model("l", Outcome::Fail("connection refused".into())));
        let engine = InterviewEngine::new(
            EngineMode::Cloud,
            vec![
                tier(EngineMode::Cloud, cloud.clone(), &["c1", "c2"]),
                tier(EngineMode::Local, local.clone(), &["l"]),
            ],
            OfflineResponder::default(),
        );
        let mut session = fixtures::session(Level::L4, RoundType::Coding);

        let reply = engine.get_interviewer_response(&mut session, "START_ROUND_CODING").await;

        assert!(reply.contains("**Problem**"));
        assert_eq!(engine.active_mode(), EngineMode::Static);
        assert_eq!(cloud.attempts().await.len(), 2);
        assert_eq!(local.attempts().await.len(), 1);
        assert!(logs_contain("all model tiers failed"));
        assert!(logs_contain("rate limited, rotating to next model"));
    }

    #[tokio::test]
    async fn empty_reply_counts_as_failure() {
        let cloud = Arc::new(MockProvider::new().on_model("c", Outcome::Text("   ".into())));
        let engine = InterviewEngine::new(
            EngineMode::Cloud,
            vec![tier(EngineMode::Cloud, cloud, &["c"])],
            OfflineResponder::default(),
        );
        let mut session = fixtures::started_session(RoundType::Behavioral);
        let reply = engine.get_interviewer_response(&mut session, "short").await;
        assert!(reply.contains("elaborate"));
    }

    #[tokio::test]
    async fn unparsable_evaluation_falls_back_to_fixture() {
        let cloud = Arc::new(MockProvider::new().on_model("c", Outcome::Text("not json".into())));
        let engine = InterviewEngine::new(
            EngineMode::Cloud,
            vec![tier(EngineMode::Cloud, cloud, &["c"])],
            OfflineResponder::default(),
        );
        let mut session = fixtures::started_session(RoundType::Coding);
        session.state_mut().record(Role::Candidate, "done");

        let eval = engine.evaluate_round(&session).await;
        assert_eq!(eval, offline_evaluation());
        assert_eq!(engine.active_mode(), EngineMode::Static);
    }

    #[tokio::test]
    async fn active_mode_recovers_when_tier_succeeds_again() {
        let cloud = Arc::new(MockProvider::with_responses(vec!["back online".into()]));
        let engine = InterviewEngine::new(
            EngineMode::Cloud,
            vec![tier(EngineMode::Cloud, cloud, &["c"])],
            OfflineResponder::default(),
        );
        engine.mark_active(EngineMode::Static);

        let mut session = fixtures::started_session(RoundType::Design);
        assert_eq!(engine.get_interviewer_response(&mut session, "hi").await, "back online");
        assert_eq!(engine.active_mode(), EngineMode::Cloud);
    }

    #[tokio::test]
    async fn offline_engine_reports_static() {
        let engine = InterviewEngine::offline();
        assert_eq!(engine.configured_mode(), EngineMode::Static);
        assert_eq!(engine.active_mode(), EngineMode::Static);
        assert!(engine.priority_lists().is_empty());

        let mut session = fixtures::session(Level::L3, RoundType::Design);
        let reply = engine.get_interviewer_response(&mut session, "START_ROUND_DESIGN").await;
        assert!(reply.contains("**Design Task**"));
    }

    #[tokio::test]
    async fn static_config_builds_offline_only() {
        let config = rehearse_config::load_and_validate_str("[engine]\nmode = \"static\"\n")
            .unwrap_or_else(|errors| panic!("config errors: {errors:?}"));
        let engine = InterviewEngine::from_config(&config).await;
        assert_eq!(engine.configured_mode(), EngineMode::Static);
        assert_eq!(engine.active_mode(), EngineMode::Static);
        assert!(engine.priority_lists().is_empty());
    }

    #[tokio::test]
    async fn local_config_uses_fallback_list_when_server_is_down() {
        let config = rehearse_config::load_and_validate_str(
            "[engine]\nmode = \"local\"\n\n[local]\nbase_url = \"http://127.0.0.1:9\"\nfallback_models = [\"llama3\"]\n",
        )
        .unwrap_or_else(|errors| panic!("config errors: {errors:?}"));
        let engine = InterviewEngine::from_config(&config).await;

        assert_eq!(
            engine.priority_lists(),
            vec![TierModels {
                mode: EngineMode::Local,
                models: vec!["llama3".to_string()],
            }]
        );
        assert_eq!(engine.active_mode(), EngineMode::Local);

        let mut session = fixtures::session(Level::L3, RoundType::Behavioral);
        let reply = engine
            .get_interviewer_response(&mut session, "START_ROUND_BEHAVIORAL")
            .await;
        assert_eq!(reply, "Describe a complex system architecture you designed.");
        assert_eq!(engine.active_mode(), EngineMode::Static);
    }
}
