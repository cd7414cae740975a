// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed responder: prompt assembly plus model rotation over one provider.

use std::sync::Arc;

use async_trait::async_trait;
use rehearse_core::{
    ChatRequest, EngineMode, Evaluation, ModelProvider, RehearseError, Responder, Session,
    StructuredRequest,
};
use tracing::debug;

use crate::history::project_history;
use crate::prober::probe_models;
use crate::prompt::{evaluation_prompt, system_prompt};
use crate::rotor::ModelRotor;

/// One model tier (cloud or local).
pub struct ModelResponder {
    mode: EngineMode,
    provider: Arc<dyn ModelProvider>,
    rotor: ModelRotor,
    max_response_words: u32,
}

impl ModelResponder {
    /// Responder over an explicit priority list.
    pub fn new(
        mode: EngineMode,
        provider: Arc<dyn ModelProvider>,
        models: Vec<String>,
        max_response_words: u32,
    ) -> Self {
        Self {
            mode,
            provider,
            rotor: ModelRotor::new(models),
            max_response_words,
        }
    }

    /// Responder whose priority list comes from probing `provider`.
    pub async fn probe(
        mode: EngineMode,
        provider: Arc<dyn ModelProvider>,
        preferences: &[String],
        fallback: &[String],
        max_response_words: u32,
    ) -> Self {
        let models = probe_models(provider.as_ref(), preferences, fallback).await;
        Self::new(mode, provider, models, max_response_words)
    }

    pub fn rotor(&self) -> &ModelRotor {
        &self.rotor
    }
}

#[async_trait]
impl Responder for ModelResponder {
    fn mode(&self) -> EngineMode {
        self.mode
    }

    fn priority_list(&self) -> Vec<String> {
        self.rotor.models().to_vec()
    }

    async fn respond(&self, session: &mut Session, input: &str) -> Result<String, RehearseError> {
        let system = system_prompt(session, self.max_response_words);
        let history = project_history(session.state().history(), input);
        let provider = &self.provider;

        let reply = self
            .rotor
            .run(|model| {
                let request = ChatRequest {
                    model,
                    system_instruction: Some(system.clone()),
                    history: history.clone(),
                    message: input.to_string(),
                };
                async move { provider.chat(request).await }
            })
            .await?;

        debug!(
            session_id = %session.id(),
            mode = %self.mode,
            model = self.rotor.current().unwrap_or_default(),
            "interviewer reply generated"
        );
        Ok(reply)
    }

    async fn evaluate(&self, session: &Session) -> Result<Evaluation, RehearseError> {
        let prompt = evaluation_prompt(session);
        let provider = &self.provider;

        let raw = self
            .rotor
            .run(|model| {
                let request = StructuredRequest {
                    model,
                    prompt: prompt.clone(),
                };
                async move { provider.generate_json(request).await }
            })
            .await?;

        Evaluation::from_model_output(&raw).map_err(|e| RehearseError::EvaluationParse {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }
}
