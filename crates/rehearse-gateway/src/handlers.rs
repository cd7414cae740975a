// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Each handler that touches a session holds that session's lock for the
//! whole call, including the engine round-trip.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rehearse_core::{EngineMode, Evaluation, Level, Role, RoundType, Session, SessionSpec};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::store::StoreFull;

fn default_round_type() -> String {
    "coding".to_string()
}

/// Request body for POST /session/start.
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub target_company: String,
    pub target_role: String,
    pub target_level: String,
    pub years_of_experience: u32,
    pub preferred_language: String,
    #[serde(default = "default_round_type")]
    pub round_type: String,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub interviewer_message: String,
}

/// Request body for POST /session/{id}/respond.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub candidate_message: String,
}

#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub interviewer_message: String,
}

#[derive(Debug, Serialize)]
pub struct TierInfo {
    pub mode: EngineMode,
    pub models: Vec<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub configured_mode: EngineMode,
    pub active_mode: EngineMode,
    pub tiers: Vec<TierInfo>,
    pub sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<&'static str>,
}

/// One row of GET /sessions.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub company: String,
    pub role: String,
    pub level: Level,
    pub round_type: RoundType,
    pub current_round: u32,
    pub total_rounds: u32,
    pub messages: usize,
    pub created_at: String,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            company: session.company().to_string(),
            role: session.role().to_string(),
            level: session.level(),
            round_type: session.round_type(),
            current_round: session.state().current_round,
            total_rounds: session.state().total_rounds(),
            messages: session.state().dialogue_len(),
            created_at: session.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
}

impl StartRequest {
    /// Validates the request into a session spec.
    ///
    /// The company must have a registered persona; its canonical name is kept.
    pub fn into_spec(self) -> Result<SessionSpec, ApiError> {
        let persona = rehearse_persona::persona(&self.target_company).ok_or_else(|| {
            ApiError::BadRequest(format!("unknown company: {}", self.target_company))
        })?;
        let level = Level::from_str(self.target_level.trim())
            .map_err(|_| ApiError::BadRequest(format!("unknown level: {}", self.target_level)))?;
        let round_type = RoundType::from_str(self.round_type.trim()).map_err(|_| {
            ApiError::BadRequest(format!("unknown round type: {}", self.round_type))
        })?;

        Ok(SessionSpec {
            company: persona.name.to_string(),
            role: self.target_role,
            level,
            years_of_experience: self.years_of_experience,
            preferred_language: self.preferred_language,
            round_type,
            resume_text: self.resume_text.filter(|s| !s.trim().is_empty()),
            job_description: self.job_description.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let tiers = state
        .engine
        .priority_lists()
        .into_iter()
        .map(|t| TierInfo {
            mode: t.mode,
            models: t.models,
        })
        .collect();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        configured_mode: state.engine.configured_mode(),
        active_mode: state.engine.active_mode(),
        tiers,
        sessions: state.store.len(),
    })
}

/// GET /companies
pub async fn get_companies() -> Json<CompaniesResponse> {
    Json(CompaniesResponse {
        companies: rehearse_persona::companies(),
    })
}

/// POST /session/start
///
/// Creates the session, asks the engine to open the round, and records the
/// greeting as the first interviewer turn.
pub async fn start_session(
    State(state): State<GatewayState>,
    Json(body): Json<StartRequest>,
) -> Result<Json<StartResponse>, ApiError> {
    let spec = body.into_spec()?;
    if state.store.is_full() {
        return Err(StoreFull(state.store.max_sessions()).into());
    }

    let mut session = Session::new(spec);
    let sentinel = session.round_type().start_sentinel();
    let greeting = state
        .engine
        .get_interviewer_response(&mut session, &sentinel)
        .await;
    session
        .state_mut()
        .record(Role::Interviewer, greeting.clone());

    let session_id = session.id().to_string();
    info!(
        session_id = %session_id,
        company = session.company(),
        level = %session.level(),
        round_type = %session.round_type(),
        "session started"
    );
    state.store.insert(session)?;

    Ok(Json(StartResponse {
        session_id,
        interviewer_message: greeting,
    }))
}

/// POST /session/{id}/respond
pub async fn respond(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, ApiError> {
    let shared = state
        .store
        .get(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let mut session = shared.lock().await;

    session
        .state_mut()
        .record(Role::Candidate, body.candidate_message.as_str());
    let reply = state
        .engine
        .get_interviewer_response(&mut session, &body.candidate_message)
        .await;
    session.state_mut().record(Role::Interviewer, reply.clone());

    Ok(Json(RespondResponse {
        interviewer_message: reply,
    }))
}

/// POST /session/{id}/evaluate
pub async fn evaluate(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Evaluation>, ApiError> {
    let shared = state
        .store
        .get(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let session = shared.lock().await;
    let evaluation = state.engine.evaluate_round(&session).await;
    info!(
        session_id = %id,
        recommendation = %evaluation.hiring_recommendation,
        "round evaluated"
    );
    Ok(Json(evaluation))
}

/// GET /session/{id}
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let shared = state
        .store
        .get(&id)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let session = shared.lock().await;
    Ok(Json(session.clone()))
}

/// DELETE /session/{id}
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&id) {
        info!(session_id = %id, "session deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

/// GET /sessions
pub async fn list_sessions(State(state): State<GatewayState>) -> Json<SessionListResponse> {
    let mut sessions = Vec::new();
    for shared in state.store.all() {
        let session = shared.lock().await;
        sessions.push(SessionSummary::from(&*session));
    }
    sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Json(SessionListResponse { sessions })
}
