// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use rehearse_config::GatewayConfig;
use rehearse_core::RehearseError;
use rehearse_engine::InterviewEngine;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::store::SessionStore;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub engine: Arc<InterviewEngine>,
    pub store: Arc<SessionStore>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<InterviewEngine>, max_sessions: usize) -> Self {
        Self {
            engine,
            store: Arc::new(SessionStore::new(max_sessions)),
            start_time: Instant::now(),
        }
    }
}

/// All gateway routes with permissive CORS.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/companies", get(handlers::get_companies))
        .route("/sessions", get(handlers::list_sessions))
        .route("/session/start", post(handlers::start_session))
        .route(
            "/session/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/session/{id}/respond", post(handlers::respond))
        .route("/session/{id}/evaluate", post(handlers::evaluate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the configured host:port and serves until `cancel` fires.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), RehearseError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RehearseError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| RehearseError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
