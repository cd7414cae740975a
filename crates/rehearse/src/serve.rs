// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rehearse serve` command implementation.

use std::sync::Arc;

use rehearse_config::RehearseConfig;
use rehearse_core::RehearseError;
use rehearse_engine::InterviewEngine;
use rehearse_gateway::{GatewayState, start_server};
use tracing::info;

use crate::shutdown;

/// Builds the engine and serves the gateway until SIGINT/SIGTERM.
pub async fn run_serve(config: RehearseConfig) -> Result<(), RehearseError> {
    init_tracing(&config.engine.log_level);
    info!(mode = %config.engine.mode, "starting rehearse serve");

    let engine = Arc::new(InterviewEngine::from_config(&config).await);
    let state = GatewayState::new(engine, config.engine.max_sessions);
    let cancel = shutdown::install_signal_handler();

    start_server(&config.gateway, state, cancel).await?;

    info!("rehearse serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rehearse={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
