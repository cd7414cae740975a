// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Rehearse interview simulator.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`), an
//! XDG file hierarchy, `REHEARSE_*` environment overrides, and miette
//! diagnostics with typo suggestions.
//!
//! ```no_run
//! use rehearse_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("gateway port: {}", config.gateway.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{EngineConfig, GatewayConfig, GeminiConfig, LocalConfig, RehearseConfig};

/// Load configuration from the file hierarchy and validate it.
///
/// Figment errors are converted into diagnostics with typo suggestions;
/// validation failures are all collected.
pub fn load_and_validate() -> Result<RehearseConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(mode = %config.engine.mode, "configuration loaded");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from one explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<RehearseConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<RehearseConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Contents of every config file in the hierarchy that exists, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_PATH.into());

    [
        local,
        loader::user_config_path(),
        loader::SYSTEM_CONFIG_PATH.into(),
    ]
    .into_iter()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
