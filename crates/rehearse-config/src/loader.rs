// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Lookup order: `./rehearse.toml` > `~/.config/rehearse/rehearse.toml` >
//! `/etc/rehearse/rehearse.toml`, with `REHEARSE_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RehearseConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/rehearse/rehearse.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "rehearse.toml";

/// Per-user config path under the XDG config directory.
pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("rehearse/rehearse.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rehearse/rehearse.toml`
/// 3. `~/.config/rehearse/rehearse.toml`
/// 4. `./rehearse.toml`
/// 5. `REHEARSE_*` environment variables
pub fn load_config() -> Result<RehearseConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<RehearseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RehearseConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RehearseConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RehearseConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered Figment, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RehearseConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Keys contain underscores, so `REHEARSE_GEMINI_API_KEY` must map to
/// `gemini.api_key`, never `gemini.api.key`. Only the first segment is split.
fn env_provider() -> Env {
    Env::prefixed("REHEARSE_").map(|key| {
        let key_str = key.as_str();
        let mapped = ["engine", "gemini", "local", "gateway"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
