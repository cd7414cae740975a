// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model availability probing.

use rehearse_core::ModelProvider;
use tracing::{info, warn};

/// Builds the model priority list for `provider`.
///
/// For each preference substring in order, appends every advertised
/// generation-capable model whose name contains it, skipping duplicates.
/// Falls back to `fallback` when listing fails or nothing matches; never
/// returns an error.
pub async fn probe_models(
    provider: &dyn ModelProvider,
    preferences: &[String],
    fallback: &[String],
) -> Vec<String> {
    let available = match provider.list_models().await {
        Ok(models) => models,
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "model listing failed, using fallback list");
            return fallback.to_vec();
        }
    };

    let capable: Vec<&str> = available
        .iter()
        .filter(|m| m.supports_generation)
        .map(|m| m.name.as_str())
        .collect();

    let mut ordered: Vec<String> = Vec::new();
    for preference in preferences {
        for name in capable.iter().filter(|name| name.contains(preference.as_str())) {
            if !ordered.iter().any(|existing| existing == name) {
                ordered.push((*name).to_string());
            }
        }
    }

    if ordered.is_empty() {
        warn!(
            provider = provider.name(),
            advertised = available.len(),
            "no preferred model available, using fallback list"
        );
        return fallback.to_vec();
    }

    info!(provider = provider.name(), models = ?ordered, "model priority list built");
    ordered
}
