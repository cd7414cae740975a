// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait shared by every backend.

use async_trait::async_trait;

use crate::error::RehearseError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and lifecycle for a pluggable backend.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Human-readable name of this adapter instance.
    fn name(&self) -> &str;

    fn version(&self) -> semver::Version;

    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, RehearseError>;

    /// Releases any held resources.
    async fn shutdown(&self) -> Result<(), RehearseError>;
}
