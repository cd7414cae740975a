// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for model backends and interviewer tiers.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod provider;
pub mod responder;

pub use adapter::PluginAdapter;
pub use provider::ModelProvider;
pub use responder::Responder;
