// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rehearse interview simulator.
//!
//! This crate provides the trait definitions, error types, and the session
//! data model used throughout the Rehearse workspace. Model backends and
//! interviewer tiers implement the traits defined here.

pub mod error;
pub mod evaluation;
pub mod session;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RehearseError;
pub use evaluation::{Evaluation, HiringRecommendation, Scorecard};
pub use session::{
    HistoryEntry, InterviewPhase, InterviewState, Level, Role, RoundType, Session, SessionSpec,
};
pub use types::{
    AdapterType, ChatRequest, ChatRole, ChatTurn, EngineMode, HealthStatus, ModelInfo, SessionId,
    StructuredRequest,
};

pub use traits::{ModelProvider, PluginAdapter, Responder};
