// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder trait: one tier of interviewer behavior.

use async_trait::async_trait;

use crate::error::RehearseError;
use crate::evaluation::Evaluation;
use crate::session::Session;
use crate::types::EngineMode;

/// Produces interviewer turns and evaluations for a session.
///
/// The interview engine holds an ordered list of responders and falls
/// through to the next one when a tier fails.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Tier this responder represents.
    fn mode(&self) -> EngineMode;

    /// Models this responder rotates through, most preferred first.
    fn priority_list(&self) -> Vec<String> {
        Vec::new()
    }

    /// Produces the next interviewer message for `input`.
    ///
    /// The caller appends the candidate input and the returned reply to the
    /// session history; implementations may only add system markers.
    async fn respond(&self, session: &mut Session, input: &str) -> Result<String, RehearseError>;

    /// Scores the session's transcript.
    async fn evaluate(&self, session: &Session) -> Result<Evaluation, RehearseError>;
}
