// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview session data model.
//!
//! A [`Session`] bundles the candidate's target parameters (immutable after
//! creation) with exactly one [`InterviewState`], which carries the mutable
//! conversation history and progress counters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::SessionId;

/// Prefix of the input sentinel that opens a round, e.g. `START_ROUND_CODING`.
pub const ROUND_START_PREFIX: &str = "START_ROUND_";

/// Default `current_phase` label for a new session.
pub const DEFAULT_PHASE: &str = "Intro";

/// Kind of interview round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoundType {
    Coding,
    Design,
    Behavioral,
}

impl RoundType {
    /// The input sentinel that signals the start of this round.
    pub fn start_sentinel(&self) -> String {
        format!("{ROUND_START_PREFIX}{}", self.to_string().to_uppercase())
    }
}

/// Target seniority level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Level {
    L3,
    L4,
    L5,
}

impl Level {
    /// Number of rounds planned for this level.
    pub fn total_rounds(&self) -> u32 {
        match self {
            Level::L3 => 3,
            Level::L4 => 4,
            Level::L5 => 5,
        }
    }

    /// Whether the interviewer may add constraints mid-round.
    pub fn is_senior(&self) -> bool {
        matches!(self, Level::L4 | Level::L5)
    }
}

/// Advisory interview phase. Surfaced to the prompt builder only; no
/// component enforces transitions between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewPhase {
    #[default]
    Initialization,
    Clarification,
    TechnicalProbing,
    FollowUp,
    Evaluation,
}

/// Speaker of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Candidate,
    Interviewer,
    /// Inline marker (e.g. the chosen problem id); never sent to a model as dialogue.
    System,
}

/// One entry in the interview transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Mutable conversation and progress record owned by a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewState {
    pub current_round: u32,
    total_rounds: u32,
    pub state: InterviewPhase,
    pub current_phase: String,
    /// Reserved; not read by any algorithm yet.
    pub pressure_level: u32,
    /// Reserved; not read by any algorithm yet.
    pub struggle_meter: u32,
    history: Vec<HistoryEntry>,
}

impl InterviewState {
    /// Creates the initial state for a session with `total_rounds` rounds.
    pub fn new(total_rounds: u32) -> Self {
        Self {
            current_round: 1,
            total_rounds,
            state: InterviewPhase::default(),
            current_phase: DEFAULT_PHASE.to_string(),
            pressure_level: 0,
            struggle_meter: 0,
            history: Vec::new(),
        }
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// The transcript, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Appends an entry. History is append-only.
    pub fn record(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(HistoryEntry {
            role,
            content: content.into(),
        });
    }

    /// Number of candidate and interviewer turns, ignoring system markers.
    pub fn dialogue_len(&self) -> usize {
        self.history
            .iter()
            .filter(|e| e.role != Role::System)
            .count()
    }

    /// Whether the interviewer has spoken at least once.
    pub fn round_started(&self) -> bool {
        self.history.iter().any(|e| e.role == Role::Interviewer)
    }
}

/// Caller-supplied parameters for a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpec {
    pub company: String,
    pub role: String,
    pub level: Level,
    pub years_of_experience: u32,
    pub preferred_language: String,
    pub round_type: RoundType,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

/// One candidate's interview run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    spec: SessionSpec,
    created_at: chrono::DateTime<chrono::Utc>,
    state: InterviewState,
}

impl Session {
    /// Creates a session with a fresh identifier and an initial state sized
    /// for the target level.
    pub fn new(spec: SessionSpec) -> Self {
        let state = InterviewState::new(spec.level.total_rounds());
        Self {
            id: SessionId::generate(),
            spec,
            created_at: chrono::Utc::now(),
            state,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn company(&self) -> &str {
        &self.spec.company
    }

    pub fn role(&self) -> &str {
        &self.spec.role
    }

    pub fn level(&self) -> Level {
        self.spec.level
    }

    pub fn years_of_experience(&self) -> u32 {
        self.spec.years_of_experience
    }

    pub fn preferred_language(&self) -> &str {
        &self.spec.preferred_language
    }

    pub fn round_type(&self) -> RoundType {
        self.spec.round_type
    }

    pub fn resume_text(&self) -> Option<&str> {
        self.spec.resume_text.as_deref()
    }

    pub fn job_description(&self) -> Option<&str> {
        self.spec.job_description.as_deref()
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut InterviewState {
        &mut self.state
    }
}
