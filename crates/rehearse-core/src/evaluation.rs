// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-round evaluation object.
//!
//! Model output is parsed into [`Evaluation`] and handed back unchanged:
//! scores keep whatever JSON value the model wrote, recommendation values
//! are not validated locally, and keys outside the documented shape are kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::types::EngineMode;

/// Sub-scores, nominally on a 1-5 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    #[serde(rename = "Technical Correctness", alias = "technical_correctness")]
    pub technical_correctness: Value,
    #[serde(rename = "Communication", alias = "communication")]
    pub communication: Value,
    #[serde(rename = "Judgment/Tradeoffs", alias = "judgment_tradeoffs")]
    pub judgment_tradeoffs: Value,
    #[serde(rename = "Problem Understanding", alias = "problem_understanding")]
    pub problem_understanding: Value,
    #[serde(rename = "Role-Specific depth", alias = "role_specific_depth")]
    pub role_specific_depth: Value,
    /// Extra sub-scores the model added (e.g. `"ML Rigor"`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scorecard {
    /// Builds a scorecard from the five named scores.
    pub fn new(
        technical_correctness: impl Into<Value>,
        communication: impl Into<Value>,
        judgment_tradeoffs: impl Into<Value>,
        problem_understanding: impl Into<Value>,
        role_specific_depth: impl Into<Value>,
    ) -> Self {
        Self {
            technical_correctness: technical_correctness.into(),
            communication: communication.into(),
            judgment_tradeoffs: judgment_tradeoffs.into(),
            problem_understanding: problem_understanding.into(),
            role_specific_depth: role_specific_depth.into(),
            extra: Map::new(),
        }
    }

    /// The five named scores with their labels, in declaration order.
    pub fn named(&self) -> [(&'static str, &Value); 5] {
        [
            ("Technical Correctness", &self.technical_correctness),
            ("Communication", &self.communication),
            ("Judgment/Tradeoffs", &self.judgment_tradeoffs),
            ("Problem Understanding", &self.problem_understanding),
            ("Role-Specific depth", &self.role_specific_depth),
        ]
    }

    /// The five named scores as numbers, where the model wrote numbers.
    pub fn values(&self) -> [Option<f64>; 5] {
        self.named().map(|(_, score)| score.as_f64())
    }
}

/// Four-value ordinal hiring scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
pub enum HiringRecommendation {
    #[strum(serialize = "No Hire")]
    NoHire,
    #[strum(serialize = "Lean Hire")]
    LeanHire,
    #[strum(serialize = "Hire")]
    Hire,
    #[strum(serialize = "Strong Hire")]
    StrongHire,
}

/// Structured evaluation of one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub scorecard: Scorecard,
    pub strong_signals: Vec<String>,
    pub weak_signals: Vec<String>,
    pub interviewer_expectation_met: bool,
    pub detailed_feedback: String,
    /// Kept as the model wrote it; see [`Evaluation::recommendation`].
    pub hiring_recommendation: String,
    pub ideal_solution_summary: String,
    pub improvement_plan: String,
    /// Set when the evaluation came from a non-model tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<EngineMode>,
    /// Top-level keys outside the documented shape.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Evaluation {
    /// Parses model output. Tolerates a Markdown `json` code fence around the object.
    pub fn from_model_output(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(strip_code_fence(raw))
    }

    /// The recommendation as the ordinal enum, when it is one of the four values.
    pub fn recommendation(&self) -> Option<HiringRecommendation> {
        self.hiring_recommendation.trim().parse().ok()
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
