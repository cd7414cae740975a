// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview engine for Rehearse.
//!
//! Composes the model availability prober, the retrying model rotor, prompt
//! assembly and the offline responder into two total operations:
//! [`InterviewEngine::get_interviewer_response`] and
//! [`InterviewEngine::evaluate_round`].

pub mod engine;
pub mod history;
pub mod offline;
pub mod prober;
pub mod prompt;
pub mod responder;
pub mod rotor;

pub use engine::{InterviewEngine, TierModels};
pub use history::project_history;
pub use offline::{Cue, OfflineResponder, classify, offline_evaluation};
pub use prober::probe_models;
pub use prompt::{evaluation_prompt, system_prompt};
pub use responder::ModelResponder;
pub use rotor::ModelRotor;
