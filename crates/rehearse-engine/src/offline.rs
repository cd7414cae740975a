// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic, network-free interviewer.
//!
//! Each input is classified into a [`Cue`] by an ordered guard table per
//! round type, then the cue is turned into a reply. The only state is the
//! session history: the chosen problem is recorded as a system marker so
//! later turns (hints, clarifications) can look it up.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rehearse_core::session::ROUND_START_PREFIX;
use rehearse_core::{
    EngineMode, Evaluation, InterviewState, RehearseError, Responder, Role, RoundType, Scorecard,
    Session,
};
use rehearse_persona::ContentLibrary;

/// Marker prefix recording the coding problem in play.
pub const PROBLEM_MARKER: &str = "problem:";
/// Marker prefix recording the design problem in play.
pub const DESIGN_MARKER: &str = "design:";

/// Behavioral answers shorter than this (in characters) get an "elaborate" prompt.
pub const SHORT_ANSWER_CHARS: usize = 50;

const HINT_KEYWORDS: &[&str] = &["hint", "stuck"];
const RUN_REPORT_KEYWORDS: &[&str] = &["i ran this code", "output:"];
const ERROR_KEYWORDS: &[&str] = &["error", "exception", "traceback"];
const STORAGE_KEYWORDS: &[&str] = &["database", "store"];

const COMPLEXITY_NUDGE: &str = "Think about the time complexity of your current approach. \
     Is there a data structure that would give you faster lookups?";

/// Classification of one candidate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    // coding
    HintRequest,
    RunFailed,
    RunSucceeded,
    // design
    Clarification,
    Persistence,
    LoadBalancer,
    // behavioral
    ShortAnswer,
    StarFollowUp,
    Continue,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Maps (round type, state, input) to a cue. First matching guard wins.
pub fn classify(round: RoundType, state: &InterviewState, input: &str) -> Cue {
    if input.contains(ROUND_START_PREFIX) || !state.round_started() {
        return Cue::Start;
    }
    let lower = input.to_lowercase();

    match round {
        RoundType::Coding => {
            if contains_any(&lower, HINT_KEYWORDS) {
                Cue::HintRequest
            } else if contains_any(&lower, RUN_REPORT_KEYWORDS) {
                if contains_any(&lower, ERROR_KEYWORDS) {
                    Cue::RunFailed
                } else {
                    Cue::RunSucceeded
                }
            } else {
                Cue::Continue
            }
        }
        RoundType::Design => {
            if lower.contains('?') {
                Cue::Clarification
            } else if contains_any(&lower, STORAGE_KEYWORDS) {
                Cue::Persistence
            } else if lower.contains("load balancer") {
                Cue::LoadBalancer
            } else {
                Cue::Continue
            }
        }
        RoundType::Behavioral => {
            if input.trim().chars().count() < SHORT_ANSWER_CHARS {
                Cue::ShortAnswer
            } else {
                Cue::StarFollowUp
            }
        }
    }
}

/// Most recent marker value with `prefix`, searching history backward.
fn latest_marker<'a>(state: &'a InterviewState, prefix: &str) -> Option<&'a str> {
    state
        .history()
        .iter()
        .rev()
        .filter(|e| e.role == Role::System)
        .find_map(|e| e.content.strip_prefix(prefix))
}

/// The fixed evaluation returned whenever no model is available.
pub fn offline_evaluation() -> Evaluation {
    Evaluation {
        scorecard: Scorecard::new(3, 4, 3, 4, 3),
        strong_signals: vec![
            "Good structured communication.".to_string(),
            "Clear understanding of basic concepts.".to_string(),
        ],
        weak_signals: vec![
            "Could have gone deeper into edge cases.".to_string(),
            "System design details were high-level.".to_string(),
        ],
        interviewer_expectation_met: true,
        detailed_feedback: "This is an automated offline evaluation. You demonstrated good \
             communication and general competence. To get specific technical feedback, please \
             ensure the Live AI mode is valid."
            .to_string(),
        hiring_recommendation: "Lean Hire".to_string(),
        ideal_solution_summary: "In a real interview, top candidates would deep dive into \
             scalability bottlenecks and specific technology choices relevant to the problem."
            .to_string(),
        improvement_plan: "Focus on system design patterns, specific algorithmic \
             optimizations, and behavioral stories using the STAR method."
            .to_string(),
        mode: Some(EngineMode::Static),
        extra: serde_json::Map::new(),
    }
}

/// Offline interviewer over a content library.
#[derive(Debug, Clone)]
pub struct OfflineResponder {
    library: ContentLibrary,
}

impl Default for OfflineResponder {
    fn default() -> Self {
        Self::new(ContentLibrary::builtin())
    }
}

impl OfflineResponder {
    pub fn new(library: ContentLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    /// Next interviewer message. Never fails: missing content yields an
    /// explanatory message instead.
    pub fn reply(&self, session: &mut Session, input: &str) -> String {
        let round = session.round_type();
        let cue = classify(round, session.state(), input);
        tracing::debug!(session_id = %session.id(), ?round, ?cue, "offline reply");

        match (round, cue) {
            (RoundType::Coding, Cue::Start) => self.open_coding(session),
            (RoundType::Design, Cue::Start) => self.open_design(session),
            (RoundType::Behavioral, Cue::Start) => self.open_behavioral(session),

            (_, Cue::HintRequest) => latest_marker(session.state(), PROBLEM_MARKER)
                .and_then(|id| self.library.coding_problem(id))
                .map(|p| format!("Hint: {}", p.hint))
                .unwrap_or_else(|| COMPLEXITY_NUDGE.to_string()),
            (_, Cue::RunFailed) => "Your code hit an error. Walk me through the failing case \
                 and tell me where you think the bug is."
                .to_string(),
            (_, Cue::RunSucceeded) => "The output looks right. What are the time and space \
                 complexities of your solution, and can you justify them?"
                .to_string(),

            (_, Cue::Clarification) => {
                let scale = latest_marker(session.state(), DESIGN_MARKER)
                    .and_then(|id| self.library.design_problem(id))
                    .map(|p| p.scale.as_str())
                    .unwrap_or("100M daily active users");
                format!(
                    "Good question. Assume {scale}, and treat high availability as a hard \
                     requirement. How does that shape your design?"
                )
            }
            (_, Cue::Persistence) => "Which database would you choose here, and how would you \
                 model and partition the data as it grows?"
                .to_string(),
            (_, Cue::LoadBalancer) => "Would you use a layer 4 or a layer 7 load balancer \
                 here? What do you gain and lose with each?"
                .to_string(),

            (_, Cue::ShortAnswer) => "Could you elaborate? Walk me through a specific \
                 example: the situation, your task, and the actions you took."
                .to_string(),
            (_, Cue::StarFollowUp) => "Thanks. What was the result, and how did you measure \
                 the impact?"
                .to_string(),

            (RoundType::Design, Cue::Continue) => "Let's get the high-level architecture on \
                 the whiteboard. What are the main components, and how does a request flow \
                 through them?"
                .to_string(),
            (_, Cue::Continue) => {
                "Okay. Keep going, and talk me through your reasoning as you write it.".to_string()
            }
        }
    }

    fn open_coding(&self, session: &mut Session) -> String {
        let Some(problem) = self.library.coding.choose(&mut rand::thread_rng()) else {
            return "Offline content unavailable: no coding problems are configured.".to_string();
        };
        session
            .state_mut()
            .record(Role::System, format!("{PROBLEM_MARKER}{}", problem.id));
        format!(
            "Let's start with a coding problem.\n\n{}\n\nTalk me through your approach before \
             you write any code.",
            problem.statement()
        )
    }

    fn open_design(&self, session: &mut Session) -> String {
        let Some(problem) = self.library.design.choose(&mut rand::thread_rng()) else {
            return "Offline content unavailable: no design problems are configured.".to_string();
        };
        session
            .state_mut()
            .record(Role::System, format!("{DESIGN_MARKER}{}", problem.id));
        format!(
            "{}\n\nStart by clarifying requirements, then sketch the data model.",
            problem.statement()
        )
    }

    fn open_behavioral(&self, session: &Session) -> String {
        match self.library.behavioral_questions(session.role()).first() {
            Some(question) => question.clone(),
            None => "Offline content unavailable: no behavioral questions are configured."
                .to_string(),
        }
    }
}

#[async_trait]
impl Responder for OfflineResponder {
    fn mode(&self) -> EngineMode {
        EngineMode::Static
    }

    async fn respond(&self, session: &mut Session, input: &str) -> Result<String, RehearseError> {
        Ok(self.reply(session, input))
    }

    async fn evaluate(&self, _session: &Session) -> Result<Evaluation, RehearseError> {
        Ok(offline_evaluation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rehearse_core::Level;
    use rehearse_persona::{CodingProblem, DesignProblem};
    use rehearse_test_utils::fixtures;

    fn markers(session: &Session) -> Vec<String> {
        session
            .state()
            .history()
            .iter()
            .filter(|e| e.role == Role::System)
            .map(|e| e.content.clone())
            .collect()
    }

    fn single_problem_library() -> ContentLibrary {
        ContentLibrary::new(
            vec![CodingProblem {
                id: "two-sum".into(),
                title: "Two Sum".into(),
                description: "Find two numbers that add up to a target.".into(),
                example: "nums = [2,7,11,15], target = 9 -> [0,1]".into(),
                constraints: vec![],
                hint: "A hash map from value to index gives O(1) lookups.".into(),
            }],
            vec![DesignProblem {
                id: "rate-limiter".into(),
                title: "Design a distributed rate limiter".into(),
                scale: "1M requests per second".into(),
                requirements: vec!["Per-user limits".into()],
            }],
            HashMap::from([("default".to_string(), vec!["Tell me about yourself.".to_string()])]),
        )
    }

    #[test]
    fn coding_start_records_one_problem_marker() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::session(Level::L4, RoundType::Coding);

        let reply = offline.reply(&mut session, "START_ROUND_CODING");

        let markers = markers(&session);
        assert_eq!(markers.len(), 1);
        let id = markers[0].strip_prefix(PROBLEM_MARKER).unwrap();
        let problem = offline.library().coding_problem(id).unwrap();
        assert!(reply.contains(&problem.title));
    }

    #[test]
    fn hint_uses_recorded_problem() {
        let offline = OfflineResponder::new(single_problem_library());
        let mut session = fixtures::session(Level::L3, RoundType::Coding);
        offline.reply(&mut session, "START_ROUND_CODING");
        session.state_mut().record(Role::Interviewer, "Problem given.");

        let reply = offline.reply(&mut session, "I'm stuck, can I get a HINT?");
        assert_eq!(reply, "Hint: A hash map from value to index gives O(1) lookups.");
    }

    #[test]
    fn hint_without_marker_nudges_complexity() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::started_session(RoundType::Coding);
        assert_eq!(offline.reply(&mut session, "hint please"), COMPLEXITY_NUDGE);
    }

    #[test]
    fn run_reports_branch_on_errors() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::started_session(RoundType::Coding);

        let failed = offline.reply(&mut session, "I ran this code. Output: Traceback (most recent call last)");
        assert!(failed.contains("error"));

        let passed = offline.reply(&mut session, "Output: [0, 1]");
        assert!(passed.contains("complexities"));
    }

    #[test]
    fn coding_guard_order_prefers_hint() {
        let session = fixtures::started_session(RoundType::Coding);
        assert_eq!(
            classify(RoundType::Coding, session.state(), "output: error, need a hint"),
            Cue::HintRequest
        );
        assert_eq!(
            classify(RoundType::Coding, session.state(), "Here is my approach"),
            Cue::Continue
        );
    }

    #[test]
    fn sentinel_forces_start_even_mid_round() {
        let session = fixtures::started_session(RoundType::Design);
        assert_eq!(
            classify(RoundType::Design, session.state(), "START_ROUND_DESIGN"),
            Cue::Start
        );
    }

    #[test]
    fn design_table() {
        let offline = OfflineResponder::new(single_problem_library());
        let mut session = fixtures::session(Level::L5, RoundType::Design);

        let opening = offline.reply(&mut session, "START_ROUND_DESIGN");
        assert!(opening.contains("Design a distributed rate limiter"));
        assert_eq!(markers(&session), vec!["design:rate-limiter".to_string()]);
        session.state_mut().record(Role::Interviewer, opening);

        assert!(offline
            .reply(&mut session, "How many users are there?")
            .contains("1M requests per second"));
        assert!(offline
            .reply(&mut session, "I'd put users in a Database")
            .contains("partition"));
        assert!(offline
            .reply(&mut session, "A load balancer in front")
            .contains("layer 7"));
        assert!(offline.reply(&mut session, "Let me think").contains("whiteboard"));
    }

    #[test]
    fn behavioral_length_threshold() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::started_session(RoundType::Behavioral);

        let short = "a".repeat(10);
        let long = "a".repeat(80);
        assert!(offline.reply(&mut session, &short).contains("elaborate"));
        assert!(offline.reply(&mut session, &long).contains("result"));
    }

    #[test]
    fn behavioral_start_uses_role_bank() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::session(Level::L4, RoundType::Behavioral);
        assert_eq!(
            offline.reply(&mut session, "START_ROUND_BEHAVIORAL"),
            "Describe a complex system architecture you designed."
        );
        assert!(markers(&session).is_empty());
    }

    #[test]
    fn empty_pools_return_error_text() {
        let offline = OfflineResponder::new(ContentLibrary::default());
        for round in [RoundType::Coding, RoundType::Design, RoundType::Behavioral] {
            let mut session = fixtures::session(Level::L3, round);
            let reply = offline.reply(&mut session, &round.start_sentinel());
            assert!(reply.starts_with("Offline content unavailable"));
            assert!(markers(&session).is_empty());
        }
    }

    #[test]
    fn fixed_evaluation_matches_fixture() {
        let eval = offline_evaluation();
        assert_eq!(eval.scorecard.values(), [3.0, 4.0, 3.0, 4.0, 3.0].map(Some));
        assert_eq!(eval.hiring_recommendation, "Lean Hire");
        assert!(eval.interviewer_expectation_met);
        assert_eq!(eval.strong_signals[0], "Good structured communication.");
        assert_eq!(eval.weak_signals[1], "System design details were high-level.");
        assert_eq!(eval.mode, Some(EngineMode::Static));
    }

    #[tokio::test]
    async fn responder_impl_never_fails() {
        let offline = OfflineResponder::default();
        let mut session = fixtures::session(Level::L3, RoundType::Coding);
        assert_eq!(offline.mode(), EngineMode::Static);
        assert!(!offline.respond(&mut session, "hello").await.unwrap().is_empty());
        assert_eq!(offline.evaluate(&session).await.unwrap(), offline_evaluation());
    }
}
