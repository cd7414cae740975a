// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for interviewer turns and round evaluation.
//!
//! Both builders are pure functions of the session.

use std::fmt::Write;

use rehearse_core::{Role, Session};
use rehearse_persona::{level_guidance, persona_or_neutral};
use serde_json::json;

const NOT_PROVIDED: &str = "Not provided";

/// System instruction for the interviewer model.
pub fn system_prompt(session: &Session, max_response_words: u32) -> String {
    let persona = persona_or_neutral(session.company());
    let state = session.state();
    let level = session.level();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are a Principal Engineer and Hiring Manager at {}.",
        session.company()
    );
    let _ = writeln!(out, "Your personality: {}", persona.personality);
    let _ = writeln!(out, "Focus areas: {}", persona.focus_areas.join(", "));

    out.push_str("\nStyle Guidelines:\n");
    for guideline in persona.style_guidelines {
        let _ = writeln!(out, "- {guideline}");
    }

    let _ = write!(
        out,
        "\nLevel expectations for {level}:\n{}\n\n",
        level_guidance(level)
    );

    let _ = writeln!(out, "Role: {}", session.role());
    let _ = writeln!(out, "Years of experience: {}", session.years_of_experience());
    let _ = writeln!(out, "Preferred language: {}", session.preferred_language());
    let _ = writeln!(out, "Round type: {}", session.round_type());
    let _ = writeln!(
        out,
        "Candidate Resume Context: {}",
        session.resume_text().unwrap_or(NOT_PROVIDED)
    );
    let _ = writeln!(
        out,
        "Job Description Context: {}",
        session.job_description().unwrap_or(NOT_PROVIDED)
    );
    let _ = writeln!(
        out,
        "Progress: {} messages exchanged; round {} of {}.",
        state.dialogue_len(),
        state.current_round,
        state.total_rounds()
    );

    out.push_str("\nABSORB THESE CORE BEHAVIOR RULES:\n");
    out.push_str("1. DO NOT act like a tutor or teacher.\n");
    out.push_str("2. DO NOT give direct answers or solutions.\n");
    out.push_str(
        "3. Be realistic and professional. Use the company's specific jargon or style if applicable.\n",
    );
    out.push_str("4. If the candidate is vague, push back.\n");
    out.push_str(
        "5. If the candidate over-engineers, interrupt and ask them to focus on the core problem.\n",
    );
    out.push_str(
        "6. Use \"progressive guidance\": start silent, then subtle nudges, then leading questions. \
         Only give a partial hint if they are completely stuck.\n",
    );
    if level.is_senior() {
        out.push_str(
            "7. Change constraints or add complexity mid-interview if they are moving too fast.\n",
        );
    } else {
        out.push_str(
            "7. Keep the problem constraints stable; probe depth with follow-up questions instead.\n",
        );
    }
    let _ = writeln!(
        out,
        "8. Keep each reply under {max_response_words} words."
    );

    let _ = write!(
        out,
        "\nCurrent Interview State: {} ({})\n",
        state.state, state.current_phase
    );
    out
}

/// One-shot prompt asking for the round evaluation as JSON.
///
/// The transcript is embedded without system markers.
pub fn evaluation_prompt(session: &Session) -> String {
    let transcript: Vec<_> = session
        .state()
        .history()
        .iter()
        .filter(|e| e.role != Role::System)
        .map(|e| json!({ "role": e.role, "content": e.content }))
        .collect();
    let transcript = serde_json::to_string_pretty(&transcript).unwrap_or_default();

    format!(
        r#"As a Principal Engineer at {company}, evaluate the following interview transcript for an {level} {role} position ({round} round).

Transcript:
{transcript}

Provide a detailed evaluation in JSON format with the following fields:
- "scorecard": {{
    "Technical Correctness": 1-5,
    "Communication": 1-5,
    "Judgment/Tradeoffs": 1-5,
    "Problem Understanding": 1-5,
    "Role-Specific depth": 1-5 (e.g., ML rigor for an AI role, system scalability for a software engineer)
  }}
- "strong_signals": list of things they did well.
- "weak_signals": list of things they struggled with.
- "interviewer_expectation_met": boolean.
- "detailed_feedback": summary for the candidate.
- "hiring_recommendation": one of "Strong Hire", "Hire", "Lean Hire", "No Hire".
- "ideal_solution_summary": how a top candidate would have handled this scenario, including common mistakes to avoid.
- "improvement_plan": a 14-day roadmap focusing on the missing depth areas identified.
"#,
        company = session.company(),
        level = session.level(),
        role = session.role(),
        round = session.round_type(),
    )
}
