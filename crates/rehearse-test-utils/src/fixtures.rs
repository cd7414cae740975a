// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session fixtures.

use rehearse_core::{Level, Role, RoundType, Session, SessionSpec};

/// A Google software-engineer spec at `level` for `round_type`.
pub fn spec(level: Level, round_type: RoundType) -> SessionSpec {
    SessionSpec {
        company: "Google".to_string(),
        role: "Software Engineer".to_string(),
        level,
        years_of_experience: 5,
        preferred_language: "Python".to_string(),
        round_type,
        resume_text: None,
        job_description: None,
    }
}

pub fn session(level: Level, round_type: RoundType) -> Session {
    Session::new(spec(level, round_type))
}

/// A session whose round has already been opened by the interviewer.
pub fn started_session(round_type: RoundType) -> Session {
    let mut session = session(Level::L4, round_type);
    session
        .state_mut()
        .record(Role::Interviewer, "Welcome. Let's begin.");
    session
}
