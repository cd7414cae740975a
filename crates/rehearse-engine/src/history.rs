// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Projection of session history into provider conversation turns.

use rehearse_core::{ChatTurn, HistoryEntry, Role};

/// Converts the transcript into prior turns for a chat call.
///
/// System markers are dropped. Candidate entries become user turns and
/// interviewer entries become model turns, in order. If the caller already
/// appended `pending_input` as the last candidate entry, that entry is left
/// out since it is sent as the new message.
pub fn project_history(history: &[HistoryEntry], pending_input: &str) -> Vec<ChatTurn> {
    let mut dialogue: Vec<&HistoryEntry> =
        history.iter().filter(|e| e.role != Role::System).collect();

    if let Some(last) = dialogue.last()
        && last.role == Role::Candidate
        && last.content == pending_input
    {
        dialogue.pop();
    }

    dialogue
        .into_iter()
        .map(|entry| match entry.role {
            Role::Candidate => ChatTurn::user(entry.content.as_str()),
            _ => ChatTurn::model(entry.content.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::ChatRole;

    fn entry(role: Role, content: &str) -> HistoryEntry {
        HistoryEntry {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn drops_markers_and_maps_roles() {
        let history = vec![
            entry(Role::Interviewer, "Welcome."),
            entry(Role::System, "problem:two-sum"),
            entry(Role::Candidate, "Can I use a hash map?"),
            entry(Role::Interviewer, "Sure."),
        ];
        let turns = project_history(&history, "Here is my code");
        assert_eq!(
            turns,
            vec![
                ChatTurn::model("Welcome."),
                ChatTurn::user("Can I use a hash map?"),
                ChatTurn::model("Sure."),
            ]
        );
    }

    #[test]
    fn excludes_pending_input_already_recorded() {
        let history = vec![
            entry(Role::Interviewer, "Welcome."),
            entry(Role::Candidate, "Hello"),
            entry(Role::System, "design:url-shortener"),
        ];
        let turns = project_history(&history, "Hello");
        assert_eq!(turns, vec![ChatTurn::model("Welcome.")]);
    }

    #[test]
    fn keeps_earlier_candidate_turn_with_same_text() {
        let history = vec![
            entry(Role::Candidate, "ok"),
            entry(Role::Interviewer, "Go on."),
        ];
        let turns = project_history(&history, "ok");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, ChatRole::User);
    }

    #[test]
    fn empty_history_projects_to_nothing() {
        assert!(project_history(&[], "START_ROUND_CODING").is_empty());
    }
}
