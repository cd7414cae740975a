// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned interview content: coding problems, design problems, and
//! behavioral question banks.
//!
//! The built-in library is used by the offline responder. A custom library
//! can be loaded from JSON with the same shape.

use std::collections::HashMap;

use rehearse_core::RehearseError;
use serde::{Deserialize, Serialize};

/// Key of the behavioral bank used when a role has no bank of its own.
pub const DEFAULT_BANK: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingProblem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub example: String,
    pub constraints: Vec<String>,
    /// Shown when the candidate asks for a hint.
    pub hint: String,
}

impl CodingProblem {
    /// Markdown problem statement as shown to the candidate.
    pub fn statement(&self) -> String {
        let mut out = format!(
            "**Problem**: {}\n**Description**: {}\n**Example**: {}",
            self.title, self.description, self.example
        );
        if !self.constraints.is_empty() {
            out.push_str("\n**Constraints**:");
            for c in &self.constraints {
                out.push_str("\n- ");
                out.push_str(c);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignProblem {
    pub id: String,
    pub title: String,
    pub scale: String,
    pub requirements: Vec<String>,
}

impl DesignProblem {
    pub fn statement(&self) -> String {
        let mut out = format!(
            "**Design Task**: {}\n**Scale**: {}",
            self.title, self.scale
        );
        if !self.requirements.is_empty() {
            out.push_str("\n**Requirements**:");
            for r in &self.requirements {
                out.push_str("\n- ");
                out.push_str(r);
            }
        }
        out
    }
}

/// Pools the offline responder draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLibrary {
    #[serde(default)]
    pub coding: Vec<CodingProblem>,
    #[serde(default)]
    pub design: Vec<DesignProblem>,
    /// Behavioral questions keyed by role; `default` is the catch-all.
    #[serde(default)]
    pub behavioral: HashMap<String, Vec<String>>,
}

impl ContentLibrary {
    /// A library with the given pools. Any of them may be empty.
    pub fn new(
        coding: Vec<CodingProblem>,
        design: Vec<DesignProblem>,
        behavioral: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            coding,
            design,
            behavioral,
        }
    }

    /// Parses a library from JSON.
    pub fn from_json(json: &str) -> Result<Self, RehearseError> {
        serde_json::from_str(json)
            .map_err(|e| RehearseError::Config(format!("invalid content library: {e}")))
    }

    pub fn coding_problem(&self, id: &str) -> Option<&CodingProblem> {
        self.coding.iter().find(|p| p.id == id)
    }

    pub fn design_problem(&self, id: &str) -> Option<&DesignProblem> {
        self.design.iter().find(|p| p.id == id)
    }

    /// Questions for `role`, falling back to the default bank. Empty when
    /// neither exists.
    pub fn behavioral_questions(&self, role: &str) -> &[String] {
        self.behavioral
            .get(role)
            .or_else(|| self.behavioral.get(DEFAULT_BANK))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The content shipped with Rehearse.
    pub fn builtin() -> Self {
        Self::new(builtin_coding(), builtin_design(), builtin_behavioral())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_coding() -> Vec<CodingProblem> {
    vec![
        CodingProblem {
            id: "invert-binary-tree".into(),
            title: "Invert Binary Tree".into(),
            description: "Given the root of a binary tree, invert the tree, and return its root."
                .into(),
            example: "Input: root = [4,2,7,1,3,6,9], Output: [4,7,2,9,6,3,1]".into(),
            constraints: strings(&[
                "The number of nodes in the tree is in the range [0, 100].",
                "-100 <= Node.val <= 100",
            ]),
            hint: "Think recursively: what happens if you swap the children of every node?"
                .into(),
        },
        CodingProblem {
            id: "two-sum".into(),
            title: "Two Sum".into(),
            description: "Given an array of integers nums and an integer target, return the \
                          indices of the two numbers that add up to target."
                .into(),
            example: "Input: nums = [2,7,11,15], target = 9, Output: [0,1]".into(),
            constraints: strings(&[
                "2 <= nums.length <= 10^4",
                "Exactly one valid answer exists.",
            ]),
            hint: "For each number, what value would complete the pair? Can you look that up \
                   in constant time?"
                .into(),
        },
        CodingProblem {
            id: "merge-intervals".into(),
            title: "Merge Intervals".into(),
            description: "Given an array of intervals, merge all overlapping intervals and \
                          return the non-overlapping intervals that cover the input."
                .into(),
            example: "Input: [[1,3],[2,6],[8,10],[15,18]], Output: [[1,6],[8,10],[15,18]]"
                .into(),
            constraints: strings(&["1 <= intervals.length <= 10^4", "start <= end"]),
            hint: "Would the problem get easier if the intervals were ordered by start time?"
                .into(),
        },
        CodingProblem {
            id: "lru-cache".into(),
            title: "LRU Cache".into(),
            description: "Design a data structure that follows the constraints of a Least \
                          Recently Used cache with get and put in O(1) average time."
                .into(),
            example: "capacity = 2; put(1,1); put(2,2); get(1) -> 1; put(3,3); get(2) -> -1"
                .into(),
            constraints: strings(&["1 <= capacity <= 3000", "At most 2 * 10^5 calls."]),
            hint: "A hash map gives O(1) lookup. Which structure gives O(1) reordering?".into(),
        },
        CodingProblem {
            id: "top-k-frequent".into(),
            title: "Top K Frequent Elements".into(),
            description: "Given an integer array nums and an integer k, return the k most \
                          frequent elements."
                .into(),
            example: "Input: nums = [1,1,1,2,2,3], k = 2, Output: [1,2]".into(),
            constraints: strings(&[
                "1 <= nums.length <= 10^5",
                "The answer is unique.",
            ]),
            hint: "Count first. Do you need a full sort, or only the top k?".into(),
        },
    ]
}

fn builtin_design() -> Vec<DesignProblem> {
    vec![
        DesignProblem {
            id: "url-shortener".into(),
            title: "Design a URL Shortener (like Bit.ly)".into(),
            scale: "100M daily active users.".into(),
            requirements: strings(&[
                "Focus on the data model and hash function.",
                "Short links must redirect with low latency.",
                "Links may carry an optional expiry.",
            ]),
        },
        DesignProblem {
            id: "rate-limiter".into(),
            title: "Design a Distributed Rate Limiter".into(),
            scale: "1M requests per second across 50 API servers.".into(),
            requirements: strings(&[
                "Limit requests per API key per minute.",
                "Limits must hold across all servers.",
                "Adding a limiter must not add more than a few milliseconds of latency.",
            ]),
        },
        DesignProblem {
            id: "news-feed".into(),
            title: "Design a Social Media News Feed".into(),
            scale: "500M daily active users, average 200 follows each.".into(),
            requirements: strings(&[
                "Users see posts from people they follow, newest first.",
                "Feed load must complete in under 200ms.",
                "Celebrities may have tens of millions of followers.",
            ]),
        },
        DesignProblem {
            id: "chat-service".into(),
            title: "Design a Real-Time Chat Service".into(),
            scale: "50M concurrent connections.".into(),
            requirements: strings(&[
                "One-to-one and small group messaging.",
                "Messages are delivered in order and survive device restarts.",
                "Show online presence.",
            ]),
        },
    ]
}

fn builtin_behavioral() -> HashMap<String, Vec<String>> {
    HashMap::from([
        (
            DEFAULT_BANK.to_string(),
            strings(&[
                "Could you walk me through a challenging project you worked on recently?",
                "What were the key technical trade-offs you had to make?",
                "How did you handle testing and deployment for that system?",
                "Reflecting on it now, what would you have done differently?",
            ]),
        ),
        (
            "AI / ML Engineer".to_string(),
            strings(&[
                "Let's discuss a machine learning system you designed. How did you select your model architecture?",
                "How did you handle data preprocessing and feature engineering?",
                "What metrics did you use to evaluate offline vs online performance?",
                "How did you monitor this model for concept drift in production?",
            ]),
        ),
        (
            "Software Engineer".to_string(),
            strings(&[
                "Describe a complex system architecture you designed.",
                "How did you ensure scalability and fault tolerance?",
                "Tell me about a time you debugged a critical production issue.",
                "How do you approach code quality and code reviews?",
            ]),
        ),
    ])
}
