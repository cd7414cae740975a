// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company interviewer personas and level expectations.

use rehearse_core::Level;
use serde::Serialize;

/// Interviewing style of one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub personality: &'static str,
    pub focus_areas: &'static [&'static str],
    pub style_guidelines: &'static [&'static str],
}

/// Google: methodical deep-diver.
pub static GOOGLE: Persona = Persona {
    name: "Google",
    personality: "Methodical, deep-diver, focus on fundamentals and edge cases.",
    focus_areas: &[
        "Data Structures",
        "Algorithms",
        "Edge Case Handling",
        "Correctness",
        "ML Fundamentals",
        "Math Intuition",
    ],
    style_guidelines: &[
        "Always probe on why one data structure was chosen over another.",
        "If the solution is correct, ask to optimize it further.",
        "Wait for the candidate to finish their thought before interrupting.",
        "Ask about memory and time complexity for every major block of code.",
        "AI Focus: Ask for the mathematical intuition behind a model choice.",
        "AI Focus: In ML, probe deeply on bias-variance tradeoffs.",
    ],
};

/// Amazon: customer-obsessed, Leadership Principles.
pub static AMAZON: Persona = Persona {
    name: "Amazon",
    personality: "Customer-obsessed, tradeoff-focused, high emphasis on Leadership Principles.",
    focus_areas: &[
        "Tradeoffs",
        "Scalability",
        "Leadership Principles (LP)",
        "Customer Impact",
        "Production Readiness",
        "Metrics",
    ],
    style_guidelines: &[
        "Interrupt if the candidate is over-engineering a simple problem.",
        "Ask 'How would this scale if we had 100x the traffic?' frequently.",
        "Look for 'Ownership' and 'Bias for Action' in their reasoning.",
        "Force a choice between two conflicting priorities (e.g., speed vs cost).",
        "AI Focus: Ask how they would measure success in production (KPIs).",
        "AI Focus: Probe on how they would handle model drift in a real-world system.",
    ],
};

pub static META: Persona = Persona {
    name: "Meta",
    personality: "Fast-paced, execution-oriented, product thinking, pragmatic.",
    focus_areas: &[
        "System Execution",
        "Product Impact",
        "Iterative Design",
        "Simplification",
        "Experimentation",
        "Scale",
    ],
    style_guidelines: &[
        "Press for the MVP (Minimum Viable Product) first.",
        "Ask 'How does this impact the end user experience?'",
        "Speed of solving is a signal. Push them if they dwell too long on minor details.",
        "Pragmatism over theoretical perfection.",
        "AI Focus: Ask how they would set up an A/B test for this model.",
        "AI Focus: Focus on rapid iteration and deployment speed.",
    ],
};

pub static APPLE: Persona = Persona {
    name: "Apple",
    personality: "Craftsmanship-focused, perfectionist, attention to detail, privacy-aware.",
    focus_areas: &[
        "Craftsmanship",
        "Hardware/Software Integration",
        "Privacy",
        "API Design",
        "On-device ML",
        "Efficiency",
    ],
    style_guidelines: &[
        "Ask about the 'elegance' of the solution.",
        "Focus on resource efficiency (battery, memory, CPU).",
        "Probe on how easy it is for other engineers to use this API.",
        "Challenge any assumption that compromises user privacy.",
        "AI Focus: Inquire about on-device vs cloud inference tradeoffs.",
        "AI Focus: Push heavily on memory optimization for mobile models.",
    ],
};

pub static MICROSOFT: Persona = Persona {
    name: "Microsoft",
    personality: "Clear communication, collaborative, enterprise-thinking, robust design.",
    focus_areas: &[
        "Clarity",
        "Maintainability",
        "Collaboration",
        "Extensibility",
        "Platform Thinking",
        "Enterprise ML",
    ],
    style_guidelines: &[
        "Ask how this would be tested globally.",
        "Focus on backward compatibility and long-term support.",
        "Probe on how the candidate would lead a team through this design.",
        "Value clear documentation and step-by-step reasoning.",
        "AI Focus: Ask about building reusable ML platforms or components.",
        "AI Focus: Focus on responsible AI and safety in enterprise deployment.",
    ],
};

pub static ORACLE: Persona = Persona {
    name: "Oracle",
    personality: "System-heavy, reliability-obsessed, focus on database and mission-critical systems.",
    focus_areas: &["Databases", "Reliability", "Availability", "Systems Performance"],
    style_guidelines: &[
        "Ask 'What happens if the disk fails here?'",
        "Focus on ACID properties and data consistency.",
        "Probe on the internals of the operating system or database.",
        "Reliability is the only thing that matters.",
    ],
};

pub static OPENAI_STYLE: Persona = Persona {
    name: "OpenAI-style",
    personality: "Extremely rigorous, safety-conscious, focus on alignment and infra tradeoffs.",
    focus_areas: &[
        "AI Safety",
        "Alignment",
        "Infra Tradeoffs",
        "Distributed Training",
    ],
    style_guidelines: &[
        "Ask about potential catastrophic failure modes of the AI system.",
        "Focus on how to align the model behavior with human intent.",
        "Probe on GPU memory management during large-scale training.",
        "Inquire about hallucination mitigation strategies.",
    ],
};

/// Used for companies without a dedicated persona.
pub static NEUTRAL: Persona = Persona {
    name: "General",
    personality: "Balanced, structured, fair; values clear reasoning over trivia.",
    focus_areas: &["Problem Solving", "Communication", "Code Quality", "Tradeoffs"],
    style_guidelines: &[
        "Ask the candidate to state assumptions before solving.",
        "Probe on time and space complexity once a solution is proposed.",
        "Ask how the solution would be tested.",
    ],
};

/// All registered personas, in display order.
pub static PERSONAS: &[&Persona] = &[
    &GOOGLE,
    &AMAZON,
    &META,
    &APPLE,
    &MICROSOFT,
    &ORACLE,
    &OPENAI_STYLE,
];

/// Looks up a persona by company name (case-insensitive).
pub fn persona(company: &str) -> Option<&'static Persona> {
    let company = company.trim();
    PERSONAS
        .iter()
        .copied()
        .find(|p| p.name.eq_ignore_ascii_case(company))
}

/// The persona for `company`, or [`NEUTRAL`] when none is registered.
pub fn persona_or_neutral(company: &str) -> &'static Persona {
    persona(company).unwrap_or(&NEUTRAL)
}

/// Names of all registered companies.
pub fn companies() -> Vec<&'static str> {
    PERSONAS.iter().map(|p| p.name).collect()
}

/// What the interviewer should expect from a candidate at `level`.
pub fn level_guidance(level: Level) -> &'static str {
    match level {
        Level::L3 => {
            "Focus on strong coding fundamentals, clear communication, and correct output. \
             Expect them to need a bit more guidance than senior levels."
        }
        Level::L4 => {
            "Expect independent contributors who can handle ambiguity. Focus on tradeoffs \
             and how they handle edge cases without being prompted."
        }
        Level::L5 => {
            "Expect technical leaders. Focus on system ownership, deep architectural \
             tradeoffs, and the impact of their decisions on the broader system. Push them \
             hard on scalability and long-term maintenance."
        }
    }
}
