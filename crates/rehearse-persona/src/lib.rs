// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interviewer personas and canned content for the Rehearse interview simulator.
//!
//! [`persona`] maps a company name to its interviewing style; [`content`]
//! holds the problem and question pools used when no model is available.

pub mod content;
pub mod persona;

pub use content::{CodingProblem, ContentLibrary, DesignProblem};
pub use persona::{Persona, companies, level_guidance, persona, persona_or_neutral};
