// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Rehearse integration tests.
//!
//! - [`MockProvider`] - scripted model provider that records every call
//! - [`fixtures`] - ready-made sessions

pub mod fixtures;
pub mod mock_provider;

pub use mock_provider::{MockProvider, Outcome};
