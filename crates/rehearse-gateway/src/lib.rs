// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Rehearse interview simulator.
//!
//! Exposes session lifecycle routes over an in-memory [`SessionStore`] and
//! forwards candidate turns to the [`rehearse_engine::InterviewEngine`].
//! There is no code-execution route.

pub mod error;
pub mod handlers;
pub mod server;
pub mod store;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, build_router, start_server};
pub use store::{SessionStore, SharedSession, StoreFull};
