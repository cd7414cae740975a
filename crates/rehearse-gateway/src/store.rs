// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store.
//!
//! Sessions live for the lifetime of the process. Each session sits behind
//! its own async mutex so requests on one session run one at a time while
//! different sessions proceed concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use rehearse_core::Session;
use tokio::sync::Mutex;

pub type SharedSession = Arc<Mutex<Session>>;

/// The store already holds `max_sessions` sessions.
#[derive(Debug, thiserror::Error)]
#[error("session limit reached ({0})")]
pub struct StoreFull(pub usize);

pub struct SessionStore {
    sessions: DashMap<String, SharedSession>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    pub fn is_full(&self) -> bool {
        self.sessions.len() >= self.max_sessions
    }

    /// Adds a session. The capacity check and insert are not atomic, so
    /// concurrent starts may overshoot the limit by a few sessions.
    pub fn insert(&self, session: Session) -> Result<SharedSession, StoreFull> {
        if self.is_full() {
            return Err(StoreFull(self.max_sessions));
        }
        let id = session.id().to_string();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id, Arc::clone(&shared));
        Ok(shared)
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Destroys a session and its state.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Snapshot of all session handles.
    pub fn all(&self) -> Vec<SharedSession> {
        self.sessions.iter().map(|e| Arc::clone(e.value())).collect()
    }
}
