// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrying generator: runs one unit of work against the priority list,
//! rotating to the next model on rate-limit failures.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use rehearse_core::RehearseError;
use tracing::{debug, info, warn};

/// Ordered model list plus a sticky cursor at the last model that worked.
///
/// The cursor is shared by every call on this rotor and updated without a
/// lock. Concurrent calls may overwrite each other's cursor; the loser
/// simply starts from a model that may fail again and rotate on.
#[derive(Debug)]
pub struct ModelRotor {
    models: Vec<String>,
    cursor: AtomicUsize,
}

impl ModelRotor {
    pub fn new(models: Vec<String>) -> Self {
        Self {
            models,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Model the next call starts from.
    pub fn current(&self) -> Option<&str> {
        self.models
            .get(self.cursor() % self.models.len().max(1))
            .map(String::as_str)
    }

    #[cfg(test)]
    fn with_cursor(self, cursor: usize) -> Self {
        self.cursor.store(cursor, Ordering::Release);
        self
    }

    /// Runs `work` with a model name, starting at the cursor.
    ///
    /// - success: returns the result and leaves the cursor on that model
    /// - retriable error: moves the cursor to the next model and tries again,
    ///   each model at most once
    /// - other error: returned immediately, no further rotation
    /// - every model rate-limited: cursor restored to its value at entry,
    ///   then [`RehearseError::ModelsExhausted`]
    pub async fn run<T, F, Fut>(&self, mut work: F) -> Result<T, RehearseError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, RehearseError>>,
    {
        let len = self.models.len();
        if len == 0 {
            return Err(RehearseError::ModelsExhausted { attempts: 0 });
        }

        let entry = self.cursor();
        let start = entry % len;

        for attempt in 0..len {
            let index = (start + attempt) % len;
            let model = &self.models[index];

            match work(model.clone()).await {
                Ok(value) => {
                    self.cursor.store(index, Ordering::Release);
                    if attempt > 0 {
                        info!(model = %model, attempts = attempt + 1, "model rotation recovered");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retriable() => {
                    let next = (index + 1) % len;
                    warn!(
                        model = %model,
                        next_model = %self.models[next],
                        attempt = attempt + 1,
                        error = %e,
                        "rate limited, rotating to next model"
                    );
                    self.cursor.store(next, Ordering::Release);
                }
                Err(e) => {
                    debug!(model = %model, error = %e, "non-retriable provider error");
                    return Err(e);
                }
            }
        }

        self.cursor.store(entry, Ordering::Release);
        warn!(attempts = len, "all models exhausted");
        Err(RehearseError::ModelsExhausted { attempts: len })
    }
}
