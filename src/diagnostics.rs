// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-instance operation logs.
//!
//! Every builder and every loaded index keeps its own `result_log` and
//! `error_log` for the most recent build or load. Two builds running on
//! different threads never see each other's lines. Each line is also emitted
//! as a `tracing` event so a subscriber can collect them centrally.

/// Accumulated human-readable diagnostics for one build or load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    result: String,
    error: String,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operational message.
    pub fn info(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        tracing::debug!(target: "txdict", "{}", msg);
        push_line(&mut self.result, msg);
    }

    /// Record an error message.
    pub fn error(&mut self, msg: impl AsRef<str>) {
        let msg = msg.as_ref();
        tracing::warn!(target: "txdict", "{}", msg);
        push_line(&mut self.error, msg);
    }

    /// Forget everything from a previous operation.
    pub fn clear(&mut self) {
        self.result.clear();
        self.error.clear();
    }

    /// Operation log. Empty when nothing has run yet.
    pub fn result_log(&self) -> &str {
        &self.result
    }

    /// Error log. Empty string means no errors.
    pub fn error_log(&self) -> &str {
        &self.error
    }

    pub fn has_errors(&self) -> bool {
        !self.error.is_empty()
    }
}

fn push_line(log: &mut String, msg: &str) {
    log.push_str(msg);
    log.push('\n');
}
