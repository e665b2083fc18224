// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared event logs, a recording rule observer, and an in-memory report sink.

use std::sync::{Arc, Mutex, MutexGuard};

use pulley_core::{RuleError, RuleFailure};
use pulley_report::{ReportEvent, ReportSink};
use pulley_rules::RuleObserver;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ordered, shareable list of event labels.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        lock(&self.events).push(event.into());
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<String> {
        lock(&self.events).clone()
    }

    /// Number of events equal to `event`.
    pub fn count(&self, event: &str) -> usize {
        lock(&self.events).iter().filter(|e| *e == event).count()
    }

    /// Index of the first event equal to `event`.
    pub fn position(&self, event: &str) -> Option<usize> {
        lock(&self.events).iter().position(|e| e == event)
    }
}

/// Rule observer that records each hook as a label in an [`EventLog`].
///
/// Labels: `start:N`, `rule_start:R`, `rule_success:R`, `rule_failure:R`,
/// `success:N`, `failure:N` (N = failure count for `failure`).
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: EventLog,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn events(&self) -> Vec<String> {
        self.log.events()
    }

    /// Number of recorded events starting with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.log
            .events()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

impl RuleObserver for RecordingObserver {
    fn on_start(&self, rule_count: usize) {
        self.log.push(format!("start:{rule_count}"));
    }

    fn on_rule_start(&self, rule: &str) {
        self.log.push(format!("rule_start:{rule}"));
    }

    fn on_rule_success(&self, rule: &str, _message: &str) {
        self.log.push(format!("rule_success:{rule}"));
    }

    fn on_rule_failure(&self, rule: &str, _error: &RuleError) {
        self.log.push(format!("rule_failure:{rule}"));
    }

    fn on_success(&self, rule_count: usize) {
        self.log.push(format!("success:{rule_count}"));
    }

    fn on_failure(&self, failures: &[RuleFailure]) {
        self.log.push(format!("failure:{}", failures.len()));
    }
}

/// Report sink that keeps every delivered event.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<ReportEvent> {
        lock(&self.events).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.events).iter().map(|e| e.message.clone()).collect()
    }

    /// Whether any delivered message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        lock(&self.events).iter().any(|e| e.message.contains(needle))
    }
}

impl ReportSink for MemorySink {
    fn send(&self, event: &ReportEvent) {
        lock(&self.events).push(event.clone());
    }
}
