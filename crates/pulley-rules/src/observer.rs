// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress hooks for rule-set evaluation.

use pulley_core::{RuleError, RuleFailure};
use pulley_report::Reporter;

/// Receives progress notifications while a rule set is evaluated.
///
/// Every hook defaults to a no-op. `on_start` fires before any rule starts;
/// exactly one of `on_success` / `on_failure` fires after every rule settled.
pub trait RuleObserver: Send + Sync {
    fn on_start(&self, _rule_count: usize) {}

    fn on_rule_start(&self, _rule: &str) {}

    fn on_rule_success(&self, _rule: &str, _message: &str) {}

    fn on_rule_failure(&self, _rule: &str, _error: &RuleError) {}

    fn on_success(&self, _rule_count: usize) {}

    fn on_failure(&self, _failures: &[RuleFailure]) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RuleObserver for NoopObserver {}

/// Forwards rule progress to the reporting context.
#[derive(Debug, Clone, Copy)]
pub struct ReportingObserver<'a> {
    reporter: &'a Reporter,
}

impl<'a> ReportingObserver<'a> {
    pub fn new(reporter: &'a Reporter) -> Self {
        Self { reporter }
    }
}

impl RuleObserver for ReportingObserver<'_> {
    fn on_start(&self, rule_count: usize) {
        self.reporter
            .notice(format!("Validating {rule_count} configuration rule(s)"));
    }

    fn on_rule_success(&self, rule: &str, message: &str) {
        self.reporter.info_success(format!(
            "Passed {} rule. {message}",
            rule.to_lowercase()
        ));
    }

    fn on_rule_failure(&self, rule: &str, error: &RuleError) {
        self.reporter
            .warning(format!("Failed {} rule. {error}", rule.to_lowercase()));
    }

    fn on_success(&self, rule_count: usize) {
        self.reporter
            .success(format!("Validated {rule_count} configuration rule(s)"));
    }

    fn on_failure(&self, _failures: &[RuleFailure]) {
        self.reporter.error("Failed to validate one or more rules");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulley_report::{MessageKind, Verbosity};
    use pulley_test_utils::MemorySink;

    #[test]
    fn reporting_observer_uses_rule_messages() {
        let sink = MemorySink::default();
        let reporter = Reporter::new(Verbosity::Debug).with_sink(sink.clone());
        let observer = ReportingObserver::new(&reporter);

        observer.on_start(2);
        observer.on_rule_success("RequiredKeys", "Found 1 key(s)");
        observer.on_rule_failure("PathExists", &RuleError::new("no such path"));
        observer.on_failure(&[]);

        assert_eq!(
            sink.messages(),
            vec![
                "Validating 2 configuration rule(s)",
                "Passed requiredkeys rule. Found 1 key(s)",
                "Failed pathexists rule. no such path",
                "Failed to validate one or more rules",
            ]
        );
        let events = sink.events();
        assert!(events[1].success);
        assert_eq!(events[2].kind, MessageKind::Warning);
        assert_eq!(events[3].kind, MessageKind::Error);
    }

    #[test]
    fn success_summary_is_marked_successful() {
        let sink = MemorySink::default();
        let reporter = Reporter::new(Verbosity::Normal).with_sink(sink.clone());
        ReportingObserver::new(&reporter).on_success(3);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Validated 3 configuration rule(s)");
        assert!(events[0].success);
    }
}
