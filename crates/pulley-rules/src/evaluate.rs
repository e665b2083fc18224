// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent evaluation of a rule set.

use futures::future::join_all;
use pulley_core::{RuleFailure, RuleRef};
use serde_json::Value;
use tracing::debug;

use crate::observer::RuleObserver;

/// A rule that passed, with its success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePass {
    pub rule: String,
    pub message: String,
}

/// Result of evaluating one or more rule sets.
///
/// Passes and failures keep rule-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetOutcome {
    pub passed: Vec<RulePass>,
    pub failures: Vec<RuleFailure>,
}

impl RuleSetOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of rules evaluated.
    pub fn rule_count(&self) -> usize {
        self.passed.len() + self.failures.len()
    }

    /// Append `other`'s results after this outcome's.
    pub fn merge(mut self, other: RuleSetOutcome) -> Self {
        self.passed.extend(other.passed);
        self.failures.extend(other.failures);
        self
    }
}

/// Evaluate every rule in `rules` against `value`.
///
/// All tests are started together and awaited as a group; none is cancelled
/// when another fails. The aggregate `on_success` / `on_failure` hook fires
/// once, after the last test settled.
pub async fn evaluate(
    rules: &[RuleRef],
    value: &Value,
    observer: &dyn RuleObserver,
) -> RuleSetOutcome {
    observer.on_start(rules.len());

    let tests = rules.iter().map(|rule| async move {
        let name = rule.name();
        observer.on_rule_start(name);
        let result = rule.test(value).await;
        match &result {
            Ok(message) => observer.on_rule_success(name, message),
            Err(error) => observer.on_rule_failure(name, error),
        }
        (name.to_string(), result)
    });

    let mut outcome = RuleSetOutcome::default();
    for (rule, result) in join_all(tests).await {
        match result {
            Ok(message) => outcome.passed.push(RulePass { rule, message }),
            Err(error) => outcome.failures.push(RuleFailure {
                rule,
                message: error.message,
            }),
        }
    }

    debug!(
        passed = outcome.passed.len(),
        failed = outcome.failures.len(),
        "rule set evaluated"
    );

    if outcome.is_success() {
        observer.on_success(rules.len());
    } else {
        observer.on_failure(&outcome.failures);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use async_trait::async_trait;
    use pulley_core::{Rule, RuleError};
    use serde_json::json;

    struct IsObject;

    #[async_trait]
    impl Rule for IsObject {
        fn name(&self) -> &str {
            "IsObject"
        }

        async fn test(&self, value: &Value, _fixture: Option<&Value>) -> Result<String, RuleError> {
            if value.is_object() {
                Ok("value is an object".into())
            } else {
                Err(RuleError::new("value is not an object"))
            }
        }
    }

    #[tokio::test]
    async fn empty_rule_set_succeeds() {
        let outcome = evaluate(&[], &json!({}), &NoopObserver).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.rule_count(), 0);
    }

    #[tokio::test]
    async fn failures_are_collected_by_rule_name() {
        let rules = vec![RuleRef::bare(IsObject), RuleRef::bare(IsObject)];
        let outcome = evaluate(&rules, &json!(7), &NoopObserver).await;
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].rule, "IsObject");
        assert_eq!(outcome.failures[0].message, "value is not an object");
    }

    #[test]
    fn merge_keeps_order() {
        let first = RuleSetOutcome {
            passed: vec![RulePass {
                rule: "a".into(),
                message: "ok".into(),
            }],
            failures: vec![],
        };
        let second = RuleSetOutcome {
            passed: vec![],
            failures: vec![RuleFailure {
                rule: "b".into(),
                message: "bad".into(),
            }],
        };
        let merged = first.merge(second);
        assert_eq!(merged.rule_count(), 2);
        assert!(!merged.is_success());
        assert_eq!(merged.passed[0].rule, "a");
        assert_eq!(merged.failures[0].rule, "b");
    }
}
