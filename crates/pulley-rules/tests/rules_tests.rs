// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-set evaluation as observed through the recording observer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pulley_core::{PackageContent, PluginError, Rule, RuleError, RuleRef, Source};
use pulley_rules::{evaluate, validate_source};
use pulley_test_utils::{RecordingObserver, ScriptedRule};
use serde_json::{Value, json};
use tokio::sync::Barrier;

#[tokio::test]
async fn all_passing_rules_report_success_once() {
    let rules = [ScriptedRule::pass("A"), ScriptedRule::pass("B"), ScriptedRule::pass("C")];
    let refs: Vec<RuleRef> = rules.iter().map(ScriptedRule::to_ref).collect();
    let observer = RecordingObserver::new();

    let outcome = evaluate(&refs, &json!({}), &observer).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.rule_count(), 3);
    assert_eq!(observer.count_prefix("rule_success:"), 3);
    assert_eq!(observer.count_prefix("success:"), 1);
    assert_eq!(observer.count_prefix("failure:"), 0);
    assert_eq!(observer.events().first().map(String::as_str), Some("start:3"));
    assert_eq!(observer.events().last().map(String::as_str), Some("success:3"));
}

#[tokio::test]
async fn one_failure_fails_the_set_but_every_rule_runs() {
    let rules = [
        ScriptedRule::pass("A"),
        ScriptedRule::fail("B", "b is wrong"),
        ScriptedRule::pass("C"),
    ];
    let refs: Vec<RuleRef> = rules.iter().map(ScriptedRule::to_ref).collect();
    let observer = RecordingObserver::new();

    let outcome = evaluate(&refs, &json!({}), &observer).await;

    assert!(!outcome.is_success());
    assert!(rules.iter().all(|r| r.calls() == 1));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].rule, "B");
    assert_eq!(outcome.failures[0].message, "b is wrong");
    assert_eq!(outcome.passed.len(), 2);
    assert_eq!(observer.count_prefix("failure:"), 1);
    assert_eq!(observer.count_prefix("success:"), 0);
}

#[tokio::test]
async fn aggregate_outcome_waits_for_the_slowest_rule() {
    let slow = ScriptedRule::pass("Slow").with_delay(Duration::from_millis(30));
    let fast = ScriptedRule::fail("Fast", "nope");
    let refs = vec![slow.to_ref(), fast.to_ref()];
    let observer = RecordingObserver::new();

    evaluate(&refs, &json!({}), &observer).await;

    let log = observer.log();
    let fast_failed = log.position("rule_failure:Fast").unwrap();
    let slow_passed = log.position("rule_success:Slow").unwrap();
    let aggregate = log.position("failure:1").unwrap();
    assert!(fast_failed < slow_passed);
    assert!(slow_passed < aggregate);
}

#[tokio::test]
async fn empty_rule_set_succeeds() {
    let observer = RecordingObserver::new();
    let outcome = evaluate(&[], &json!({}), &observer).await;
    assert!(outcome.is_success());
    assert_eq!(observer.events(), vec!["start:0", "success:0"]);
}

/// Waits until `parties` rules are in flight at once.
struct Rendezvous {
    name: &'static str,
    barrier: Arc<Barrier>,
}

#[async_trait]
impl Rule for Rendezvous {
    fn name(&self) -> &str {
        self.name
    }

    async fn test(&self, _value: &Value, _fixture: Option<&Value>) -> Result<String, RuleError> {
        self.barrier.wait().await;
        Ok("met".into())
    }
}

#[tokio::test]
async fn rules_in_a_set_run_concurrently() {
    let barrier = Arc::new(Barrier::new(2));
    let refs = vec![
        RuleRef::bare(Rendezvous {
            name: "Left",
            barrier: Arc::clone(&barrier),
        }),
        RuleRef::bare(Rendezvous {
            name: "Right",
            barrier,
        }),
    ];
    let observer = RecordingObserver::new();

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        evaluate(&refs, &json!({}), &observer),
    )
    .await
    .expect("rules deadlocked; evaluation is not concurrent");

    assert!(outcome.is_success());
}

struct RuleOnlySource {
    options: Vec<RuleRef>,
    authentication: Option<Vec<RuleRef>>,
}

#[async_trait]
impl Source for RuleOnlySource {
    fn option_rules(&self) -> Vec<RuleRef> {
        self.options.clone()
    }

    fn authentication_rules(&self) -> Option<Vec<RuleRef>> {
        self.authentication.clone()
    }

    async fn fetch(&self) -> Result<PackageContent, PluginError> {
        Ok(PackageContent::default())
    }
}

/// Passes only when the value is an object holding a `token` key.
struct HasToken;

#[async_trait]
impl Rule for HasToken {
    fn name(&self) -> &str {
        "Token"
    }

    async fn test(&self, value: &Value, _fixture: Option<&Value>) -> Result<String, RuleError> {
        match value.get("token") {
            Some(_) => Ok("token present".into()),
            None => Err(RuleError::new("token missing")),
        }
    }
}

#[tokio::test]
async fn source_without_authentication_rules_evaluates_options_only() {
    let path = ScriptedRule::pass("Path");
    let source = RuleOnlySource {
        options: vec![path.to_ref()],
        authentication: None,
    };
    let observer = RecordingObserver::new();

    let outcome = validate_source(&source, &json!({}), None, &observer).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.rule_count(), 1);
    assert_eq!(observer.count_prefix("start:"), 1);
}

#[tokio::test]
async fn missing_authentication_is_tested_as_null() {
    let source = RuleOnlySource {
        options: vec![ScriptedRule::pass("Path").to_ref()],
        authentication: Some(vec![RuleRef::bare(HasToken)]),
    };
    let observer = RecordingObserver::new();

    let outcome = validate_source(&source, &json!({ "path": "." }), None, &observer).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.failures[0].rule, "Token");
    assert_eq!(observer.count_prefix("start:"), 2);
    assert_eq!(observer.count_prefix("success:"), 1);
    assert_eq!(observer.count_prefix("failure:"), 1);
}

#[tokio::test]
async fn authentication_object_reaches_authentication_rules() {
    let source = RuleOnlySource {
        options: vec![],
        authentication: Some(vec![RuleRef::bare(HasToken)]),
    };
    let observer = RecordingObserver::new();
    let auth = json!({ "token": "secret" });

    let outcome = validate_source(&source, &json!({}), Some(&auth), &observer).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.passed[0].message, "token present");
}
