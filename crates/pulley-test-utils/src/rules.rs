// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rules with scripted outcomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pulley_core::{Rule, RuleError, RuleRef};
use serde_json::Value;

/// A rule that always passes or always fails, optionally after a delay.
#[derive(Debug, Clone)]
pub struct ScriptedRule {
    name: String,
    outcome: Result<String, String>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedRule {
    pub fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(format!("{name} passed")),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fail(name: &str, message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            ..Self::pass(name)
        }
    }

    /// Sleep for `delay` before settling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times the rule was tested, shared across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A bare reference sharing this rule's call counter.
    pub fn to_ref(&self) -> RuleRef {
        RuleRef::bare(self.clone())
    }
}

#[async_trait]
impl Rule for ScriptedRule {
    fn name(&self) -> &str {
        &self.name
    }

    async fn test(&self, _value: &Value, _fixture: Option<&Value>) -> Result<String, RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(RuleError::new)
    }
}
