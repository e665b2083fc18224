// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule contract used to validate plugin options.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Descriptive failure returned by a rule test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleError {
    pub message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A named check over an options object.
///
/// Rules may complete immediately or suspend for I/O. A passing test returns a
/// human-readable success message.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Returns the rule's name, used in reports.
    fn name(&self) -> &str;

    /// Tests `value`, optionally with rule-specific fixture data.
    async fn test(&self, value: &Value, fixture: Option<&Value>) -> Result<String, RuleError>;
}

/// A rule as it appears in a rule set: either on its own or paired with fixture data.
///
/// The fixture is opaque to the evaluator and only handed to the rule's own test.
#[derive(Clone)]
pub enum RuleRef {
    Bare(Arc<dyn Rule>),
    WithFixture(Arc<dyn Rule>, Value),
}

impl RuleRef {
    pub fn bare<R: Rule + 'static>(rule: R) -> Self {
        Self::Bare(Arc::new(rule))
    }

    pub fn with_fixture<R: Rule + 'static>(rule: R, fixture: Value) -> Self {
        Self::WithFixture(Arc::new(rule), fixture)
    }

    /// The underlying rule, whichever form the reference takes.
    pub fn rule(&self) -> &Arc<dyn Rule> {
        match self {
            Self::Bare(rule) | Self::WithFixture(rule, _) => rule,
        }
    }

    pub fn fixture(&self) -> Option<&Value> {
        match self {
            Self::Bare(_) => None,
            Self::WithFixture(_, fixture) => Some(fixture),
        }
    }

    pub fn name(&self) -> &str {
        self.rule().name()
    }

    /// Run the rule's test against `value`, passing the fixture if present.
    pub async fn test(&self, value: &Value) -> Result<String, RuleError> {
        self.rule().test(value, self.fixture()).await
    }
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare(rule) => f.debug_tuple("Bare").field(&rule.name()).finish(),
            Self::WithFixture(rule, fixture) => f
                .debug_tuple("WithFixture")
                .field(&rule.name())
                .field(fixture)
                .finish(),
        }
    }
}
