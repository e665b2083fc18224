// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counting mock source plugin.
//!
//! Every construction and fetch is appended to the shared [`EventLog`] so tests
//! can assert on ordering across packages. Packages are labelled by their
//! `id` option when present.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pulley_core::{PackageContent, PluginError, RuleRef, Source, SourceFactory};
use serde_json::Value;

use crate::recording::EventLog;

#[derive(Clone, Default)]
struct Script {
    option_rules: Vec<RuleRef>,
    authentication_rules: Option<Vec<RuleRef>>,
    files: Vec<(String, String)>,
    fail_fetch: Option<String>,
}

/// Factory producing [`MockSource`] instances.
#[derive(Clone, Default)]
pub struct MockSourceFactory {
    log: EventLog,
    created: Arc<AtomicUsize>,
    fetched: Arc<AtomicUsize>,
    options_seen: Arc<std::sync::Mutex<Vec<Value>>>,
    script: Script,
}

impl MockSourceFactory {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn with_option_rules(mut self, rules: Vec<RuleRef>) -> Self {
        self.script.option_rules = rules;
        self
    }

    pub fn with_authentication_rules(mut self, rules: Vec<RuleRef>) -> Self {
        self.script.authentication_rules = Some(rules);
        self
    }

    /// Add a file to the content every fetch returns.
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.script.files.push((path.to_string(), contents.to_string()));
        self
    }

    /// Make every fetch fail with `message`.
    pub fn failing_fetch(mut self, message: &str) -> Self {
        self.script.fail_fetch = Some(message.to_string());
        self
    }

    /// Number of sources constructed.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of fetches that started.
    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }

    /// Options passed to each construction, in order.
    pub fn options_seen(&self) -> Vec<Value> {
        self.options_seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

fn label(options: &Value) -> String {
    options
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("?")
        .to_string()
}

impl SourceFactory for MockSourceFactory {
    fn create(&self, options: &Value, _authentication: Option<&Value>) -> Box<dyn Source> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.options_seen.lock() {
            seen.push(options.clone());
        }
        let label = label(options);
        self.log.push(format!("source:create:{label}"));
        Box::new(MockSource {
            label,
            log: self.log.clone(),
            fetched: Arc::clone(&self.fetched),
            script: self.script.clone(),
        })
    }
}

/// Source produced by [`MockSourceFactory`].
pub struct MockSource {
    label: String,
    log: EventLog,
    fetched: Arc<AtomicUsize>,
    script: Script,
}

#[async_trait]
impl Source for MockSource {
    fn option_rules(&self) -> Vec<RuleRef> {
        self.script.option_rules.clone()
    }

    fn authentication_rules(&self) -> Option<Vec<RuleRef>> {
        self.script.authentication_rules.clone()
    }

    async fn fetch(&self) -> Result<PackageContent, PluginError> {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("source:fetch:start:{}", self.label));
        tokio::task::yield_now().await;
        self.log.push(format!("source:fetch:end:{}", self.label));

        if let Some(message) = &self.script.fail_fetch {
            return Err(message.clone().into());
        }

        let mut content = PackageContent::default();
        for (path, contents) in &self.script.files {
            content.push(path.as_str(), contents.as_str());
        }
        Ok(content)
    }
}
