// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Counting mock bundler plugin that captures each bundle call.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pulley_core::{AfterAction, Bundler, BundlerFactory, PluginError, RetrievedPackage};

use crate::recording::EventLog;

/// What a bundler received in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleCall {
    pub destination: PathBuf,
    pub packages: Vec<String>,
    pub file_counts: Vec<usize>,
    pub metadata: Vec<BTreeMap<String, String>>,
    pub after: Vec<Vec<AfterAction>>,
}

/// Factory producing bundlers that record their calls.
#[derive(Clone, Default)]
pub struct MockBundlerFactory {
    log: EventLog,
    created: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<BundleCall>>>,
    fail: Option<String>,
}

impl MockBundlerFactory {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Make every bundle call fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail = Some(message.to_string());
        self
    }

    /// Number of bundlers constructed.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Every bundle call so far.
    pub fn calls(&self) -> Vec<BundleCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl BundlerFactory for MockBundlerFactory {
    fn create(&self) -> Box<dyn Bundler> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.log.push("bundler:create");
        Box::new(MockBundler {
            log: self.log.clone(),
            calls: Arc::clone(&self.calls),
            fail: self.fail.clone(),
        })
    }
}

struct MockBundler {
    log: EventLog,
    calls: Arc<Mutex<Vec<BundleCall>>>,
    fail: Option<String>,
}

#[async_trait]
impl Bundler for MockBundler {
    async fn bundle(
        &self,
        packages: Vec<RetrievedPackage>,
        destination: &Path,
    ) -> Result<(), PluginError> {
        self.log.push(format!("bundler:bundle:{}", packages.len()));
        let call = BundleCall {
            destination: destination.to_path_buf(),
            packages: packages.iter().map(|p| p.name.clone()).collect(),
            file_counts: packages.iter().map(|p| p.content.len()).collect(),
            metadata: packages.iter().map(|p| p.metadata.clone()).collect(),
            after: packages.iter().map(|p| p.after.clone()).collect(),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.fail {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}
