// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for plugin registries over test doubles.

use std::sync::Arc;

use pulley_plugin::{PluginRegistry, StaticProvider};
use pulley_report::{Reporter, Verbosity};

use crate::mock_bundler::MockBundlerFactory;
use crate::mock_source::MockSourceFactory;
use crate::recording::{EventLog, MemorySink};

/// Registers mock plugins under chosen names.
///
/// ```ignore
/// let log = EventLog::new();
/// let source = MockSourceFactory::new(log.clone());
/// let bundler = MockBundlerFactory::new(log.clone());
/// let registry = TestRegistry::new()
///     .source("mock", source.clone())
///     .bundler("default", bundler.clone())
///     .build();
/// ```
#[derive(Default)]
pub struct TestRegistry {
    sources: Vec<(String, MockSourceFactory)>,
    bundlers: Vec<(String, MockBundlerFactory)>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, name: &str, factory: MockSourceFactory) -> Self {
        self.sources.push((name.to_string(), factory));
        self
    }

    pub fn bundler(mut self, name: &str, factory: MockBundlerFactory) -> Self {
        self.bundlers.push((name.to_string(), factory));
        self
    }

    /// Build the registry.
    ///
    /// # Panics
    ///
    /// Panics if a name was registered twice in one category.
    pub fn build(self) -> PluginRegistry {
        let mut provider = StaticProvider::new();
        for (name, factory) in self.sources {
            provider
                .register_source(name, Arc::new(factory))
                .expect("duplicate mock source");
        }
        for (name, factory) in self.bundlers {
            provider
                .register_bundler(name, Arc::new(factory))
                .expect("duplicate mock bundler");
        }
        PluginRegistry::new(provider)
    }
}

/// A debug-level reporter writing into a fresh [`MemorySink`].
pub fn recording_reporter() -> (Reporter, MemorySink) {
    let sink = MemorySink::default();
    let reporter = Reporter::new(Verbosity::Debug).with_sink(sink.clone());
    (reporter, sink)
}

/// Convenience: a fresh shared log with one mock source and one mock bundler.
pub fn mock_plugins() -> (EventLog, MockSourceFactory, MockBundlerFactory) {
    let log = EventLog::new();
    let source = MockSourceFactory::new(log.clone());
    let bundler = MockBundlerFactory::new(log.clone());
    (log, source, bundler)
}
