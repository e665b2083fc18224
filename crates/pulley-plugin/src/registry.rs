// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name-to-factory resolution for source and bundler plugins.
//!
//! Resolution never constructs a plugin and never performs I/O: a hit hands
//! back the registered factory itself, a miss fails with
//! [`PulleyError::PluginNotFound`]. There is no fallback search.

use std::collections::HashMap;
use std::sync::Arc;

use pulley_core::{BundlerFactory, PluginCategory, PulleyError, SourceFactory};
use pulley_report::Reporter;
use tracing::{debug, info};

/// Similarity threshold for "did you mean" hints.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A resolved plugin constructor.
#[derive(Clone)]
pub enum Plugin {
    Source(Arc<dyn SourceFactory>),
    Bundler(Arc<dyn BundlerFactory>),
}

impl Plugin {
    pub fn category(&self) -> PluginCategory {
        match self {
            Plugin::Source(_) => PluginCategory::Source,
            Plugin::Bundler(_) => PluginCategory::Bundler,
        }
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Plugin").field(&self.category()).finish()
    }
}

/// Lookup strategy behind the registry.
pub trait PluginProvider: Send + Sync {
    fn source(&self, name: &str) -> Option<Arc<dyn SourceFactory>>;

    fn bundler(&self, name: &str) -> Option<Arc<dyn BundlerFactory>>;

    /// Registered source names, sorted.
    fn source_names(&self) -> Vec<String>;

    /// Registered bundler names, sorted.
    fn bundler_names(&self) -> Vec<String>;
}

/// Fixed name-to-factory maps built at startup.
#[derive(Default)]
pub struct StaticProvider {
    sources: HashMap<String, Arc<dyn SourceFactory>>,
    bundlers: HashMap<String, Arc<dyn BundlerFactory>>,
}

impl StaticProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source factory. Names are case-sensitive and unique.
    pub fn register_source(
        &mut self,
        name: impl Into<String>,
        factory: Arc<dyn SourceFactory>,
    ) -> Result<(), PulleyError> {
        let name = name.into();
        if self.sources.contains_key(&name) {
            return Err(PulleyError::DuplicatePlugin {
                category: PluginCategory::Source,
                name,
            });
        }
        self.sources.insert(name, factory);
        Ok(())
    }

    /// Register a bundler factory. Names are case-sensitive and unique.
    pub fn register_bundler(
        &mut self,
        name: impl Into<String>,
        factory: Arc<dyn BundlerFactory>,
    ) -> Result<(), PulleyError> {
        let name = name.into();
        if self.bundlers.contains_key(&name) {
            return Err(PulleyError::DuplicatePlugin {
                category: PluginCategory::Bundler,
                name,
            });
        }
        self.bundlers.insert(name, factory);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len() + self.bundlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.bundlers.is_empty()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<String> {
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

impl PluginProvider for StaticProvider {
    fn source(&self, name: &str) -> Option<Arc<dyn SourceFactory>> {
        self.sources.get(name).cloned()
    }

    fn bundler(&self, name: &str) -> Option<Arc<dyn BundlerFactory>> {
        self.bundlers.get(name).cloned()
    }

    fn source_names(&self) -> Vec<String> {
        sorted_keys(&self.sources)
    }

    fn bundler_names(&self) -> Vec<String> {
        sorted_keys(&self.bundlers)
    }
}

/// Resolves plugin names to their factories.
pub struct PluginRegistry {
    provider: Box<dyn PluginProvider>,
}

impl PluginRegistry {
    pub fn new(provider: impl PluginProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Look up `name` in `category`.
    pub fn resolve(&self, category: PluginCategory, name: &str) -> Result<Plugin, PulleyError> {
        debug!(%category, name, "resolving plugin");
        let found = match category {
            PluginCategory::Source => self.provider.source(name).map(Plugin::Source),
            PluginCategory::Bundler => self.provider.bundler(name).map(Plugin::Bundler),
        };
        match found {
            Some(plugin) => {
                info!(%category, name, "resolved built-in plugin");
                Ok(plugin)
            }
            None => {
                debug!(%category, name, "plugin not registered");
                Err(PulleyError::PluginNotFound {
                    category,
                    name: name.to_string(),
                })
            }
        }
    }

    /// Resolve a source, reporting progress through `reporter`.
    pub fn resolve_source(
        &self,
        name: &str,
        reporter: &Reporter,
    ) -> Result<Arc<dyn SourceFactory>, PulleyError> {
        match self.resolve_reported(PluginCategory::Source, name, reporter)? {
            Plugin::Source(factory) => Ok(factory),
            Plugin::Bundler(_) => Err(not_found(PluginCategory::Source, name)),
        }
    }

    /// Resolve a bundler, reporting progress through `reporter`.
    pub fn resolve_bundler(
        &self,
        name: &str,
        reporter: &Reporter,
    ) -> Result<Arc<dyn BundlerFactory>, PulleyError> {
        match self.resolve_reported(PluginCategory::Bundler, name, reporter)? {
            Plugin::Bundler(factory) => Ok(factory),
            Plugin::Source(_) => Err(not_found(PluginCategory::Bundler, name)),
        }
    }

    fn resolve_reported(
        &self,
        category: PluginCategory,
        name: &str,
        reporter: &Reporter,
    ) -> Result<Plugin, PulleyError> {
        let label = category.to_string().to_lowercase();
        reporter.info(format!("Retrieving {name} {label}"));
        match self.resolve(category, name) {
            Ok(plugin) => {
                reporter.info_success(format!("Retrieved {name} {label} from built-in {label}s"));
                Ok(plugin)
            }
            Err(err) => {
                let mut message = format!("{category} {name} does not exist");
                if let Some(hint) = self.suggest(category, name) {
                    message.push_str(&format!(". Did you mean '{hint}'?"));
                }
                reporter.error(message);
                Err(err)
            }
        }
    }

    /// Registered source names, sorted.
    pub fn source_names(&self) -> Vec<String> {
        self.provider.source_names()
    }

    /// Registered bundler names, sorted.
    pub fn bundler_names(&self) -> Vec<String> {
        self.provider.bundler_names()
    }

    /// Closest registered name in `category`, if any is similar enough.
    pub fn suggest(&self, category: PluginCategory, name: &str) -> Option<String> {
        let candidates = match category {
            PluginCategory::Source => self.source_names(),
            PluginCategory::Bundler => self.bundler_names(),
        };
        let mut best: Option<(f64, String)> = None;
        for candidate in candidates {
            let score = strsim::jaro_winkler(name, &candidate);
            if score > SUGGESTION_THRESHOLD && best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((score, candidate));
            }
        }
        best.map(|(_, name)| name)
    }
}

fn not_found(category: PluginCategory, name: &str) -> PulleyError {
    PulleyError::PluginNotFound {
        category,
        name: name.to_string(),
    }
}
