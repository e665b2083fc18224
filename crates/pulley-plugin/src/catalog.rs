// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.

use std::sync::Arc;

use pulley_bundler_default::DefaultBundlerFactory;
use pulley_source_local::LocalSourceFactory;

use pulley_core::PulleyError;

use crate::registry::{PluginRegistry, StaticProvider};

/// Provider holding every plugin compiled into Pulley:
/// - `local` (source)
/// - `default` (bundler)
pub fn builtin_provider() -> Result<StaticProvider, PulleyError> {
    let mut provider = StaticProvider::new();
    provider.register_source(pulley_source_local::NAME, Arc::new(LocalSourceFactory))?;
    provider.register_bundler(pulley_bundler_default::NAME, Arc::new(DefaultBundlerFactory))?;
    Ok(provider)
}

/// Registry over [`builtin_provider`].
pub fn builtin_registry() -> Result<PluginRegistry, PulleyError> {
    Ok(PluginRegistry::new(builtin_provider()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulley_core::PluginCategory;
    use pulley_report::Reporter;

    #[test]
    fn builtins_are_registered() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.source_names(), vec!["local"]);
        assert_eq!(registry.bundler_names(), vec!["default"]);

        let reporter = Reporter::silent();
        assert!(registry.resolve_source("local", &reporter).is_ok());
        assert!(registry.resolve_bundler("default", &reporter).is_ok());
        assert!(registry.resolve(PluginCategory::Source, "default").is_err());
    }
}
