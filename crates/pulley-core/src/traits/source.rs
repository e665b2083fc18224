// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source plugin contract: retrieves the content of one package.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PluginError;
use crate::traits::rule::RuleRef;
use crate::types::PackageContent;

/// A configured content source for a single package.
///
/// Instances are created by a [`SourceFactory`] from the package's options and
/// are used for exactly one fetch.
#[async_trait]
pub trait Source: Send + Sync {
    /// Rules describing valid options for this source.
    fn option_rules(&self) -> Vec<RuleRef>;

    /// Rules for the package's `authentication` object.
    ///
    /// Sources that do not need credentials return `None`.
    fn authentication_rules(&self) -> Option<Vec<RuleRef>> {
        None
    }

    /// Retrieves the package content.
    async fn fetch(&self) -> Result<PackageContent, PluginError>;
}

/// Constructor for a [`Source`], registered under a name in the plugin registry.
pub trait SourceFactory: Send + Sync {
    /// Build a source from the package `options` and optional `authentication` object.
    fn create(&self, options: &Value, authentication: Option<&Value>) -> Box<dyn Source>;
}

impl<F> SourceFactory for F
where
    F: Fn(&Value, Option<&Value>) -> Box<dyn Source> + Send + Sync,
{
    fn create(&self, options: &Value, authentication: Option<&Value>) -> Box<dyn Source> {
        self(options, authentication)
    }
}
