// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundler plugin contract: combines every retrieved package into one artifact.

use std::path::Path;

use async_trait::async_trait;

use crate::error::PluginError;
use crate::types::RetrievedPackage;

/// Produces the final output artifact from the retrieved packages.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Bundle `packages` (in declaration order) into `destination`.
    ///
    /// Ownership of the packages moves into the bundler; they are not used afterwards.
    async fn bundle(
        &self,
        packages: Vec<RetrievedPackage>,
        destination: &Path,
    ) -> Result<(), PluginError>;
}

/// Constructor for a [`Bundler`], registered under a name in the plugin registry.
pub trait BundlerFactory: Send + Sync {
    fn create(&self) -> Box<dyn Bundler>;
}

impl<F> BundlerFactory for F
where
    F: Fn() -> Box<dyn Bundler> + Send + Sync,
{
    fn create(&self) -> Box<dyn Bundler> {
        self()
    }
}
