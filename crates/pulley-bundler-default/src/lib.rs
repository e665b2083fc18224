// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `default` bundler: one directory per package under the destination.
//!
//! `packages[i]` with name `n` is written to `<destination>/<n>/`, keeping the
//! relative paths of its content. Post-fetch actions are not supported by
//! this bundler and are skipped with a warning.

use std::collections::HashSet;
use std::path::{Component, Path};

use async_trait::async_trait;
use pulley_core::{Bundler, BundlerFactory, PluginError, RetrievedPackage};
use tracing::{debug, warn};

/// Name under which the bundler is registered.
pub const NAME: &str = "default";

/// Writes package content to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBundler;

#[async_trait]
impl Bundler for DefaultBundler {
    async fn bundle(
        &self,
        packages: Vec<RetrievedPackage>,
        destination: &Path,
    ) -> Result<(), PluginError> {
        let mut seen = HashSet::new();
        if let Some(clash) = packages.iter().find(|p| !seen.insert(p.name.as_str())) {
            return Err(format!(
                "two packages share the directory name '{}'; rename one of them",
                clash.name
            )
            .into());
        }

        tokio::fs::create_dir_all(destination).await?;

        for package in packages {
            for action in &package.after {
                warn!(
                    package = %package.name,
                    action = %action.action,
                    "default bundler does not run post-fetch actions; skipping"
                );
            }

            let package_dir = destination.join(&package.name);
            tokio::fs::create_dir_all(&package_dir).await?;

            for file in package.content.into_files() {
                if !is_contained(&file.path) {
                    return Err(format!(
                        "package '{}' contains a file outside its root: {}",
                        package.name,
                        file.path.display()
                    )
                    .into());
                }
                let target = package_dir.join(&file.path);
                if let Some(parent) = target.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&target, &file.contents).await?;
            }

            debug!(package = %package.name, dir = %package_dir.display(), "package written");
        }

        Ok(())
    }
}

/// Relative paths with only normal components stay inside the package directory.
fn is_contained(path: &Path) -> bool {
    path.components().next().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Factory registered under [`NAME`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBundlerFactory;

impl BundlerFactory for DefaultBundlerFactory {
    fn create(&self) -> Box<dyn Bundler> {
        Box::new(DefaultBundler)
    }
}
