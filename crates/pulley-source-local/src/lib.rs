// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `local` source: copies a file or directory tree from disk.
//!
//! Options:
//!
//! ```yaml
//! source: local
//! options:
//!   path: ./assets/icons
//! ```
//!
//! A directory is read recursively; every regular file becomes one entry of
//! the package content, addressed relative to `path`. A single file becomes a
//! one-entry package named after the file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pulley_core::{PackageContent, PluginError, RuleRef, Source, SourceFactory};
use pulley_rules::builtin::{PathExists, RequiredKeys, StringField};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// Name under which the source is registered.
pub const NAME: &str = "local";

#[derive(Debug, Clone, Deserialize)]
struct LocalOptions {
    path: PathBuf,
}

/// Reads package content from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSource {
    path: Option<PathBuf>,
}

impl LocalSource {
    /// Build from a package's options. Invalid options are reported by the
    /// option rules rather than here.
    pub fn new(options: &Value) -> Self {
        let path = serde_json::from_value::<LocalOptions>(options.clone())
            .ok()
            .map(|o| o.path);
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl Source for LocalSource {
    fn option_rules(&self) -> Vec<RuleRef> {
        vec![
            RuleRef::with_fixture(RequiredKeys, json!(["path"])),
            RuleRef::with_fixture(StringField, json!("path")),
            RuleRef::with_fixture(PathExists, json!("path")),
        ]
    }

    async fn fetch(&self) -> Result<PackageContent, PluginError> {
        let root = self
            .path
            .as_deref()
            .ok_or("local source requires a `path` option")?;

        let metadata = tokio::fs::metadata(root)
            .await
            .map_err(|e| format!("cannot read {}: {e}", root.display()))?;

        let mut content = PackageContent::default();
        if metadata.is_file() {
            let name = root
                .file_name()
                .ok_or_else(|| format!("{} has no file name", root.display()))?;
            content.push(name, tokio::fs::read(root).await?);
        } else {
            read_tree(root, &mut content).await?;
        }

        debug!(path = %root.display(), files = content.len(), "local source fetched");
        Ok(content)
    }
}

/// Collect every regular file under `root`, depth first, in name order.
async fn read_tree(root: &Path, content: &mut PackageContent) -> Result<(), PluginError> {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = reader.next_entry().await? {
            entries.push(entry.path());
        }
        entries.sort();

        let mut subdirs = Vec::new();
        for path in entries {
            let file_type = tokio::fs::symlink_metadata(&path).await?.file_type();
            let is_file = if file_type.is_symlink() {
                // Linked files are read; linked directories are not followed.
                match tokio::fs::metadata(&path).await {
                    Ok(target) => target.is_file(),
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "skipping dangling link");
                        false
                    }
                }
            } else {
                file_type.is_file()
            };

            if file_type.is_dir() {
                subdirs.push(path);
            } else if is_file {
                let relative = path.strip_prefix(root)?.to_path_buf();
                content.push(relative, tokio::fs::read(&path).await?);
            } else if file_type.is_symlink() {
                debug!(path = %path.display(), "not following directory link");
            }
        }
        pending.extend(subdirs.into_iter().rev());
    }

    Ok(())
}

/// Factory registered under [`NAME`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceFactory;

impl SourceFactory for LocalSourceFactory {
    fn create(&self, options: &Value, _authentication: Option<&Value>) -> Box<dyn Source> {
        Box::new(LocalSource::new(options))
    }
}
