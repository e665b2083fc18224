// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, validators, pipeline, and plugins.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies which half of the plugin registry a name belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum PluginCategory {
    Source,
    Bundler,
}

/// A single structural problem found by the Pulleyfile schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value (empty for the document root).
    pub path: String,
    /// Description of the violated constraint.
    pub message: String,
    /// The offending key when the violation is an undeclared key.
    pub unexpected: Option<String>,
    /// Closest allowed key when the violation is an undeclared key.
    pub suggestion: Option<String>,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            unexpected: None,
            suggestion: None,
        }
    }

    /// Mark the violation as an undeclared `key`, with an optional correction.
    pub fn with_unexpected(mut self, key: impl Into<String>, suggestion: Option<String>) -> Self {
        self.unexpected = Some(key.into());
        self.suggestion = suggestion;
        self
    }

    /// The path rendered for humans; the document root shows as `<root>`.
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.display_path(), self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean `{suggestion}`?)")?;
        }
        Ok(())
    }
}

/// A failed rule within a rule set, by rule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule: String,
    pub message: String,
}

/// A post-fetch action declared on a package.
///
/// The pipeline carries these through to the bundler untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AfterAction {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One file of retrieved package content, addressed relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Content handle produced by a source's fetch.
///
/// An ordered list of virtual files. The pipeline owns it between fetch and
/// bundle and never looks inside.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PackageContent {
    files: Vec<PackageFile>,
}

impl PackageContent {
    pub fn new(files: Vec<PackageFile>) -> Self {
        Self { files }
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.push(PackageFile {
            path: path.into(),
            contents: contents.into(),
        });
    }

    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    pub fn into_files(self) -> Vec<PackageFile> {
        self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Characters that may not appear in a file name on any supported platform.
const ILLEGAL_FILENAME_CHARS: &[char] = &['/', '\\', '?', '<', '>', ':', '*', '|', '"'];

/// Device names reserved on Windows regardless of extension.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const MAX_FILENAME_BYTES: usize = 255;

/// A package after a successful fetch, ready to be handed to the bundler.
#[derive(Debug)]
pub struct RetrievedPackage {
    /// Filesystem-safe name derived from the package spec's name.
    pub name: String,
    /// Content handle returned by the source.
    pub content: PackageContent,
    /// Display metadata copied from the package spec.
    pub metadata: BTreeMap<String, String>,
    /// Post-fetch actions declared on the package spec.
    pub after: Vec<AfterAction>,
}

impl RetrievedPackage {
    /// Create a retrieved package; `name` is passed through [`Self::filename_safe`].
    pub fn new(name: &str, content: PackageContent) -> Self {
        Self {
            name: Self::filename_safe(name),
            content,
            metadata: BTreeMap::new(),
            after: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_after(mut self, after: Vec<AfterAction>) -> Self {
        self.after = after;
        self
    }

    /// Returns a filename-safe version of `raw`, usable as a file or directory name.
    ///
    /// Illegal and control characters become word breaks, whitespace runs
    /// collapse to a single `_`, and reserved names are prefixed with `_`.
    pub fn filename_safe(raw: &str) -> String {
        let replaced: String = raw
            .chars()
            .map(|c| {
                if c.is_control() || ILLEGAL_FILENAME_CHARS.contains(&c) {
                    ' '
                } else {
                    c
                }
            })
            .collect();

        let mut name = replaced.split_whitespace().collect::<Vec<_>>().join("_");
        truncate_and_trim(&mut name);

        if name.is_empty() {
            return "_".to_string();
        }

        let stem = name.split('.').next().unwrap_or_default();
        if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
            name.insert(0, '_');
            truncate_and_trim(&mut name);
        }

        name
    }
}

/// Truncate to the file name byte limit, then drop trailing periods.
fn truncate_and_trim(name: &mut String) {
    if name.len() > MAX_FILENAME_BYTES {
        let mut cut = MAX_FILENAME_BYTES;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    while name.ends_with('.') {
        name.pop();
    }
}
