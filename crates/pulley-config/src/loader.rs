// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulleyfile discovery and parsing, and layered run settings.
//!
//! Pulleyfiles are parsed as YAML, or as TOML when the file name ends in
//! `.toml`, into a plain JSON value; the schema check runs on that value.
//!
//! Settings merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `~/.config/pulley/pulley.toml` (user XDG config)
//! 3. `./pulley.toml` (local directory)
//! 4. `PULLEY_*` environment variables
//! 5. Command-line overrides

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use pulley_core::PulleyError;
use pulley_report::Reporter;
use serde_json::Value;
use tracing::debug;

use crate::model::{Settings, SettingsOverrides};

/// Pulleyfile names looked for during discovery, in priority order.
/// Matching is case-insensitive.
pub const PULLEYFILE_NAMES: &[&str] = &[
    "pulleyfile.yaml",
    "pulleyfile.yml",
    "pulleyfile.toml",
    "pulleyfile",
];

/// Keys accepted from `PULLEY_*` environment variables.
const SETTINGS_ENV_KEYS: &[&str] = &[
    "destination",
    "bundler",
    "verbosity",
    "halt_on_rule_failure",
    "log_file",
    "color",
];

/// Source of the raw configuration document for a run.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Produce the raw document. Failures are [`PulleyError::ConfigLoad`].
    async fn load(&self, reporter: &Reporter) -> Result<Value, PulleyError>;
}

/// Loads a Pulleyfile from disk, discovering it when no path is given.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: Option<PathBuf>,
    search_dir: PathBuf,
}

impl FileLoader {
    /// Load `path` if given, else discover a Pulleyfile in the current directory.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            search_dir: PathBuf::from("."),
        }
    }

    /// Discover in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }
}

#[async_trait]
impl DocumentLoader for FileLoader {
    async fn load(&self, reporter: &Reporter) -> Result<Value, PulleyError> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => {
                reporter.warning("No Pulleyfile specified; attempting to find one instead");
                match find_pulleyfile(&self.search_dir).await {
                    Ok(path) => path,
                    Err(err) => {
                        reporter.error("Unable to find Pulleyfile");
                        reporter.debug(format!("Expected one of: {}", PULLEYFILE_NAMES.join(", ")));
                        return Err(err);
                    }
                }
            }
        };

        reporter.info(format!("Loading Pulleyfile at {}", path.display()));
        match load_pulleyfile(&path).await {
            Ok(value) => {
                reporter.info_success(format!("Loaded Pulleyfile {}", path.display()));
                Ok(value)
            }
            Err(err) => {
                reporter.error(format!("Failed to load Pulleyfile at {}", path.display()));
                Err(err)
            }
        }
    }
}

/// A document already in memory.
#[derive(Debug, Clone)]
pub struct StaticDocument(pub Value);

#[async_trait]
impl DocumentLoader for StaticDocument {
    async fn load(&self, _reporter: &Reporter) -> Result<Value, PulleyError> {
        Ok(self.0.clone())
    }
}

/// Find the highest-priority Pulleyfile in `dir`.
pub async fn find_pulleyfile(dir: &Path) -> Result<PathBuf, PulleyError> {
    let not_found = |reason: String| PulleyError::ConfigLoad {
        path: dir.display().to_string(),
        reason,
    };

    let mut reader = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| not_found(e.to_string()))?;

    let mut candidates: Vec<(usize, PathBuf)> = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| not_found(e.to_string()))?
    {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if let Some(rank) = PULLEYFILE_NAMES.iter().position(|n| *n == name) {
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                candidates.push((rank, entry.path()));
            }
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .map(|(_, path)| path)
        .ok_or_else(|| not_found("No Pulleyfile found".to_string()))
}

/// Read and parse the Pulleyfile at `path`.
pub async fn load_pulleyfile(path: &Path) -> Result<Value, PulleyError> {
    let config_load = |reason: String| PulleyError::ConfigLoad {
        path: path.display().to_string(),
        reason,
    };

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| config_load(e.to_string()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        parse_toml(&contents)
    } else {
        parse_yaml(&contents)
    };
    let value = parsed.map_err(|e| config_load(e.to_string()))?;

    debug!(path = %path.display(), toml = is_toml, "Pulleyfile parsed");
    Ok(value)
}

/// Parse YAML Pulleyfile text into a JSON value.
pub fn parse_yaml(contents: &str) -> Result<Value, figment::Error> {
    Figment::from(Yaml::string(contents)).extract()
}

/// Parse TOML Pulleyfile text into a JSON value.
pub fn parse_toml(contents: &str) -> Result<Value, figment::Error> {
    Figment::from(Toml::string(contents)).extract()
}

/// The settings figment without command-line overrides.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pulley/pulley.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pulley.toml"))
        .merge(env_provider())
}

/// Load settings from every layer, with `overrides` on top.
pub fn load_settings(overrides: &SettingsOverrides) -> Result<Settings, figment::Error> {
    build_figment()
        .merge(Serialized::defaults(overrides))
        .extract()
}

/// Load settings from a TOML string over the compiled defaults only.
pub fn load_settings_from_str(toml_content: &str) -> Result<Settings, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

fn env_provider() -> Env {
    Env::prefixed("PULLEY_").only(SETTINGS_ENV_KEYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_parses_into_json() {
        let value = parse_yaml("info:\n  name: demo\npackages:\n  - name: a\n    source: local\n")
            .unwrap();
        assert_eq!(
            value,
            json!({ "info": { "name": "demo" }, "packages": [{ "name": "a", "source": "local" }] })
        );
    }

    #[test]
    fn toml_parses_into_json() {
        let value = parse_toml(
            "bundler = \"default\"\n[info]\nname = \"demo\"\n[[packages]]\nname = \"a\"\nsource = \"local\"\n",
        )
        .unwrap();
        assert_eq!(value["info"]["name"], "demo");
        assert_eq!(value["packages"][0]["source"], "local");
        assert_eq!(value["bundler"], "default");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_yaml("info: [unclosed").is_err());
    }

    #[test]
    fn settings_from_str_override_defaults() {
        let settings = load_settings_from_str("verbosity = 3\nhalt_on_rule_failure = true\n").unwrap();
        assert_eq!(settings.verbosity, 3);
        assert!(settings.halt_on_rule_failure);
        assert_eq!(settings.destination, PathBuf::from("./out"));
    }

    #[test]
    fn unknown_settings_key_is_rejected() {
        assert!(load_settings_from_str("verbose = 3\n").is_err());
    }
}
