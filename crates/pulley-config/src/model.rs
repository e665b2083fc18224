// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed Pulleyfile document and run settings.
//!
//! The Pulleyfile structs mirror the v1 schema and use
//! `#[serde(deny_unknown_fields)]`; they are deserialized only after the
//! schema check passed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pulley_core::{AfterAction, PulleyError};
use pulley_report::Verbosity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A v1 Pulleyfile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Pulleyfile {
    pub info: Info,
    pub packages: Vec<PackageSpec>,
    /// Bundler plugin name; `default` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundler: Option<String>,
}

/// Descriptive information about the bundle.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Info {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// How a package names its source plugin.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SourceRef {
    /// `source: local`
    Name(String),
    /// `source: { name: local, ... }`
    Inline(Map<String, Value>),
}

/// One declared package.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    pub name: String,
    pub source: SourceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    /// Display only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<AfterAction>,
}

impl PackageSpec {
    /// Name of the source plugin this package uses.
    pub fn source_name(&self) -> Result<&str, PulleyError> {
        match &self.source {
            SourceRef::Name(name) => Ok(name),
            SourceRef::Inline(object) => object
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| PulleyError::InvalidSourceReference {
                    package: self.name.clone(),
                }),
        }
    }

    /// Options handed to the source constructor.
    ///
    /// For an inline source object, its keys other than `name` are merged
    /// under `options`; keys present in `options` win. Always an object.
    pub fn effective_options(&self) -> Value {
        let mut merged = Map::new();
        if let SourceRef::Inline(object) = &self.source {
            for (key, value) in object {
                if key != "name" {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        if let Some(options) = &self.options {
            for (key, value) in options {
                merged.insert(key.clone(), value.clone());
            }
        }
        Value::Object(merged)
    }

    /// The authentication object, if declared.
    pub fn authentication_value(&self) -> Option<Value> {
        self.authentication.clone().map(Value::Object)
    }
}

/// Settings for one run, layered from defaults, config files, environment,
/// and command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Where the bundler writes its output.
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Bundler override; beats the Pulleyfile's `bundler`.
    #[serde(default)]
    pub bundler: Option<String>,

    /// 0 = silent, 1 = normal, 2 = info, 3 = debug.
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,

    /// Stop before a package's fetch when its rules fail.
    #[serde(default)]
    pub halt_on_rule_failure: bool,

    /// Also append the report to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Colour console output when stdout is a terminal.
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_destination() -> PathBuf {
    PathBuf::from("./out")
}

fn default_verbosity() -> u8 {
    Verbosity::Normal.level()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            bundler: None,
            verbosity: default_verbosity(),
            halt_on_rule_failure: false,
            log_file: None,
            color: true,
        }
    }
}

impl Settings {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_level(self.verbosity)
    }
}

/// Command-line values layered over every other settings source.
///
/// Unset fields are skipped so they do not mask lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halt_on_rule_failure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(value: Value) -> PackageSpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn named_source_resolves_to_its_name() {
        let p = spec(json!({ "name": "a", "source": "local" }));
        assert_eq!(p.source_name().unwrap(), "local");
        assert_eq!(p.effective_options(), json!({}));
        assert!(p.authentication_value().is_none());
    }

    #[test]
    fn inline_source_merges_under_options() {
        let p = spec(json!({
            "name": "a",
            "source": { "name": "local", "path": "inline", "glob": "*.svg" },
            "options": { "path": "explicit" }
        }));
        assert_eq!(p.source_name().unwrap(), "local");
        assert_eq!(
            p.effective_options(),
            json!({ "path": "explicit", "glob": "*.svg" })
        );
    }

    #[test]
    fn inline_source_without_name_is_invalid() {
        let p = spec(json!({ "name": "pkg", "source": { "path": "." } }));
        let err = p.source_name().unwrap_err();
        assert!(matches!(err, PulleyError::InvalidSourceReference { ref package } if package == "pkg"));
    }

    #[test]
    fn unknown_package_keys_are_rejected() {
        let result: Result<PackageSpec, _> =
            serde_json::from_value(json!({ "name": "a", "source": "local", "opts": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.destination, PathBuf::from("./out"));
        assert_eq!(s.verbosity(), Verbosity::Normal);
        assert!(!s.halt_on_rule_failure);
        assert!(s.color);
    }

    #[test]
    fn empty_overrides_serialize_to_nothing() {
        let value = serde_json::to_value(SettingsOverrides::default()).unwrap();
        assert_eq!(value, json!({}));
    }
}
