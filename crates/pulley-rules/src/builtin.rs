// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reusable rules for plugin option objects.
//!
//! Each rule reads its target key (or keys) from the fixture, so one rule
//! instance can be shared across plugins via [`RuleRef::WithFixture`](pulley_core::RuleRef).

use std::path::Path;

use async_trait::async_trait;
use pulley_core::{Rule, RuleError};
use serde_json::Value;

fn fixture_key(fixture: Option<&Value>, rule: &str) -> Result<String, RuleError> {
    fixture
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RuleError::new(format!("{rule} rule requires a key name as fixture")))
}

/// Every key named in the fixture array must be present in the object.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredKeys;

#[async_trait]
impl Rule for RequiredKeys {
    fn name(&self) -> &str {
        "RequiredKeys"
    }

    async fn test(&self, value: &Value, fixture: Option<&Value>) -> Result<String, RuleError> {
        let keys: Vec<&str> = fixture
            .and_then(Value::as_array)
            .ok_or_else(|| RuleError::new("RequiredKeys rule requires an array of key names"))?
            .iter()
            .filter_map(Value::as_str)
            .collect();

        let Some(object) = value.as_object() else {
            return Err(RuleError::new("Expected an object of options"));
        };

        let missing: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();

        if missing.is_empty() {
            Ok(format!("Found {} required key(s)", keys.len()))
        } else {
            Err(RuleError::new(format!(
                "Missing required key(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// The fixture-named key must hold a non-empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringField;

#[async_trait]
impl Rule for StringField {
    fn name(&self) -> &str {
        "StringField"
    }

    async fn test(&self, value: &Value, fixture: Option<&Value>) -> Result<String, RuleError> {
        let key = fixture_key(fixture, self.name())?;
        match value.get(&key) {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                Ok(format!("Option '{key}' is a string"))
            }
            Some(Value::String(_)) => Err(RuleError::new(format!("Option '{key}' is empty"))),
            Some(_) => Err(RuleError::new(format!("Option '{key}' must be a string"))),
            None => Err(RuleError::new(format!("Option '{key}' is missing"))),
        }
    }
}

/// The fixture-named key must hold a path that exists on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathExists;

#[async_trait]
impl Rule for PathExists {
    fn name(&self) -> &str {
        "PathExists"
    }

    async fn test(&self, value: &Value, fixture: Option<&Value>) -> Result<String, RuleError> {
        let key = fixture_key(fixture, self.name())?;
        let Some(raw) = value.get(&key).and_then(Value::as_str) else {
            return Err(RuleError::new(format!("Option '{key}' must be a path string")));
        };

        match tokio::fs::try_exists(Path::new(raw)).await {
            Ok(true) => Ok(format!("Path '{raw}' exists")),
            Ok(false) => Err(RuleError::new(format!("Path '{raw}' does not exist"))),
            Err(e) => Err(RuleError::new(format!("Unable to access path '{raw}': {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn required_keys_lists_missing_keys() {
        let fixture = json!(["path", "glob"]);
        let err = RequiredKeys
            .test(&json!({ "path": "." }), Some(&fixture))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Missing required key(s): glob");

        let ok = RequiredKeys
            .test(&json!({ "path": ".", "glob": "*" }), Some(&fixture))
            .await
            .unwrap();
        assert_eq!(ok, "Found 2 required key(s)");
    }

    #[tokio::test]
    async fn required_keys_rejects_non_objects() {
        let err = RequiredKeys
            .test(&Value::Null, Some(&json!(["token"])))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Expected an object of options");
    }

    #[tokio::test]
    async fn string_field_checks_type_and_content() {
        let key = json!("path");
        assert!(StringField.test(&json!({ "path": "a" }), Some(&key)).await.is_ok());
        assert!(StringField.test(&json!({ "path": "  " }), Some(&key)).await.is_err());
        assert!(StringField.test(&json!({ "path": 1 }), Some(&key)).await.is_err());
        assert!(StringField.test(&json!({}), Some(&key)).await.is_err());
    }

    #[tokio::test]
    async fn string_field_without_fixture_fails() {
        let err = StringField.test(&json!({}), None).await.unwrap_err();
        assert!(err.message.contains("requires a key name"));
    }

    #[tokio::test]
    async fn path_exists_checks_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().display().to_string();
        let absent = dir.path().join("nope").display().to_string();
        let key = json!("path");

        assert!(PathExists.test(&json!({ "path": present }), Some(&key)).await.is_ok());
        let err = PathExists
            .test(&json!({ "path": absent }), Some(&key))
            .await
            .unwrap_err();
        assert!(err.message.ends_with("does not exist"));
    }
}
