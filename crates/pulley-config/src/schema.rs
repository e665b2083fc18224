// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural check of a raw Pulleyfile against the v1 JSON Schema.
//!
//! [`validate`] never fails and never decides whether to abort; it returns
//! every violation it finds.

use std::sync::LazyLock;

use jsonschema::error::ValidationErrorKind;
use pulley_core::SchemaViolation;
use serde_json::{Value, json};
use tracing::debug;

use crate::diagnostic::suggest_key;

const ROOT_KEYS: &[&str] = &["info", "packages", "bundler"];
const INFO_KEYS: &[&str] = &["name", "author", "version", "description", "schema", "metadata"];
const PACKAGE_KEYS: &[&str] = &[
    "name",
    "metadata",
    "source",
    "options",
    "authentication",
    "after",
];
const AFTER_KEYS: &[&str] = &["action", "options"];

static SCHEMA_V1: LazyLock<Value> = LazyLock::new(|| {
    let string_map = json!({
        "type": "object",
        "additionalProperties": { "type": "string" }
    });
    json!({
        "type": "object",
        "properties": {
            "info": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "author": { "type": "string" },
                    "version": { "type": "string" },
                    "description": { "type": "string" },
                    "schema": { "type": "string" },
                    "metadata": string_map
                },
                "required": ["name"],
                "additionalProperties": false
            },
            "packages": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "metadata": string_map,
                        "source": { "type": ["string", "object"] },
                        "options": { "type": "object" },
                        "authentication": { "type": "object" },
                        "after": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "action": { "type": "string" },
                                    "options": { "type": "object" }
                                },
                                "required": ["action"],
                                "additionalProperties": false
                            }
                        }
                    },
                    "required": ["name", "source"],
                    "additionalProperties": false
                }
            },
            "bundler": { "type": "string" }
        },
        "required": ["info", "packages"],
        "additionalProperties": false
    })
});

/// The v1 Pulleyfile schema.
pub fn schema_v1() -> &'static Value {
    &SCHEMA_V1
}

/// Result of a schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaOutcome {
    pub errors: Vec<SchemaViolation>,
}

impl SchemaOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check `document` against the v1 schema.
pub fn validate(document: &Value) -> SchemaOutcome {
    let validator = match jsonschema::validator_for(schema_v1()) {
        Ok(validator) => validator,
        Err(e) => {
            return SchemaOutcome {
                errors: vec![SchemaViolation::new("", format!("invalid v1 schema: {e}"))],
            };
        }
    };

    let mut errors = Vec::new();
    for error in validator.iter_errors(document) {
        let path = error.instance_path.to_string();
        let message = error.to_string();
        match &error.kind {
            ValidationErrorKind::AdditionalProperties { unexpected } => {
                let allowed = allowed_keys(&path);
                for key in unexpected {
                    let suggestion = suggest_key(key, allowed);
                    errors.push(
                        SchemaViolation::new(path.clone(), format!("unknown key `{key}`"))
                            .with_unexpected(key.clone(), suggestion),
                    );
                }
            }
            _ => errors.push(SchemaViolation::new(path, message)),
        }
    }

    debug!(violations = errors.len(), "Pulleyfile schema check finished");
    SchemaOutcome { errors }
}

/// Keys permitted on the object at JSON pointer `path`.
pub(crate) fn allowed_keys(path: &str) -> &'static [&'static str] {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => ROOT_KEYS,
        ["info"] => INFO_KEYS,
        ["packages", _] => PACKAGE_KEYS,
        ["packages", _, "after", _] => AFTER_KEYS,
        _ => &[],
    }
}
