// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics with fuzzy "did you mean?" suggestions.
//!
//! Schema violations and settings errors are both turned into miette
//! diagnostics so they render the same way.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use pulley_core::SchemaViolation;
use thiserror::Error;

use crate::schema::allowed_keys;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, renderable as a miette report.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key not declared by the schema or settings model.
    #[error("unknown key `{key}` at {path}")]
    #[diagnostic(
        code(pulley::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        path: String,
        suggestion: Option<String>,
        valid_keys: String,
    },

    /// A required key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(code(pulley::config::missing_key))]
    MissingKey { key: String },

    /// A value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(pulley::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// Any other schema constraint.
    #[error("{path}: {message}")]
    #[diagnostic(code(pulley::config::schema))]
    Schema { path: String, message: String },

    /// A semantic check on loaded settings failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(pulley::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(pulley::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None`.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Convert schema violations into diagnostics, one per violation.
pub fn violations_to_config_errors(violations: &[SchemaViolation]) -> Vec<ConfigError> {
    violations
        .iter()
        .map(|v| match &v.unexpected {
            Some(key) => ConfigError::UnknownKey {
                key: key.clone(),
                path: v.display_path().to_string(),
                suggestion: v.suggestion.clone(),
                valid_keys: allowed_keys(&v.path).join(", "),
            },
            None => ConfigError::Schema {
                path: v.display_path().to_string(),
                message: v.message.clone(),
            },
        })
        .collect()
}

/// Convert a `figment::Error` into a list of diagnostics.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    path: "settings".to_string(),
                    suggestion: suggest_key(field, &valid_keys),
                    valid_keys: valid_keys.join(", "),
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                let key = error
                    .path
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
