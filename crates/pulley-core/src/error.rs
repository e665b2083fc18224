// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pulley orchestration pipeline.

use thiserror::Error;

use crate::types::{PluginCategory, RuleFailure, SchemaViolation};

/// Opaque failure raised inside a source or bundler plugin.
///
/// The pipeline never inspects or translates these; they are carried
/// through [`PulleyError::Plugin`] and end the run.
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type of the pipeline and its collaborators.
#[derive(Debug, Error)]
pub enum PulleyError {
    /// Pulleyfile missing, unreadable, or unparsable.
    #[error("failed to load Pulleyfile {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    /// Structural mismatch against the Pulleyfile schema.
    #[error("Pulleyfile failed schema validation with {} error(s)", violations.len())]
    SchemaValidation { violations: Vec<SchemaViolation> },

    /// No plugin is registered under the requested name.
    #[error("{category} named '{name}' does not exist")]
    PluginNotFound {
        category: PluginCategory,
        name: String,
    },

    /// A plugin name was registered twice within the same category.
    #[error("{category} named '{name}' is already registered")]
    DuplicatePlugin {
        category: PluginCategory,
        name: String,
    },

    /// A package declared an inline source object without a plugin name.
    #[error("package '{package}' declares an inline source without a string `name`")]
    InvalidSourceReference { package: String },

    /// One or more configuration rules failed for a package.
    ///
    /// Only raised when the pipeline runs with `halt_on_rule_failure`.
    #[error("package '{package}' failed {} configuration rule(s)", failures.len())]
    RuleValidation {
        package: String,
        failures: Vec<RuleFailure>,
    },

    /// A fetch or bundle operation failed inside a plugin.
    #[error("{context}: {source}")]
    Plugin {
        context: String,
        source: PluginError,
    },
}

impl PulleyError {
    /// Wrap a plugin-internal failure with a short description of where it happened.
    pub fn plugin(context: impl Into<String>, source: PluginError) -> Self {
        Self::Plugin {
            context: context.into(),
            source,
        }
    }
}
