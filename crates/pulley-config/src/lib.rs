// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for Pulley.
//!
//! Covers both inputs of a run:
//! - the Pulleyfile: discovery, YAML/TOML parsing, the v1 schema check, and
//!   the typed model,
//! - the run settings: figment layering of defaults, config files, `PULLEY_*`
//!   environment variables, and command-line flags.
//!
//! Errors render as miette diagnostics with typo suggestions.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod schema;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors, violations_to_config_errors};
pub use loader::{DocumentLoader, FileLoader, StaticDocument, find_pulleyfile, load_pulleyfile};
pub use model::{Info, PackageSpec, Pulleyfile, Settings, SettingsOverrides, SourceRef};
pub use schema::{SchemaOutcome, validate};

/// Load settings from every layer and validate them.
pub fn load_and_validate_settings(
    overrides: &SettingsOverrides,
) -> Result<Settings, Vec<ConfigError>> {
    match loader::load_settings(overrides) {
        Ok(settings) => {
            validation::validate_settings(&settings)?;
            Ok(settings)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
