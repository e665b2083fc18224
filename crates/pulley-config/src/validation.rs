// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization checks for run settings.

use pulley_report::Verbosity;

use crate::diagnostic::ConfigError;
use crate::model::Settings;

/// Validate settings for semantic correctness.
///
/// Collects every problem instead of failing fast.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if settings.destination.as_os_str().is_empty() {
        errors.push(ConfigError::Validation {
            message: "destination must not be empty".to_string(),
        });
    }

    if settings.verbosity > Verbosity::MAX.level() {
        errors.push(ConfigError::Validation {
            message: format!(
                "verbosity must be between {} and {}, got {}",
                Verbosity::MIN.level(),
                Verbosity::MAX.level(),
                settings.verbosity
            ),
        });
    }

    if let Some(bundler) = &settings.bundler {
        if bundler.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "bundler must not be empty when set".to_string(),
            });
        }
    }

    if let Some(log_file) = &settings.log_file {
        if log_file.as_os_str().is_empty() {
            errors.push(ConfigError::Validation {
                message: "log_file must not be empty when set".to_string(),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn every_problem_is_reported() {
        let settings = Settings {
            destination: PathBuf::new(),
            verbosity: 7,
            bundler: Some("  ".into()),
            ..Settings::default()
        };
        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[1].to_string().contains("between 0 and 3, got 7"));
    }
}
