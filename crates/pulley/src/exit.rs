// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process exit codes and their names.

use std::fmt;

use pulley_core::PulleyError;
use pulley_report::Reporter;

/// Code used for failures without a registered name.
const UNREGISTERED_FAILURE: u8 = 70;

const REGISTRY: &[(u8, &str)] = &[
    (1, "ERR_NO_PULLEYFILE"),
    (2, "ERR_PULLEYFILE_VALIDATION"),
    (3, "ERR_PLUGIN_NOT_FOUND"),
    (4, "ERR_RULE_VALIDATION"),
    (5, "ERR_SETTINGS"),
];

/// A process exit code, named when it appears in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode {
    code: u8,
    name: Option<&'static str>,
}

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode {
        code: 0,
        name: None,
    };

    /// Run settings could not be loaded or applied.
    pub fn settings() -> Self {
        Self::from_number(5)
    }

    pub fn from_number(code: u8) -> Self {
        let name = REGISTRY
            .iter()
            .find(|(registered, _)| *registered == code)
            .map(|(_, name)| *name);
        Self { code, name }
    }

    /// Exit code for a run that ended with `err`.
    pub fn for_error(err: &PulleyError) -> Self {
        let code = match err {
            PulleyError::ConfigLoad { .. } => 1,
            PulleyError::SchemaValidation { .. } => 2,
            PulleyError::PluginNotFound { .. } | PulleyError::InvalidSourceReference { .. } => 3,
            PulleyError::RuleValidation { .. } => 4,
            PulleyError::DuplicatePlugin { .. } | PulleyError::Plugin { .. } => {
                UNREGISTERED_FAILURE
            }
        };
        Self::from_number(code)
    }

    pub fn code(self) -> u8 {
        self.code
    }

    pub fn name(self) -> Option<&'static str> {
        self.name
    }

    pub fn is_success(self) -> bool {
        self.code == 0
    }

    /// The farewell line reported before the process ends.
    pub fn message(self) -> String {
        match (self.code, self.name) {
            (0, _) => "Quitting Pulley. Goodbye!".to_string(),
            (code, Some(name)) => format!("Quitting Pulley with exit code {code} ({name})"),
            (code, None) => format!("Quitting Pulley with exit code {code}"),
        }
    }

    /// Send the farewell line: a notice on success, an error otherwise.
    pub fn report(self, reporter: &Reporter) {
        if self.is_success() {
            reporter.notice(self.message());
        } else {
            reporter.error(self.message());
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "{} ({name})", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulley_core::{PluginCategory, RuleFailure};
    use pulley_report::MessageKind;
    use pulley_test_utils::recording_reporter;

    #[test]
    fn registered_codes_carry_names() {
        assert_eq!(ExitCode::from_number(1).name(), Some("ERR_NO_PULLEYFILE"));
        assert_eq!(ExitCode::from_number(4).name(), Some("ERR_RULE_VALIDATION"));
        assert_eq!(ExitCode::from_number(70).name(), None);
    }

    #[test]
    fn messages_follow_the_code_kind() {
        assert_eq!(ExitCode::SUCCESS.message(), "Quitting Pulley. Goodbye!");
        assert_eq!(
            ExitCode::from_number(2).message(),
            "Quitting Pulley with exit code 2 (ERR_PULLEYFILE_VALIDATION)"
        );
        assert_eq!(
            ExitCode::from_number(70).message(),
            "Quitting Pulley with exit code 70"
        );
    }

    #[test]
    fn errors_map_to_codes() {
        let not_found = PulleyError::PluginNotFound {
            category: PluginCategory::Bundler,
            name: "zip".into(),
        };
        assert_eq!(ExitCode::for_error(&not_found).code(), 3);

        let inline = PulleyError::InvalidSourceReference {
            package: "a".into(),
        };
        assert_eq!(ExitCode::for_error(&inline).code(), 3);

        let rules = PulleyError::RuleValidation {
            package: "a".into(),
            failures: vec![RuleFailure {
                rule: "Path".into(),
                message: "missing".into(),
            }],
        };
        assert_eq!(ExitCode::for_error(&rules).name(), Some("ERR_RULE_VALIDATION"));

        let load = PulleyError::ConfigLoad {
            path: "Pulleyfile".into(),
            reason: "not found".into(),
        };
        assert_eq!(ExitCode::for_error(&load).code(), 1);

        let plugin = PulleyError::plugin("fetch", "boom".into());
        assert_eq!(ExitCode::for_error(&plugin).code(), 70);
        assert!(!ExitCode::for_error(&plugin).is_success());
    }

    #[test]
    fn settings_failures_have_their_own_code() {
        let code = ExitCode::settings();
        assert_eq!(code.code(), 5);
        assert_eq!(code.name(), Some("ERR_SETTINGS"));
        assert_ne!(code, ExitCode::from_number(1));
    }

    #[test]
    fn failing_codes_are_reported_as_errors() {
        let (reporter, sink) = recording_reporter();
        ExitCode::from_number(3).report(&reporter);
        ExitCode::SUCCESS.report(&reporter);

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, MessageKind::Error);
        assert_eq!(
            events[0].message,
            "Quitting Pulley with exit code 3 (ERR_PLUGIN_NOT_FOUND)"
        );
        assert_eq!(events[1].kind, MessageKind::Notice);
        assert_eq!(events[1].message, "Quitting Pulley. Goodbye!");
    }

    #[test]
    fn display_includes_name_when_known() {
        assert_eq!(ExitCode::from_number(3).to_string(), "3 (ERR_PLUGIN_NOT_FOUND)");
        assert_eq!(ExitCode::from_number(9).to_string(), "9");
    }
}
