// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message kinds and verbosity levels.

use strum::{Display, EnumString};

/// Kind of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MessageKind {
    /// Informational detail not needed for regular use.
    Info,
    /// Technical detail for troubleshooting.
    Debug,
    /// Regular output; the default kind.
    Notice,
    /// Something may be wrong but the run continues.
    Warning,
    /// Something has gone wrong.
    Error,
}

/// How much output the user asked for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Verbosity {
    Silent = 0,
    #[default]
    Normal = 1,
    Info = 2,
    Debug = 3,
}

impl Verbosity {
    pub const MIN: Verbosity = Verbosity::Silent;
    pub const MAX: Verbosity = Verbosity::Debug;

    /// Closest valid verbosity for a numeric level, clamped to `SILENT..=DEBUG`.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Silent,
            1 => Verbosity::Normal,
            2 => Verbosity::Info,
            _ => Verbosity::Debug,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Whether a message of `kind` is shown at this verbosity.
    pub fn allows(self, kind: MessageKind) -> bool {
        match self {
            Verbosity::Silent => false,
            Verbosity::Normal => matches!(
                kind,
                MessageKind::Notice | MessageKind::Warning | MessageKind::Error
            ),
            Verbosity::Info => kind != MessageKind::Debug,
            Verbosity::Debug => true,
        }
    }

    /// `tracing` filter directive matching this verbosity.
    pub fn tracing_directive(self) -> &'static str {
        match self {
            Verbosity::Silent => "off",
            Verbosity::Normal => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}
