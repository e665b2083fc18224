// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output sinks attached to a [`Reporter`](crate::Reporter).

pub mod console;
pub mod file;
pub mod trace;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use trace::TracingSink;

use crate::ReportEvent;

/// Destination for report events that passed the verbosity filter.
///
/// Sinks must not fail the run; delivery errors are swallowed or logged.
pub trait ReportSink: Send + Sync {
    fn send(&self, event: &ReportEvent);
}
