// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporting context for user-facing Pulley output.
//!
//! A single [`Reporter`] is built at process start and passed by reference to
//! the pipeline, the rule validator, and the registry. It filters each
//! [`ReportEvent`] by [`Verbosity`] and hands the survivors to every attached
//! [`ReportSink`]. Sinks are independent of one another: console, file, and
//! tracing output can be combined freely, and a reporter with no sinks is
//! silent.

pub mod level;
pub mod sinks;

pub use level::{MessageKind, Verbosity};
pub use sinks::{ConsoleSink, FileSink, ReportSink, TracingSink};

/// A single message sent through the reporting context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    pub kind: MessageKind,
    pub message: String,
    /// Marks the completion of an operation; sinks may style it differently.
    pub success: bool,
    /// Output the message without any decoration (banners, boxes).
    pub raw: bool,
}

impl ReportEvent {
    pub fn new(kind: MessageKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            success: false,
            raw: false,
        }
    }

    pub fn success(mut self) -> Self {
        self.success = true;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

/// Verbosity-filtered fan-out of report events to sinks.
pub struct Reporter {
    verbosity: Verbosity,
    sinks: Vec<Box<dyn ReportSink>>,
}

impl Reporter {
    /// Create a reporter with no sinks attached.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            sinks: Vec::new(),
        }
    }

    /// A reporter that drops every event.
    pub fn silent() -> Self {
        Self::new(Verbosity::Silent)
    }

    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver `event` to every sink if the verbosity permits its kind.
    pub fn report(&self, event: ReportEvent) {
        if !self.verbosity.allows(event.kind) {
            return;
        }
        for sink in &self.sinks {
            sink.send(&event);
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Debug, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Info, message));
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Notice, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Error, message));
    }

    /// A notice marking a completed operation.
    pub fn success(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Notice, message).success());
    }

    /// An info message marking a completed step.
    pub fn info_success(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Info, message).success());
    }

    /// An undecorated notice.
    pub fn raw(&self, message: impl Into<String>) {
        self.report(ReportEvent::new(MessageKind::Notice, message).raw());
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Verbosity::default())
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("verbosity", &self.verbosity)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
