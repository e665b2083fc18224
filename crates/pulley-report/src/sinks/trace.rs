// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forwards report events to `tracing`.

use super::ReportSink;
use crate::{MessageKind, ReportEvent};

/// Emits each report event as a `tracing` event at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn send(&self, event: &ReportEvent) {
        let message = event.message.as_str();
        let success = event.success;
        match event.kind {
            MessageKind::Debug => tracing::debug!(success, "{message}"),
            MessageKind::Info => tracing::info!(success, "{message}"),
            MessageKind::Notice => tracing::info!(success, "{message}"),
            MessageKind::Warning => tracing::warn!(success, "{message}"),
            MessageKind::Error => tracing::error!(success, "{message}"),
        }
    }
}
