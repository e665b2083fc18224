// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only file sink with plain, uncoloured lines.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

use super::ReportSink;
use crate::ReportEvent;

/// Appends `[timestamp] KIND message` lines to a log file.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

fn format_entry(event: &ReportEvent) -> String {
    if event.raw {
        return event.message.clone();
    }
    format!(
        "[{}] {} {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        event.kind,
        event.message
    )
}

impl ReportSink for FileSink {
    fn send(&self, event: &ReportEvent) {
        let line = format_entry(event);
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = writeln!(file, "{line}") {
            tracing::warn!(error = %e, "failed to write report line to log file");
        }
    }
}
