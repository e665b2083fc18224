// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console sink: symbol, timestamp, and message on one line.
//!
//! Warnings and errors go to stderr, everything else to stdout.

use std::io::IsTerminal;

use chrono::{DateTime, Local};
use colored::{Color, Colorize};

use super::ReportSink;
use crate::{MessageKind, ReportEvent};

/// Writes report events to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
    show_time: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            show_time: true,
        }
    }

    /// Colour only when stdout is a terminal and `plain` is not requested.
    pub fn detect(plain: bool) -> Self {
        Self::new(!plain && std::io::stdout().is_terminal())
    }

    pub fn without_time(mut self) -> Self {
        self.show_time = false;
        self
    }

    /// Render `event` as it would appear on the console at `now`.
    pub fn format_line(&self, event: &ReportEvent, now: DateTime<Local>) -> String {
        if event.raw {
            return event.message.clone();
        }

        let symbol = symbol_for(event);
        let time = if self.show_time {
            format!("{} : ", now.format("%I:%M:%S %p"))
        } else {
            String::new()
        };

        if !self.color {
            return format!("{symbol} : {time}{}", event.message);
        }

        let (symbol_color, message_color) = colors_for(event);
        format!(
            "{} : {}{}",
            symbol.color(symbol_color),
            time.color(message_color),
            event.message.color(message_color)
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::detect(false)
    }
}

impl ReportSink for ConsoleSink {
    fn send(&self, event: &ReportEvent) {
        let line = self.format_line(event, Local::now());
        match event.kind {
            MessageKind::Warning | MessageKind::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

fn symbol_for(event: &ReportEvent) -> &'static str {
    if event.success {
        return "✓";
    }
    match event.kind {
        MessageKind::Info | MessageKind::Debug => "i",
        MessageKind::Warning => "!",
        MessageKind::Error => "x",
        MessageKind::Notice => "-",
    }
}

fn colors_for(event: &ReportEvent) -> (Color, Color) {
    if event.success {
        return (Color::Green, Color::Green);
    }
    match event.kind {
        MessageKind::Debug => (Color::Cyan, Color::White),
        MessageKind::Info => (Color::White, Color::White),
        MessageKind::Notice => (Color::BrightBlack, Color::White),
        MessageKind::Warning => (Color::Yellow, Color::Yellow),
        MessageKind::Error => (Color::Red, Color::Red),
    }
}
