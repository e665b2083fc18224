// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup banner.

use colored::Colorize;
use pulley_report::Reporter;

/// Banner line shown at startup.
pub fn banner(color: bool) -> String {
    let title = "= Pulley =";
    let version = format!(" v{}", env!("CARGO_PKG_VERSION"));
    if color {
        format!("{}{}", title.cyan().bold(), version.bright_black())
    } else {
        format!("{title}{version}")
    }
}

pub fn print(reporter: &Reporter, color: bool) {
    reporter.raw(banner(color));
}
