// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-package box shown before a package is processed.

use pulley_config::PackageSpec;

const PADDING: usize = 1;

/// Render a framed summary of `spec`: name, source, and display metadata.
///
/// The frame uses double vertical and single horizontal lines.
pub fn package_box(spec: &PackageSpec) -> String {
    let source = spec.source_name().unwrap_or("<inline>");
    let mut lines = vec![format!("{} from {} source", spec.name, source)];
    for (key, value) in &spec.metadata {
        lines.push(format!("{key}: {value}"));
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let inner = width + PADDING * 2;
    let blank = format!("║{}║", " ".repeat(inner));

    let mut out = Vec::with_capacity(lines.len() + 6);
    out.push(String::new());
    out.push(format!("╓{}╖", "─".repeat(inner)));
    out.push(blank.clone());
    for line in &lines {
        let fill = width - line.chars().count();
        out.push(format!(
            "║{pad}{line}{fill}{pad}║",
            pad = " ".repeat(PADDING),
            fill = " ".repeat(fill)
        ));
    }
    out.push(blank);
    out.push(format!("╙{}╜", "─".repeat(inner)));
    out.push(String::new());
    out.join("\n")
}
