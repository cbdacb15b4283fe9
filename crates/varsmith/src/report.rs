//! Terminal summary printed after a run.

use std::fmt::Write;

use console::Style;

use crate::run::RunReport;

struct Palette {
    header: Style,
    label: Style,
    path: Style,
    warning: Style,
}

impl Palette {
    fn new(use_color: bool) -> Self {
        if !use_color {
            return Self {
                header: Style::new(),
                label: Style::new(),
                path: Style::new(),
                warning: Style::new(),
            };
        }
        Self {
            header: Style::new().bold().cyan().force_styling(true),
            label: Style::new().yellow().force_styling(true),
            path: Style::new().green().force_styling(true),
            warning: Style::new().magenta().force_styling(true),
        }
    }
}

/// Renders the run summary. Skipped values are listed one per line.
pub fn render_summary(report: &RunReport, use_color: bool) -> String {
    let palette = Palette::new(use_color);
    let summary = &report.summary;
    let stats = &summary.stats;
    let mut out = String::new();

    let _ = writeln!(out, "{}", palette.header.apply_to("Export complete"));
    let _ = writeln!(
        out,
        "{} {} collections, {} variables",
        palette.label.apply_to("Read:"),
        stats.collections,
        stats.variables
    );
    let _ = writeln!(
        out,
        "{} {} tokens, {} stylesheet declarations",
        palette.label.apply_to("Built:"),
        stats.tokens,
        stats.declarations
    );
    for path in &report.written {
        let _ = writeln!(
            out,
            "{} {}",
            palette.label.apply_to("Wrote:"),
            palette.path.apply_to(path.display())
        );
    }

    if !summary.diagnostics.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            palette
                .warning
                .apply_to(format!("Skipped {} value(s):", summary.diagnostics.len()))
        );
        for diagnostic in &summary.diagnostics {
            let _ = writeln!(out, "  {}", diagnostic);
        }
    }
    out
}
