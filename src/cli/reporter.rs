use colored::Colorize;

use crate::cli::driver::RunSummary;
use gendump_common::{Diagnostic, DiagnosticCategory};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Render `diagnostics` one per line, skipping plain messages.
    ///
    /// Messages are per-candidate rejections and only show up in the
    /// summary file and the trace log.
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics
            .iter()
            .filter(|d| d.category != DiagnosticCategory::Message)
        {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let subject = if diagnostic.subject.is_empty() {
            "<unknown>"
        } else {
            diagnostic.subject.as_str()
        };
        format!(
            "{} - {} {}: {}",
            subject,
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    /// One-line summary of a finished run.
    pub fn render_summary(&self, summary: &RunSummary) -> String {
        let unresolved = summary.unresolved.to_string();
        let unresolved = if self.color && summary.unresolved > 0 {
            unresolved.yellow().bold().to_string()
        } else {
            unresolved
        };
        let mut line = format!(
            "{} entries, {} open: {} resolved, {} unresolved, {} candidates rejected",
            summary.entries,
            summary.open_types,
            summary.resolved,
            unresolved,
            summary.rejected_candidates
        );
        if !summary.category_found {
            line.push_str(" (category not found)");
        }
        line
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("GD{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
