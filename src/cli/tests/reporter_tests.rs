use super::driver::RunSummary;
use super::reporter::Reporter;
use gendump_common::{Diagnostic, diagnostic_codes};
use std::path::PathBuf;

fn summary(unresolved: usize, category_found: bool) -> RunSummary {
    RunSummary {
        entries: 10,
        open_types: 7,
        resolved: 7 - unresolved,
        unresolved,
        rejected_candidates: 4,
        category_found,
        funny_string_path: PathBuf::from("funnystring.txt"),
        type_dump_path: PathBuf::from("typestring.txt"),
        diagnostics: Vec::new(),
    }
}

#[test]
fn formats_warning_without_color() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::from_code(diagnostic_codes::NO_VALID_ARGUMENT, "Bar<T>", &["Bar<T>"]);

    assert_eq!(
        reporter.format_diagnostic(&diagnostic),
        "Bar<T> - warning GD2001: No valid generic argument found for 'Bar<T>'"
    );
}

#[test]
fn render_skips_messages() {
    let reporter = Reporter::new(false);
    let diagnostics = vec![
        Diagnostic::from_code(
            diagnostic_codes::INSTANTIATION_FAILED,
            "Bar<T>",
            &["Bar<T>", "Ref", "constraint"],
        ),
        Diagnostic::from_code(diagnostic_codes::NO_VALID_ARGUMENT, "Bar<T>", &["Bar<T>"]),
    ];

    let out = reporter.render(&diagnostics);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("GD2001"));
    assert!(out.ends_with('\n'));
}

#[test]
fn render_empty_is_empty() {
    assert_eq!(Reporter::new(true).render(&[]), "");
}

#[test]
fn summary_line() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.render_summary(&summary(1, true)),
        "10 entries, 7 open: 6 resolved, 1 unresolved, 4 candidates rejected"
    );
    assert!(
        reporter
            .render_summary(&summary(0, false))
            .ends_with("(category not found)")
    );
}
