//! Terminal rendering of label diagnostics with ariadne.
//!
//! JSON output is written by the commands themselves; this module only
//! handles the pretty path, which goes to stderr so that stdout stays
//! reserved for the command's data.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use dot_htmllabel_diagnostics::{Diagnostic, Severity};

/// Output format selected by `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON when piped.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

fn style(severity: Severity) -> (ReportKind<'static>, Color) {
    match severity {
        Severity::Error => (ReportKind::Error, Color::Red),
    }
}

/// Render `diagnostics` against the label `source` to stderr.
///
/// Diagnostics with a span get an annotated source excerpt; the rest are
/// printed as plain lines.
pub(crate) fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    // Spans are byte offsets and labels are often non-ASCII.
    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let note = diag
            .node
            .as_ref()
            .map(|node| format!("{} at node {node}", diag.subject));

        let Some(span) = &diag.span else {
            eprintln!("{diag}");
            if let Some(note) = &note {
                eprintln!("  = note: {note}");
            }
            if let Some(help) = diag.explain() {
                eprintln!("  = help: {help}");
            }
            continue;
        };

        // Clamp in case the span outlives an edited source.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);
        let (kind, color) = style(diag.severity);

        let mut report = Report::build(kind, (filename, start..end))
            .with_code(&*diag.id)
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(label_text(diag))
                    .with_color(color),
            );
        if let Some(note) = note {
            report = report.with_note(note);
        }
        if let Some(help) = diag.explain() {
            report = report.with_help(help);
        }
        report.finish().eprint(&mut cache).ok();
    }
}

/// Inline label text: the structured context (`parent=table, tag=U`) when
/// present, the message otherwise.
fn label_text(diag: &Diagnostic) -> String {
    match &diag.context {
        Some(ctx) if !ctx.is_empty() => ctx
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => diag.message.clone(),
    }
}

/// Print the error count (`3 errors`) to stderr, if there is anything to count.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors == 0 {
        return;
    }
    let s = if errors == 1 { "" } else { "s" };
    eprintln!("{}", format!("{errors} error{s}").fg(Color::Red));
}
