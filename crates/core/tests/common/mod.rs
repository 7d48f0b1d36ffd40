//! Shared test helpers for `dot_htmllabel_core` integration tests.

#![allow(unreachable_pub)]

use dot_htmllabel_core::grammar::ast::{Content, Label, Tag};
use dot_htmllabel_core::grammar::parser::parse_str;
use dot_htmllabel_core::validate::{ValidationResult, validate};
use dot_htmllabel_diagnostics::Diagnostic;

// ─── Parse helpers ───────────────────────────────────────────────────────────

/// Parse `input`, panicking with the input in the message on failure.
pub fn parse_ok(input: &str) -> Label {
    parse_str(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}

/// The tag at `path`, panicking if the path does not lead to a tag.
#[allow(dead_code)]
pub fn tag_at<'a>(label: &'a Label, path: &[usize]) -> &'a Tag {
    label
        .node(path)
        .and_then(Content::as_tag)
        .unwrap_or_else(|| panic!("no tag at {path:?}"))
}

/// Child kinds of a content sequence: tag names, or `#text` for text runs.
#[allow(dead_code)]
pub fn shape(parts: &[Content]) -> Vec<String> {
    parts
        .iter()
        .map(|c| match c {
            Content::Tag(tag) => tag.name.clone(),
            Content::Text(_) => "#text".to_string(),
        })
        .collect()
}

// ─── Validation helpers ──────────────────────────────────────────────────────

/// Parse and validate `input` against the built-in table.
#[allow(dead_code)]
pub fn check(input: &str) -> ValidationResult {
    validate(&parse_ok(input))
}

/// Messages of all issues for `input`, in order.
#[allow(dead_code)]
pub fn messages(input: &str) -> Vec<String> {
    check(input).issues.into_iter().map(|d| d.message).collect()
}

/// Diagnostic IDs of all issues for `input`, in order.
#[allow(dead_code)]
pub fn ids(input: &str) -> Vec<String> {
    check(input)
        .issues
        .iter()
        .map(|d| d.id.to_string())
        .collect()
}

/// First diagnostic with the given ID, if any.
#[allow(dead_code)]
pub fn find_diag<'a>(issues: &'a [Diagnostic], id: &str) -> Option<&'a Diagnostic> {
    issues.iter().find(|d| d.id == id)
}
