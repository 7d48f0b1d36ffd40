pub use crate::grammar::diag::Diagnostic;
use crate::grammar::{
    ast::{Content, Label},
    diag::{NodeRef, Subject, codes},
    parser::parse_str,
    tables::TagTable,
};
use serde::Serialize;
use tracing::debug;

mod context;
mod messages;

use context::{Parent, TagCtx};

/// Result of validating a label tree against a tag table.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// `true` if no errors were found.
    pub ok: bool,
    /// All diagnostics, in pre-order document order.
    pub issues: Vec<Diagnostic>,
}

/// Result of parsing and validating label text in one step.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    /// The parsed tree, or `None` when the input could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// `true` if neither parsing nor validation found an error.
    pub ok: bool,
    /// Parse error (if any) followed by validation diagnostics.
    pub issues: Vec<Diagnostic>,
}

/// Validate `label` against the built-in Graphviz tag table.
pub fn validate(label: &Label) -> ValidationResult {
    validate_with_table(label, TagTable::builtin())
}

/// Validate `label` against `table`.
///
/// The tree is walked in pre-order. For every tag the checks run in this
/// order: close-tag mismatch, supported tag, allowed parent, allowed
/// attributes. An unsupported tag is reported once and its parent and
/// attribute checks are skipped, but its children are still visited.
pub fn validate_with_table(label: &Label, table: &TagTable) -> ValidationResult {
    let mut issues = Vec::new();
    let mut path = Vec::new();
    visit(&label.parts, Parent::Root, table, &mut path, &mut issues);
    debug!(issues = issues.len(), "validated label");
    let ok = !issues.iter().any(Diagnostic::is_error);
    ValidationResult { ok, issues }
}

/// Parse and validate `input` against the built-in tag table.
pub fn lint_str(input: &str) -> LintResult {
    lint_with_table(input, TagTable::builtin())
}

/// Parse and validate `input` against `table`.
///
/// A parse failure is reported as a single diagnostic and no validation runs.
pub fn lint_with_table(input: &str, table: &TagTable) -> LintResult {
    match parse_str(input) {
        Ok(label) => {
            let ValidationResult { ok, issues } = validate_with_table(&label, table);
            LintResult {
                label: Some(label),
                ok,
                issues,
            }
        }
        Err(err) => LintResult {
            label: None,
            ok: false,
            issues: vec![err.to_diagnostic()],
        },
    }
}

fn visit<'a>(
    parts: &'a [Content],
    parent: Parent<'a>,
    table: &TagTable,
    path: &mut Vec<usize>,
    issues: &mut Vec<Diagnostic>,
) {
    for (idx, part) in parts.iter().enumerate() {
        let Content::Tag(tag) = part else { continue };
        path.push(idx);
        check_tag(
            TagCtx {
                tag,
                parent,
                path: path.as_slice(),
                table,
            },
            issues,
        );
        visit(&tag.children, Parent::Tag(tag), table, path, issues);
        path.pop();
    }
}

fn check_tag(cx: TagCtx<'_>, issues: &mut Vec<Diagnostic>) {
    check_close_tag(cx, issues);
    let Some(rule) = cx.table.rule(&cx.tag.name) else {
        issues.push(
            Diagnostic::error(
                codes::UNSUPPORTED_TAG,
                Subject::Tag,
                messages::unsupported_tag(&cx.tag.name),
                Some(cx.tag.open_span),
            )
            .at(NodeRef::node(cx.path))
            .with_context(ctx!("tag" => cx.tag.name.as_str())),
        );
        return;
    };

    if !rule.allows_parent(cx.parent.enclosing()) {
        let parent = cx.parent.name();
        issues.push(
            Diagnostic::error(
                codes::INVALID_PARENT,
                Subject::Tag,
                messages::invalid_parent(&cx.tag.name, parent, &rule.parents),
                Some(cx.tag.open_span),
            )
            .at(NodeRef::node(cx.path))
            .with_context(ctx!(
                "tag" => cx.tag.name.as_str(),
                "parent" => parent,
                "allowed" => rule.parents.join(","),
            )),
        );
    }

    for (idx, attr) in cx.tag.attributes.iter().enumerate() {
        if rule.allows_attribute(&attr.name) {
            continue;
        }
        issues.push(
            Diagnostic::error(
                codes::INVALID_ATTRIBUTE,
                Subject::Attribute,
                messages::invalid_attribute(&attr.name, &cx.tag.name),
                Some(attr.span),
            )
            .at(NodeRef::attribute(cx.path, idx))
            .with_context(ctx!(
                "tag" => cx.tag.name.as_str(),
                "attribute" => attr.name.as_str(),
            )),
        );
    }
}

fn check_close_tag(cx: TagCtx<'_>, issues: &mut Vec<Diagnostic>) {
    let Some(closing) = cx.tag.closing_name.as_deref() else {
        return;
    };
    if cx.tag.is(closing) {
        return;
    }
    issues.push(
        Diagnostic::error(
            codes::MISMATCHED_CLOSE_TAG,
            Subject::Tag,
            messages::mismatched_close(&cx.tag.name, closing),
            cx.tag.close_span.or(Some(cx.tag.open_span)),
        )
        .at(NodeRef::node(cx.path))
        .with_context(ctx!(
            "tag" => cx.tag.name.as_str(),
            "closing" => closing,
        )),
    );
}
