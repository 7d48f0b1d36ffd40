//! Validator tests for DOT HTML-like labels.
//!
//! Tests close-tag mismatches (HTML1002), unsupported tags (HTML2001),
//! nesting rules (HTML2002), attribute rules (HTML2003), diagnostic
//! ordering and node references, custom tag tables, and `lint_str`.
//!
//! Parser tests (tokenization, tree shape, spans) live in `parser.rs`.

mod common;

use common::{check, find_diag, ids, messages, parse_ok};
use dot_htmllabel_core::grammar::tables::TagTable;
use dot_htmllabel_core::validate::{self, lint_str, lint_with_table, validate_with_table};
use dot_htmllabel_diagnostics::{NodeRef, Severity, Subject, codes};

// ─── Valid labels ────────────────────────────────────────────────────────────

#[test]
fn empty_label_is_valid() {
    let vr = check("");
    assert!(vr.ok);
    assert!(vr.issues.is_empty());
}

#[test]
fn text_only_and_comment_only_labels_are_valid() {
    assert!(messages("plain text").is_empty());
    assert!(messages("<!-- Hello World -->").is_empty());
    assert!(messages("<!-- <foo bar=\"baz\"></foo> -->").is_empty());
}

#[test]
fn full_table_is_valid() {
    let input = r#"<table border="0" cellborder="1" cellspacing="0" bgcolor="white">
  <tr><td colspan="2" port="p0"><b>Title</b></td></tr>
  <hr/>
  <tr><td align="left">a</td><vr/><td><img src="x.png" scale="true"/></td></tr>
  <tr><td><font color="red" point-size="10">r</font><br align="left"/>s</td>
      <td><i>i</i><u>u</u><o>o</o><s>s</s><sub>1</sub><sup>2</sup></td></tr>
</table>"#;
    let vr = check(input);
    assert!(vr.ok, "unexpected issues: {:?}", vr.issues);
}

#[test]
fn text_tags_at_top_level() {
    assert!(messages("<b>bold</b> and <i>italic</i><br/><font color=\"blue\">x</font>").is_empty());
}

#[test]
fn table_inside_font_and_nested_tables() {
    assert!(messages("<font><table><tr><td>x</td></tr></table></font>").is_empty());
    assert!(
        messages("<table><tr><td><table><tr><td>x</td></tr></table></td></tr></table>").is_empty()
    );
}

#[test]
fn nested_tables_checked_at_every_depth() {
    fn nest(depth: usize, inner: &str) -> String {
        let mut s = inner.to_string();
        for level in 0..depth {
            let attr = if level == depth - 1 { r#" bad="1""# } else { "" };
            s = format!("<table{attr}><tr><td>{s}</td></tr></table>");
        }
        s
    }

    let depth = 12;
    assert_eq!(
        messages(&nest(depth, "x")),
        vec!["Attribute 'bad' is not allowed inside '<table>'."]
    );

    let vr = check(&nest(depth, "<tr></tr>"));
    let found: Vec<&str> = vr.issues.iter().map(|d| &*d.id).collect();
    assert_eq!(found, vec![codes::INVALID_ATTRIBUTE, codes::INVALID_PARENT]);
    // table/tr/td per level, then the stray row.
    assert_eq!(vr.issues[1].node.as_ref().map(NodeRef::depth), Some(3 * depth + 1));
}

#[test]
fn names_and_attributes_are_case_insensitive() {
    assert!(messages(r#"<TABLE BORDER="1"><Tr><tD CoLsPaN="2">x</Td></tR></TABLE>"#).is_empty());
    assert!(messages("<b>x</B>").is_empty());
}

// ─── Close-tag mismatch and unsupported tags ─────────────────────────────────

#[test]
fn mismatched_close_and_unsupported() {
    assert_eq!(
        messages("<test>string</B>"),
        vec![
            "Tag '<test>' is not closed (expected '</test>' but got '</B>').",
            "Tag '<test>' is not supported.",
        ]
    );
    assert_eq!(
        ids("<test>string</B>"),
        vec![codes::MISMATCHED_CLOSE_TAG, codes::UNSUPPORTED_TAG]
    );
}

#[test]
fn mismatch_points_at_close_tag() {
    let vr = check("<b>x</i>");
    let d = find_diag(&vr.issues, codes::MISMATCHED_CLOSE_TAG).expect("mismatch");
    assert_eq!(d.span.map(|s| (s.start, s.end)), Some((4, 8)));
    assert_eq!(d.node, Some(NodeRef::node([0])));
    assert_eq!(d.context.as_ref().unwrap()["closing"], "i");
}

#[test]
fn unsupported_tag_children_are_still_checked() {
    assert_eq!(
        messages("<foo><tr></tr></foo>"),
        vec![
            "Tag '<foo>' is not supported.",
            "Tag '<tr>' is not allowed inside '<foo>', but only inside '<TABLE>'.",
        ]
    );
}

#[test]
fn tag_spelled_root_is_not_the_top_level() {
    assert_eq!(
        messages("<root><b>x</b></root>"),
        vec![
            "Tag '<root>' is not supported.",
            "Tag '<b>' is not allowed inside '<root>', but only inside '<TD>', '<ROOT>'.",
        ]
    );
    assert_eq!(messages("<ROOT><br/></ROOT>").len(), 2);
}

#[test]
fn unsupported_tag_skips_attribute_checks() {
    assert_eq!(
        messages(r#"<foo bar="baz"></foo>"#),
        vec!["Tag '<foo>' is not supported."]
    );
}

// ─── Nesting rules ───────────────────────────────────────────────────────────

#[test]
fn row_at_top_level() {
    assert_eq!(
        messages("<tr></tr>"),
        vec!["Tag '<tr>' is not allowed inside '<ROOT>', but only inside '<TABLE>'."]
    );
}

#[test]
fn parent_name_keeps_source_case() {
    assert_eq!(
        messages("<table><U></U></table>"),
        vec!["Tag '<U>' is not allowed inside '<table>', but only inside '<TD>', '<ROOT>'."]
    );
}

#[test]
fn image_only_inside_cell() {
    assert_eq!(
        messages(r#"<img src="x.png"/>"#),
        vec!["Tag '<img>' is not allowed inside '<ROOT>', but only inside '<TD>'."]
    );
}

#[test]
fn nested_text_tags_report_each_level() {
    let depth = 8;
    let input = format!("{}x{}", "<b>".repeat(depth), "</b>".repeat(depth));
    let vr = check(&input);
    assert_eq!(vr.issues.len(), depth - 1);
    for (level, d) in vr.issues.iter().enumerate() {
        assert_eq!(d.id, codes::INVALID_PARENT);
        assert_eq!(d.node.as_ref().map(NodeRef::depth), Some(level + 2));
    }
}

#[test]
fn cell_directly_in_table() {
    let vr = check("<table><td>x</td></table>");
    assert_eq!(vr.issues.len(), 1);
    let d = &vr.issues[0];
    assert_eq!(
        d.message,
        "Tag '<td>' is not allowed inside '<table>', but only inside '<TR>'."
    );
    assert_eq!(d.subject, Subject::Tag);
    assert_eq!(d.span.map(|s| (s.start, s.end)), Some((7, 11)));
}

// ─── Attribute rules ─────────────────────────────────────────────────────────

#[test]
fn unknown_attribute() {
    assert_eq!(
        messages(r#"<table foo="bar"></table>"#),
        vec!["Attribute 'foo' is not allowed inside '<table>'."]
    );
}

#[test]
fn every_bad_attribute_is_reported_in_order() {
    let vr = check(r#"<font color="red" size="3" face="x" weight="bold">t</font>"#);
    let refs: Vec<_> = vr.issues.iter().map(|d| d.node.clone()).collect();
    assert_eq!(
        refs,
        vec![
            Some(NodeRef::attribute([0], 1)),
            Some(NodeRef::attribute([0], 3)),
        ]
    );
    assert!(vr.issues.iter().all(|d| d.subject == Subject::Attribute));
    assert_eq!(
        vr.issues[1].message,
        "Attribute 'weight' is not allowed inside '<font>'."
    );
}

#[test]
fn tag_without_attributes_rejects_any() {
    assert_eq!(
        messages(r#"<table><tr id="r"><td>x</td></tr></table>"#),
        vec!["Attribute 'id' is not allowed inside '<tr>'."]
    );
}

#[test]
fn duplicate_attributes_are_each_checked() {
    assert_eq!(
        ids(r#"<b x="1" x="2">t</b>"#),
        vec![codes::INVALID_ATTRIBUTE, codes::INVALID_ATTRIBUTE]
    );
}

// ─── Ordering, severity and purity ───────────────────────────────────────────

#[test]
fn issues_follow_document_order() {
    let input = r#"<foo><tr></tr></foo><table z="1"><td></td></table>"#;
    assert_eq!(
        ids(input),
        vec![
            codes::UNSUPPORTED_TAG,
            codes::INVALID_PARENT,
            codes::INVALID_ATTRIBUTE,
            codes::INVALID_PARENT,
        ]
    );
}

#[test]
fn all_issues_are_errors_with_explanations() {
    let vr = check(r#"<x a="1"><tr q="1"></tr></x><td></y>"#);
    assert!(!vr.ok);
    assert!(!vr.issues.is_empty());
    for d in &vr.issues {
        assert_eq!(d.severity, Severity::Error);
        assert!(d.explain().is_some(), "no explanation for {}", d.id);
        assert!(d.span.is_some());
    }
}

#[test]
fn validation_is_pure() {
    let label = parse_ok(r#"<foo><tr bad="1"></tr></foo>"#);
    let before = label.clone();
    let first = validate::validate(&label);
    let second = validate::validate(&label);
    assert_eq!(label, before);
    assert_eq!(first.issues, second.issues);
}

#[test]
fn node_refs_resolve_to_reported_items() {
    let label = parse_ok(r#"<table><tr><td><b>x</b><font size="1">y</font></td></tr></table>"#);
    let vr = validate::validate(&label);
    assert_eq!(vr.issues.len(), 1);
    let node = vr.issues[0].node.as_ref().unwrap();
    match label.resolve(node) {
        Some(dot_htmllabel_core::Resolved::Attribute(tag, attr)) => {
            assert_eq!(tag.name, "font");
            assert_eq!(attr.name, "size");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

// ─── Custom tables ───────────────────────────────────────────────────────────

#[test]
fn custom_table_from_json() {
    let table = TagTable::from_json(
        r#"{"tags": [
            {"name": "card", "parents": ["ROOT"], "attributes": ["title"]},
            {"name": "line", "parents": ["card"]}
        ]}"#,
    )
    .unwrap();

    let ok = parse_ok(r#"<card title="t"><line>a</line></card>"#);
    assert!(validate_with_table(&ok, &table).ok);

    let bad = parse_ok(r#"<line>a</line><table></table>"#);
    let msgs: Vec<_> = validate_with_table(&bad, &table)
        .issues
        .into_iter()
        .map(|d| d.message)
        .collect();
    assert_eq!(
        msgs,
        vec![
            "Tag '<line>' is not allowed inside '<ROOT>', but only inside '<card>'.",
            "Tag '<table>' is not supported.",
        ]
    );
}

// ─── lint_str ────────────────────────────────────────────────────────────────

#[test]
fn lint_valid_label() {
    let result = lint_str("<b>x</b>");
    assert!(result.ok);
    assert!(result.issues.is_empty());
    assert_eq!(result.label.map(|l| l.parts.len()), Some(1));
}

#[test]
fn lint_collects_validation_issues() {
    let result = lint_str("<tr></tr>");
    assert!(!result.ok);
    assert!(result.label.is_some());
    assert_eq!(result.issues[0].id, codes::INVALID_PARENT);
}

#[test]
fn lint_reports_unclosed_tag_only() {
    let result = lint_with_table("<foo><b>x</b>", TagTable::builtin());
    assert!(!result.ok);
    assert!(result.label.is_none());
    assert_eq!(result.issues.len(), 1);
    assert_eq!(
        result.issues[0].message,
        "Tag '<foo>' is not closed (expected '</foo>' but reached end of input)."
    );
}
