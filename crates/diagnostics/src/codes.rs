//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. `HTML1xxx` codes are structural (tag matching),
//! `HTML2xxx` codes are grammar violations found by the validator.

/// A tag is still open when the input ends.
pub const UNCLOSED_TAG: &str = "HTML1001";

/// A close tag names a different tag than the one it closes.
pub const MISMATCHED_CLOSE_TAG: &str = "HTML1002";

/// The tag is not part of the HTML-like label vocabulary.
pub const UNSUPPORTED_TAG: &str = "HTML2001";

/// The tag appears inside a parent that may not contain it.
pub const INVALID_PARENT: &str = "HTML2002";

/// The attribute is not allowed on its tag.
pub const INVALID_ATTRIBUTE: &str = "HTML2003";

/// Every known diagnostic code, in numeric order.
pub const ALL: &[&str] = &[
    UNCLOSED_TAG,
    MISMATCHED_CLOSE_TAG,
    UNSUPPORTED_TAG,
    INVALID_PARENT,
    INVALID_ATTRIBUTE,
];

pub(crate) fn explanation(id: &str) -> Option<&'static str> {
    match id {
        UNCLOSED_TAG => Some(
            "A tag was opened but the input ended before its close tag. \
             Every non-self-closing tag must be closed, e.g. `<b>text</b>`, \
             or written self-closing, e.g. `<br/>`.",
        ),
        MISMATCHED_CLOSE_TAG => Some(
            "A close tag does not name the innermost open tag. The opened tag \
             is treated as closed at that point so the rest of the label can \
             still be checked. Tag names are compared case-insensitively.",
        ),
        UNSUPPORTED_TAG => Some(
            "Graphviz only accepts a fixed set of tags in HTML-like labels: \
             TABLE, TR, TD, FONT, B, I, U, O, S, SUB, SUP, BR, IMG, HR and VR. \
             Content nested inside an unsupported tag is still checked.",
        ),
        INVALID_PARENT => Some(
            "The tag is nested inside a parent that may not contain it, e.g. \
             `<tr>` outside of `<table>`. ROOT denotes the top level of the label.",
        ),
        INVALID_ATTRIBUTE => Some(
            "The attribute is not defined for this tag. Attribute names are \
             compared case-insensitively; each offending occurrence is reported.",
        ),
        _ => None,
    }
}
