//! Diagnostics for DOT HTML-like labels.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Subject`], [`NodeRef`] and
//! [`Span`] types used to report problems found by the label parser and
//! validator. Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
///
/// The HTML-like label grammar has no warning-level findings, so every
/// diagnostic is an [`Severity::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Hard error: the label is invalid.
    Error,
}

/// What kind of syntax element a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// A tag (element) of the label.
    Tag,
    /// An attribute of a tag.
    Attribute,
}

/// Byte span in the source input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ownership-free reference to a node of a parsed label.
///
/// `path` holds child indices starting at the label's top-level content:
/// `[1, 0]` is the first child of the second top-level node. When
/// `attribute` is set the reference points at that attribute (by position)
/// of the addressed tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeRef {
    /// Child indices from the label root down to the node.
    pub path: Vec<usize>,
    /// Index into the tag's attribute list, for attribute diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<usize>,
}

impl NodeRef {
    /// Reference to the node at `path`.
    pub fn node(path: impl Into<Vec<usize>>) -> Self {
        Self {
            path: path.into(),
            attribute: None,
        }
    }

    /// Reference to attribute `index` of the tag at `path`.
    pub fn attribute(path: impl Into<Vec<usize>>, index: usize) -> Self {
        Self {
            path: path.into(),
            attribute: Some(index),
        }
    }

    /// Nesting depth of the referenced node (top-level nodes have depth 1).
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/")?;
        for (i, idx) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{idx}")?;
        }
        if let Some(attr) = self.attribute {
            write!(f, "@{attr}")?;
        }
        Ok(())
    }
}

/// A diagnostic message produced by the parser or validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"HTML2001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Whether the finding concerns a tag or an attribute.
    pub subject: Subject,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Node of the label tree this diagnostic is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeRef>,
    /// Optional byte span in the source input that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        subject: Subject,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            subject,
            message: message.into(),
            node: None,
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        subject: Subject,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, subject, message, span)
    }

    /// Attach the tree node this diagnostic refers to (builder pattern).
    pub fn at(mut self, node: NodeRef) -> Self {
        self.node = Some(node);
        self
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"tag"`, `"parent"`, `"attribute"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Whether this diagnostic has error severity.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Tag => write!(f, "tag"),
            Subject::Attribute => write!(f, "attribute"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explanation(id)
}
