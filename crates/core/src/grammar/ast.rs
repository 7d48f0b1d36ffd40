use serde::Serialize;

use super::diag::{NodeRef, Span};
use super::lexer::Token;

/// A parsed HTML-like label: its top-level content and the token stream it
/// was built from.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct Label {
    /// Ordered top-level content of the label.
    pub parts: Vec<Content>,
    /// All tokens of the source, in order, including comments.
    pub tokens: Vec<Token>,
}

/// One entry of a content sequence: a run of text or a tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Content {
    /// Text between tags, kept verbatim (including whitespace-only runs).
    Text(TextRun),
    /// A tag with its attributes and nested content.
    Tag(Tag),
}

/// A run of text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextRun {
    /// The raw text.
    pub text: String,
    /// Source span of the text.
    pub span: Span,
}

/// A tag node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tag {
    /// Tag name with its source casing.
    pub name: String,
    /// Attributes in declaration order. Duplicates are kept.
    pub attributes: Vec<Attribute>,
    /// Nested content in document order.
    pub children: Vec<Content>,
    /// Name written in the close tag that ended this tag, if any.
    /// May differ from `name`; the validator reports the mismatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_name: Option<String>,
    /// Whether the tag was written as `<name ... />`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub self_closing: bool,
    /// Span of the whole element, from `<` of the open tag to the end of
    /// its close tag.
    pub span: Span,
    /// Span of the open tag only (`<name ...>`).
    pub open_span: Span,
    /// Span of the close tag, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_span: Option<Span>,
}

/// A `name="value"` attribute of a tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Attribute {
    /// Attribute name with its source casing.
    pub name: String,
    /// Attribute value without quotes.
    pub value: String,
    /// Span from the start of the name to the closing quote.
    pub span: Span,
}

/// The target of a [`NodeRef`] inside a [`Label`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// A text run or tag.
    Content(&'a Content),
    /// An attribute, together with the tag that owns it.
    Attribute(&'a Tag, &'a Attribute),
}

impl Label {
    /// Whether the label has no content at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Top-level tags, skipping text.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.parts.iter().filter_map(Content::as_tag)
    }

    /// Content node at `path` (child indices from the top level).
    pub fn node(&self, path: &[usize]) -> Option<&Content> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.parts.get(first)?;
        for &idx in rest {
            node = node.as_tag()?.children.get(idx)?;
        }
        Some(node)
    }

    /// Resolve a diagnostic's node reference back to the tree.
    pub fn resolve(&self, node: &NodeRef) -> Option<Resolved<'_>> {
        let content = self.node(&node.path)?;
        match node.attribute {
            None => Some(Resolved::Content(content)),
            Some(idx) => {
                let tag = content.as_tag()?;
                Some(Resolved::Attribute(tag, tag.attributes.get(idx)?))
            }
        }
    }

    /// The token containing byte `offset`, if any.
    pub fn token_at(&self, offset: usize) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        self.tokens
            .get(idx)
            .filter(|t| t.span.start <= offset && offset < t.span.end)
    }
}

impl Content {
    /// The tag, if this is a tag node.
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Content::Tag(tag) => Some(tag),
            Content::Text(_) => None,
        }
    }

    /// The text, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(run) => Some(&run.text),
            Content::Tag(_) => None,
        }
    }

    /// Source span of the node.
    pub fn span(&self) -> Span {
        match self {
            Content::Text(run) => run.span,
            Content::Tag(tag) => tag.span,
        }
    }
}

impl Tag {
    pub(crate) fn open(name: &str, start: usize, end: usize) -> Self {
        let span = Span::new(start, end);
        Self {
            name: name.to_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
            closing_name: None,
            self_closing: false,
            span,
            open_span: span,
            close_span: None,
        }
    }

    /// Whether the tag is named `name` (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of the first attribute called `name` (case-insensitive).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Child tags, skipping text.
    pub fn child_tags(&self) -> impl Iterator<Item = &Tag> {
        self.children.iter().filter_map(Content::as_tag)
    }

    /// Concatenated text of all descendant text runs.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(parts: &[Content], out: &mut String) {
    for part in parts {
        match part {
            Content::Text(run) => out.push_str(&run.text),
            Content::Tag(tag) => collect_text(&tag.children, out),
        }
    }
}
