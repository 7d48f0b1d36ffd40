use thiserror::Error;
use tracing::{debug, trace};

use super::{
    ast::{Attribute, Content, Label, Tag, TextRun},
    diag::{Diagnostic, NodeRef, Span, Subject, codes},
    lexer::{TokKind, Token, tokenize},
};

/// Structural failure that stops a label from being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input ended while a tag was still open.
    #[error("Tag '<{name}>' is not closed (expected '</{name}>' but reached end of input).")]
    UnclosedTag {
        /// Name of the innermost unclosed tag, as written.
        name: String,
        /// Span of its open tag.
        span: Span,
        /// Where the tag would have been placed in the tree.
        path: Vec<usize>,
    },
}

impl ParseError {
    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnclosedTag { span, .. } => *span,
        }
    }

    /// The error as a diagnostic, for callers that report everything as a
    /// single list.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::UnclosedTag { name, span, path } => Diagnostic::error(
                codes::UNCLOSED_TAG,
                Subject::Tag,
                self.to_string(),
                Some(*span),
            )
            .at(NodeRef::node(path.clone()))
            .with_context(ctx!("tag" => name.as_str())),
        }
    }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse an HTML-like label into a [`Label`] tree.
///
/// Only a tag left open at end of input fails the parse. Mismatched close
/// tags still close the innermost open tag and are recorded in
/// [`Tag::closing_name`] for the validator; a close tag with nothing open is
/// kept as text.
pub fn parse_str(input: &str) -> Result<Label, ParseError> {
    debug!(len = input.len(), "parsing label");
    let tokens = tokenize(input);
    let parts = TreeBuilder::new(&tokens).build()?;
    debug!(tokens = tokens.len(), parts = parts.len(), "parsed label");
    Ok(Label { parts, tokens })
}

// ─── Tree builder ───────────────────────────────────────────────────────────

struct TreeBuilder<'a> {
    toks: &'a [Token],
    pos: usize,
    /// Open tags, innermost last. Each collects its children until closed.
    stack: Vec<Tag>,
    parts: Vec<Content>,
}

impl<'a> TreeBuilder<'a> {
    fn new(toks: &'a [Token]) -> Self {
        Self {
            toks,
            pos: 0,
            stack: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// The content sequence new nodes are appended to.
    fn container(&mut self) -> &mut Vec<Content> {
        match self.stack.last_mut() {
            Some(tag) => &mut tag.children,
            None => &mut self.parts,
        }
    }

    fn build(mut self) -> Result<Vec<Content>, ParseError> {
        let toks = self.toks;
        while let Some(tok) = toks.get(self.pos) {
            self.pos += 1;
            match &tok.kind {
                TokKind::TagOpen { name } => self.open_tag(name, tok.span),
                TokKind::TagClose { name } => self.close_tag(name, tok),
                TokKind::Text => self.push_text(tok),
                TokKind::Comment => {}
                // Only reachable after an open tag, which consumes them.
                TokKind::Attribute { .. } | TokKind::TagOpenEnd | TokKind::TagSelfClose => {
                    trace!(kind = ?tok.kind, "ignoring tag part outside an open tag");
                }
            }
        }

        if let Some(innermost) = self.stack.last() {
            // Index of each open tag within its (still unfinished) container.
            let mut path = Vec::with_capacity(self.stack.len());
            path.push(self.parts.len());
            path.extend(self.stack.windows(2).map(|w| w[0].children.len()));
            debug!(tag = %innermost.name, depth = self.stack.len(), "unclosed tag at end of input");
            return Err(ParseError::UnclosedTag {
                name: innermost.name.clone(),
                span: innermost.open_span,
                path,
            });
        }
        Ok(self.parts)
    }

    /// Consume the attributes and terminator following a `TagOpen` token.
    fn open_tag(&mut self, name: &str, start: Span) {
        let toks = self.toks;
        let mut tag = Tag::open(name, start.start, start.end);
        while let Some(tok) = toks.get(self.pos) {
            match &tok.kind {
                TokKind::Attribute { name, value } => {
                    let lead = tok.text.len() - tok.text.trim_start().len();
                    tag.attributes.push(Attribute {
                        name: name.clone(),
                        value: value.clone(),
                        span: Span::new(tok.span.start + lead, tok.span.end),
                    });
                    self.pos += 1;
                }
                TokKind::TagSelfClose => {
                    self.pos += 1;
                    tag.self_closing = true;
                    tag.open_span = Span::new(start.start, tok.span.end);
                    tag.span = tag.open_span;
                    trace!(tag = %tag.name, "self-closing tag");
                    self.container().push(Content::Tag(tag));
                    return;
                }
                TokKind::TagOpenEnd => {
                    self.pos += 1;
                    tag.open_span = Span::new(start.start, tok.span.end);
                    tag.span = tag.open_span;
                    break;
                }
                _ => break,
            }
        }
        trace!(tag = %tag.name, depth = self.stack.len() + 1, "push");
        self.stack.push(tag);
    }

    fn close_tag(&mut self, name: &str, tok: &Token) {
        let Some(mut tag) = self.stack.pop() else {
            trace!(close = name, "close tag without open tag kept as text");
            self.push_text(tok);
            return;
        };
        if !tag.is(name) {
            trace!(tag = %tag.name, close = name, "mismatched close tag");
        }
        trace!(tag = %tag.name, depth = self.stack.len(), "pop");
        tag.closing_name = Some(name.to_owned());
        tag.close_span = Some(tok.span);
        tag.span = Span::new(tag.span.start, tok.span.end);
        self.container().push(Content::Tag(tag));
    }

    fn push_text(&mut self, tok: &Token) {
        let run = TextRun {
            text: tok.text.clone(),
            span: tok.span,
        };
        self.container().push(Content::Text(run));
    }
}
