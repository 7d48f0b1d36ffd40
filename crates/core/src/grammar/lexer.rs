use serde::Serialize;
use tracing::trace;

use super::diag::Span;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Classification of a label token, with the data the tree builder needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TokKind {
    /// Start of an open tag: `<name`.
    TagOpen {
        /// Tag name as written.
        name: String,
    },
    /// A `name="value"` pair inside an open tag.
    Attribute {
        /// Attribute name as written.
        name: String,
        /// Attribute value without its quotes.
        value: String,
    },
    /// `>` terminating an open tag.
    TagOpenEnd,
    /// `/>` terminating a self-closing tag.
    TagSelfClose,
    /// A complete close tag: `</name>`.
    TagClose {
        /// Tag name as written.
        name: String,
    },
    /// A run of text outside markup.
    Text,
    /// An opaque `<!-- ... -->` comment.
    Comment,
}

/// A token of an HTML-like label.
///
/// `text` is always exactly `input[span.start..span.end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The classification of this token.
    #[serde(flatten)]
    pub kind: TokKind,
    /// Raw source text of this token.
    pub text: String,
    /// Byte span of this token.
    pub span: Span,
}

impl Token {
    fn new(input: &str, kind: TokKind, start: usize, end: usize) -> Self {
        trace!(?kind, start, end, "token");
        Self {
            kind,
            text: input[start..end].to_owned(),
            span: Span::new(start, end),
        }
    }
}

/// Tokenize an HTML-like label into a sequence of tokens.
///
/// Tokenization never fails. The returned tokens cover the whole input in
/// order: any `<` that does not start a complete comment, open tag or close
/// tag stays part of the surrounding text.
///
/// All structural characters are ASCII, so every slice boundary the scanner
/// produces is also a UTF-8 char boundary.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut toks = Vec::new();
    let b = input.as_bytes();
    let mut text_start = 0usize;
    let mut i = 0usize;
    // Set once a `<!--` finds no `-->`; every later opener would fail too.
    let mut comment_end_missing = false;
    while i < b.len() {
        if b[i] != b'<' {
            i += 1;
            continue;
        }
        let comment = input[i..].starts_with(COMMENT_START);
        if comment && comment_end_missing {
            i += 1;
            continue;
        }
        match scan_markup(input, i) {
            Some((markup, end)) => {
                if text_start < i {
                    toks.push(Token::new(input, TokKind::Text, text_start, i));
                }
                toks.extend(markup);
                i = end;
                text_start = end;
            }
            // Not markup: the `<` is literal text.
            None => {
                comment_end_missing |= comment;
                i += 1;
            }
        }
    }
    if text_start < b.len() {
        toks.push(Token::new(input, TokKind::Text, text_start, b.len()));
    }
    toks
}

fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b':'
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b':' | b'.' | b'-')
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n')
}

fn skip_space(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && is_space(b[i]) {
        i += 1;
    }
    i
}

/// End offset of the name starting at `i`, or `None` if no name starts there.
fn scan_name(b: &[u8], i: usize) -> Option<usize> {
    if i >= b.len() || !is_name_start(b[i]) {
        return None;
    }
    let mut j = i + 1;
    while j < b.len() && is_name_char(b[j]) {
        j += 1;
    }
    Some(j)
}

/// Try to scan one complete markup construct at `start` (which holds `<`).
///
/// Returns the tokens of the construct and the offset just past it, or
/// `None` when the text at `start` is not well-formed markup.
fn scan_markup(input: &str, start: usize) -> Option<(Vec<Token>, usize)> {
    let b = input.as_bytes();
    if input[start..].starts_with(COMMENT_START) {
        let body = start + COMMENT_START.len();
        let end = body + input[body..].find(COMMENT_END)? + COMMENT_END.len();
        return Some((vec![Token::new(input, TokKind::Comment, start, end)], end));
    }
    if b.get(start + 1) == Some(&b'/') {
        let name_start = start + 2;
        let name_end = scan_name(b, name_start)?;
        let i = skip_space(b, name_end);
        if b.get(i) != Some(&b'>') {
            return None;
        }
        let kind = TokKind::TagClose {
            name: input[name_start..name_end].to_owned(),
        };
        return Some((vec![Token::new(input, kind, start, i + 1)], i + 1));
    }
    scan_open_tag(input, start)
}

fn scan_open_tag(input: &str, start: usize) -> Option<(Vec<Token>, usize)> {
    let b = input.as_bytes();
    let name_end = scan_name(b, start + 1)?;
    let mut toks = vec![Token::new(
        input,
        TokKind::TagOpen {
            name: input[start + 1..name_end].to_owned(),
        },
        start,
        name_end,
    )];
    // Whitespace between the parts of an open tag is carried by the token
    // that follows it, so the tokens stay contiguous.
    let mut prev_end = name_end;
    loop {
        let i = skip_space(b, prev_end);
        match b.get(i)? {
            b'>' => {
                toks.push(Token::new(input, TokKind::TagOpenEnd, prev_end, i + 1));
                return Some((toks, i + 1));
            }
            b'/' => {
                if b.get(i + 1) != Some(&b'>') {
                    return None;
                }
                toks.push(Token::new(input, TokKind::TagSelfClose, prev_end, i + 2));
                return Some((toks, i + 2));
            }
            _ => {
                let (attr, end) = scan_attribute(input, prev_end, i)?;
                toks.push(attr);
                prev_end = end;
            }
        }
    }
}

/// Scan `name = "value"` (or single-quoted) whose name starts at `name_start`.
/// The token starts at `lead`, covering the whitespace before the name.
fn scan_attribute(input: &str, lead: usize, name_start: usize) -> Option<(Token, usize)> {
    let b = input.as_bytes();
    let name_end = scan_name(b, name_start)?;
    let mut i = skip_space(b, name_end);
    if b.get(i) != Some(&b'=') {
        return None;
    }
    i = skip_space(b, i + 1);
    let quote = *b.get(i)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value_start = i + 1;
    let value_end = value_start + b[value_start..].iter().position(|&c| c == quote)?;
    let end = value_end + 1;
    let kind = TokKind::Attribute {
        name: input[name_start..name_end].to_owned(),
        value: input[value_start..value_end].to_owned(),
    };
    Some((Token::new(input, kind, lead, end), end))
}
