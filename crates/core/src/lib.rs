//! Graphviz DOT HTML-like label toolkit.
//!
//! Tokenizes, parses and validates the HTML-like labels DOT accepts between
//! `<` and `>`. The main entry points are [`parse_str`] for building a label
//! tree, [`validate`] for checking it against the Graphviz tag rules, and
//! [`lint_str`] for doing both in one step.

#![warn(missing_docs)]

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
///
/// ```ignore
/// ctx!("tag" => name, "parent" => parent)
/// ```
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Label grammar: lexer, tree builder, AST, and related utilities.
pub mod grammar;
/// Label validation against a tag table.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Lexer
pub use grammar::lexer::{TokKind, Token, tokenize};

// Parser
pub use grammar::parser::{ParseError, parse_str};

// AST
pub use grammar::ast::{Attribute, Content, Label, Resolved, Tag, TextRun};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, NodeRef, Severity, Span, Subject, codes, explain};

// Validator
pub use validate::{
    LintResult, ValidationResult, lint_str, lint_with_table, validate, validate_with_table,
};

// Tables
pub use grammar::tables::{Enclosing, ROOT, TableError, TagRule, TagTable};

// Serialization helpers
pub use grammar::dump::to_pretty_json;
