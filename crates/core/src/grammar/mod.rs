/// Label tree types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for the label tree.
pub mod dump;
/// Label lexer: tokenizes raw input into tags, attributes, text and comments.
pub mod lexer;
/// Label parser: builds the content tree from tokens.
pub mod parser;
/// Re-exports of the tag tables used by the validator.
pub mod tables;
