//! Parse and AST-build error types.
//!
//! Kept as two small enums (not one) because the statement parser and the
//! AST builder report genuinely different failure shapes (token-level vs.
//! schema-level), matching how the teacher splits `ParseError` from
//! `TypeError` rather than folding everything into one type.

use std::fmt;

use yang_common::span::Span;

/// Errors produced while building the statement tree (spec §4.C).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }

    /// Parser errors referencing a location past EOF use the EOF-specific
    /// rendering (spec §6: `"<file>: unexpected EOF"`).
    pub fn unexpected_eof(span: Span) -> Self {
        Self { message: "unexpected EOF".to_string(), span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Errors produced while mapping statements onto typed node slots (spec
/// §4.D): unknown statement, missing required field, duplicate single-value
/// child.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildError {
    pub message: String,
    pub span: Span,
}

impl BuildError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }

    pub fn missing_required(parent_keyword: &str, field: &str, span: Span) -> Self {
        Self {
            message: format!("missing required {parent_keyword} field: {field}"),
            span,
        }
    }

    pub fn unknown_statement(keyword: &str, span: Span) -> Self {
        Self { message: format!("unknown statement: {keyword}"), span }
    }

    pub fn duplicate(keyword: &str, span: Span) -> Self {
        Self { message: format!("duplicate statement: {keyword}"), span }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BuildError {}
