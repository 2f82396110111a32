//! Statement tree parser (spec §4.C) and pretty-printer (spec §6).
//!
//! Grammar: `Stmt := Ident (Ident-or-String)? (';' | '{' Stmt* '}')`. This
//! layer knows nothing about YANG keyword semantics -- it only delimits
//! statements, joins `+`-concatenated string arguments, and records
//! substatement order (which the AST builder and enum auto-numbering both
//! depend on).

use std::fmt::Write as _;
use std::rc::Rc;

use yang_common::error::ErrorCounter;
use yang_common::span::Span;
use yang_lexer::{Lexer, Token, TokenKind};

use crate::error::ParseError;

/// Where a statement was found: a file name plus a byte span into that
/// file's source text. Line/column are resolved lazily from this (via a
/// `yang_common::span::LineIndex` the driver keeps per file) rather than
/// being stamped in during parsing, matching the rest of the crate's
/// defer-to-render-time posture for spans.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub file: Rc<str>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub keyword: String,
    pub has_argument: bool,
    pub argument: String,
    pub substatements: Vec<Statement>,
    pub location: Location,
}

impl Statement {
    /// Round-trips through the parser (spec §6): strings are always
    /// written double-quoted and re-indented under the current key column,
    /// substatements indent by one tab.
    pub fn write(&self, out: &mut String, indent: usize) {
        self.write_indented(out, indent);
    }

    fn write_indented(&self, out: &mut String, indent: usize) {
        push_tabs(out, indent);
        out.push_str(&self.keyword);
        if self.has_argument {
            out.push(' ');
            write_quoted_argument(out, &self.argument, indent);
        }
        if self.substatements.is_empty() {
            out.push_str(";\n");
        } else {
            out.push_str(" {\n");
            for sub in &self.substatements {
                sub.write_indented(out, indent + 1);
            }
            push_tabs(out, indent);
            out.push_str("}\n");
        }
    }
}

fn push_tabs(out: &mut String, count: usize) {
    for _ in 0..count {
        out.push('\t');
    }
}

/// Write `value` double-quoted, re-aligning any embedded newlines under the
/// key's column (one more tab than the statement itself, matching the
/// indentation the dequoter expects when this text is re-lexed).
fn write_quoted_argument(out: &mut String, value: &str, indent: usize) {
    out.push('"');
    let mut lines = value.split('\n');
    if let Some(first) = lines.next() {
        push_escaped(out, first);
    }
    for line in lines {
        out.push('\n');
        push_tabs(out, indent + 1);
        push_escaped(out, line);
    }
    out.push('"');
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => {
                let _ = write!(out, "{c}");
            }
        }
    }
}

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    errors: ErrorCounter,
    file: Rc<str>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, file: impl Into<Rc<str>>) -> Self {
        let mut lexer = Lexer::new(source);
        let mut errors = ErrorCounter::new();
        let current = lexer.next(&mut errors, false);
        Self { lexer, current, errors, file: file.into() }
    }

    /// Parse exactly one top-level statement (the `module` or `submodule`),
    /// returning it plus the accumulated errors. Per spec §4.C, the parser
    /// resynchronises up to the shared 8-error ceiling rather than
    /// aborting on the first problem.
    pub fn parse(mut self) -> (Option<Statement>, Vec<yang_common::error::RawError>) {
        if self.current.kind == TokenKind::Eof {
            self.errors.push(ParseError::unexpected_eof(self.current.span).message, self.current.span);
            return (None, self.errors.into_errors());
        }
        let stmt = self.parse_statement();
        (stmt, self.errors.into_errors())
    }

    fn bump(&mut self, in_pattern: bool) -> Token {
        std::mem::replace(&mut self.current, self.lexer.next(&mut self.errors, in_pattern))
    }

    fn loc(&self, span: Span) -> Location {
        Location { file: self.file.clone(), span }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        if self.errors.is_tripped() {
            return None;
        }
        if self.current.kind != TokenKind::Eof && self.current.kind != TokenKind::Identifier {
            let span = self.current.span;
            self.errors.push(format!("expected identifier, found {:?}", self.current.kind), span);
            self.bump(false);
            return None;
        }
        if self.current.kind == TokenKind::Eof {
            self.errors.push("unexpected EOF", self.current.span);
            return None;
        }

        let start = self.current.span.start;
        let keyword = self.current.text.clone();
        self.bump(keyword == "pattern");

        let (has_argument, argument) = self.parse_argument(&keyword);
        if self.errors.is_tripped() {
            return None;
        }

        let (substatements, end) = self.parse_body(&keyword, &argument);

        Some(Statement {
            keyword,
            has_argument,
            argument,
            substatements,
            location: self.loc(Span::new(start, end)),
        })
    }

    /// Consume the optional argument, joining any `+`-concatenated string
    /// parts into one logical argument (spec §4.C).
    fn parse_argument(&mut self, keyword: &str) -> (bool, String) {
        if !matches!(self.current.kind, TokenKind::Identifier | TokenKind::String) {
            return (false, String::new());
        }
        let mut argument = self.current.text.clone();
        self.bump(false);
        loop {
            if self.current.kind == TokenKind::Identifier && self.current.text == "+" {
                self.bump(keyword == "pattern");
                match self.current.kind {
                    TokenKind::Identifier | TokenKind::String => {
                        argument.push_str(&self.current.text);
                        self.bump(false);
                    }
                    _ => {
                        let span = self.current.span;
                        self.errors.push("expected string after '+'", span);
                        break;
                    }
                }
            } else {
                break;
            }
        }
        (true, argument)
    }

    /// Consume `;` or `{ Stmt* }`, returning the substatements and the byte
    /// offset just past the statement's terminator.
    fn parse_body(&mut self, keyword: &str, argument: &str) -> (Vec<Statement>, u32) {
        let _ = (keyword, argument);
        match self.current.kind {
            TokenKind::Semi => {
                let semi = self.bump(false);
                (Vec::new(), semi.span.end)
            }
            TokenKind::LBrace => {
                self.bump(false);
                let mut subs = Vec::new();
                loop {
                    if self.errors.is_tripped() {
                        return (subs, self.current.span.start);
                    }
                    match self.current.kind {
                        TokenKind::RBrace => {
                            let rbrace = self.bump(false);
                            return (subs, rbrace.span.end);
                        }
                        TokenKind::Eof => {
                            let span = self.current.span;
                            self.errors.push("unexpected EOF", span);
                            return (subs, span.end);
                        }
                        _ => {
                            if let Some(stmt) = self.parse_statement() {
                                subs.push(stmt);
                            } else if !matches!(
                                self.current.kind,
                                TokenKind::RBrace | TokenKind::Eof
                            ) {
                                // Resync: parse_statement already consumed at
                                // least one token on failure, so just loop.
                            }
                        }
                    }
                }
            }
            TokenKind::Eof => {
                let span = self.current.span;
                self.errors.push("unexpected EOF", span);
                (Vec::new(), span.end)
            }
            _ => {
                let span = self.current.span;
                self.errors.push(format!("expected ';' or '{{', found {:?}", self.current.kind), span);
                while !matches!(
                    self.current.kind,
                    TokenKind::Semi | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof
                ) {
                    self.bump(false);
                }
                if self.current.kind == TokenKind::Semi {
                    let semi = self.bump(false);
                    return (Vec::new(), semi.span.end);
                }
                (Vec::new(), span.end)
            }
        }
    }
}
