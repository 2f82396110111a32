//! Unified diagnostic type spanning all four pipeline stages (spec §6).

use std::rc::Rc;

use yang_common::span::{LineIndex, Span};

/// One error from any stage (lex, parse, build, resolve), tagged with the
/// file it came from. Stage-specific error types (`ParseError`,
/// `BuildError`, `ResolveError`, ...) collapse into this at the driver
/// boundary, since rendering only ever needs `file` + `span` + `message`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub file: Rc<str>,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    /// `"<file>:<line>:<col>: <message>"`, or `"<file>: unexpected EOF"`
    /// when the span lies past end-of-file (spec §6). `unexpected EOF` is
    /// the exact message [`yang_parser::ParseError::unexpected_eof`]
    /// stamps, so matching on it here is reliable rather than guessing
    /// from the span.
    pub fn render(&self, line_index: &LineIndex) -> String {
        if self.message == "unexpected EOF" {
            return format!("{}: unexpected EOF", self.file);
        }
        let (line, col) = line_index.line_col(self.span.start);
        format!("{}:{}:{}: {}", self.file, line, col, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_file_line_col() {
        let index = LineIndex::new("leaf foo;\nleaf bar\n");
        let diag = Diagnostic {
            file: Rc::from("m.yang"),
            span: Span::at(10),
            message: "missing required module field: prefix".to_string(),
        };
        assert_eq!(diag.render(&index), "m.yang:2:1: missing required module field: prefix");
    }

    #[test]
    fn renders_unexpected_eof_without_line_col() {
        let index = LineIndex::new("leaf foo");
        let diag = Diagnostic { file: Rc::from("m.yang"), span: Span::at(8), message: "unexpected EOF".to_string() };
        assert_eq!(diag.render(&index), "m.yang: unexpected EOF");
    }
}
