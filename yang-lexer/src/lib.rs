//! YANG lexer -- tokenizer enforcing YANG's multi-line dequoting and comment
//! rules (spec §4.B).
//!
//! Unlike a general-purpose lexer, the token vocabulary is tiny: `;`, `{`,
//! `}`, quoted/unquoted strings, and an end-of-file marker. All the
//! complexity lives in double-quoted string dequoting (RFC 6020 §6.1.3).

mod cursor;
mod dequote;
pub mod token;

use cursor::Cursor;
pub use token::{Token, TokenKind};
use yang_common::error::ErrorCounter;
use yang_common::span::Span;

/// The YANG lexer. Call [`Lexer::next`] repeatedly until it returns
/// [`TokenKind::Eof`].
///
/// `in_pattern` must be passed as `true` by the caller while lexing the
/// argument that immediately follows a `pattern` statement's keyword, so
/// backslash escapes other than `\n \t \" \\` are preserved literally
/// instead of rejected (spec §4.B) -- the lexer itself has no notion of
/// statement keywords, so this flag is threaded in from the statement
/// parser, which does.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    source: &'src str,
    truncated: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { cursor: Cursor::new(source), source, truncated: false }
    }

    /// Produce the next token, recording any lexical errors into `errors`.
    /// Once `errors` has already tripped the 8-error ceiling, returns `Eof`
    /// immediately without scanning further (spec §4.B: "after 8 errors the
    /// lexer truncates remaining input").
    pub fn next(&mut self, errors: &mut ErrorCounter, in_pattern: bool) -> Token {
        if self.truncated || errors.is_tripped() {
            self.truncated = true;
            return Token::new(TokenKind::Eof, Span::at(self.cursor.pos()), "");
        }

        self.skip_trivia(errors);

        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, Span::new(start, start), "");
        };

        let token = match c {
            ';' => {
                self.cursor.advance();
                Token::new(TokenKind::Semi, Span::new(start, self.cursor.pos()), ";")
            }
            '{' => {
                self.cursor.advance();
                Token::new(TokenKind::LBrace, Span::new(start, self.cursor.pos()), "{")
            }
            '}' => {
                self.cursor.advance();
                Token::new(TokenKind::RBrace, Span::new(start, self.cursor.pos()), "}")
            }
            '"' => dequote::lex_double_quoted(&mut self.cursor, start, in_pattern, errors),
            '\'' => dequote::lex_single_quoted(&mut self.cursor, start, errors),
            _ => self.lex_identifier(start, errors),
        };

        if errors.is_tripped() {
            self.truncated = true;
        }
        token
    }

    /// Skip whitespace and `//`/`/* */` comments.
    fn skip_trivia(&mut self, errors: &mut ErrorCounter) {
        loop {
            match self.cursor.peek() {
                Some(c) if c.is_whitespace() => {
                    self.cursor.advance();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                Some('/') if self.cursor.peek_next() == Some('*') => {
                    let start = self.cursor.pos();
                    self.cursor.advance();
                    self.cursor.advance();
                    let mut closed = false;
                    loop {
                        match self.cursor.peek() {
                            None => break,
                            Some('*') if self.cursor.peek_next() == Some('/') => {
                                self.cursor.advance();
                                self.cursor.advance();
                                closed = true;
                                break;
                            }
                            Some(_) => {
                                self.cursor.advance();
                            }
                        }
                    }
                    if !closed {
                        errors.push("unterminated comment", Span::new(start, self.cursor.pos()));
                        return;
                    }
                }
                _ => break,
            }
        }
    }

    /// An unquoted run of bytes up to the next whitespace, `;`, `"`, `{`,
    /// `}`, or EOF. Characters like `/`, `+`, `:` are legal inside one
    /// token -- YANG "identifiers" here are purely syntactic, disambiguated
    /// by the statement builder, not the lexer (spec §4.B).
    fn lex_identifier(&mut self, start: u32, errors: &mut ErrorCounter) -> Token {
        self.cursor.eat_while(|c| {
            !(c.is_whitespace() || c == ';' || c == '"' || c == '{' || c == '}')
        });
        let end = self.cursor.pos();
        if end == start {
            // A lone stray byte we don't otherwise recognize; advance to
            // make progress rather than looping forever.
            self.cursor.advance();
            let span = Span::new(start, self.cursor.pos());
            errors.push("unexpected character", span);
            return Token::new(TokenKind::Error, span, "");
        }
        let text = self.cursor.slice(start, end);
        Token::new(TokenKind::Identifier, Span::new(start, end), text)
    }

    pub fn source(&self) -> &'src str {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(src: &str) -> (Vec<Token>, ErrorCounter) {
        let mut lexer = Lexer::new(src);
        let mut errors = ErrorCounter::new();
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next(&mut errors, false);
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, errors)
    }

    #[test]
    fn lex_simple_statement() {
        let (tokens, errors) = tokenize("leaf foo { type string; }");
        assert!(errors.errors().is_empty());
        let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &TokenKind::Identifier,
                &TokenKind::Identifier,
                &TokenKind::LBrace,
                &TokenKind::Identifier,
                &TokenKind::Identifier,
                &TokenKind::Semi,
                &TokenKind::RBrace,
                &TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_allows_slash_colon_plus() {
        let (tokens, _) = tokenize("ex:my-type");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "ex:my-type");
    }

    #[test]
    fn line_comment_is_skipped() {
        let (tokens, _) = tokenize("leaf foo; // a comment\nleaf bar;");
        let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &TokenKind::Identifier,
                &TokenKind::Identifier,
                &TokenKind::Semi,
                &TokenKind::Identifier,
                &TokenKind::Identifier,
                &TokenKind::Semi,
                &TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn block_comment_is_skipped() {
        let (tokens, errors) = tokenize("/* block\ncomment */ leaf foo;");
        assert!(errors.errors().is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "leaf");
    }

    #[test]
    fn single_quoted_string_is_verbatim() {
        let (tokens, _) = tokenize("'no \\n escapes here'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "no \\n escapes here");
    }

    #[test]
    fn double_quoted_dequote_simple() {
        let (tokens, _) = tokenize("\"Broken\\nline\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "Broken\nline");
    }

    #[test]
    fn too_many_errors_truncates() {
        // Each `"\x"` is a well-formed (terminated) string with exactly one
        // bad escape sequence, so the 9 repetitions generate 9 distinct
        // lexical errors without ever hitting EOF mid-string.
        let src = "\"\\x\";".repeat(9);
        let mut lexer = Lexer::new(&src);
        let mut errors = ErrorCounter::new();
        let mut saw_eof = false;
        for _ in 0..100 {
            let tok = lexer.next(&mut errors, false);
            if tok.kind == TokenKind::Eof {
                saw_eof = true;
                break;
            }
        }
        assert!(saw_eof);
        assert!(errors.is_tripped());
        assert_eq!(errors.errors().len(), 8);
    }
}
