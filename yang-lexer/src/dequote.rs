//! Double- and single-quoted string lexing, including RFC 6020 §6.1.3's
//! multi-line dequoting algorithm for double-quoted strings.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use yang_common::error::ErrorCounter;
use yang_common::span::{tab_expanded_column, Span};

/// Single-quoted strings are verbatim: no escape processing, no
/// indentation stripping (RFC 6020 §6.1.2).
pub(crate) fn lex_single_quoted(
    cursor: &mut Cursor<'_>,
    start: u32,
    errors: &mut ErrorCounter,
) -> Token {
    cursor.advance(); // opening '
    let content_start = cursor.pos();
    loop {
        match cursor.peek() {
            None => {
                let span = Span::new(start, cursor.pos());
                errors.push("unterminated single-quoted string", span);
                return Token::new(TokenKind::Error, span, "");
            }
            Some('\'') => {
                let content_end = cursor.pos();
                let text = cursor.slice(content_start, content_end).to_string();
                cursor.advance(); // closing '
                return Token::new(TokenKind::String, Span::new(start, cursor.pos()), text);
            }
            Some(_) => {
                cursor.advance();
            }
        }
    }
}

/// Double-quoted strings get escape processing (`\n \t \" \\`) and, across
/// multiple physical lines, indentation stripped relative to the column of
/// the opening quote (RFC 6020 §6.1.3).
pub(crate) fn lex_double_quoted(
    cursor: &mut Cursor<'_>,
    start: u32,
    in_pattern: bool,
    errors: &mut ErrorCounter,
) -> Token {
    let indent = opening_quote_indent(cursor, start);
    cursor.advance(); // opening "

    // Split into physical source lines first (escape sequences kept as
    // literal two-byte runs so an escaped quote/backslash doesn't end the
    // string or split a line early).
    let mut raw_lines: Vec<String> = vec![String::new()];
    let unterminated = loop {
        match cursor.peek() {
            None => break true,
            Some('"') => {
                cursor.advance();
                break false;
            }
            Some('\\') => {
                cursor.advance();
                match cursor.peek() {
                    Some(esc) => {
                        cursor.advance();
                        let line = raw_lines.last_mut().unwrap();
                        line.push('\\');
                        line.push(esc);
                    }
                    None => break true,
                }
            }
            Some('\n') => {
                cursor.advance();
                raw_lines.push(String::new());
            }
            Some(c) => {
                cursor.advance();
                raw_lines.last_mut().unwrap().push(c);
            }
        }
    };

    let span = Span::new(start, cursor.pos());
    if unterminated {
        errors.push("unterminated double-quoted string", span);
        return Token::new(TokenKind::Error, span, "");
    }

    for (i, line) in raw_lines.iter_mut().enumerate() {
        if i > 0 {
            strip_leading_indent(line, indent);
        }
        strip_trailing_blank(line);
    }
    let joined = raw_lines.join("\n");
    let text = process_escapes(&joined, in_pattern, errors, span);
    Token::new(TokenKind::String, span, text)
}

/// Tab-expanded column of the opening `"` on its source line.
fn opening_quote_indent(cursor: &Cursor<'_>, quote_pos: u32) -> u32 {
    let prefix = cursor.slice(0, quote_pos);
    let line_start = prefix.rfind('\n').map(|i| i as u32 + 1).unwrap_or(0);
    tab_expanded_column(cursor.slice(line_start, quote_pos).as_bytes())
}

/// Remove leading spaces/tabs up to (and including) column `indent`, or
/// until the first non-whitespace character, whichever comes first.
fn strip_leading_indent(line: &mut String, indent: u32) {
    let mut col = 0u32;
    let mut cut = 0usize;
    for (byte_idx, b) in line.bytes().enumerate() {
        if col >= indent || !(b == b' ' || b == b'\t') {
            break;
        }
        col = if b == b'\t' { (col / 8 + 1) * 8 } else { col + 1 };
        cut = byte_idx + 1;
    }
    line.drain(..cut);
}

/// Remove trailing spaces/tabs from a line (but not other whitespace, which
/// can't occur mid-line anyway since lines are already newline-split).
fn strip_trailing_blank(line: &mut String) {
    let trimmed = line.trim_end_matches([' ', '\t']).len();
    line.truncate(trimmed);
}

/// Resolve `\n \t \" \\` escapes. Any other `\x` is an error unless
/// `in_pattern` is set, in which case it's preserved literally (spec §4.B:
/// `pattern` arguments need their backslash escapes left alone for the
/// regex engine to interpret).
fn process_escapes(s: &str, in_pattern: bool, errors: &mut ErrorCounter, span: Span) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                if in_pattern {
                    out.push('\\');
                    out.push(other);
                } else {
                    errors.push(format!("invalid escape sequence '\\{other}'"), span);
                    out.push(other);
                }
            }
            None => {
                errors.push("trailing backslash in string", span);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str, in_pattern: bool) -> (Token, ErrorCounter) {
        let mut cursor = Cursor::new(src);
        let mut errors = ErrorCounter::new();
        let tok = if src.starts_with('\'') {
            lex_single_quoted(&mut cursor, 0, &mut errors)
        } else {
            lex_double_quoted(&mut cursor, 0, in_pattern, &mut errors)
        };
        (tok, errors)
    }

    #[test]
    fn simple_escapes() {
        let (tok, errors) = lex("\"a\\nb\\tc\\\"d\\\\e\"", false);
        assert!(errors.errors().is_empty());
        assert_eq!(tok.text, "a\nb\tc\"d\\e");
    }

    #[test]
    fn multiline_indent_stripped_to_opening_quote_column() {
        let prefix = "  leaf d ";
        let indent_spaces = " ".repeat(prefix.chars().count());
        let src = format!("{prefix}\"Broken\n{indent_spaces}line\";");
        let mut cursor = Cursor::new(&src);
        let quote_pos = src.find('"').unwrap() as u32;
        while cursor.pos() < quote_pos {
            cursor.advance();
        }
        let mut errors = ErrorCounter::new();
        let tok = lex_double_quoted(&mut cursor, quote_pos, false, &mut errors);
        assert!(errors.errors().is_empty());
        assert_eq!(tok.text, "Broken\nline");
    }

    #[test]
    fn multiline_extra_indent_beyond_quote_column_preserved() {
        let prefix = "  leaf d ";
        let indent_spaces = " ".repeat(prefix.chars().count() + 2);
        let src = format!("{prefix}\"Broken\n{indent_spaces}line\";");
        let mut cursor = Cursor::new(&src);
        let quote_pos = src.find('"').unwrap() as u32;
        while cursor.pos() < quote_pos {
            cursor.advance();
        }
        let mut errors = ErrorCounter::new();
        let tok = lex_double_quoted(&mut cursor, quote_pos, false, &mut errors);
        assert!(errors.errors().is_empty());
        assert_eq!(tok.text, "Broken\n  line");
    }

    #[test]
    fn unterminated_double_quoted_errors() {
        let (tok, errors) = lex("\"never closed", false);
        assert_eq!(tok.kind, TokenKind::Error);
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn pattern_escape_preserved_literally() {
        let (tok, errors) = lex("\"a\\d+\"", true);
        assert!(errors.errors().is_empty());
        assert_eq!(tok.text, "a\\d+");
    }

    #[test]
    fn non_pattern_unknown_escape_errors_but_recovers() {
        let (tok, errors) = lex("\"a\\db\"", false);
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(tok.text, "adb");
    }

    #[test]
    fn single_quoted_ignores_escapes() {
        let (tok, errors) = lex("'a\\nb'", false);
        assert!(errors.errors().is_empty());
        assert_eq!(tok.text, "a\\nb");
    }
}
