//! Resolver errors (spec §4.G, §7): unknown type/prefix/grouping,
//! identity-without-base, range/length containment and precision
//! violations, enum/bit conflicts, pattern-syntax failures.

use std::fmt;

use yang_parser::Location;

/// Resolver errors carry a full [`Location`] (file + span), unlike the
/// bare `Span` the lexer/parser/builder stages use -- resolution walks
/// across module boundaries, so "which file" is no longer implicit from
/// a single in-flight parse call the way it is in those earlier stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveError {
    pub message: String,
    pub location: Location,
}

impl ResolveError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self { message: message.into(), location }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ResolveError {}
