//! Top-level driver (spec §4.J): `Modules::parse`/`Modules::process` tie
//! the lexer, statement parser, AST builder, and type resolver into one
//! pipeline, and [`Diagnostic`] renders whatever any of them produced.
//!
//! Everything downstream of a fully resolved module tree -- the schema
//! materializer, code generation, a CLI -- is out of scope here (spec §1's
//! Non-goals); this crate stops at `Process`'s return value.

pub mod diagnostic;
pub mod modules;
pub mod source;

pub use diagnostic::Diagnostic;
pub use modules::Modules;
pub use source::SourceProvider;
