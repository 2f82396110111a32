//! Statement tree parser and schema-driven AST builder (spec §4.C, §4.D).

pub mod ast;
pub mod error;
pub mod statement;

pub use ast::{build_root, Arena, Node, NodeId, NodeKind};
pub use error::{BuildError, ParseError};
pub use statement::{Location, Parser, Statement};
