//! Schema-driven AST builder (spec §4.D).

mod builder;
mod node;
mod schema;

pub use builder::build_root;
pub use node::{Arena, Cardinality, Node, NodeId, NodeKind};
pub use schema::{keyword_to_kind, schema_for, FieldSpec};
