//! Module registry, symbol search, and name/type resolution for YANG ASTs
//! (spec §4.E through §4.I).
//!
//! Owns everything downstream of the AST builder except the top-level
//! `Parse`/`Process` driver, which lives in `yangc` alongside
//! `SourceProvider` and the unified `Diagnostic` type (spec §4.J).

pub mod error;
pub mod pattern;
pub mod registry;
pub mod resolve;
pub mod search;
pub mod typedict;
pub mod ytype;

pub use error::ResolveError;
pub use registry::Registry;
pub use resolve::{resolve_type, resolve_typedef, resolve_typedefs, resolve_use_site_types, Resolution};
pub use search::{child_node, find_grouping, find_identity_base, find_node, node_path, FindNodeResult};
pub use typedict::TypeDictionary;
pub use ytype::{BuiltinKind, EnumType, YangType, YangTypeArena, YangTypeId};
