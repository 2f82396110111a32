//! Pattern and extension handling (spec §4.I): split generic extension
//! carry-through from the one extension this layer gives meaning to,
//! `openconfig-extensions:posix-pattern`.
//!
//! No POSIX-regex crate exists in the ecosystem this ships against, so
//! `regex` (already the teacher's dependency of choice for pattern work)
//! stands in as an approximation -- documented in `DESIGN.md`, not a
//! faithful POSIX ERE implementation.

use yang_parser::{Node, NodeId};

use crate::registry::Registry;

/// `matching_extensions` (spec §4.I): resolve each of `node`'s carried
/// extension statements' keyword-prefix via `find_module_by_prefix` and
/// return the argument text of those whose module name and identifier
/// both match.
pub fn matching_extensions(
    registry: &Registry,
    ctx: NodeId,
    node: &Node,
    module_name: &str,
    identifier: &str,
) -> Vec<String> {
    let mut out = Vec::new();
    for ext in &node.extensions {
        let Some((prefix, keyword)) = ext.keyword.split_once(':') else { continue };
        if keyword != identifier {
            continue;
        }
        let Some(module) = registry.find_module_by_prefix(ctx, prefix) else { continue };
        if registry.modules().any(|(name, id)| id == module && name == module_name) {
            out.push(ext.argument.clone());
        }
    }
    out
}

/// Validate `pattern` as a POSIX-regex string. On failure, surface the
/// underlying syntax error without `regex`'s own "regex parse error:"
/// preamble (spec §4.I).
pub fn validate_posix(pattern: &str) -> Result<(), String> {
    regex::Regex::new(pattern).map(|_| ()).map_err(|err| {
        let full = err.to_string();
        let stripped = full.strip_prefix("regex parse error:\n").unwrap_or(&full);
        format!("bad pattern: {stripped}")
    })
}
