//! Schema-driven statement → node builder (spec §4.D).

use super::node::{Arena, Cardinality, NodeId, NodeKind};
use super::schema::{keyword_to_kind, schema_for};
use crate::error::BuildError;
use crate::statement::Statement;

/// Build the top-level `module`/`submodule` statement (and everything
/// beneath it) into `arena`, returning the new root's id. Any other
/// top-level keyword is rejected by the caller (spec §6: "Accepted
/// top-level statements: `module` or `submodule`").
pub fn build_root(arena: &mut Arena, stmt: &Statement, errors: &mut Vec<BuildError>) -> Option<NodeId> {
    let kind = match stmt.keyword.as_str() {
        "module" => NodeKind::Module,
        "submodule" => NodeKind::Submodule,
        other => {
            errors.push(BuildError::new(
                format!("expected 'module' or 'submodule', found '{other}'"),
                stmt.location.span,
            ));
            return None;
        }
    };
    Some(build_node(arena, stmt, None, kind, errors))
}

fn build_node(
    arena: &mut Arena,
    stmt: &Statement,
    parent: Option<NodeId>,
    kind: NodeKind,
    errors: &mut Vec<BuildError>,
) -> NodeId {
    let id = arena.alloc(kind, stmt.clone(), parent);
    let schema = schema_for(kind);

    for sub in &stmt.substatements {
        if sub.keyword.contains(':') {
            arena.get_mut(id).extensions.push(sub.clone());
            continue;
        }
        let Some(field) = schema.iter().find(|field| field.keyword == sub.keyword) else {
            errors.push(BuildError::unknown_statement(&sub.keyword, sub.location.span));
            continue;
        };
        let child_id = build_node(arena, sub, Some(id), field.child_kind, errors);
        match field.cardinality {
            Cardinality::Single => {
                if arena.has_single(id, field.keyword) {
                    errors.push(BuildError::duplicate(field.keyword, sub.location.span));
                }
                arena.set_single(id, field.keyword, child_id);
            }
            Cardinality::Seq => arena.push_seq(id, field.keyword, child_id),
        }
    }

    for field in schema {
        if !field.required {
            continue;
        }
        let present = match field.cardinality {
            Cardinality::Single => arena.has_single(id, field.keyword),
            Cardinality::Seq => arena.has_seq(id, field.keyword),
        };
        if !present {
            errors.push(BuildError::missing_required(&stmt.keyword, field.keyword, stmt.location.span));
        }
    }

    id
}
