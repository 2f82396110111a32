//! Symbol search (spec §4.F): `FindGrouping`, `FindIdentityBase`,
//! `FindNode` (XPath-lite), `ChildNode`.

use rustc_hash::FxHashSet;

use yang_parser::{Location, NodeId, NodeKind};

use crate::error::ResolveError;
use crate::registry::Registry;

const DATA_DEF_KEYWORDS: &[&str] =
    &["container", "leaf", "leaf-list", "list", "choice", "case", "anydata", "anyxml"];

fn split_prefix(segment: &str) -> (&str, &str) {
    match segment.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", segment),
    }
}

/// Absolute path from the module root, `/module-name/.../node-name`, used
/// only for diagnostics and tests (spec §8 scenario 4's `.path`).
pub fn node_path(registry: &Registry, id: NodeId) -> String {
    let mut segments: Vec<&str> =
        registry.arena.ancestors(id).map(|n| registry.arena.get(n).name.as_str()).collect();
    segments.retain(|s| !s.is_empty());
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// `FindGrouping` (spec §4.F): resolve a (possibly prefixed) `uses`
/// argument to the `grouping` it names, walking `ctx`'s ancestor chain and
/// recursing through `import`/`include`. `seen` accumulates visited
/// submodule names to break `include` cycles across repeated calls.
pub fn find_grouping(
    registry: &Registry,
    ctx: NodeId,
    name: &str,
    seen: &mut FxHashSet<String>,
) -> Option<NodeId> {
    let root = registry.root_of(ctx);
    let own_prefix = match registry.arena.get(root).kind {
        NodeKind::Module => registry.node_arg(root, "prefix"),
        NodeKind::Submodule => registry
            .arena
            .get(root)
            .single("belongs-to")
            .and_then(|b| registry.node_arg(b, "prefix")),
        _ => None,
    };
    let name = match name.split_once(':') {
        Some((prefix, rest)) if Some(prefix) == own_prefix => rest,
        _ => name,
    };

    for ancestor in registry.arena.ancestors(ctx).collect::<Vec<_>>() {
        if !name.contains(':') {
            for &grouping_id in registry.arena.get(ancestor).seq("grouping") {
                if registry.arena.get(grouping_id).name == name {
                    return Some(grouping_id);
                }
            }
        }
        if let Some((prefix, rest)) = name.split_once(':') {
            for &import_id in registry.arena.get(ancestor).seq("import") {
                if registry.node_arg(import_id, "prefix") == Some(prefix) {
                    let module_name = registry.arena.get(import_id).name.clone();
                    if let Some(target) = registry.module(&module_name) {
                        if let Some(found) = find_grouping(registry, target, rest, seen) {
                            return Some(found);
                        }
                    }
                }
            }
        }
        for &include_id in registry.arena.get(ancestor).seq("include") {
            let submodule_name = registry.arena.get(include_id).name.clone();
            if !seen.insert(submodule_name.clone()) {
                continue;
            }
            if let Some(sub_root) = registry.submodule(&submodule_name) {
                if let Some(found) = find_grouping(registry, sub_root, name, seen) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// `FindIdentityBase` (spec §4.F): resolve `prefix:name` against `ctx`'s
/// module imports and the target module's identity list.
pub fn find_identity_base(
    registry: &Registry,
    ctx: NodeId,
    name: &str,
    use_location: Location,
) -> Result<NodeId, ResolveError> {
    let (prefix, local) = split_prefix(name);
    let module = registry
        .find_module_by_prefix(ctx, prefix)
        .ok_or_else(|| ResolveError::new(format!("unknown prefix: {prefix}"), use_location.clone()))?;
    registry
        .arena
        .get(module)
        .seq("identity")
        .iter()
        .find(|&&id| registry.arena.get(id).name == local)
        .copied()
        .ok_or_else(|| ResolveError::new(format!("unknown identity: {name}"), use_location))
}

/// `ChildNode` (spec §4.F): find a direct child by name, transparently
/// expanding `uses` children by locating their referenced grouping first.
pub fn child_node(registry: &Registry, n: NodeId, name: &str) -> Option<NodeId> {
    for &keyword in DATA_DEF_KEYWORDS {
        for &child in registry.arena.get(n).seq(keyword) {
            if registry.arena.get(child).name == name {
                return Some(child);
            }
        }
    }
    for &uses_id in registry.arena.get(n).seq("uses") {
        let grouping_name = registry.arena.get(uses_id).name.clone();
        let mut seen = FxHashSet::default();
        if let Some(grouping_id) = find_grouping(registry, uses_id, &grouping_name, &mut seen) {
            if let Some(found) = child_node(registry, grouping_id, name) {
                return Some(found);
            }
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindNodeResult {
    Found(NodeId),
    /// `rpc`/`action` subtrees are unsupported by `FindNode` (spec §4.F).
    RpcUnsupported,
    NotFound,
}

fn is_inside_rpc(registry: &Registry, n: NodeId) -> bool {
    registry
        .arena
        .ancestors(n)
        .any(|a| matches!(registry.arena.get(a).kind, NodeKind::Rpc | NodeKind::Action))
}

/// Walk one `..` step, transparently skipping `choice`/`case`/`leaf`
/// ancestors (spec §4.F, §9's second open question: preserved, provisional).
fn go_up(registry: &Registry, n: NodeId) -> Option<NodeId> {
    let mut cur = registry.arena.get(n).parent?;
    while matches!(
        registry.arena.get(cur).kind,
        NodeKind::Choice | NodeKind::Case | NodeKind::Leaf
    ) {
        cur = registry.arena.get(cur).parent?;
    }
    Some(cur)
}

/// `FindNode` (spec §4.F): XPath-lite path resolution. Absolute paths
/// re-root via the first segment's prefix; relative paths walk `..` from
/// `ctx`. Interior-segment prefixes are currently stripped rather than
/// validated (spec §9, second open question -- preserved, provisional).
pub fn find_node(registry: &Registry, ctx: NodeId, path: &str) -> FindNodeResult {
    if is_inside_rpc(registry, ctx) {
        return FindNodeResult::RpcUnsupported;
    }

    let (mut current, remaining): (NodeId, Vec<&str>) = if let Some(rest) = path.strip_prefix('/')
    {
        let mut segments = rest.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return FindNodeResult::NotFound;
        };
        let (prefix, local) = split_prefix(first);
        let Some(module) = registry.find_module_by_prefix(ctx, prefix) else {
            return FindNodeResult::NotFound;
        };
        let Some(first_node) = child_node(registry, module, local) else {
            return FindNodeResult::NotFound;
        };
        (first_node, segments.collect())
    } else {
        let mut cur = ctx;
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        while segments.peek() == Some(&"..") {
            segments.next();
            match go_up(registry, cur) {
                Some(parent) => cur = parent,
                None => return FindNodeResult::NotFound,
            }
        }
        (cur, segments.collect())
    };

    for segment in remaining {
        let (_, local) = split_prefix(segment);
        match child_node(registry, current, local) {
            Some(child) => current = child,
            None => return FindNodeResult::NotFound,
        }
        if is_inside_rpc(registry, current) {
            return FindNodeResult::RpcUnsupported;
        }
    }
    FindNodeResult::Found(current)
}
