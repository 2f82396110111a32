//! Type resolver (spec §4.G): walks `typedef`/`type` chains, inherits and
//! narrows range/length/pattern/enum/identity-base, resolves imported
//! types, builds union `YangType` graphs.

use rustc_hash::FxHashMap;

use yang_common::number::Number;
use yang_common::yrange::{parse_ranges, RangeDomain, YangRange};
use yang_parser::{Location, NodeId};

use crate::error::ResolveError;
use crate::pattern;
use crate::registry::Registry;
use crate::search::find_identity_base;
use crate::ytype::{BuiltinKind, EnumType, YangType, YangTypeArena, YangTypeId};

/// Resolution state threaded through one `resolve_typedefs` pass: the
/// `YangType` arena plus memoization of already-resolved typedef/type
/// nodes, so re-visiting a shared typedef across many leaves does the
/// work once (spec §4.G "if already resolved ... return").
#[derive(Default)]
pub struct Resolution {
    pub types: YangTypeArena,
    typedef_cache: FxHashMap<NodeId, YangTypeId>,
    type_cache: FxHashMap<NodeId, YangTypeId>,
}

impl Resolution {
    pub fn new() -> Self {
        Self::default()
    }
}

fn split_prefix(name: &str) -> (&str, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    }
}

fn own_prefix<'r>(registry: &'r Registry, ctx: NodeId) -> Option<&'r str> {
    let root = registry.root_of(ctx);
    match registry.arena.get(root).kind {
        yang_parser::NodeKind::Module => registry.node_arg(root, "prefix"),
        yang_parser::NodeKind::Submodule => registry
            .arena
            .get(root)
            .single("belongs-to")
            .and_then(|b| registry.node_arg(b, "prefix")),
        _ => None,
    }
}

fn domain_from(range: &YangRange) -> RangeDomain {
    if range.is_empty() {
        RangeDomain { min: Number::min_sentinel(), max: Number::max_sentinel() }
    } else {
        let parts = range.parts();
        RangeDomain { min: parts[0].min, max: parts[parts.len() - 1].max }
    }
}

struct Classification {
    base_id: YangTypeId,
    base_node: Option<NodeId>,
}

/// Classify `name` as seen at `ctx` into builtin / local / imported (spec
/// §4.G's three-way `Type` classification), resolving the referenced
/// typedef (if any) along the way.
fn classify_type(
    registry: &Registry,
    res: &mut Resolution,
    ctx: NodeId,
    name: &str,
    location: &Location,
    errors: &mut Vec<ResolveError>,
) -> Option<Classification> {
    let (prefix, local) = split_prefix(name);

    if prefix.is_empty() {
        if let Some(kind) = BuiltinKind::from_keyword(local) {
            let id = res.types.alloc(YangType::builtin(local, kind));
            return Some(Classification { base_id: id, base_node: None });
        }
    }

    let is_local = prefix.is_empty() || Some(prefix) == own_prefix(registry, ctx);
    if is_local {
        for ancestor in registry.arena.ancestors(ctx) {
            if let Some(td) = registry.type_dict.find(ancestor, local) {
                return resolve_typedef(registry, res, td, errors).map(|base_id| Classification {
                    base_id,
                    base_node: registry.arena.get(td).single("type"),
                });
            }
        }
        let root = registry.root_of(ctx);
        for &include_id in registry.arena.get(root).seq("include") {
            let submodule_name = registry.arena.get(include_id).name.clone();
            if let Some(sub_root) = registry.submodule(&submodule_name) {
                if let Some(td) = registry.type_dict.find(sub_root, local) {
                    return resolve_typedef(registry, res, td, errors).map(|base_id| {
                        Classification { base_id, base_node: registry.arena.get(td).single("type") }
                    });
                }
            }
        }
        errors.push(ResolveError::new(format!("unknown type: {name}"), location.clone()));
        return None;
    }

    match registry.find_module_by_prefix(ctx, prefix) {
        Some(module) => match registry.type_dict.find(module, local) {
            Some(td) => resolve_typedef(registry, res, td, errors).map(|base_id| Classification {
                base_id,
                base_node: registry.arena.get(td).single("type"),
            }),
            None => {
                errors.push(ResolveError::new(format!("unknown type: {name}"), location.clone()));
                None
            }
        },
        None => {
            errors.push(ResolveError::new(format!("unknown prefix: {prefix}"), location.clone()));
            None
        }
    }
}

/// `Typedef::resolve` (spec §4.G): resolve a `typedef`'s own nested
/// `type`, then overlay `name`/`units`/`default`.
pub fn resolve_typedef(
    registry: &Registry,
    res: &mut Resolution,
    typedef_id: NodeId,
    errors: &mut Vec<ResolveError>,
) -> Option<YangTypeId> {
    if let Some(&cached) = res.typedef_cache.get(&typedef_id) {
        return Some(cached);
    }
    let inner_type_id = registry.arena.get(typedef_id).single("type")?;
    let inner_id = resolve_type(registry, res, inner_type_id, typedef_id, errors)?;

    let mut y = res.types.get(inner_id).clone();
    y.name = registry.arena.get(typedef_id).name.clone();
    y.base = Some(inner_type_id);
    if let Some(units) = registry.node_arg(typedef_id, "units") {
        y.units = Some(units.to_string());
    }
    if let Some(default) = registry.node_arg(typedef_id, "default") {
        y.default = Some(default.to_string());
    }

    let new_id = res.types.alloc(y);
    if res.types.equal(new_id, inner_id) {
        let inner_root = res.types.get(inner_id).root;
        res.types.get_mut(new_id).root = inner_root;
    }
    res.typedef_cache.insert(typedef_id, new_id);
    Some(new_id)
}

/// `Type::resolve` (spec §4.G): the use-site resolver. Classifies the
/// base, then overlays every restriction substatement the use-site
/// carries on top of a clone of the base `YangType`.
pub fn resolve_type(
    registry: &Registry,
    res: &mut Resolution,
    type_id: NodeId,
    ctx: NodeId,
    errors: &mut Vec<ResolveError>,
) -> Option<YangTypeId> {
    if let Some(&cached) = res.type_cache.get(&type_id) {
        return Some(cached);
    }

    let name = registry.arena.get(type_id).name.clone();
    let location = registry.arena.get(type_id).statement.location.clone();
    let Classification { base_id, base_node } =
        classify_type(registry, res, ctx, &name, &location, errors)?;

    let mut y = res.types.get(base_id).clone();
    y.name = name;
    y.base = base_node;

    if matches!(y.kind, BuiltinKind::InstanceIdentifier) {
        y.optional_instance = registry.node_arg(type_id, "require-instance") == Some("false");
    }
    if matches!(y.kind, BuiltinKind::Leafref) {
        if let Some(path) = registry.node_arg(type_id, "path") {
            y.path = Some(path.to_string());
        }
    }

    if let Some(fd_str) = registry.node_arg(type_id, "fraction-digits") {
        if !matches!(y.kind, BuiltinKind::Decimal64) {
            errors.push(ResolveError::new("fraction-digits is only valid for decimal64", location.clone()));
        } else if y.fraction_digits != 0 {
            errors.push(ResolveError::new("fraction-digits cannot be overridden", location.clone()));
        } else {
            match fd_str.parse::<u8>() {
                Ok(v) if (1..=18).contains(&v) => y.fraction_digits = v,
                _ => errors.push(ResolveError::new(
                    format!("fraction-digits must be 1..18, got {fd_str:?}"),
                    location.clone(),
                )),
            }
        }
    }

    if matches!(y.kind, BuiltinKind::Identityref) {
        if let Some(&base_ref_id) = registry.arena.get(type_id).seq("base").first() {
            let base_name = registry.arena.get(base_ref_id).name.clone();
            match find_identity_base(registry, ctx, &base_name, location.clone()) {
                Ok(identity_id) => y.identity_base = Some(identity_id),
                Err(e) => errors.push(e),
            }
        } else if y.identity_base.is_none() {
            errors.push(ResolveError::new("identityref requires a base", location.clone()));
        }
    }

    if let Some(range_str) = registry.node_arg(type_id, "range") {
        let decimal = matches!(y.kind, BuiltinKind::Decimal64);
        let domain = domain_from(&y.range);
        match parse_ranges(range_str, decimal, y.fraction_digits, domain, false) {
            Ok(parsed) => {
                if y.range.is_empty() || y.range.equal(&parsed) || y.range.contains(&parsed) {
                    y.range = parsed;
                } else {
                    errors.push(ResolveError::new(
                        format!("{range_str:?} is not within the parent type's range"),
                        location.clone(),
                    ));
                }
            }
            Err(e) => errors.push(ResolveError::new(e.to_string(), location.clone())),
        }
    }

    if let Some(length_str) = registry.node_arg(type_id, "length") {
        let domain = domain_from(&y.length);
        match parse_ranges(length_str, false, 0, domain, true) {
            Ok(parsed) => {
                if y.length.is_empty() || y.length.equal(&parsed) || y.length.contains(&parsed) {
                    y.length = parsed;
                } else {
                    errors.push(ResolveError::new(
                        format!("{length_str:?} is not within the parent type's length"),
                        location.clone(),
                    ));
                }
            }
            Err(e) => errors.push(ResolveError::new(e.to_string(), location.clone())),
        }
    }

    if !registry.arena.get(type_id).seq("enum").is_empty() {
        y.enum_type =
            Some(build_enum(registry, type_id, "value", EnumType::new_enum(), errors, &location));
    }
    if !registry.arena.get(type_id).seq("bit").is_empty() {
        y.bit =
            Some(build_enum(registry, type_id, "position", EnumType::new_bitfield(), errors, &location));
    }

    for &pattern_id in registry.arena.get(type_id).seq("pattern") {
        let text = registry.arena.get(pattern_id).name.clone();
        if !y.pattern.contains(&text) {
            y.pattern.push(text);
        }
    }
    for posix in pattern::matching_extensions(
        registry,
        ctx,
        registry.arena.get(type_id),
        "openconfig-extensions",
        "posix-pattern",
    ) {
        match pattern::validate_posix(&posix) {
            Ok(()) => y.posix_pattern.push(posix),
            Err(message) => errors.push(ResolveError::new(message, location.clone())),
        }
    }

    for &member_id in registry.arena.get(type_id).seq("type") {
        if let Some(member_yty) = resolve_type(registry, res, member_id, ctx, errors) {
            if !y.members.iter().any(|&existing| res.types.equal(existing, member_yty)) {
                y.members.push(member_yty);
            }
        }
    }

    let new_id = res.types.alloc(y);
    if res.types.equal(new_id, base_id) {
        let base_root = res.types.get(base_id).root;
        res.types.get_mut(new_id).root = base_root;
    }
    res.type_cache.insert(type_id, new_id);
    Some(new_id)
}

fn build_enum(
    registry: &Registry,
    type_id: NodeId,
    value_keyword: &str,
    mut et: EnumType,
    errors: &mut Vec<ResolveError>,
    location: &Location,
) -> EnumType {
    let keyword = if value_keyword == "value" { "enum" } else { "bit" };
    for &entry_id in registry.arena.get(type_id).seq(keyword) {
        let name = registry.arena.get(entry_id).name.clone();
        let result = match registry.node_arg(entry_id, value_keyword) {
            Some(v) => v
                .parse::<i64>()
                .map_err(|_| format!("invalid {value_keyword}: {v:?}"))
                .and_then(|value| et.set(&name, value)),
            None => et.set_next(&name),
        };
        if let Err(message) = result {
            errors.push(ResolveError::new(message, location.clone()));
        }
    }
    et
}

/// `resolve_typedefs` (spec §4.G): iterate every registered `typedef` and
/// resolve it, returning every error produced across the whole pass.
pub fn resolve_typedefs(registry: &Registry, res: &mut Resolution) -> Vec<ResolveError> {
    let mut errors = Vec::new();
    for typedef_id in registry.type_dict.typedefs() {
        resolve_typedef(registry, res, typedef_id, &mut errors);
    }
    errors
}

/// Resolve every use-site `type` reachable from the arena -- `leaf`,
/// `leaf-list`, `deviate`, and any other node carrying its own `type`
/// child -- not just `typedef` bodies. Spec §6's boundary contract
/// ("for every Leaf/LeafList/Typedef/Type, a non-nil YangType reachable
/// from the node") and §7 ("types that failed remain with YangType = nil")
/// both require `Process` to attempt resolution of every `Type`, not only
/// the ones a `typedef` happens to own. Already-resolved type nodes (a
/// typedef's own inner `type`, for instance) are served from `res`'s cache,
/// so this never duplicates work `resolve_typedefs` already did.
pub fn resolve_use_site_types(registry: &Registry, res: &mut Resolution) -> Vec<ResolveError> {
    let mut errors = Vec::new();
    for id in 0..registry.arena.len() {
        if let Some(type_id) = registry.arena.get(id).single("type") {
            resolve_type(registry, res, type_id, id, &mut errors);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use yang_parser::{build_root, Parser};

    fn build_into(registry: &mut Registry, src: &str, file: &str) -> NodeId {
        let (stmt, errors) = Parser::new(src, Rc::from(file)).parse();
        assert!(errors.is_empty(), "{errors:?}");
        let mut build_errors = Vec::new();
        let id = build_root(&mut registry.arena, &stmt.unwrap(), &mut build_errors).unwrap();
        assert!(build_errors.is_empty(), "{build_errors:?}");
        id
    }

    fn register_typedefs(registry: &mut Registry, root: NodeId) {
        for &td in registry.arena.get(root).seq("typedef") {
            let name = registry.arena.get(td).name.clone();
            registry.type_dict.add(root, name, td);
        }
    }

    /// spec §8 scenario 3.
    #[test]
    fn decimal_range_containment_restamps_fraction_digits() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module m {
                namespace "urn:m";
                prefix m;
                typedef parent-d {
                    type decimal64 { fraction-digits 3; range "min..max"; }
                }
                leaf x { type parent-d { range "1..3.14"; } }
            }"#,
            "m.yang",
        );
        registry.register_module("m", m);
        register_typedefs(&mut registry, m);

        let mut res = Resolution::new();
        let errors = resolve_typedefs(&registry, &mut res);
        assert!(errors.is_empty(), "{errors:?}");

        let leaf = registry.arena.get(m).seq("leaf")[0];
        let type_id = registry.arena.get(leaf).single("type").unwrap();
        let mut local_errors = Vec::new();
        let yty = resolve_type(&registry, &mut res, type_id, leaf, &mut local_errors).unwrap();
        assert!(local_errors.is_empty(), "{local_errors:?}");
        let ty = res.types.get(yty);
        assert_eq!(ty.fraction_digits, 3);
        assert_eq!(ty.range.parts()[0].min.to_string(), "1.000");
        assert_eq!(ty.range.parts()[0].max.to_string(), "3.140");
    }

    #[test]
    fn decimal_range_over_precision_is_an_error() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module m {
                namespace "urn:m";
                prefix m;
                typedef parent-d {
                    type decimal64 { fraction-digits 1; range "min..max"; }
                }
                leaf x { type parent-d { range "1..3.14"; } }
            }"#,
            "m.yang",
        );
        registry.register_module("m", m);
        register_typedefs(&mut registry, m);

        let mut res = Resolution::new();
        resolve_typedefs(&registry, &mut res);

        let leaf = registry.arena.get(m).seq("leaf")[0];
        let type_id = registry.arena.get(leaf).single("type").unwrap();
        let mut local_errors = Vec::new();
        resolve_type(&registry, &mut res, type_id, leaf, &mut local_errors);
        assert!(local_errors.iter().any(|e| e.message.contains("too much precision")));
    }

    /// spec §8 scenario 6.
    #[test]
    fn enum_collision_reports_both_field_names() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module m {
                namespace "urn:m";
                prefix m;
                leaf planet {
                    type enumeration {
                        enum EARTH { value 1; }
                        enum MERCURY { value 1; }
                    }
                }
            }"#,
            "m.yang",
        );
        registry.register_module("m", m);

        let mut res = Resolution::new();
        let leaf = registry.arena.get(m).seq("leaf")[0];
        let type_id = registry.arena.get(leaf).single("type").unwrap();
        let mut errors = Vec::new();
        resolve_type(&registry, &mut res, type_id, leaf, &mut errors);
        assert!(errors.iter().any(|e| e.message == "fields EARTH and MERCURY conflict on value 1"));
    }

    #[test]
    fn union_members_dedupe_structurally() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module m {
                namespace "urn:m";
                prefix m;
                leaf x {
                    type union {
                        type string;
                        type string;
                    }
                }
            }"#,
            "m.yang",
        );
        registry.register_module("m", m);

        let mut res = Resolution::new();
        let leaf = registry.arena.get(m).seq("leaf")[0];
        let type_id = registry.arena.get(leaf).single("type").unwrap();
        let mut errors = Vec::new();
        let yty = resolve_type(&registry, &mut res, type_id, leaf, &mut errors).unwrap();
        assert_eq!(res.types.get(yty).members.len(), 1);
    }
}
