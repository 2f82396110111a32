use std::rc::Rc;

use yang_parser::{build_root, Parser};
use yang_resolve::{resolve_type, Registry, Resolution};

fn build_into(registry: &mut Registry, src: &str, file: &str) -> yang_parser::NodeId {
    let (stmt, errors) = Parser::new(src, Rc::from(file)).parse();
    assert!(errors.is_empty(), "{errors:?}");
    let mut build_errors = Vec::new();
    let id = build_root(&mut registry.arena, &stmt.unwrap(), &mut build_errors).unwrap();
    assert!(build_errors.is_empty(), "{build_errors:?}");
    id
}

/// An `identityref` resolves its `base` against an imported module's
/// `identity` list.
#[test]
fn identityref_resolves_base_across_import() {
    let mut registry = Registry::new();
    let base_module = build_into(
        &mut registry,
        r#"module colors {
            namespace "urn:colors";
            prefix c;
            identity color;
        }"#,
        "colors.yang",
    );
    registry.register_module("colors", base_module);

    let m = build_into(
        &mut registry,
        r#"module m {
            namespace "urn:m";
            prefix m;
            import colors { prefix c; }
            leaf x {
                type identityref { base c:color; }
            }
        }"#,
        "m.yang",
    );
    registry.register_module("m", m);

    let leaf = registry.arena.get(m).seq("leaf")[0];
    let type_id = registry.arena.get(leaf).single("type").unwrap();
    let mut res = Resolution::new();
    let mut errors = Vec::new();
    let yty = resolve_type(&registry, &mut res, type_id, leaf, &mut errors).unwrap();
    assert!(errors.is_empty(), "{errors:?}");
    assert!(res.types.get(yty).identity_base.is_some());
}

/// An `identityref` with no `base` is a resolve error, not a panic.
#[test]
fn identityref_without_base_is_an_error() {
    let mut registry = Registry::new();
    let m = build_into(
        &mut registry,
        r#"module m {
            namespace "urn:m";
            prefix m;
            leaf x { type identityref; }
        }"#,
        "m.yang",
    );
    registry.register_module("m", m);

    let leaf = registry.arena.get(m).seq("leaf")[0];
    let type_id = registry.arena.get(leaf).single("type").unwrap();
    let mut res = Resolution::new();
    let mut errors = Vec::new();
    resolve_type(&registry, &mut res, type_id, leaf, &mut errors);
    assert_eq!(errors.len(), 1);
}

/// `posix-pattern` extensions validate via the stand-in regex engine and
/// surface a "bad pattern" error on malformed input, without panicking.
#[test]
fn malformed_posix_pattern_is_a_resolve_error_not_a_panic() {
    let mut registry = Registry::new();
    let oc = build_into(
        &mut registry,
        r#"module openconfig-extensions {
            namespace "urn:oc";
            prefix oc-ext;
        }"#,
        "oc.yang",
    );
    registry.register_module("openconfig-extensions", oc);

    let m = build_into(
        &mut registry,
        r#"module m {
            namespace "urn:m";
            prefix m;
            import openconfig-extensions { prefix oc-ext; }
            leaf x {
                type string {
                    oc-ext:posix-pattern "[a-z";
                }
            }
        }"#,
        "m.yang",
    );
    registry.register_module("m", m);

    let leaf = registry.arena.get(m).seq("leaf")[0];
    let type_id = registry.arena.get(leaf).single("type").unwrap();
    let mut res = Resolution::new();
    let mut errors = Vec::new();
    resolve_type(&registry, &mut res, type_id, leaf, &mut errors);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("bad pattern:"));
}
