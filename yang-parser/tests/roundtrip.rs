use std::rc::Rc;

use yang_parser::{build_root, Arena, NodeKind, Parser};

fn parse(src: &str) -> yang_parser::Statement {
    let (stmt, errors) = Parser::new(src, Rc::from("test.yang")).parse();
    assert!(errors.is_empty(), "{errors:?}");
    stmt.unwrap()
}

/// `Statement::write` round-trips a realistic multi-statement module through
/// parse -> print -> reparse with the same shape (spec §6).
#[test]
fn full_module_round_trips_through_pretty_printer() {
    let src = r#"module m {
	namespace "urn:m";
	prefix m;
	typedef percentage {
		type uint8 {
			range "0..100";
		}
	}
	container top {
		leaf ratio {
			type percentage;
			description "a value" + " split across concatenation";
		}
	}
}
"#;
    let stmt = parse(src);
    let mut printed = String::new();
    stmt.write(&mut printed, 0);

    let reparsed = parse(&printed);
    assert_eq!(reparsed.keyword, stmt.keyword);
    assert_eq!(reparsed.argument, stmt.argument);
    assert_eq!(reparsed.substatements.len(), stmt.substatements.len());

    let mut arena = Arena::new();
    let mut build_errors = Vec::new();
    let root = build_root(&mut arena, &reparsed, &mut build_errors).unwrap();
    assert!(build_errors.is_empty(), "{build_errors:?}");
    assert_eq!(arena.get(root).kind, NodeKind::Module);
    assert_eq!(arena.get(root).seq("container").len(), 1);
}

/// spec §8 scenario 5's shape: a missing required field deep in the tree
/// reports the error pinned to the nested node's own span, not the root's.
#[test]
fn missing_required_field_is_pinned_to_its_own_node() {
    let src = "module m {\n\tnamespace \"urn:m\";\n\tprefix m;\n\tcontainer c {\n\t\tleaf x { }\n\t}\n}\n";
    let stmt = parse(src);
    let mut arena = Arena::new();
    let mut errors = Vec::new();
    build_root(&mut arena, &stmt, &mut errors);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("missing required leaf field: type"));
}
