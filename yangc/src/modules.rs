//! `Modules::parse` / `Modules::process` (spec §4.J): the top-level driver
//! that threads one file's source through lex -> parse -> build -> register,
//! then resolves every typedef and every use-site type once every file of
//! interest has been parsed.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use yang_common::span::LineIndex;
use yang_parser::{build_root, NodeKind, Parser};
use yang_resolve::{resolve_typedefs, resolve_use_site_types, Registry, Resolution};

use crate::diagnostic::Diagnostic;

/// Owns the registry and resolution state for one compilation: every file
/// fed in through [`Modules::parse`] lands in the same arena, so `import`
/// and `include` can cross file boundaries once all of them are in.
#[derive(Default)]
pub struct Modules {
    pub registry: Registry,
    resolution: Resolution,
    line_indexes: FxHashMap<Rc<str>, LineIndex>,
    diagnostics: Vec<Diagnostic>,
}

impl Modules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex, parse, and build `source` (named `file`), registering the
    /// resulting `module`/`submodule` and indexing every `typedef` it
    /// declares. Never panics on malformed input (spec §4.J) -- a failure
    /// at any stage just stops short and leaves its diagnostics behind.
    pub fn parse(&mut self, source: &str, file: impl Into<Rc<str>>) {
        let file: Rc<str> = file.into();
        self.line_indexes.insert(file.clone(), LineIndex::new(source));

        let (stmt, raw_errors) = Parser::new(source, file.clone()).parse();
        self.diagnostics.extend(
            raw_errors.into_iter().map(|e| Diagnostic { file: file.clone(), span: e.span, message: e.message }),
        );
        let Some(stmt) = stmt else { return };

        let before = self.registry.arena.len();
        let mut build_errors = Vec::new();
        let root = build_root(&mut self.registry.arena, &stmt, &mut build_errors);
        self.diagnostics.extend(
            build_errors
                .into_iter()
                .map(|e| Diagnostic { file: file.clone(), span: e.span, message: e.message }),
        );
        let Some(root) = root else { return };

        let name = self.registry.arena.get(root).name.clone();
        match self.registry.arena.get(root).kind {
            NodeKind::Module => self.registry.register_module(name, root),
            NodeKind::Submodule => self.registry.register_submodule(name, root),
            _ => unreachable!("build_root only ever produces Module or Submodule roots"),
        }

        for id in before..self.registry.arena.len() {
            for &typedef_id in self.registry.arena.get(id).seq("typedef") {
                let typedef_name = self.registry.arena.get(typedef_id).name.clone();
                self.registry.type_dict.add(id, typedef_name, typedef_id);
            }
        }
    }

    /// Resolve every typedef and every use-site type registered so far
    /// (spec §4.J `Process`). Every `Leaf`/`LeafList`/`Typedef`/`Type` node
    /// must end up with a reachable `YangType` or a recorded diagnostic
    /// (spec §6, §7) -- resolving only `typedef` bodies would leave a
    /// leaf's own restricting `type` (e.g. `leaf x { type t { range "1..10";
    /// } }`) unresolved and unchecked. Returns the full diagnostic list
    /// accumulated across every `parse` call plus this resolve pass.
    /// Idempotent: anything already resolved by an earlier `process` call
    /// is served from cache, not re-walked.
    pub fn process(&mut self) -> &[Diagnostic] {
        let mut resolve_errors = resolve_typedefs(&self.registry, &mut self.resolution);
        resolve_errors.extend(resolve_use_site_types(&self.registry, &mut self.resolution));
        self.diagnostics.extend(
            resolve_errors
                .into_iter()
                .map(|e| Diagnostic { file: e.location.file, span: e.location.span, message: e.message }),
        );
        &self.diagnostics
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render every accumulated diagnostic to its `"<file>:<line>:<col>:
    /// <message>"` form.
    pub fn render_diagnostics(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|d| {
                let index = self.line_indexes.get(&d.file).expect("every diagnostic's file was parsed");
                d.render(index)
            })
            .collect()
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_process_clean_module_has_no_diagnostics() {
        let mut modules = Modules::new();
        modules.parse(
            r#"module m {
                namespace "urn:m";
                prefix m;
                typedef t { type string; }
                leaf x { type t; }
            }"#,
            "m.yang",
        );
        modules.process();
        assert!(modules.diagnostics().is_empty(), "{:?}", modules.diagnostics());
    }

    /// Mirrors spec §8 scenario 5's shape: a missing required field on a
    /// nested node renders with that node's own file:line:col, not the
    /// module's.
    #[test]
    fn missing_required_field_renders_with_file_line_col() {
        let mut modules = Modules::new();
        modules.parse(
            "module m {\n\tnamespace \"urn:m\";\n\tprefix m;\n\ttypedef bad { description \"oops\"; }\n}\n",
            "ast.yang",
        );
        let rendered = modules.render_diagnostics();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].starts_with("ast.yang:4:"), "{rendered:?}");
        assert!(rendered[0].ends_with("missing required typedef field: type"), "{rendered:?}");
    }

    #[test]
    fn resolves_typedefs_across_two_files() {
        let mut modules = Modules::new();
        modules.parse(
            r#"module sysdb {
                namespace "urn:sysdb";
                prefix s;
                typedef id { type uint32 { range "1..max"; } }
            }"#,
            "sysdb.yang",
        );
        modules.parse(
            r#"module dev {
                namespace "urn:dev";
                prefix d;
                import sysdb { prefix s; }
                leaf x { type s:id { range "1..10"; } }
            }"#,
            "dev.yang",
        );
        modules.process();
        assert!(modules.diagnostics().is_empty(), "{:?}", modules.diagnostics());
    }

    #[test]
    fn unknown_type_is_a_diagnostic_with_use_site_file() {
        let mut modules = Modules::new();
        modules.parse(
            r#"module m {
                namespace "urn:m";
                prefix m;
                leaf x { type nonexistent; }
            }"#,
            "m.yang",
        );
        let root = modules.registry.module("m").unwrap();
        let leaf = modules.registry.arena.get(root).seq("leaf")[0];
        let type_id = modules.registry.arena.get(leaf).single("type").unwrap();
        let mut errors = Vec::new();
        let mut res = Resolution::new();
        yang_resolve::resolve_type(&modules.registry, &mut res, type_id, leaf, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].location.file.as_ref(), "m.yang");
    }
}
