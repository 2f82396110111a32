//! Module registry and belongs-to rewiring (spec §4.E).
//!
//! `Registry` holds the arena every parsed module/submodule's nodes live
//! in, plus name-indexed maps and the type dictionary. `yangc::Modules`
//! owns one `Registry` and drives the lex/parse/build passes that feed it;
//! this crate only implements what the registry does once nodes exist in
//! it (lookup, rewiring, resolution).

use rustc_hash::FxHashMap;

use yang_parser::{Arena, NodeId, NodeKind};

use crate::typedict::TypeDictionary;

#[derive(Default)]
pub struct Registry {
    pub arena: Arena,
    modules: FxHashMap<String, NodeId>,
    submodules: FxHashMap<String, NodeId>,
    pub type_dict: TypeDictionary,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_module(&mut self, name: impl Into<String>, id: NodeId) {
        self.modules.insert(name.into(), id);
    }

    pub fn register_submodule(&mut self, name: impl Into<String>, id: NodeId) {
        self.submodules.insert(name.into(), id);
    }

    pub fn module(&self, name: &str) -> Option<NodeId> {
        self.modules.get(name).copied()
    }

    pub fn submodule(&self, name: &str) -> Option<NodeId> {
        self.submodules.get(name).copied()
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.modules.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn submodules(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.submodules.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The argument text of `id`'s single-valued child `keyword`, if present.
    pub fn node_arg(&self, id: NodeId, keyword: &str) -> Option<&str> {
        self.arena.get(id).single(keyword).map(|c| self.arena.get(c).name.as_str())
    }

    /// The outermost `module`/`submodule` ancestor of `id` (possibly `id`
    /// itself).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.arena.ancestors(id).last().expect("arena nodes always have at least themselves")
    }

    /// The newest `revision` child of a module/submodule root, assuming
    /// revisions are declared newest-first per RFC 7950 §7.1.9's
    /// recommendation (this front end does not re-sort by date text).
    pub fn latest_revision(&self, root: NodeId) -> Option<&str> {
        self.arena.get(root).seq("revision").first().map(|&id| self.arena.get(id).name.as_str())
    }

    /// `FindModuleByPrefix` (spec §4.E): resolve a prefix seen at `context`
    /// to the module it names.
    ///
    /// 1. Empty prefix, or the context module's own prefix -> context root
    ///    module.
    /// 2. Context is a submodule and `prefix` equals its `belongs-to`
    ///    prefix -> context root submodule.
    /// 3. Otherwise scan the root's `import` list for a matching prefix.
    /// 4. Else `None`.
    pub fn find_module_by_prefix(&self, context: NodeId, prefix: &str) -> Option<NodeId> {
        let root = self.root_of(context);
        match self.arena.get(root).kind {
            NodeKind::Module => {
                let own_prefix = self.node_arg(root, "prefix");
                if prefix.is_empty() || own_prefix == Some(prefix) {
                    return Some(root);
                }
            }
            NodeKind::Submodule => {
                if let Some(belongs_to) = self.arena.get(root).single("belongs-to") {
                    let belongs_prefix = self.node_arg(belongs_to, "prefix");
                    if prefix.is_empty() || belongs_prefix == Some(prefix) {
                        return Some(root);
                    }
                }
            }
            _ => {}
        }
        for &import_id in self.arena.get(root).seq("import") {
            if self.node_arg(import_id, "prefix") == Some(prefix) {
                let module_name = self.arena.get(import_id).name.clone();
                return self.module(&module_name);
            }
        }
        None
    }
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

    #[test]
    fn own_prefix_resolves_to_own_module() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module dev { namespace "urn:dev"; prefix d; }"#,
            "dev.yang",
        );
        registry.register_module("dev", m);
        assert_eq!(registry.find_module_by_prefix(m, "d"), Some(m));
        assert_eq!(registry.find_module_by_prefix(m, ""), Some(m));
    }

    #[test]
    fn import_prefix_resolves_to_imported_module() {
        let mut registry = Registry::new();
        let sysdb = build_into(
            &mut registry,
            r#"module sysdb { namespace "urn:sysdb"; prefix s; }"#,
            "sysdb.yang",
        );
        registry.register_module("sysdb", sysdb);
        let dev = build_into(
            &mut registry,
            r#"module dev {
                namespace "urn:dev";
                prefix d;
                import sysdb { prefix s; }
            }"#,
            "dev.yang",
        );
        registry.register_module("dev", dev);
        assert_eq!(registry.find_module_by_prefix(dev, "s"), Some(sysdb));
    }

    #[test]
    fn unknown_prefix_resolves_to_none() {
        let mut registry = Registry::new();
        let m = build_into(
            &mut registry,
            r#"module dev { namespace "urn:dev"; prefix d; }"#,
            "dev.yang",
        );
        registry.register_module("dev", m);
        assert_eq!(registry.find_module_by_prefix(m, "nope"), None);
    }
}
