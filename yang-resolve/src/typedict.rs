//! Type dictionary (spec §4.H): a thread-safe two-level map from a defining
//! node to its in-scope `typedef`s by name.
//!
//! Guarded by `parking_lot::Mutex` rather than `std::sync::Mutex` -- carried
//! from the teacher's runtime crate, which reaches for `parking_lot` for
//! exactly this kind of shared-state guard (no poisoning, cheaper
//! uncontended lock/unlock).

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use yang_parser::NodeId;

#[derive(Default)]
pub struct TypeDictionary {
    map: Mutex<FxHashMap<NodeId, FxHashMap<String, NodeId>>>,
}

impl TypeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `typedef` as visible by `name` to lookups rooted at `scope`
    /// (the node whose substatement declared it -- module, submodule,
    /// container, list, grouping, rpc, input/output, etc).
    pub fn add(&self, scope: NodeId, name: impl Into<String>, typedef: NodeId) {
        self.map.lock().entry(scope).or_default().insert(name.into(), typedef);
    }

    pub fn find(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.map.lock().get(&scope).and_then(|by_name| by_name.get(name).copied())
    }

    /// Snapshot every registered typedef id, so `resolve_typedefs` can
    /// iterate without holding the lock across recursive `Typedef::resolve`
    /// calls.
    pub fn typedefs(&self) -> Vec<NodeId> {
        self.map.lock().values().flat_map(|by_name| by_name.values().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_find_round_trip() {
        let dict = TypeDictionary::new();
        dict.add(1, "my-type", 42);
        assert_eq!(dict.find(1, "my-type"), Some(42));
        assert_eq!(dict.find(1, "other"), None);
        assert_eq!(dict.find(2, "my-type"), None);
    }

    #[test]
    fn typedefs_snapshots_everything() {
        let dict = TypeDictionary::new();
        dict.add(1, "a", 10);
        dict.add(2, "b", 20);
        let mut all = dict.typedefs();
        all.sort();
        assert_eq!(all, vec![10, 20]);
    }
}
