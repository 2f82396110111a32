//! Resolved type representation (spec §3, §4.G): `YangType`, `EnumType`,
//! and the arena they live in.
//!
//! `YangType` is its own arena-indexed graph (not an AST `Node`) because a
//! single `Type` use-site can fan out into recursive union members that
//! have no statement of their own to hang off -- spec §9's first
//! REDESIGN FLAG keeps this split deliberate.

use rustc_hash::FxHashMap;

use yang_parser::NodeId;

pub type YangTypeId = usize;

/// YANG's builtin type keywords (spec §4.G.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    String,
    Boolean,
    Enumeration,
    Bits,
    Binary,
    Leafref,
    Identityref,
    InstanceIdentifier,
    Empty,
    Union,
}

impl BuiltinKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "decimal64" => Self::Decimal64,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "enumeration" => Self::Enumeration,
            "bits" => Self::Bits,
            "binary" => Self::Binary,
            "leafref" => Self::Leafref,
            "identityref" => Self::Identityref,
            "instance-identifier" => Self::InstanceIdentifier,
            "empty" => Self::Empty,
            "union" => Self::Union,
            _ => return None,
        })
    }
}

/// Named enumeration (`enum`) or bitfield (`bits`) value mapping (spec §3,
/// §4.G's `enum`/`bit` substatement handling).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumType {
    to_string: FxHashMap<i64, String>,
    to_int: FxHashMap<String, i64>,
    last_assigned: i64,
    pub min: i64,
    pub max: i64,
    pub unique: bool,
}

impl EnumType {
    pub fn new_enum() -> Self {
        Self { min: i32::MIN as i64, max: i32::MAX as i64, unique: true, last_assigned: -1, ..Default::default() }
    }

    pub fn new_bitfield() -> Self {
        Self { min: 0, max: u32::MAX as i64, unique: false, last_assigned: -1, ..Default::default() }
    }

    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.to_string.get(&value).map(String::as_str)
    }

    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.to_int.get(name).copied()
    }

    /// Assign `value` to `name`. Duplicate names always fail; duplicate
    /// values fail only when `unique` (`enum`, not `bits`) -- spec §8
    /// scenario 6's exact message shape.
    pub fn set(&mut self, name: &str, value: i64) -> Result<(), String> {
        if self.to_int.contains_key(name) {
            return Err(format!("duplicate enum name: {name}"));
        }
        if self.unique {
            if let Some(existing) = self.to_string.get(&value) {
                return Err(format!("fields {existing} and {name} conflict on value {value}"));
            }
        }
        self.to_string.insert(value, name.to_string());
        self.to_int.insert(name.to_string(), value);
        self.last_assigned = self.last_assigned.max(value);
        Ok(())
    }

    pub fn set_next(&mut self, name: &str) -> Result<(), String> {
        let value = self.last_assigned + 1;
        self.set(name, value)
    }
}

/// A resolved type at one point in a `typedef`/`type` chain (spec §3's
/// `YangType`). Lives in a [`YangTypeArena`]; `root` is a self-reference
/// when this is the top of its chain.
#[derive(Debug, Clone)]
pub struct YangType {
    pub name: String,
    pub kind: BuiltinKind,
    pub base: Option<NodeId>,
    pub root: YangTypeId,
    pub range: yang_common::yrange::YangRange,
    pub length: yang_common::yrange::YangRange,
    pub fraction_digits: u8,
    pub enum_type: Option<EnumType>,
    pub bit: Option<EnumType>,
    pub pattern: Vec<String>,
    pub posix_pattern: Vec<String>,
    pub members: Vec<YangTypeId>,
    pub identity_base: Option<NodeId>,
    pub units: Option<String>,
    pub default: Option<String>,
    pub optional_instance: bool,
    pub path: Option<String>,
}

impl YangType {
    /// A fresh, unrestricted type of `kind`, as the builtin templates start
    /// out before any use-site overlays are applied.
    pub fn builtin(name: impl Into<String>, kind: BuiltinKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            root: 0,
            range: yang_common::yrange::YangRange::default(),
            length: yang_common::yrange::YangRange::default(),
            fraction_digits: 0,
            enum_type: None,
            bit: None,
            pattern: Vec::new(),
            posix_pattern: Vec::new(),
            members: Vec::new(),
            identity_base: None,
            units: None,
            default: None,
            optional_instance: false,
            path: None,
        }
    }
}

#[derive(Default)]
pub struct YangTypeArena {
    types: Vec<YangType>,
}

impl YangTypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, mut ty: YangType) -> YangTypeId {
        let id = self.types.len();
        ty.root = id;
        self.types.push(ty);
        id
    }

    pub fn get(&self, id: YangTypeId) -> &YangType {
        &self.types[id]
    }

    pub fn get_mut(&mut self, id: YangTypeId) -> &mut YangType {
        &mut self.types[id]
    }

    /// `YangType::equal` (spec §4.G, §9 "Union of enumerations"): deep
    /// structural comparison, deliberately ignoring `name` so two
    /// differently-named but identical restrictions dedupe inside a union.
    pub fn equal(&self, a: YangTypeId, b: YangTypeId) -> bool {
        if a == b {
            return true;
        }
        let (ta, tb) = (self.get(a), self.get(b));
        ta.kind == tb.kind
            && ta.fraction_digits == tb.fraction_digits
            && ta.range.equal(&tb.range)
            && ta.length.equal(&tb.length)
            && ta.pattern == tb.pattern
            && ta.posix_pattern == tb.posix_pattern
            && ta.identity_base == tb.identity_base
            && ta.enum_type == tb.enum_type
            && ta.bit == tb.bit
            && ta.members.len() == tb.members.len()
            && ta.members.iter().zip(tb.members.iter()).all(|(&ma, &mb)| self.equal(ma, mb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_set_next_increments() {
        let mut e = EnumType::new_enum();
        e.set("a", 0).unwrap();
        e.set_next("b").unwrap();
        assert_eq!(e.value_of("b"), Some(1));
    }

    #[test]
    fn enum_collision_reports_both_names() {
        let mut e = EnumType::new_enum();
        e.set("EARTH", 1).unwrap();
        let err = e.set("MERCURY", 1).unwrap_err();
        assert_eq!(err, "fields EARTH and MERCURY conflict on value 1");
    }

    #[test]
    fn bits_allow_duplicate_values() {
        let mut b = EnumType::new_bitfield();
        b.set("a", 0).unwrap();
        assert!(b.set("b", 0).is_ok());
    }

    #[test]
    fn equal_ignores_name() {
        let mut arena = YangTypeArena::new();
        let a = arena.alloc(YangType::builtin("foo", BuiltinKind::String));
        let b = arena.alloc(YangType::builtin("bar", BuiltinKind::String));
        assert!(arena.equal(a, b));
    }

    #[test]
    fn equal_distinguishes_ranges() {
        let mut arena = YangTypeArena::new();
        let mut a = YangType::builtin("a", BuiltinKind::Int32);
        a.range = yang_common::yrange::parse_ranges(
            "1..5",
            false,
            0,
            yang_common::yrange::RangeDomain {
                min: yang_common::number::Number::min_sentinel(),
                max: yang_common::number::Number::max_sentinel(),
            },
            false,
        )
        .unwrap();
        let b = YangType::builtin("b", BuiltinKind::Int32);
        let a_id = arena.alloc(a);
        let b_id = arena.alloc(b);
        assert!(!arena.equal(a_id, b_id));
    }
}
