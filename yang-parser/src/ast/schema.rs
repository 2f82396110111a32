//! Compile-time field-tag schema (spec §4.D, §9 redesign flag).
//!
//! The original design dispatches substatements to typed slots via runtime
//! field-tag reflection. Here each node kind gets a `const` descriptor
//! table instead -- `(keyword, child kind, cardinality, required)` -- built
//! once at compile time and walked by the builder; no reflection.

use super::node::{Cardinality, NodeKind};

pub struct FieldSpec {
    pub keyword: &'static str,
    pub child_kind: NodeKind,
    pub cardinality: Cardinality,
    pub required: bool,
}

const fn f(keyword: &'static str, child_kind: NodeKind, cardinality: Cardinality, required: bool) -> FieldSpec {
    FieldSpec { keyword, child_kind, cardinality, required }
}

use Cardinality::{Seq, Single};

pub fn schema_for(kind: NodeKind) -> &'static [FieldSpec] {
    match kind {
        NodeKind::Module => MODULE,
        NodeKind::Submodule => SUBMODULE,
        NodeKind::BelongsTo => BELONGS_TO,
        NodeKind::Import => IMPORT,
        NodeKind::Include => INCLUDE,
        NodeKind::Revision => REVISION,
        NodeKind::Container => CONTAINER,
        NodeKind::List => LIST,
        NodeKind::Leaf => LEAF,
        NodeKind::LeafList => LEAF_LIST,
        NodeKind::Choice => CHOICE,
        NodeKind::Case => CASE,
        NodeKind::AnyData => ANYDATA,
        NodeKind::AnyXml => ANYDATA,
        NodeKind::Grouping => GROUPING,
        NodeKind::Uses => USES,
        NodeKind::Refine => REFINE,
        NodeKind::Augment => AUGMENT,
        NodeKind::Typedef => TYPEDEF,
        NodeKind::Type => TYPE,
        NodeKind::Enum => ENUM_OR_BIT,
        NodeKind::Bit => ENUM_OR_BIT,
        NodeKind::Identity => IDENTITY,
        NodeKind::Rpc => RPC,
        NodeKind::Action => RPC,
        NodeKind::Input => INPUT_OUTPUT,
        NodeKind::Output => INPUT_OUTPUT,
        NodeKind::Notification => NOTIFICATION,
        NodeKind::Feature => FEATURE,
        NodeKind::Deviation => DEVIATION,
        NodeKind::Deviate => DEVIATE,
        _ => &[],
    }
}

const MODULE: &[FieldSpec] = &[
    f("yang-version", NodeKind::YangVersion, Single, false),
    f("namespace", NodeKind::Namespace, Single, true),
    f("prefix", NodeKind::Prefix, Single, true),
    f("organization", NodeKind::Organization, Single, false),
    f("contact", NodeKind::Contact, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("revision", NodeKind::Revision, Seq, false),
    f("import", NodeKind::Import, Seq, false),
    f("include", NodeKind::Include, Seq, false),
    f("feature", NodeKind::Feature, Seq, false),
    f("identity", NodeKind::Identity, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("augment", NodeKind::Augment, Seq, false),
    f("rpc", NodeKind::Rpc, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
    f("deviation", NodeKind::Deviation, Seq, false),
];

const SUBMODULE: &[FieldSpec] = &[
    f("yang-version", NodeKind::YangVersion, Single, false),
    f("belongs-to", NodeKind::BelongsTo, Single, true),
    f("organization", NodeKind::Organization, Single, false),
    f("contact", NodeKind::Contact, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("revision", NodeKind::Revision, Seq, false),
    f("import", NodeKind::Import, Seq, false),
    f("include", NodeKind::Include, Seq, false),
    f("feature", NodeKind::Feature, Seq, false),
    f("identity", NodeKind::Identity, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("augment", NodeKind::Augment, Seq, false),
    f("rpc", NodeKind::Rpc, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
    f("deviation", NodeKind::Deviation, Seq, false),
];

const BELONGS_TO: &[FieldSpec] = &[f("prefix", NodeKind::Prefix, Single, true)];

const IMPORT: &[FieldSpec] = &[
    f("prefix", NodeKind::Prefix, Single, true),
    f("revision-date", NodeKind::RevisionDate, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
];

const INCLUDE: &[FieldSpec] = &[
    f("revision-date", NodeKind::RevisionDate, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
];

const REVISION: &[FieldSpec] = &[
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
];

const CONTAINER: &[FieldSpec] = &[
    f("presence", NodeKind::Presence, Single, false),
    f("config", NodeKind::Config, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("action", NodeKind::Action, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
];

const LIST: &[FieldSpec] = &[
    f("key", NodeKind::Key, Single, false),
    f("unique", NodeKind::Unique, Seq, false),
    f("config", NodeKind::Config, Single, false),
    f("min-elements", NodeKind::Status, Single, false),
    f("max-elements", NodeKind::Status, Single, false),
    f("ordered-by", NodeKind::OrderedBy, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("action", NodeKind::Action, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
];

const LEAF: &[FieldSpec] = &[
    f("type", NodeKind::Type, Single, true),
    f("units", NodeKind::Units, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("default", NodeKind::Default, Single, false),
    f("config", NodeKind::Config, Single, false),
    f("mandatory", NodeKind::Mandatory, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
];

const LEAF_LIST: &[FieldSpec] = &[
    f("type", NodeKind::Type, Single, true),
    f("units", NodeKind::Units, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("default", NodeKind::Default, Seq, false),
    f("config", NodeKind::Config, Single, false),
    f("min-elements", NodeKind::Status, Single, false),
    f("max-elements", NodeKind::Status, Single, false),
    f("ordered-by", NodeKind::OrderedBy, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
];

const CHOICE: &[FieldSpec] = &[
    f("default", NodeKind::Default, Single, false),
    f("config", NodeKind::Config, Single, false),
    f("mandatory", NodeKind::Mandatory, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("case", NodeKind::Case, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
];

const CASE: &[FieldSpec] = &[
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
];

const ANYDATA: &[FieldSpec] = &[
    f("must", NodeKind::Must, Seq, false),
    f("config", NodeKind::Config, Single, false),
    f("mandatory", NodeKind::Mandatory, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
];

const GROUPING: &[FieldSpec] = &[
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("action", NodeKind::Action, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
];

const USES: &[FieldSpec] = &[
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("refine", NodeKind::Refine, Seq, false),
    f("augment", NodeKind::Augment, Seq, false),
];

const REFINE: &[FieldSpec] = &[
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("config", NodeKind::Config, Single, false),
    f("default", NodeKind::Default, Seq, false),
    f("mandatory", NodeKind::Mandatory, Single, false),
    f("presence", NodeKind::Presence, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
];

const AUGMENT: &[FieldSpec] = &[
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("when", NodeKind::When, Single, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
    f("case", NodeKind::Case, Seq, false),
    f("action", NodeKind::Action, Seq, false),
    f("notification", NodeKind::Notification, Seq, false),
];

const TYPEDEF: &[FieldSpec] = &[
    f("type", NodeKind::Type, Single, true),
    f("units", NodeKind::Units, Single, false),
    f("default", NodeKind::Default, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
];

const TYPE: &[FieldSpec] = &[
    f("fraction-digits", NodeKind::FractionDigits, Single, false),
    f("range", NodeKind::Range, Single, false),
    f("length", NodeKind::Length, Single, false),
    f("pattern", NodeKind::Pattern, Seq, false),
    f("enum", NodeKind::Enum, Seq, false),
    f("bit", NodeKind::Bit, Seq, false),
    f("base", NodeKind::Base, Seq, false),
    f("path", NodeKind::Path, Single, false),
    f("require-instance", NodeKind::RequireInstance, Single, false),
    f("type", NodeKind::Type, Seq, false),
];

const ENUM_OR_BIT: &[FieldSpec] = &[
    f("value", NodeKind::Value, Single, false),
    f("position", NodeKind::Position, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
];

const IDENTITY: &[FieldSpec] = &[
    f("base", NodeKind::Base, Seq, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
];

const RPC: &[FieldSpec] = &[
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("input", NodeKind::Input, Single, false),
    f("output", NodeKind::Output, Single, false),
];

const INPUT_OUTPUT: &[FieldSpec] = &[
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
];

const NOTIFICATION: &[FieldSpec] = &[
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("status", NodeKind::Status, Single, false),
    f("when", NodeKind::When, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("typedef", NodeKind::Typedef, Seq, false),
    f("grouping", NodeKind::Grouping, Seq, false),
    f("container", NodeKind::Container, Seq, false),
    f("leaf", NodeKind::Leaf, Seq, false),
    f("leaf-list", NodeKind::LeafList, Seq, false),
    f("list", NodeKind::List, Seq, false),
    f("choice", NodeKind::Choice, Seq, false),
    f("anydata", NodeKind::AnyData, Seq, false),
    f("anyxml", NodeKind::AnyXml, Seq, false),
    f("uses", NodeKind::Uses, Seq, false),
];

const FEATURE: &[FieldSpec] = &[
    f("if-feature", NodeKind::IfFeature, Seq, false),
    f("status", NodeKind::Status, Single, false),
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
];

const DEVIATION: &[FieldSpec] = &[
    f("description", NodeKind::Description, Single, false),
    f("reference", NodeKind::Reference, Single, false),
    f("deviate", NodeKind::Deviate, Seq, true),
];

const DEVIATE: &[FieldSpec] = &[
    f("type", NodeKind::Type, Single, false),
    f("units", NodeKind::Units, Single, false),
    f("must", NodeKind::Must, Seq, false),
    f("unique", NodeKind::Unique, Seq, false),
    f("default", NodeKind::Default, Seq, false),
    f("config", NodeKind::Config, Single, false),
    f("mandatory", NodeKind::Mandatory, Single, false),
    f("min-elements", NodeKind::Status, Single, false),
    f("max-elements", NodeKind::Status, Single, false),
];

/// Map a statement's keyword to the `NodeKind` it builds, for substatements
/// whose meaning depends only on their own keyword (the top-level
/// `module`/`submodule` statement is classified by the driver instead,
/// since it's the one keyword this crate accepts at the root).
pub fn keyword_to_kind(keyword: &str) -> Option<NodeKind> {
    Some(match keyword {
        "module" => NodeKind::Module,
        "submodule" => NodeKind::Submodule,
        "belongs-to" => NodeKind::BelongsTo,
        "import" => NodeKind::Import,
        "include" => NodeKind::Include,
        "revision" => NodeKind::Revision,
        "revision-date" => NodeKind::RevisionDate,
        "namespace" => NodeKind::Namespace,
        "prefix" => NodeKind::Prefix,
        "yang-version" => NodeKind::YangVersion,
        "organization" => NodeKind::Organization,
        "contact" => NodeKind::Contact,
        "description" => NodeKind::Description,
        "reference" => NodeKind::Reference,
        "container" => NodeKind::Container,
        "leaf" => NodeKind::Leaf,
        "leaf-list" => NodeKind::LeafList,
        "list" => NodeKind::List,
        "choice" => NodeKind::Choice,
        "case" => NodeKind::Case,
        "anydata" => NodeKind::AnyData,
        "anyxml" => NodeKind::AnyXml,
        "grouping" => NodeKind::Grouping,
        "uses" => NodeKind::Uses,
        "refine" => NodeKind::Refine,
        "augment" => NodeKind::Augment,
        "typedef" => NodeKind::Typedef,
        "type" => NodeKind::Type,
        "fraction-digits" => NodeKind::FractionDigits,
        "range" => NodeKind::Range,
        "length" => NodeKind::Length,
        "pattern" => NodeKind::Pattern,
        "modifier" => NodeKind::Modifier,
        "base" => NodeKind::Base,
        "path" => NodeKind::Path,
        "require-instance" => NodeKind::RequireInstance,
        "enum" => NodeKind::Enum,
        "bit" => NodeKind::Bit,
        "value" => NodeKind::Value,
        "position" => NodeKind::Position,
        "identity" => NodeKind::Identity,
        "rpc" => NodeKind::Rpc,
        "action" => NodeKind::Action,
        "input" => NodeKind::Input,
        "output" => NodeKind::Output,
        "notification" => NodeKind::Notification,
        "feature" => NodeKind::Feature,
        "if-feature" => NodeKind::IfFeature,
        "when" => NodeKind::When,
        "must" => NodeKind::Must,
        "deviation" => NodeKind::Deviation,
        "deviate" => NodeKind::Deviate,
        "status" => NodeKind::Status,
        "units" => NodeKind::Units,
        "default" => NodeKind::Default,
        "config" => NodeKind::Config,
        "mandatory" => NodeKind::Mandatory,
        "presence" => NodeKind::Presence,
        "key" => NodeKind::Key,
        "unique" => NodeKind::Unique,
        "ordered-by" => NodeKind::OrderedBy,
        // Fields with no dedicated schema entry (min-elements/max-elements)
        // still need a NodeKind to build as a generic leaf; Status is an
        // inert placeholder tag reused for these occurrence-count scalars
        // since nothing downstream of this front end inspects their kind,
        // only their `.name` (the argument text).
        "min-elements" | "max-elements" => NodeKind::Status,
        _ => return None,
    })
}
