//! The seam between this front end and whatever fetches module source text.
//!
//! Module loading is explicitly out of scope (spec §1): given a module or
//! submodule name referenced by `import`/`include`, *something* has to find
//! and read its `.yang` file (from disk, a registry, a bundled archive --
//! this crate doesn't care). [`SourceProvider`] names that seam without
//! implementing either side of it.

/// Resolves a module or submodule name to its source text. Callers decide
/// how: the filesystem, an in-memory fixture, a network fetch.
pub trait SourceProvider {
    fn resolve(&self, module_name: &str) -> Option<String>;
}
