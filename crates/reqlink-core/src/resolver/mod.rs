//! Module resolution for `require(X)`.
//!
//! - [`node`]: the Node algorithm (core modules, files, directories, `node_modules`)
//! - [`alias`]: bundler alias roots, tried when the Node algorithm finds nothing
//! - [`lookup`]: the two combined, as a host calls them
//! - [`cache`]: optional result caching
//!
//! All filesystem access goes through [`FileSystem`].

pub mod alias;
pub mod cache;
pub mod context;
pub mod core_modules;
pub mod lookup;
pub mod manifest;
pub mod node;
pub mod probe;
pub mod specifier;
pub mod trace;

#[cfg(test)]
pub(crate) mod testing;

pub use alias::resolve_alias;
pub use cache::{
    CachedResolution, CachedResolver, FileStamp, MemoryResolverCache, NoCache, ResolverCache,
    ResolverCacheKey,
};
pub use context::ResolutionContext;
pub use core_modules::{is_core_module, CORE_MODULES};
pub use lookup::{find_module, find_module_traced};
pub use manifest::{read_manifest_entry, DEFAULT_ENTRY, MANIFEST_FILE};
pub use node::{
    load_as_directory, load_as_file, load_index, load_node_modules, node_modules_paths,
    resolve_require, ModuleResolver, Resolved, NODE_MODULES,
};
pub use probe::{return_if_file, FileMeta, FileSystem, OsFileSystem, Probe};
pub use specifier::{package_name, SpecifierKind};
pub use trace::{ResolveTrace, ResolveTraceStep, TraceWarning};
