//! Built-in Node module names.

/// Modules built into the runtime, never resolved from disk.
///
/// From `node -pe "require('repl')._builtinLibs"`. Matching is exact:
/// `node:fs` and `fs/promises` are not in this set.
pub const CORE_MODULES: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "net",
    "os",
    "path",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "zlib",
];

/// Check whether `name` is a core module.
#[must_use]
pub fn is_core_module(name: &str) -> bool {
    CORE_MODULES.binary_search(&name).is_ok()
}
