//! Documentation links for resolved specifiers.

use crate::resolver::{package_name, Resolved, SpecifierKind};

const NODE_API_BASE: &str = "https://nodejs.org/api";
const NPM_PACKAGE_BASE: &str = "https://www.npmjs.com/package";

/// Node API docs page for a core module.
#[must_use]
pub fn core_docs_url(name: &str) -> String {
    format!("{NODE_API_BASE}/{name}.html")
}

/// npm registry page for the package a bare specifier names.
#[must_use]
pub fn npm_package_url(spec: &str) -> String {
    let (name, _) = package_name(spec);
    format!("{NPM_PACKAGE_BASE}/{name}")
}

/// Where to read about what `spec` resolved to, if anywhere.
///
/// Core modules link to the Node docs and packages found in `node_modules`
/// link to npm. Local files and alias hits have no page.
#[must_use]
pub fn docs_url(spec: &str, resolved: &Resolved) -> Option<String> {
    match resolved {
        Resolved::Core(name) => Some(core_docs_url(name)),
        Resolved::File(_) if SpecifierKind::of(spec) == SpecifierKind::Bare => {
            Some(npm_package_url(spec))
        }
        _ => None,
    }
}
