//! Specifier classification.

use super::core_modules::is_core_module;
use serde::Serialize;
use std::path::Path;

/// How a specifier is resolved. Every string maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecifierKind {
    /// Built-in module; never touches the filesystem.
    Core,
    /// Starts with `.`, or is a rooted filesystem path.
    Relative,
    /// Anything else; searched through `node_modules` directories.
    Bare,
}

impl SpecifierKind {
    /// Classify a specifier.
    #[must_use]
    pub fn of(spec: &str) -> Self {
        if is_core_module(spec) {
            Self::Core
        } else if spec.starts_with('.') || Path::new(spec).has_root() {
            Self::Relative
        } else {
            Self::Bare
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Relative => "relative",
            Self::Bare => "bare",
        }
    }
}

impl std::fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a bare specifier into package name and optional subpath.
///
/// `lodash/fp` gives `("lodash", Some("fp"))`; scoped names keep their scope,
/// so `@scope/pkg/sub` gives `("@scope/pkg", Some("sub"))`.
#[must_use]
pub fn package_name(spec: &str) -> (&str, Option<&str>) {
    if spec.starts_with('@') {
        let mut slashes = spec.match_indices('/');
        return match (slashes.next(), slashes.next()) {
            (Some(_), Some((i, _))) => (&spec[..i], Some(&spec[i + 1..])),
            _ => (spec, None),
        };
    }

    match spec.split_once('/') {
        Some((name, sub)) => (name, Some(sub)),
        None => (spec, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_core() {
        assert_eq!(SpecifierKind::of("fs"), SpecifierKind::Core);
        assert_eq!(SpecifierKind::of("child_process"), SpecifierKind::Core);
    }

    #[test]
    fn test_classify_relative() {
        assert_eq!(SpecifierKind::of("./foo"), SpecifierKind::Relative);
        assert_eq!(SpecifierKind::of("../bar/baz"), SpecifierKind::Relative);
        assert_eq!(SpecifierKind::of("."), SpecifierKind::Relative);
        assert_eq!(SpecifierKind::of(".hidden"), SpecifierKind::Relative);
    }

    #[test]
    fn test_classify_absolute_is_relative_to_root() {
        assert_eq!(SpecifierKind::of("/abs/path"), SpecifierKind::Relative);
    }

    #[test]
    fn test_classify_bare() {
        assert_eq!(SpecifierKind::of("lodash"), SpecifierKind::Bare);
        assert_eq!(SpecifierKind::of("lodash/fp"), SpecifierKind::Bare);
        assert_eq!(SpecifierKind::of("@scope/pkg"), SpecifierKind::Bare);
        assert_eq!(SpecifierKind::of("node:fs"), SpecifierKind::Bare);
        assert_eq!(SpecifierKind::of(""), SpecifierKind::Bare);
    }

    #[test]
    fn test_package_name_simple() {
        assert_eq!(package_name("lodash"), ("lodash", None));
    }

    #[test]
    fn test_package_name_subpath() {
        assert_eq!(package_name("lodash/fp/map"), ("lodash", Some("fp/map")));
    }

    #[test]
    fn test_package_name_scoped() {
        assert_eq!(package_name("@scope/pkg"), ("@scope/pkg", None));
        assert_eq!(package_name("@scope/pkg/sub"), ("@scope/pkg", Some("sub")));
        assert_eq!(package_name("@scope"), ("@scope", None));
    }
}
