//! Bundler alias roots (webpack `resolve.modules` style).
//!
//! When Node resolution finds nothing, a specifier may still name a file
//! under one of the project's configured source roots, e.g. `components/nav`
//! meaning `<root>/src/components/nav.jsx`.

use super::node::with_suffix;
use super::probe::Probe;
use super::trace::steps;
use crate::paths::normalize;
use std::path::{Path, PathBuf};

/// Look `spec` up under each alias root in order.
///
/// For each root the candidate `root/spec` is tried as an exact file, then
/// for each extension as `root/spec + ext` and `root/spec/index + ext`.
/// The first root with a hit wins.
pub fn resolve_alias(
    probe: &mut Probe<'_>,
    spec: &str,
    project_root: &Path,
    alias_roots: &[String],
    extensions: &[String],
) -> Option<PathBuf> {
    for root in alias_roots {
        let base = normalize(&project_root.join(root).join(spec));

        let mut found = probe.file(&base, None);
        for ext in extensions {
            if found.is_some() {
                break;
            }
            found = probe
                .file(&with_suffix(&base, ext), None)
                .or_else(|| probe.file(&base, Some(&format!("index{ext}"))));
        }

        if let Some(path) = found {
            probe.step(
                steps::RESOLVE_ALIAS,
                true,
                format!("Found under alias root: {root}"),
                Some(&path),
            );
            return Some(path);
        }
    }

    probe.step(steps::RESOLVE_ALIAS, false, "No alias root matched", None);
    None
}
