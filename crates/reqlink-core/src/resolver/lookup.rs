//! Host-level module lookup: Node resolution, then bundler aliases.

use super::alias::resolve_alias;
use super::context::ResolutionContext;
use super::node::{resolve_require, Resolved};
use super::probe::{FileSystem, Probe};
use super::trace::ResolveTrace;
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Find the file a `require(spec)` in `from_dir` refers to.
///
/// Runs the Node algorithm first. Alias roots are consulted only when it
/// finds nothing and the context has roots configured. A manifest error
/// from the Node algorithm is returned as-is; aliases are not tried.
pub fn find_module(
    fs: &dyn FileSystem,
    ctx: &ResolutionContext,
    spec: &str,
    from_dir: &Path,
) -> Result<Resolved> {
    find_with(&mut Probe::new(fs), ctx, spec, from_dir)
}

/// [`find_module`], recording each step into `trace`.
pub fn find_module_traced(
    fs: &dyn FileSystem,
    ctx: &ResolutionContext,
    spec: &str,
    from_dir: &Path,
    trace: &mut ResolveTrace,
) -> Result<Resolved> {
    find_with(&mut Probe::traced(fs, trace), ctx, spec, from_dir)
}

fn find_with(
    probe: &mut Probe<'_>,
    ctx: &ResolutionContext,
    spec: &str,
    from_dir: &Path,
) -> Result<Resolved> {
    let resolved = resolve_require(probe, ctx, spec, from_dir)?;

    if resolved != Resolved::NotFound || !ctx.has_aliases() {
        debug!(spec, from = %from_dir.display(), status = resolved.status(), "resolved");
        return Ok(resolved);
    }

    let resolved = match resolve_alias(
        probe,
        spec,
        ctx.project_root(),
        ctx.alias_roots(),
        ctx.alias_extensions(),
    ) {
        Some(path) => {
            probe.found(&path);
            Resolved::Alias(path)
        }
        None => Resolved::NotFound,
    };

    debug!(spec, from = %from_dir.display(), status = resolved.status(), "resolved via alias roots");
    Ok(resolved)
}
