//! Resolution result caching.
//!
//! Resolution itself is stateless. Hosts that resolve the same specifiers
//! repeatedly (a project-wide `check`, an editor) can wrap it in a
//! [`CachedResolver`]. Entries are keyed by specifier, requesting directory,
//! and the context fingerprint, and a hit is only used if the resolved
//! file's mtime and size still match.

use super::context::ResolutionContext;
use super::lookup::find_module;
use super::node::Resolved;
use super::probe::{FileMeta, FileSystem};
use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, trace};

/// Cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverCacheKey {
    pub specifier: String,
    pub from_dir: PathBuf,
    pub context: String,
}

impl ResolverCacheKey {
    /// `context` is a [`ResolutionContext::fingerprint`].
    #[must_use]
    pub fn new(specifier: &str, from_dir: &Path, context: impl Into<String>) -> Self {
        Self {
            specifier: specifier.to_string(),
            from_dir: from_dir.to_path_buf(),
            context: context.into(),
        }
    }
}

/// File stamp for cache invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStamp {
    pub path: Option<PathBuf>,
    pub meta: Option<FileMeta>,
}

impl FileStamp {
    /// Stamp the file at `path` as `fs` sees it now.
    #[must_use]
    pub fn from_path(fs: &dyn FileSystem, path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            meta: fs.metadata(path),
        }
    }

    /// Whether the stamped file is unchanged.
    ///
    /// A stamp without a path (core modules, misses) is always valid.
    #[must_use]
    pub fn is_valid(&self, fs: &dyn FileSystem) -> bool {
        let Some(ref path) = self.path else {
            return true;
        };
        let Some(current) = fs.metadata(path) else {
            return false;
        };

        match self.meta {
            Some(stamped) => {
                stamped.size == current.size
                    && (stamped.mtime_ms.is_none() || stamped.mtime_ms == current.mtime_ms)
            }
            None => false,
        }
    }
}

/// A cached resolution with the stamp of its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResolution {
    pub resolved: Resolved,
    pub stamp: FileStamp,
}

impl CachedResolution {
    #[must_use]
    pub fn new(fs: &dyn FileSystem, resolved: Resolved) -> Self {
        let stamp = resolved
            .path()
            .map(|path| FileStamp::from_path(fs, path))
            .unwrap_or_default();
        Self { resolved, stamp }
    }
}

/// Storage for resolution results.
pub trait ResolverCache: Send + Sync {
    /// Look up a cached result.
    fn get(&self, key: &ResolverCacheKey) -> Option<CachedResolution>;

    /// Store a result.
    fn set(&self, key: ResolverCacheKey, value: CachedResolution);
}

/// No-op cache implementation (always misses).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResolverCache for NoCache {
    fn get(&self, _key: &ResolverCacheKey) -> Option<CachedResolution> {
        None
    }

    fn set(&self, _key: ResolverCacheKey, _value: CachedResolution) {}
}

/// Thread-safe in-memory cache with a reverse index for invalidation.
#[derive(Debug, Default)]
pub struct MemoryResolverCache {
    entries: RwLock<HashMap<ResolverCacheKey, CachedResolution>>,
    /// Resolved file -> keys that resolved to it
    reverse_index: RwLock<HashMap<PathBuf, HashSet<ResolverCacheKey>>>,
}

impl MemoryResolverCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every entry that resolved to `path`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_path(&self, path: &Path) -> usize {
        let keys = self
            .reverse_index
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .unwrap_or_default();

        if !keys.is_empty() {
            debug!(path = %path.display(), count = keys.len(), "Invalidating cache entries for path");
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            for key in &keys {
                entries.remove(key);
            }
        }

        keys.len()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.reverse_index
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ResolverCache for MemoryResolverCache {
    fn get(&self, key: &ResolverCacheKey) -> Option<CachedResolution> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: ResolverCacheKey, value: CachedResolution) {
        let mut index = self
            .reverse_index
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let path = value.resolved.path().map(Path::to_path_buf);
        if let Some(previous) = entries.insert(key.clone(), value) {
            // Unlink the key from the file it used to resolve to
            if let Some(old) = previous.resolved.path() {
                if path.as_deref() != Some(old) {
                    if let Some(keys) = index.get_mut(old) {
                        keys.remove(&key);
                        if keys.is_empty() {
                            index.remove(old);
                        }
                    }
                }
            }
        }
        if let Some(path) = path {
            index.entry(path).or_default().insert(key);
        }
    }
}

/// [`find_module`] through a cache.
///
/// Errors are never cached: a broken manifest is reported again on every
/// lookup until it is fixed.
pub struct CachedResolver<'a> {
    fs: &'a dyn FileSystem,
    ctx: &'a ResolutionContext,
    cache: &'a dyn ResolverCache,
    fingerprint: String,
}

impl<'a> CachedResolver<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        ctx: &'a ResolutionContext,
        cache: &'a dyn ResolverCache,
    ) -> Self {
        Self {
            fs,
            ctx,
            cache,
            fingerprint: ctx.fingerprint(),
        }
    }

    pub fn find(&self, spec: &str, from_dir: &Path) -> Result<Resolved> {
        let key = ResolverCacheKey::new(spec, from_dir, self.fingerprint.as_str());

        if let Some(hit) = self.cache.get(&key) {
            if hit.stamp.is_valid(self.fs) {
                trace!(spec, from = %from_dir.display(), "cache hit");
                return Ok(hit.resolved);
            }
        }

        let resolved = find_module(self.fs, self.ctx, spec, from_dir)?;
        self.cache.set(key, CachedResolution::new(self.fs, resolved.clone()));
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::probe::OsFileSystem;
    use crate::resolver::testing::MemoryFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_stamp_detects_change() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "one").unwrap();

        let stamp = FileStamp::from_path(&OsFileSystem, &file);
        assert!(stamp.is_valid(&OsFileSystem));

        fs::write(&file, "a longer body").unwrap();
        assert!(!stamp.is_valid(&OsFileSystem));
    }

    #[test]
    fn test_file_stamp_detects_removal() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();

        let stamp = FileStamp::from_path(&OsFileSystem, &file);
        fs::remove_file(&file).unwrap();
        assert!(!stamp.is_valid(&OsFileSystem));
    }

    #[test]
    fn test_pathless_stamp_is_valid() {
        assert!(FileStamp::default().is_valid(&OsFileSystem));
    }

    #[test]
    fn test_cached_resolver_hits() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();

        let ctx = ResolutionContext::with_defaults(dir.path());
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&OsFileSystem, &ctx, &cache);

        let first = resolver.find("./a", dir.path()).unwrap();
        assert_eq!(cache.len(), 1);
        let second = resolver.find("./a", dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stale_entry_is_re_resolved() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();

        let ctx = ResolutionContext::with_defaults(dir.path());
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&OsFileSystem, &ctx, &cache);

        assert_eq!(
            resolver.find("./a", dir.path()).unwrap(),
            Resolved::File(dir.path().join("a.js"))
        );
        fs::remove_file(dir.path().join("a.js")).unwrap();
        assert_eq!(
            resolver.find("./a", dir.path()).unwrap(),
            Resolved::File(dir.path().join("a.json"))
        );
    }

    #[test]
    fn test_hit_revalidates_through_same_filesystem() {
        let fs = MemoryFs::new().with_file("/p/a.js", "x");
        let ctx = ResolutionContext::with_defaults("/p");
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&fs, &ctx, &cache);

        let first = resolver.find("./a", Path::new("/p")).unwrap();
        assert_eq!(first, Resolved::File(PathBuf::from("/p/a.js")));
        let after_first = fs.accesses();

        // Only the stamp check, no re-probing
        let second = resolver.find("./a", Path::new("/p")).unwrap();
        assert_eq!(second, first);
        assert_eq!(fs.accesses(), after_first + 1);
    }

    #[test]
    fn test_re_resolved_entry_moves_in_reverse_index() {
        let dir = tempdir().unwrap();
        let js = dir.path().join("a.js");
        let json = dir.path().join("a.json");
        fs::write(&js, "").unwrap();
        fs::write(&json, "{}").unwrap();

        let ctx = ResolutionContext::with_defaults(dir.path());
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&OsFileSystem, &ctx, &cache);

        assert_eq!(
            resolver.find("./a", dir.path()).unwrap(),
            Resolved::File(js.clone())
        );
        fs::remove_file(&js).unwrap();
        assert_eq!(
            resolver.find("./a", dir.path()).unwrap(),
            Resolved::File(json.clone())
        );

        assert_eq!(cache.invalidate_path(&js), 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidate_path(&json), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_not_cached() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("bad");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("package.json"), "{").unwrap();

        let ctx = ResolutionContext::with_defaults(dir.path());
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&OsFileSystem, &ctx, &cache);

        assert!(resolver.find("bad", dir.path()).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();

        let ctx = ResolutionContext::with_defaults(dir.path());
        let cache = MemoryResolverCache::new();
        let resolver = CachedResolver::new(&OsFileSystem, &ctx, &cache);
        resolver.find("./a", dir.path()).unwrap();
        resolver.find("./a.js", dir.path()).unwrap();
        resolver.find("fs", dir.path()).unwrap();
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.invalidate_path(&file), 2);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_differs_by_context() {
        let a = ResolutionContext::with_defaults("/p");
        let b = ResolutionContext::new("/p", vec![".ts".to_string()]).unwrap();
        assert_ne!(
            ResolverCacheKey::new("x", Path::new("/p"), a.fingerprint()),
            ResolverCacheKey::new("x", Path::new("/p"), b.fingerprint())
        );
    }

    #[test]
    fn test_no_cache_always_misses() {
        let ctx = ResolutionContext::with_defaults("/p");
        let key = ResolverCacheKey::new("x", Path::new("/p"), ctx.fingerprint());
        NoCache.set(key.clone(), CachedResolution::new(&OsFileSystem, Resolved::NotFound));
        assert!(NoCache.get(&key).is_none());
    }
}
