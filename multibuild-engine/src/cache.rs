//! Dependency cache purge.

use std::path::Path;

use crate::error::CacheCleanupError;

/// What [`clean`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCleanup {
    Removed,
    /// Nothing existed at the path; treated as already clean.
    Missing,
}

/// Delete `cache_dir` and everything below it.
///
/// A missing directory is a no-op. A path that exists but is not a
/// directory, or that cannot be removed, is an error.
pub fn clean(cache_dir: &Path) -> Result<CacheCleanup, CacheCleanupError> {
    if !cache_dir.exists() {
        tracing::info!(path = %cache_dir.display(), "cache folder not found, nothing to clean");
        return Ok(CacheCleanup::Missing);
    }
    if !cache_dir.is_dir() {
        return Err(CacheCleanupError::NotADirectory {
            path: cache_dir.to_path_buf(),
        });
    }

    std::fs::remove_dir_all(cache_dir).map_err(|source| CacheCleanupError::Remove {
        path: cache_dir.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "The cache folder {} has been deleted successfully",
        cache_dir.display()
    );
    Ok(CacheCleanup::Removed)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn removes_populated_directory() {
        let home = TempDir::new().expect("home");
        let cache = home.path().join(".m2").join("repository");
        std::fs::create_dir_all(cache.join("org").join("acme")).expect("mkdir");
        std::fs::write(cache.join("org").join("acme").join("lib.jar"), b"jar").expect("write");

        assert_eq!(clean(&cache).expect("clean"), CacheCleanup::Removed);
        assert!(!cache.exists());
        assert!(home.path().join(".m2").exists(), "parent must survive");
    }

    #[test]
    fn missing_directory_is_a_no_op() {
        let home = TempDir::new().expect("home");
        let cache = home.path().join(".m2").join("repository");
        assert_eq!(clean(&cache).expect("clean"), CacheCleanup::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_is_a_remove_error() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().expect("home");
        let cache = home.path().join("repository");
        let locked = cache.join("locked");
        std::fs::create_dir_all(&locked).expect("mkdir");
        std::fs::write(locked.join("lib.jar"), b"jar").expect("write");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).expect("chmod");

        let result = clean(&cache);
        let _ = std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755));

        if locked.exists() {
            let err = result.unwrap_err();
            assert!(matches!(err, CacheCleanupError::Remove { .. }), "got: {err}");
        } else {
            // root removes read-only directories anyway
            assert_eq!(result.expect("clean"), CacheCleanup::Removed);
        }
    }

    #[test]
    fn regular_file_is_rejected() {
        let home = TempDir::new().expect("home");
        let cache = home.path().join("repository");
        std::fs::write(&cache, b"not a dir").expect("write");

        let err = clean(&cache).unwrap_err();
        assert!(matches!(err, CacheCleanupError::NotADirectory { .. }), "got: {err}");
        assert!(cache.exists());
    }
}
