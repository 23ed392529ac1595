//! Explicit run context handed to every component.
//!
//! Holds the values that would otherwise be process-wide constants so tests
//! can point the cache at a scratch directory or swap the allow-list.

use std::path::{Path, PathBuf};

use crate::catalog::BuildCommandCatalog;
use crate::error::RepositoryError;
use crate::types::{AllowedRepoNames, CommandOverride, FailurePolicy};

/// Dependency cache purged by `--clean-m2`, relative to the home directory.
pub const CACHE_DIR: &str = ".m2/repository";

/// Marker text git prints when a pull brought in nothing new.
pub const PULL_UP_TO_DATE: &str = "Already up to date";

#[derive(Debug, Clone)]
pub struct Settings {
    pub cache_dir: PathBuf,
    pub allowed: AllowedRepoNames,
    pub catalog: BuildCommandCatalog,
    pub overrides: Vec<CommandOverride>,
    pub failure_policy: FailurePolicy,
}

impl Settings {
    /// Defaults rooted at an explicit home directory.
    pub fn for_home(home: &Path) -> Self {
        Self {
            cache_dir: home.join(CACHE_DIR),
            allowed: AllowedRepoNames::default(),
            catalog: BuildCommandCatalog::default(),
            overrides: Vec::new(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Defaults with no cache directory, for runs that never purge it.
    /// The empty path does not exist, so a purge of it is a no-op.
    pub fn without_cache() -> Self {
        Self {
            cache_dir: PathBuf::new(),
            ..Self::for_home(Path::new(""))
        }
    }

    /// Defaults rooted at the current user's home directory.
    pub fn from_env() -> Result<Self, RepositoryError> {
        let home = dirs::home_dir().ok_or(RepositoryError::HomeNotFound)?;
        Ok(Self::for_home(&home))
    }

    /// The catalog key a repository label is pinned to, if any.
    pub fn override_for(&self, label: &str) -> Option<u8> {
        self.overrides
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label))
            .map(|o| o.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_is_under_home() {
        let settings = Settings::for_home(Path::new("/home/dev"));
        assert_eq!(settings.cache_dir, PathBuf::from("/home/dev/.m2/repository"));
        assert_eq!(settings.failure_policy, FailurePolicy::FailFast);
    }

    #[test]
    fn without_cache_has_no_cache_dir() {
        let settings = Settings::without_cache();
        assert_eq!(settings.cache_dir, PathBuf::new());
        assert!(!settings.cache_dir.exists());
        assert_eq!(settings.catalog, BuildCommandCatalog::default());
    }

    #[test]
    fn override_lookup_ignores_case() {
        let mut settings = Settings::for_home(Path::new("/home/dev"));
        settings.overrides.push(CommandOverride {
            label: "SDK".into(),
            key: 1,
        });
        assert_eq!(settings.override_for("sdk"), Some(1));
        assert_eq!(settings.override_for("AEP"), None);
    }
}
