//! Discovery of checkouts under a root directory.

use std::path::{Path, PathBuf};

use crate::error::{io_err, RepositoryError};
use crate::types::AllowedRepoNames;

/// Return the immediate subdirectories of `root` (the current directory when
/// `None`) whose path ends with one of the `allowed` suffixes.
///
/// Entries are returned sorted by path so runs are reproducible. An empty
/// result is an error: the caller should tell the user to clone first.
pub fn fetch_repo_paths(
    root: Option<&Path>,
    allowed: &AllowedRepoNames,
) -> Result<Vec<PathBuf>, RepositoryError> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir().map_err(|e| io_err(".", e))?,
    };

    let paths = filter_allowed(list_directories(&root)?, allowed);
    if paths.is_empty() {
        return Err(RepositoryError::NoRepositoriesFound { root });
    }

    tracing::debug!(root = %root.display(), found = paths.len(), "repositories discovered");
    Ok(paths)
}

fn list_directories(root: &Path) -> Result<Vec<PathBuf>, RepositoryError> {
    if !root.is_dir() {
        return Err(RepositoryError::InvalidDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)
        .map_err(|e| io_err(root, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn filter_allowed(paths: Vec<PathBuf>, allowed: &AllowedRepoNames) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| allowed.matches(&p.to_string_lossy()))
        .collect()
}
