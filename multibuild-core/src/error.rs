//! Error types for multibuild-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while discovering and configuring repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A configured or discovered path is not a directory.
    #[error("the directory {path} doesn't exist")]
    InvalidDirectory { path: PathBuf },

    /// The scan of the root directory matched no known repository.
    #[error(
        "no repositories found under {root}; make sure the git repositories have been cloned"
    )]
    NoRepositoriesFound { root: PathBuf },

    /// A build command that is not part of the catalog was assigned.
    #[error("'{command}' is not a known build command")]
    UnknownBuildCommand { command: String },

    /// A catalog key that does not exist was requested.
    #[error("build command key {key} is not in the catalog (valid keys: {valid})")]
    UnknownCatalogKey { key: u8, valid: String },

    /// A branch name that is unsafe to pass to a shell command line.
    #[error("'{name}' is not a valid branch name")]
    InvalidBranch { name: String },

    /// `dirs::home_dir()` returned `None`, so the cache directory is unknown.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RepositoryError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RepositoryError {
    RepositoryError::Io {
        path: path.into(),
        source,
    }
}
