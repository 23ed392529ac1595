//! multibuild core library: domain types, discovery, errors.
//!
//! - [`repository`]: [`Repository`], one checkout and its build command
//! - [`locator`]: [`locator::fetch_repo_paths`]
//! - [`catalog`]: [`BuildCommandCatalog`]
//! - [`options`]: [`ProcessOptions`], the resolved choices for a run
//! - [`settings`]: [`Settings`], the explicit run context
//! - [`error`]: [`RepositoryError`]

pub mod catalog;
pub mod error;
pub mod locator;
pub mod options;
pub mod repository;
pub mod settings;
pub mod types;

pub use catalog::BuildCommandCatalog;
pub use error::RepositoryError;
pub use options::ProcessOptions;
pub use repository::Repository;
pub use settings::{Settings, CACHE_DIR, PULL_UP_TO_DATE};
pub use types::{
    AllowedRepoNames, BranchName, CommandOverride, FailurePolicy, DEFAULT_BRANCH,
    DEFAULT_BRANCH_SHORTCUT,
};
