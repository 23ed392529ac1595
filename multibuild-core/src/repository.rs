//! One discovered checkout and the build command assigned to it.

use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::BuildCommandCatalog;
use crate::error::RepositoryError;

/// A local checkout matched against the allow-list.
///
/// The path is validated once at construction; afterwards only the build
/// command may change.
#[derive(Debug, Clone)]
pub struct Repository {
    absolute_path: PathBuf,
    label: OnceCell<String>,
    build_command: Option<String>,
}

impl Repository {
    /// Wrap `absolute_path`, failing with [`RepositoryError::InvalidDirectory`]
    /// when it is not an existing directory.
    pub fn from_path(absolute_path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let absolute_path = absolute_path.into();
        if !absolute_path.is_dir() {
            tracing::error!(path = %absolute_path.display(), "directory doesn't exist");
            return Err(RepositoryError::InvalidDirectory {
                path: absolute_path,
            });
        }
        Ok(Self {
            absolute_path,
            label: OnceCell::new(),
            build_command: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.absolute_path
    }

    /// Short display name: the path's text after its last `.`, uppercased.
    pub fn label(&self) -> &str {
        self.label.get_or_init(|| label_for(&self.absolute_path))
    }

    /// Assign `command`, which must be one of the catalog's entries.
    pub fn set_build_command(
        &mut self,
        command: impl Into<String>,
        catalog: &BuildCommandCatalog,
    ) -> Result<(), RepositoryError> {
        let command = command.into();
        if !catalog.contains(&command) {
            return Err(RepositoryError::UnknownBuildCommand { command });
        }
        self.build_command = Some(command);
        Ok(())
    }

    /// The assigned command, or the catalog's plain build when none was set.
    pub fn build_command<'a>(&'a self, catalog: &'a BuildCommandCatalog) -> &'a str {
        self.build_command
            .as_deref()
            .unwrap_or_else(|| catalog.default_command())
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn label_for(path: &Path) -> String {
    let text = path.to_string_lossy();
    let text = text.trim_end_matches(std::path::MAIN_SEPARATOR);
    text.rsplit('.').next().unwrap_or(text).to_uppercase()
}
