//! The resolved choices for one run.

use serde::Serialize;

use crate::types::BranchName;

/// Everything the engine needs to know about what the user asked for.
///
/// Built once from flags and menu answers; the engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessOptions {
    /// Use the plain catalog build without asking for a command.
    pub build_full: bool,
    /// Purge the dependency cache before touching any repository.
    pub clean_cache: bool,
    /// Hard-reset each repository to `origin/<branch>` before pulling.
    pub reset: bool,
    /// Check out `branch` and pull before deciding whether to build.
    pub update: bool,
    /// No prompts were shown; everything found is processed.
    pub skip_menu: bool,
    /// Build every repository, not only the ones the pull changed.
    pub build_all: bool,
    pub branch: BranchName,
}

impl ProcessOptions {
    /// The force-build gate: when `true`, every repository is built whatever
    /// the pull reported.
    pub fn should_force_build(&self) -> bool {
        self.build_all || self.clean_cache || self.skip_menu
    }
}
