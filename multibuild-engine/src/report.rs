//! Per-repository outcome of a run.

use std::path::PathBuf;

use multibuild_core::Repository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RepoStatus {
    Built,
    /// The pull reported nothing new and no force-build flag was set.
    Skipped,
    /// Only recorded under [`FailurePolicy::ContinueOnError`](multibuild_core::FailurePolicy).
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoOutcome {
    pub label: String,
    pub path: PathBuf,
    pub updated: bool,
    #[serde(flatten)]
    pub status: RepoStatus,
}

impl RepoOutcome {
    pub(crate) fn new(repo: &Repository, updated: bool, status: RepoStatus) -> Self {
        Self {
            label: repo.label().to_string(),
            path: repo.path().to_path_buf(),
            updated,
            status,
        }
    }
}

/// Outcomes in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub repositories: Vec<RepoOutcome>,
}

impl RunReport {
    pub fn built(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Built))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&RepoStatus) -> bool) -> usize {
        self.repositories.iter().filter(|r| pred(&r.status)).count()
    }
}
