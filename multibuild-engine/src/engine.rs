//! The per-repository update-then-build sequence.
//!
//! For each repository, in order:
//!
//! 1. When updating: optionally hard-reset, check out the branch, pull.
//! 2. Build when the force-build gate is open or the pull output does not
//!    contain [`PULL_UP_TO_DATE`]. Without an update there is no pull output,
//!    so every repository is built.
//! 3. Otherwise log that the repository was skipped.
//!
//! The cache purge, when requested, happens once before the first repository.

use multibuild_core::{
    BranchName, FailurePolicy, ProcessOptions, Repository, Settings, PULL_UP_TO_DATE,
};

use crate::cache;
use crate::error::{BuilderProcessError, CommandExecutionError, EngineError, Stage};
use crate::report::{RepoOutcome, RepoStatus, RunReport};
use crate::runner::CommandRunner;

pub const GIT_CLEAN: &str = "git clean -fxd";
pub const GIT_PULL: &str = "git pull";

pub fn git_checkout(branch: &BranchName) -> String {
    format!("git checkout {branch}")
}

pub fn git_reset_hard(branch: &BranchName) -> String {
    format!("git reset --hard origin/{branch}")
}

/// Drives a [`CommandRunner`] over a list of repositories.
pub struct Engine<'a, R> {
    runner: R,
    settings: &'a Settings,
}

impl<'a, R: CommandRunner> Engine<'a, R> {
    pub fn new(runner: R, settings: &'a Settings) -> Self {
        Self { runner, settings }
    }

    /// Process `repositories` sequentially according to `options`.
    ///
    /// Under [`FailurePolicy::FailFast`] the first failing repository aborts
    /// the run and nothing after it is touched. Under
    /// [`FailurePolicy::ContinueOnError`] failures are recorded in the report.
    pub fn process(
        &self,
        options: &ProcessOptions,
        repositories: &[Repository],
    ) -> Result<RunReport, EngineError> {
        if options.clean_cache {
            cache::clean(&self.settings.cache_dir)?;
        }

        let force_build = options.should_force_build();
        let mut report = RunReport::default();

        for repo in repositories {
            match self.process_repository(options, force_build, repo) {
                Ok(outcome) => report.repositories.push(outcome),
                Err(err) => match self.settings.failure_policy {
                    FailurePolicy::FailFast => return Err(err.into()),
                    FailurePolicy::ContinueOnError => {
                        tracing::warn!(repository = repo.label(), error = %err, "continuing after failure");
                        let reason = std::error::Error::source(&err)
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| err.to_string());
                        report.repositories.push(RepoOutcome::new(
                            repo,
                            options.update && err.stage == Stage::Build,
                            RepoStatus::Failed { reason },
                        ));
                    }
                },
            }
        }

        Ok(report)
    }

    fn process_repository(
        &self,
        options: &ProcessOptions,
        force_build: bool,
        repo: &Repository,
    ) -> Result<RepoOutcome, BuilderProcessError> {
        let pull_result = if options.update {
            self.update(repo, options)
                .map_err(|e| attribute(repo, Stage::Update, e))?
        } else {
            String::new()
        };

        if force_build || !pull_result.contains(PULL_UP_TO_DATE) {
            self.runner
                .run(repo.build_command(&self.settings.catalog), repo.path())
                .map_err(|e| attribute(repo, Stage::Build, e))?;
            Ok(RepoOutcome::new(repo, options.update, RepoStatus::Built))
        } else {
            tracing::info!("The {} has not been built!", repo.label());
            Ok(RepoOutcome::new(repo, options.update, RepoStatus::Skipped))
        }
    }

    /// Bring the checkout up to date and return the pull output.
    fn update(
        &self,
        repo: &Repository,
        options: &ProcessOptions,
    ) -> Result<String, CommandExecutionError> {
        let dir = repo.path();
        if options.reset {
            self.runner.run(GIT_CLEAN, dir)?;
            self.runner.run(&git_checkout(&options.branch), dir)?;
            self.runner.run(&git_reset_hard(&options.branch), dir)?;
        } else {
            self.runner.run(&git_checkout(&options.branch), dir)?;
        }
        self.runner.run(GIT_PULL, dir)
    }
}

fn attribute(repo: &Repository, stage: Stage, source: CommandExecutionError) -> BuilderProcessError {
    BuilderProcessError {
        label: repo.label().to_string(),
        path: repo.path().to_path_buf(),
        stage,
        source,
    }
}
