//! multibuild: update and build a fixed set of local checkouts.
//!
//! # Usage
//!
//! ```text
//! multibuild                       # interactive menu
//! multibuild -b                    # menu, but always the plain full build
//! multibuild -c                    # purge ~/.m2/repository first
//! multibuild -d ~/code             # scan another directory
//! multibuild -sm                   # no menu: update and build everything
//! multibuild -sm --branch develop --command 3 --continue-on-error
//! ```

mod menu;
mod resolve;
mod signals;
mod summary;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use multibuild_core::{
    locator, AllowedRepoNames, BranchName, CommandOverride, FailurePolicy, Repository,
    RepositoryError, Settings, DEFAULT_BRANCH,
};
use multibuild_engine::{Engine, RunReport, ShellRunner};

use menu::{Menu, PromptError, TerminalInteraction};
use resolve::{FlagChoices, ResolveError};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "multibuild",
    version,
    about = ">>>>> Options to update and build projects! <<<<<",
    long_about = None,
)]
struct Cli {
    /// Build with the plain full build command ("mvn clean install") without
    /// asking which build command to use.
    #[arg(short = 'b', long)]
    build_full: bool,

    /// Delete all folders and files from the Maven cache (~/.m2/repository)
    /// before processing any repository. Forces every repository to build.
    #[arg(short = 'c', long = "clean-m2")]
    clean_m2: bool,

    /// Directory holding the checkouts. Defaults to the current directory.
    #[arg(short = 'd', long, value_name = "DIR")]
    repos_directory: Option<PathBuf>,

    /// Skip the menu: every repository found is updated and built with the
    /// default command. `-sm` is accepted as well.
    #[arg(short = 's', long)]
    skip_menu: bool,

    /// Branch to check out and pull when the menu is skipped.
    #[arg(long, value_name = "BRANCH", default_value = DEFAULT_BRANCH)]
    branch: BranchName,

    /// Catalog key of the build command to use instead of asking.
    #[arg(long, value_name = "KEY", conflicts_with = "build_full")]
    command: Option<u8>,

    /// Pin a repository to a catalog entry, e.g. `--override SDK=1`. Repeatable.
    #[arg(long = "override", value_name = "LABEL=KEY")]
    overrides: Vec<CommandOverride>,

    /// Recognised repository directory suffix. Repeatable; replaces the
    /// built-in list when given.
    #[arg(long = "repo-suffix", value_name = "SUFFIX")]
    repo_suffixes: Vec<String>,

    /// Keep going with the next repository when one fails.
    #[arg(long)]
    continue_on_error: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Log each command line before it runs.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = base_settings(self.clean_m2, Settings::from_env())?;
        if !self.repo_suffixes.is_empty() {
            settings.allowed = AllowedRepoNames::new(self.repo_suffixes.iter().cloned());
        }
        settings.overrides = self.overrides.clone();
        if self.continue_on_error {
            settings.failure_policy = FailurePolicy::ContinueOnError;
        }
        Ok(settings)
    }

    fn flags(&self) -> FlagChoices {
        FlagChoices {
            build_full: self.build_full,
            clean_cache: self.clean_m2,
            skip_menu: self.skip_menu,
            branch: self.branch.clone(),
            command: self.command,
        }
    }

    fn run(self) -> Result<RunReport> {
        signals::install_interrupt_handler()?;
        let settings = self.settings()?;

        let paths = locator::fetch_repo_paths(self.repos_directory.as_deref(), &settings.allowed)?;
        let repositories = paths
            .into_iter()
            .map(Repository::from_path)
            .collect::<Result<Vec<_>, _>>()?;

        let mut menu = Menu::new(TerminalInteraction::default());
        let resolved = resolve::resolve(&self.flags(), &settings, repositories, &mut menu)?;
        tracing::debug!(options = ?resolved.options, "options resolved");

        let report = Engine::new(ShellRunner, &settings)
            .process(&resolved.options, &resolved.repositories)
            .context("build process failed")?;

        if self.json {
            summary::print_json(&resolved.options, &report)?;
        } else {
            summary::print_table(&report);
        }
        Ok(report)
    }
}

/// The home directory is only required when the cache is going to be purged.
fn base_settings(
    clean_cache: bool,
    from_env: Result<Settings, RepositoryError>,
) -> Result<Settings> {
    match from_env {
        Ok(settings) => Ok(settings),
        Err(err) if clean_cache => Err(err).context("failed to locate the Maven cache"),
        Err(err) => {
            tracing::debug!(error = %err, "no home directory; cache purge unavailable");
            Ok(Settings::without_cache())
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing(cli.verbose);

    match cli.run() {
        Ok(report) if report.has_failures() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            match left_prompt(&err) {
                Some(PromptError::Interrupted) => farewell("CTRL+C"),
                Some(PromptError::Eof) => farewell("CTRL+D / CTRL+Z"),
                _ => return report_failure(&err),
            }
            ExitCode::SUCCESS
        }
    }
}

/// Rewrite the two-letter `-sm` short flag, which clap cannot express.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-sm" {
                OsString::from("--skip-menu")
            } else {
                arg
            }
        })
        .collect()
}

fn left_prompt(err: &anyhow::Error) -> Option<&PromptError> {
    match err.downcast_ref::<ResolveError>() {
        Some(ResolveError::Prompt(prompt)) => Some(prompt),
        _ => err.downcast_ref::<PromptError>(),
    }
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    if let Some(RepositoryError::NoRepositoriesFound { root }) =
        err.downcast_ref::<RepositoryError>()
    {
        tracing::error!(
            "Failed to read the repositories directories under {}. \
             Please make sure you have cloned the git repositories.",
            root.display()
        );
        return ExitCode::FAILURE;
    }
    tracing::error!("{err:#}");
    tracing::debug!("{err:?}");
    ExitCode::FAILURE
}

pub(crate) fn farewell(how: &str) {
    tracing::info!("The process has finished by {how}.");
    tracing::info!("Exiting! Have a nice day!!!");
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
