//! Error types for multibuild-engine.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Why a subprocess did not succeed.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The shell itself could not be started.
    #[error("could not start the process: {0}")]
    Spawn(#[source] std::io::Error),

    /// The process ran and exited non-zero (or was killed by a signal).
    #[error("{}", describe_exit(*code))]
    Exit { code: Option<i32> },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by a signal".to_string(),
    }
}

/// A command line that failed in a given working directory.
#[derive(Debug, Error)]
#[error("failed executing the command \"{command}\" in {}", working_dir.display())]
pub struct CommandExecutionError {
    pub command: String,
    pub working_dir: PathBuf,
    #[source]
    pub cause: CommandFailure,
}

/// Which half of the per-repository sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Update,
    Build,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Update => write!(f, "update"),
            Stage::Build => write!(f, "build"),
        }
    }
}

/// A [`CommandExecutionError`] attributed to the repository it happened in.
#[derive(Debug, Error)]
#[error("repository {label} ({}) failed during {stage}", path.display())]
pub struct BuilderProcessError {
    pub label: String,
    pub path: PathBuf,
    pub stage: Stage,
    #[source]
    pub source: CommandExecutionError,
}

/// The dependency cache could not be purged.
#[derive(Debug, Error)]
pub enum CacheCleanupError {
    #[error("cannot clean the cache: {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("deleting the folders and files from {path} has failed")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    CacheCleanup(#[from] CacheCleanupError),

    #[error(transparent)]
    BuilderProcess(#[from] BuilderProcessError),
}
