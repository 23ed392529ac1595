//! # multibuild-engine
//!
//! Sequential update-and-build orchestration over discovered repositories.
//!
//! Build an [`Engine`] from a [`CommandRunner`] and the run's
//! [`Settings`](multibuild_core::Settings), then call [`Engine::process`].

pub mod cache;
pub mod engine;
pub mod error;
pub mod report;
pub mod runner;

pub use engine::Engine;
pub use error::{
    BuilderProcessError, CacheCleanupError, CommandExecutionError, CommandFailure, EngineError,
    Stage,
};
pub use report::{RepoOutcome, RepoStatus, RunReport};
pub use runner::{CommandRunner, ShellRunner};
