//! Subprocess execution.
//!
//! Commands are shell-interpreted command lines run with the repository as
//! the working directory. Stdout is captured and returned; stderr and stdin
//! stay attached to the terminal so git credential prompts and build errors
//! remain visible.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{CommandExecutionError, CommandFailure};

/// Runs one command line to completion.
pub trait CommandRunner {
    /// Run `command` in `working_dir`, returning its captured stdout.
    ///
    /// Blocks until the process exits. A non-zero exit is an error.
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, CommandExecutionError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, CommandExecutionError> {
        (**self).run(command, working_dir)
    }
}

/// [`CommandRunner`] backed by the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, CommandExecutionError> {
        let fail = |cause| CommandExecutionError {
            command: command.to_string(),
            working_dir: working_dir.to_path_buf(),
            cause,
        };

        tracing::debug!(command, dir = %working_dir.display(), "spawning");
        let output = shell(command)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| fail(CommandFailure::Spawn(e)))?;

        if !output.status.success() {
            return Err(fail(CommandFailure::Exit {
                code: output.status.code(),
            }));
        }

        tracing::info!(
            "The command \"{command}\" in the repository {} has executed successfully",
            working_dir.display()
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
