//! CTRL+C while a command is running.
//!
//! Prompts see CTRL+C as [`PromptError::Interrupted`](crate::menu::PromptError)
//! because the line editor owns the terminal. Outside a prompt, the signal is
//! caught here so the run ends with the farewell instead of a bare kill. The
//! child process receives the same signal from the terminal; nothing already
//! reset or checked out is rolled back.

use std::process;
use std::thread;

use anyhow::{Context, Result};

pub fn install_interrupt_handler() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the signal runtime")?;

    thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    crate::farewell("CTRL+C");
                    process::exit(0);
                }
            });
        })
        .context("failed to spawn the signal thread")?;
    Ok(())
}
