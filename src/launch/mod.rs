//! Clean process launch.
//!
//! Entry point that clears the terminal of prior shell noise, resolves the
//! configured package-manager runner, and replaces the current process image
//! with the application. On Unix `exec` means no child process and no
//! return; elsewhere the launcher degrades to spawn-and-wait.

use crate::config::LaunchConfig;
use crate::core::error::{Error, Result};
use crate::core::executor::Executor;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

/// Delay between the two terminal clears.
const CLEAR_DELAY: Duration = Duration::from_millis(150);

/// Environment variable forced so the launched application's text streams
/// are UTF-8 regardless of the inherited locale.
const ENCODING_VAR: (&str, &str) = ("PYTHONIOENCODING", "utf-8");

/// Clears the terminal and replaces this process with the application.
///
/// Only returns on failure (or, on non-Unix platforms, with the child's
/// exit status after it completes).
pub fn launch(config: &LaunchConfig) -> Result<ExitCode> {
    clear_terminal();
    std::thread::sleep(CLEAR_DELAY);
    clear_terminal();

    let runner = Executor::resolve(&config.runner)?;
    debug!(runner = %runner.display(), args = ?config.run_args, "launching application");

    let command = build_command(&runner, config);
    exec(command)
}

/// Clears the screen, best-effort; a redirected stdout is not an error.
fn clear_terminal() {
    let term = console::Term::stdout();
    if let Err(err) = term.clear_screen() {
        debug!(error = %err, "could not clear terminal");
    }
}

/// Builds the runner invocation: resolved executable, configured arguments,
/// inherited environment with the encoding variable forced.
fn build_command(runner: &Path, config: &LaunchConfig) -> std::process::Command {
    let mut command = std::process::Command::new(runner);
    command.args(&config.run_args);
    command.env(ENCODING_VAR.0, ENCODING_VAR.1);
    command
}

#[cfg(unix)]
fn exec(mut command: std::process::Command) -> Result<ExitCode> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    let err = command.exec();
    Err(Error::io("replace process image", err))
}

#[cfg(not(unix))]
fn exec(mut command: std::process::Command) -> Result<ExitCode> {
    let status = command
        .status()
        .map_err(|e| Error::io("spawn application", e))?;

    if status.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
