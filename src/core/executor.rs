//! External process execution.
//!
//! Every component here invokes known binaries with fixed argument vectors
//! (lint tools, the dialog utility, the package-manager runner), so commands
//! are spawned directly rather than through a shell. Output capture and
//! timeouts follow the same model as check runners: the caller gets an exit
//! code plus captured text, never a panic.

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Output from a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the command.
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Whether the command was killed due to timeout.
    pub timed_out: bool,
    /// Duration the command took to run.
    pub duration: Duration,
}

impl CommandOutput {
    /// Returns true if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0 && !self.timed_out
    }

    /// Returns combined stdout and stderr output.
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// A synthetic output for a command that could not be spawned.
    #[must_use]
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            exit_code: 127,
            stdout: String::new(),
            stderr: message.into(),
            timed_out: false,
            duration: Duration::ZERO,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Working directory for the command.
    pub cwd: Option<PathBuf>,
    /// Timeout for the command.
    pub timeout: Option<Duration>,
    /// Environment variables to set.
    pub env: Vec<(String, String)>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            timeout: Some(Duration::from_secs(300)), // 5 minutes default
            env: Vec::new(),
        }
    }
}

impl ExecuteOptions {
    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Executor for running external commands.
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes a command with arguments, capturing stdout and stderr.
    pub async fn execute(
        &self,
        program: &str,
        args: &[String],
        options: ExecuteOptions,
    ) -> Result<CommandOutput> {
        let start = std::time::Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(ref cwd) = options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // A timed-out tool must not keep running after the report is printed.
        cmd.kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| Error::io("spawn command", e))?;

        let wait = async move {
            child
                .wait_with_output()
                .await
                .map_err(|e| Error::io("wait for command", e))
        };

        let output = if let Some(timeout_duration) = options.timeout {
            match timeout(timeout_duration, wait).await {
                Ok(result) => result?,
                Err(_) => {
                    // Dropping the wait future kills the child (kill_on_drop).
                    return Ok(CommandOutput {
                        exit_code: 124,
                        stdout: String::new(),
                        stderr: "Command timed out".to_string(),
                        timed_out: true,
                        duration: start.elapsed(),
                    });
                },
            }
        } else {
            wait.await?
        };

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            timed_out: false,
            duration: start.elapsed(),
        })
    }

    /// Spawns a command detached, without waiting for it.
    ///
    /// The child handle is dropped immediately; its exit status and output
    /// are never observed. Used for fire-and-forget desktop dialogs.
    pub fn spawn_detached(program: &str, args: &[String]) -> Result<()> {
        let child = std::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::io("spawn detached command", e))?;
        drop(child);
        Ok(())
    }

    /// Checks if a command exists in PATH.
    #[must_use]
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Resolves a command to its absolute path.
    pub fn resolve(command: &str) -> Result<PathBuf> {
        which::which(command).map_err(|_| Error::CommandNotFound {
            command: command.to_string(),
        })
    }
}
