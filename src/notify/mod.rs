//! Desktop notifications.
//!
//! Best-effort popups via an external dialog utility. The notifier probes
//! PATH for the configured command, spawns it detached with an auto-dismiss
//! timeout, and reports whether a dialog was dispatched. It never errors:
//! missing infrastructure and spawn failures are logged and become `false`.

use crate::config::NotifyConfig;
use crate::core::executor::Executor;
use tracing::{debug, warn};

/// Dispatcher for transient desktop dialogs.
#[derive(Debug, Clone)]
pub struct Notifier {
    command: String,
    timeout_secs: u64,
}

impl Notifier {
    /// Creates a notifier for a specific dialog command.
    pub fn new(command: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            command: command.into(),
            timeout_secs,
        }
    }

    /// Creates a notifier from configuration.
    #[must_use]
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(config.command.clone(), config.timeout_secs())
    }

    /// Returns the dialog command name.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns true if the dialog command exists in PATH.
    #[must_use]
    pub fn available(&self) -> bool {
        Executor::command_exists(&self.command)
    }

    /// Shows a transient notification, fire-and-forget.
    ///
    /// Returns true if a dialog process was spawned; the dialog's fate is
    /// never observed. Returns false (and logs) when the command is absent
    /// or the spawn fails.
    pub fn notify(&self, title: &str, body: &str) -> bool {
        if !self.available() {
            warn!(
                command = %self.command,
                "dialog command not found in PATH; skipping notification"
            );
            return false;
        }

        let args = self.dialog_args(title, body);
        match Executor::spawn_detached(&self.command, &args) {
            Ok(()) => {
                debug!(command = %self.command, title = %title, "notification dispatched");
                true
            },
            Err(err) => {
                warn!(command = %self.command, error = %err, "failed to spawn dialog");
                false
            },
        }
    }

    /// Builds the dialog argument vector (zenity-style flags).
    fn dialog_args(&self, title: &str, body: &str) -> Vec<String> {
        vec![
            "--info".to_string(),
            format!("--title={title}"),
            format!("--text={body}"),
            format!("--timeout={}", self.timeout_secs),
        ]
    }
}
