//! Lint orchestration.
//!
//! Runs the configured formatter, linter, and type checker against the
//! project source path, strictly sequentially and always all three: a
//! failing tool is recorded, not fatal, so the report shows every problem in
//! one pass. Overall success is the logical AND of the three exit codes.

use crate::config::{LintConfig, ToolConfig};
use crate::core::executor::{CommandOutput, ExecuteOptions, Executor};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Whether tools may modify files or only report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LintMode {
    /// Formatter formats, linter auto-fixes.
    #[default]
    Fix,
    /// Check-only; nothing is modified.
    Check,
}

impl LintMode {
    /// Returns a human-readable name for the mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fix => "fix",
            Self::Check => "check",
        }
    }
}

/// Result of running a single tool.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Tool name (format, lint, typecheck).
    pub name: String,
    /// Whether the tool exited 0.
    pub passed: bool,
    /// Captured output and exit code.
    pub output: CommandOutput,
}

/// Result of running all three tools.
#[derive(Debug)]
pub struct LintReport {
    /// Mode the tools ran in.
    pub mode: LintMode,
    /// Per-tool results, in execution order.
    pub results: Vec<ToolResult>,
    /// Total duration.
    pub duration: Duration,
}

impl LintReport {
    /// Returns true if every tool passed.
    #[must_use]
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Returns the number of passed tools.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Returns the number of failed tools.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Returns failed tool results.
    #[must_use]
    pub fn failed(&self) -> impl Iterator<Item = &ToolResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Runner for the three configured tools.
#[derive(Debug)]
pub struct LintRunner {
    config: LintConfig,
    progress: bool,
}

impl LintRunner {
    /// Creates a new runner with the given configuration.
    #[must_use]
    pub fn new(config: LintConfig) -> Self {
        Self {
            config,
            progress: false,
        }
    }

    /// Enables a progress spinner while tools run.
    #[must_use]
    pub const fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    fn tools(&self) -> [(&'static str, &ToolConfig); 3] {
        [
            ("format", &self.config.formatter),
            ("lint", &self.config.linter),
            ("typecheck", &self.config.typechecker),
        ]
    }

    /// Runs all three tools sequentially.
    ///
    /// Never short-circuits: each tool runs regardless of earlier failures.
    pub async fn run(&self, mode: LintMode) -> LintReport {
        let start = std::time::Instant::now();
        let executor = Executor::new();

        let spinner = if self.progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| {
                    ProgressStyle::default_spinner()
                }),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let mut results = Vec::with_capacity(3);
        for (name, tool) in self.tools() {
            if let Some(ref pb) = spinner {
                pb.set_message(format!("{name}: {}", tool.command));
            }
            results.push(self.run_tool(&executor, name, tool, mode).await);
        }

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        LintReport {
            mode,
            results,
            duration: start.elapsed(),
        }
    }

    /// Runs a single tool, mapping spawn failures to a failed result.
    async fn run_tool(
        &self,
        executor: &Executor,
        name: &str,
        tool: &ToolConfig,
        mode: LintMode,
    ) -> ToolResult {
        let mut args = match mode {
            LintMode::Fix => tool.args.clone(),
            LintMode::Check => tool.check_args.clone(),
        };
        args.push(self.config.path.clone());

        match executor
            .execute(&tool.command, &args, ExecuteOptions::default())
            .await
        {
            Ok(output) => ToolResult {
                name: name.to_string(),
                passed: output.success(),
                output,
            },
            // Missing binary or spawn error: the tool failed, the run goes on.
            Err(err) => ToolResult {
                name: name.to_string(),
                passed: false,
                output: CommandOutput::spawn_failure(err.to_string()),
            },
        }
    }
}
