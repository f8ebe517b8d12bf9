//! Command-line interface for commit-toolkit.
//!
//! This module provides the `ctk` CLI with subcommands for:
//! - `message`: Generate a commit message via the chat-completion endpoint
//! - `lint`: Run the formatter, linter, and type checker
//! - `notify`: Show a transient desktop notification
//! - `launch`: Clear the terminal and exec the application
//! - `demo`: Print a simulated scaffolding session
//! - `init` / `validate` / `config`: Manage configuration

mod commands;

use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Commit workflow utilities for project scaffolding.
#[derive(Debug, Parser)]
#[command(
    name = "ctk",
    author,
    version,
    about = "Commit workflow utilities: AI commit messages, lint orchestration, notifications",
    long_about = r#"
commit-toolkit (ctk) bundles the small utilities around a commit workflow:
generating commit messages from a prompt, orchestrating code-quality tools,
desktop notifications, and a clean application launcher.

Quick start:
  ctk init                       # Create configuration
  ctk message "add retry logic"  # Generate a commit message
  ctk lint --check               # Run formatter, linter, type checker

Environment variables:
  OPENROUTER_API_KEY   API key for the chat-completion endpoint
  OPENROUTER_MODEL     Override the configured model
(both names are configurable in commit-toolkit.toml)
"#,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use color output.
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Always use color.
    Always,
    /// Auto-detect color support.
    #[default]
    Auto,
    /// Never use color.
    Never,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a commit message from a prompt.
    #[command(visible_alias = "m")]
    Message {
        /// Prompt describing the change. Absent: print the fallback message.
        prompt: Option<String>,

        /// Use a preset parameter set.
        #[arg(short, long, value_parser = ["brief", "standard", "detailed"])]
        preset: Option<String>,

        /// Report on stderr why the fallback was used, if it was.
        #[arg(long)]
        explain: bool,
    },

    /// Run the formatter, linter, and type checker.
    #[command(visible_alias = "l")]
    Lint {
        /// Check only; do not modify files.
        #[arg(long)]
        check: bool,
    },

    /// Show a transient desktop notification.
    Notify {
        /// Notification body text.
        message: String,

        /// Notification title.
        #[arg(short, long, default_value = "commit-toolkit")]
        title: String,

        /// Auto-dismiss timeout override (e.g. "10s").
        #[arg(long)]
        timeout: Option<String>,
    },

    /// Clear the terminal and replace this process with the application.
    Launch,

    /// Print a simulated scaffolding session for documentation.
    Demo,

    /// Initialize commit-toolkit configuration.
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite existing configuration.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration file.
    #[command(visible_alias = "v")]
    Validate,

    /// Show configuration file location and contents.
    Config {
        /// Output raw TOML.
        #[arg(long)]
        raw: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Runs the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.verbose, cli.quiet);

    // Set up color
    setup_color(cli.color);

    match cli.command {
        Commands::Message {
            prompt,
            preset,
            explain,
        } => commands::message(prompt.as_deref(), preset.as_deref(), explain),
        Commands::Lint { check } => commands::lint(check, cli.verbose),
        Commands::Notify {
            message,
            title,
            timeout,
        } => commands::notify(&message, &title, timeout.as_deref()),
        Commands::Launch => commands::launch(),
        Commands::Demo => commands::demo(),
        Commands::Init { force } => commands::init(force),
        Commands::Validate => commands::validate(),
        Commands::Config { raw } => commands::config(raw),
        Commands::Completions { shell } => {
            commands::completions(shell);
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Sets up logging based on verbosity flags.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sets up color output.
fn setup_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        },
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        },
        ColorChoice::Auto => {
            // Let console crate auto-detect
        },
    }
}
