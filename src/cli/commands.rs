//! CLI command implementations.

use crate::config::{Config, CONFIG_FILE_NAME};
use crate::core::error::{Error, Result};
use crate::launch;
use crate::lint::{LintMode, LintRunner};
use crate::message::{self, GeneratorOptions};
use crate::notify::Notifier;
use console::style;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Simulated scaffolding session printed by `ctk demo`.
///
/// Documentation output only; nothing here is executed.
const DEMO_TRANSCRIPT: &str = r#"$ scaffold new my-project
? Project name: my-project
? Description: A small command-line tool
? Template: python-cli
? Initialize git repository? Yes
? Set up pre-commit checks? Yes

  Creating my-project/
  Rendering template python-cli
  Initializing git repository
  Writing commit-toolkit.toml

$ cd my-project && ctk message "initial scaffold"
Add initial project scaffold

$ ctk lint --check
  format     passed
  lint       passed
  typecheck  passed
"#;

/// Builds a tokio runtime for commands that need async execution.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create runtime: {e}"),
    })
}

/// Generate a commit message.
pub fn message(prompt: Option<&str>, preset: Option<&str>, explain: bool) -> Result<ExitCode> {
    let config = Config::load_or_default()?;

    let mut options = GeneratorOptions::from_config(&config.message);
    if let Some(name) = preset {
        // clap restricts the value set; an unknown name here is a bug.
        if !options.apply_preset(name) {
            return Err(Error::ConfigInvalid {
                field: "preset".to_string(),
                message: format!("Unknown preset: {name}"),
            });
        }
    }

    let api_key = config.message.resolve_api_key();
    let prompt = prompt.unwrap_or_default();

    let outcome =
        runtime()?.block_on(message::generate(&options, api_key.as_deref(), prompt));

    if explain {
        if let Some(ref reason) = outcome.fallback {
            eprintln!("{} Fallback used: {reason}", style("!").yellow());
        } else {
            eprintln!("{} Generated by {}", style("•").cyan(), options.model);
        }
    }

    // Fallback is not a failure: the message must never block a commit.
    println!("{}", outcome.message);
    Ok(ExitCode::SUCCESS)
}

/// Run the lint tools.
pub fn lint(check: bool, verbose: bool) -> Result<ExitCode> {
    let config = Config::load_or_default()?;

    let mode = if check { LintMode::Check } else { LintMode::Fix };
    let runner = LintRunner::new(config.lint).with_progress();

    let report = runtime()?.block_on(runner.run(mode));

    for result in &report.results {
        let mark = if result.passed {
            style("✓").green()
        } else {
            style("✗").red()
        };
        eprintln!(
            "{} {} ({:?})",
            mark,
            style(&result.name).bold(),
            result.output.duration
        );

        if !result.passed || verbose {
            for line in result.output.combined_output().lines().take(50) {
                eprintln!("    {line}");
            }
        }
    }

    eprintln!();
    if report.success() {
        eprintln!(
            "{} All tools passed ({} run, {} mode) in {:?}",
            style("✓").green().bold(),
            report.passed_count(),
            report.mode.name(),
            report.duration
        );
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} {} tool(s) failed",
            style("✗").red().bold(),
            report.failed_count()
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Show a desktop notification.
pub fn notify(message: &str, title: &str, timeout: Option<&str>) -> Result<ExitCode> {
    let config = Config::load_or_default()?;

    let timeout_secs = match timeout {
        Some(raw) => humantime::parse_duration(raw)
            .map_err(|e| Error::ConfigInvalid {
                field: "--timeout".to_string(),
                message: e.to_string(),
            })?
            .as_secs(),
        None => config.notify.timeout_secs(),
    };

    let notifier = Notifier::new(config.notify.command, timeout_secs);

    if notifier.notify(title, message) {
        eprintln!("{} Notification dispatched", style("✓").green());
    } else {
        eprintln!(
            "{} Dialog command '{}' unavailable; no notification shown",
            style("!").yellow(),
            notifier.command()
        );
    }

    // Notification failure never fails the caller.
    Ok(ExitCode::SUCCESS)
}

/// Clear the terminal and exec the application.
pub fn launch() -> Result<ExitCode> {
    let config = Config::load_or_default()?;
    launch::launch(&config.launch)
}

/// Print the simulated scaffolding session.
pub fn demo() -> Result<ExitCode> {
    print!("{DEMO_TRANSCRIPT}");
    Ok(ExitCode::SUCCESS)
}

/// Initialize configuration.
pub fn init(force: bool) -> Result<ExitCode> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    // Check if config already exists
    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration already exists: {}",
            style("!").yellow(),
            config_path.display()
        );
        eprintln!("  Use --force to overwrite.");
        return Ok(ExitCode::FAILURE);
    }

    std::fs::write(&config_path, Config::default_toml())
        .map_err(|e| Error::io("write config", e))?;

    eprintln!("{} Created {}", style("✓").green(), config_path.display());

    eprintln!("\nNext steps:");
    eprintln!("  1. Review and customize {CONFIG_FILE_NAME}");
    eprintln!("  2. Export your API key (default: OPENROUTER_API_KEY)");
    eprintln!("  3. Run: ctk validate");

    Ok(ExitCode::SUCCESS)
}

/// Validate configuration.
pub fn validate() -> Result<ExitCode> {
    match Config::load() {
        Ok(config) => match config.validate() {
            Ok(()) => {
                eprintln!("{} Configuration is valid", style("✓").green());
                Ok(ExitCode::SUCCESS)
            },
            Err(e) => {
                eprintln!("{} Configuration validation failed: {e}", style("✗").red());
                Ok(ExitCode::FAILURE)
            },
        },
        Err(Error::ConfigNotFound { path }) => {
            eprintln!(
                "{} Configuration not found: {}",
                style("!").yellow(),
                path.display()
            );
            eprintln!("  Run: ctk init");
            Ok(ExitCode::FAILURE)
        },
        Err(e) => {
            eprintln!("{} Failed to load configuration: {e}", style("✗").red());
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Show configuration.
pub fn config(raw: bool) -> Result<ExitCode> {
    match Config::find_config_file() {
        Ok(path) => {
            eprintln!("Configuration file: {}", path.display());

            if raw {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io("read config", e))?;
                eprintln!();
                std::io::stdout()
                    .write_all(content.as_bytes())
                    .map_err(|e| Error::io("write output", e))?;
            }

            Ok(ExitCode::SUCCESS)
        },
        Err(Error::ConfigNotFound { .. }) => {
            eprintln!("{} No configuration file found", style("!").yellow());
            eprintln!("  Run: ctk init");
            Ok(ExitCode::FAILURE)
        },
        Err(e) => Err(e),
    }
}

/// Generate shell completions.
pub fn completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    clap_complete::generate(
        shell,
        &mut super::Cli::command(),
        "ctk",
        &mut std::io::stdout(),
    );
}
