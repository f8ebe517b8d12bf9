//! Configuration handling for commit-toolkit.
//!
//! This module provides configuration loading and validation,
//! supporting both `commit-toolkit.toml` files and sensible defaults.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "commit-toolkit.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Commit-message generator settings.
    pub message: MessageConfig,
    /// Lint orchestrator settings.
    pub lint: LintConfig,
    /// Desktop notifier settings.
    pub notify: NotifyConfig,
    /// Clean launcher settings.
    pub launch: LaunchConfig,
}

impl Config {
    /// Loads configuration from the default location.
    pub fn load() -> Result<Self> {
        let path = Self::find_config_file()?;
        Self::load_from(&path)
    }

    /// Loads configuration or returns defaults if not found.
    pub fn load_or_default() -> Result<Self> {
        match Self::find_config_file() {
            Ok(path) => Self::load_from(&path),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io("read config", e))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config_parse_with_source("Failed to parse TOML", e))?;

        config.validate()?;

        Ok(config)
    }

    /// Finds the configuration file by searching up the directory tree.
    pub fn find_config_file() -> Result<PathBuf> {
        let cwd = std::env::current_dir().map_err(|e| Error::io("get current dir", e))?;
        Self::find_config_file_from(&cwd)
    }

    /// Finds the configuration file starting from a specific directory.
    pub fn find_config_file_from(start: &Path) -> Result<PathBuf> {
        let mut current = start;
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::ConfigNotFound {
            path: start.join(CONFIG_FILE_NAME),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if humantime::parse_duration(&self.message.timeout).is_err() {
            return Err(Error::ConfigInvalid {
                field: "message.timeout".to_string(),
                message: format!("Invalid duration: {}", self.message.timeout),
            });
        }

        if humantime::parse_duration(&self.notify.timeout).is_err() {
            return Err(Error::ConfigInvalid {
                field: "notify.timeout".to_string(),
                message: format!("Invalid duration: {}", self.notify.timeout),
            });
        }

        if self.message.max_tokens == 0 {
            return Err(Error::ConfigInvalid {
                field: "message.max_tokens".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if let Some(t) = self.message.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(Error::ConfigInvalid {
                    field: "message.temperature".to_string(),
                    message: format!("must be between 0.0 and 2.0, got {t}"),
                });
            }
        }

        for (field, tool) in [
            ("lint.formatter", &self.lint.formatter),
            ("lint.linter", &self.lint.linter),
            ("lint.typechecker", &self.lint.typechecker),
        ] {
            if tool.command.is_empty() {
                return Err(Error::ConfigInvalid {
                    field: format!("{field}.command"),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if self.launch.runner.is_empty() {
            return Err(Error::ConfigInvalid {
                field: "launch.runner".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generates default configuration as a string.
    #[must_use]
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Commit-message generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Environment variable overriding the model name.
    pub model_env: String,
    /// Model to request when no override is set.
    pub model: String,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature; omitted from the request when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// System instruction; omitted from the request when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Whether to sanitize the returned text.
    pub sanitize: bool,
    /// Request timeout (humantime format, e.g. "30s").
    pub timeout: String,
}

/// Default system instruction constraining output to the message text.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You write git commit messages. Respond with the commit message text only, \
     no explanations, no quotes, no markdown.";

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            model_env: "OPENROUTER_MODEL".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
            max_tokens: 150,
            temperature: Some(0.2),
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            sanitize: true,
            timeout: "30s".to_string(),
        }
    }
}

impl MessageConfig {
    /// Resolves the model name, honoring the configured env override.
    #[must_use]
    pub fn resolve_model(&self) -> String {
        std::env::var(&self.model_env)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.model.clone())
    }

    /// Resolves the API key from the configured environment variable.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the request timeout as a duration.
    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        humantime::parse_duration(&self.timeout).unwrap_or(Duration::from_secs(30))
    }
}

/// Lint orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Source path the tools are pointed at.
    pub path: String,
    /// Code formatter.
    pub formatter: ToolConfig,
    /// Linter.
    pub linter: ToolConfig,
    /// Type checker.
    pub typechecker: ToolConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            path: "src".to_string(),
            formatter: ToolConfig {
                command: "ruff".to_string(),
                args: vec!["format".to_string()],
                check_args: vec!["format".to_string(), "--check".to_string()],
            },
            linter: ToolConfig {
                command: "ruff".to_string(),
                args: vec!["check".to_string(), "--fix".to_string()],
                check_args: vec!["check".to_string()],
            },
            typechecker: ToolConfig {
                command: "mypy".to_string(),
                args: Vec::new(),
                check_args: Vec::new(),
            },
        }
    }
}

/// Configuration for a single external tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name.
    pub command: String,
    /// Arguments in fix mode.
    pub args: Vec<String>,
    /// Arguments in check-only mode.
    pub check_args: Vec<String>,
}

/// Desktop notifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Dialog command to spawn.
    pub command: String,
    /// Auto-dismiss timeout (humantime format).
    pub timeout: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            command: "zenity".to_string(),
            timeout: "30s".to_string(),
        }
    }
}

impl NotifyConfig {
    /// Returns the auto-dismiss timeout in whole seconds.
    #[must_use]
    pub fn timeout_secs(&self) -> u64 {
        humantime::parse_duration(&self.timeout)
            .unwrap_or(Duration::from_secs(30))
            .as_secs()
    }
}

/// Clean launcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Package-manager executable used to run the application.
    pub runner: String,
    /// Arguments passed to the runner.
    pub run_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            runner: "uv".to_string(),
            run_args: vec!["run".to_string(), "main.py".to_string()],
        }
    }
}
