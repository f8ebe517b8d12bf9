//! # commit-toolkit
//!
//! Commit workflow utilities for project scaffolding: AI-assisted commit
//! messages, lint orchestration, desktop notifications, and a clean
//! application launcher — one binary (`ctk`) instead of a pile of scripts.
//!
//! ## Features
//!
//! - **Commit messages**: one configurable generator over a chat-completion
//!   endpoint, with named presets and a fixed fallback so a commit is never
//!   blocked by a failed request
//! - **Lint orchestration**: formatter, linter, and type checker run
//!   sequentially with aggregated pass/fail reporting
//! - **Notifications**: fire-and-forget desktop dialogs that degrade to a
//!   logged warning when no dialog utility is installed
//! - **Clean launch**: terminal clear plus in-place process replacement
//!
//! ## Example
//!
//! ```rust,no_run
//! use commit_toolkit::{Config, GeneratorOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_or_default().unwrap_or_default();
//!     let options = GeneratorOptions::from_config(&config.message);
//!     let api_key = config.message.resolve_api_key();
//!
//!     let outcome =
//!         commit_toolkit::message::generate(&options, api_key.as_deref(), "add retry logic")
//!             .await;
//!
//!     // Always printable: generated text or the fallback message.
//!     println!("{}", outcome.message);
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/commit-toolkit/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cli;
pub mod config;
pub mod core;
pub mod launch;
pub mod lint;
pub mod message;
pub mod notify;

// Re-export main types for convenience
pub use config::Config;
pub use core::error::{Error, Result};
pub use lint::{LintMode, LintReport, LintRunner};
pub use message::{GenerateOutcome, GeneratorOptions, FALLBACK_MESSAGE};
pub use notify::Notifier;
