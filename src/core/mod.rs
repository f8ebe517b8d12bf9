//! Core functionality for commit-toolkit.

pub mod error;
pub mod executor;

pub use error::{Error, Result};
pub use executor::{CommandOutput, ExecuteOptions, Executor};
