//! Error taxonomy for the generation pipeline
//!
//! Every variant except `Validation`, `Config` and `Prompt` corresponds to a failed
//! external operation (git, the rename utility, a package manager, CocoaPods or
//! the filesystem).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Bad answer to a prompt (re-asked interactively, fatal when pre-supplied)
    #[error("{0}")]
    Validation(String),

    /// Invalid pipeline configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to clone template {url} into {}: {reason}", .path.display())]
    Clone {
        url: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Filesystem error at {}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename project: {0}")]
    Rename(String),

    #[error("Failed to install dependencies: {0}")]
    Install(String),

    #[error("Failed to install CocoaPods: {0}")]
    NativeInstall(String),

    #[error("Git command failed: {0}")]
    Git(String),
}

impl ScaffoldError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Rename failures terminate the program immediately instead of unwinding
    /// through the top-level handler.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Rename(_))
    }
}
