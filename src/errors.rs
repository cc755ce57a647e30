// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshtaskError {
    /// Malformed task declaration or task file.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A declared input does not exist when the task is evaluated.
    #[error(
        "Cannot run task {task} because the following inputs are missing: {}",
        join_paths(.missing)
    )]
    MissingInput { task: String, missing: Vec<PathBuf> },

    /// A task body returned an error or panicked.
    #[error("Task {task} failed: {source}")]
    TaskExecution {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FreshtaskError {
    /// Declaration-time problems: bad task arguments or an unreadable task file.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FreshtaskError::ConfigError(_) | FreshtaskError::TomlError(_)
        )
    }
}

/// Join paths the way they are shown to users: `a, b, c`.
pub fn join_paths<P: AsRef<std::path::Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, FreshtaskError>;
