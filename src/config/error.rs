//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config file `{0}` not found. Run 'cardassets init' to create one.")]
    NotFound(PathBuf),

    #[error("Config validation error:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}
