use std::io;

use thiserror::Error;

/// Errors surfaced by the navigator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid navigation target: {0}")]
    InvalidTarget(String),

    #[error("Content loader is not running")]
    WorkerDisconnected,
}

/// Errors produced while resolving a target into content.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No {kind} found for '{key}'")]
    NotFound { kind: &'static str, key: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid content document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid link in content document: {0}")]
    Link(#[from] NavigationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}
