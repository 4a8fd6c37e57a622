//! Error types for style pipeline compilation and configuration loading.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for style compilation and config loading
pub type Result<T> = std::result::Result<T, StyleError>;

/// Errors produced while loading style configuration or compiling it
#[derive(Debug, Error, Diagnostic)]
pub enum StyleError {
    /// A configured path could not be resolved
    #[error("malformed path {path:?}: {reason}")]
    #[diagnostic(
        code(fob::styles::malformed_path),
        help("Check `root`, `styles` and `includePaths` in the style configuration")
    )]
    MalformedPath { path: PathBuf, reason: &'static str },

    /// The project root could not be made absolute
    #[error("cannot resolve project root {path:?}: {source}")]
    #[diagnostic(code(fob::styles::project_root))]
    ProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config parsing/loading errors
    #[error("config file not found: {0}")]
    #[diagnostic(code(fob::styles::config_not_found))]
    ConfigNotFound(PathBuf),

    #[error("invalid style configuration: {0}")]
    #[diagnostic(
        code(fob::styles::invalid_config),
        help("Check the config file syntax and FOB_STYLES_* environment variables")
    )]
    Config(String),

    #[error("failed to serialize compiled configuration: {0}")]
    #[diagnostic(code(fob::styles::serialization))]
    Serialization(#[from] serde_json::Error),
}

impl From<figment::Error> for StyleError {
    fn from(err: figment::Error) -> Self {
        StyleError::Config(err.to_string())
    }
}
