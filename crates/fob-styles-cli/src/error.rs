//! CLI error handling.
//!
//! Library errors already carry miette diagnostics, so they are reported as-is;
//! everything else gets a plain report.

use fob_styles::StyleError;
use miette::Report;
use thiserror::Error;

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or compiling the style configuration failed
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Serializing the compiled configuration failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a CLI error into a miette report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Style(e) => Report::new(e),
        other => miette::miette!("{}", other),
    }
}
