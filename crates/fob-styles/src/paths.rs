//! Resolution of the style root and preprocessor include paths.
//!
//! The project root is made absolute first. Everything else is joined onto it
//! and cleaned lexically; the filesystem is never consulted, so paths that do
//! not exist yet resolve the same way.

use path_clean::PathClean;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::AppConfig;
use crate::error::{Result, StyleError};

/// Absolute locations the rest of the pipeline works from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePaths {
    pub root: PathBuf,
    pub include_paths: Vec<PathBuf>,
}

/// Resolve `path` against `base` and normalize `.`/`..` components.
///
/// Absolute inputs replace the base, as with [`Path::join`]. An empty path
/// resolves to `base` itself.
///
/// # Errors
///
/// Returns [`StyleError::MalformedPath`] when `path` contains a NUL byte.
pub fn resolve_path(base: &Path, path: &Path) -> Result<PathBuf> {
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return Err(StyleError::MalformedPath {
            path: path.to_path_buf(),
            reason: "path contains a NUL byte",
        });
    }

    Ok(base.join(path).clean())
}

/// Resolve the app's style root against the project root, then each include
/// path against the style root.
///
/// A relative `project_root` is taken relative to the current directory, so
/// every returned path is absolute.
///
/// # Errors
///
/// - [`StyleError::ProjectRoot`] if the current directory cannot be read
/// - [`StyleError::MalformedPath`] if the root or an include path is malformed
pub fn resolve_style_paths(project_root: &Path, app: &AppConfig) -> Result<StylePaths> {
    let project_root =
        std::path::absolute(project_root).map_err(|source| StyleError::ProjectRoot {
            path: project_root.to_path_buf(),
            source,
        })?;
    let root = resolve_path(&project_root, &app.root)?;
    let include_paths = app
        .include_paths()
        .iter()
        .map(|path| resolve_path(&root, path))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        root = %root.display(),
        include_paths = include_paths.len(),
        "resolved style paths"
    );

    Ok(StylePaths {
        root,
        include_paths,
    })
}
