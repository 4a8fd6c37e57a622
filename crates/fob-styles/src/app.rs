//! Application-level style declarations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_root() -> PathBuf {
    PathBuf::from("src")
}

/// Style-related part of the application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Style search root, relative to the project root
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Global stylesheets, in declaration order
    #[serde(default)]
    pub styles: Vec<StyleEntrySpec>,

    /// Options forwarded to the sass and stylus preprocessors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preprocessor_options: Option<StylePreprocessorOptions>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            styles: Vec::new(),
            style_preprocessor_options: None,
        }
    }
}

impl AppConfig {
    /// Configured include paths, empty when no preprocessor options are set
    pub fn include_paths(&self) -> &[PathBuf] {
        self.style_preprocessor_options
            .as_ref()
            .map(|opts| opts.include_paths.as_slice())
            .unwrap_or_default()
    }

    /// Append a global stylesheet declared by bare path
    pub fn with_style(mut self, input: impl Into<PathBuf>) -> Self {
        self.styles.push(StyleEntrySpec::Path(input.into()));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Preprocessor settings shared by the sass and stylus stages
pub struct StylePreprocessorOptions {
    #[serde(default)]
    pub include_paths: Vec<PathBuf>,
}

/// A raw global style declaration
///
/// ```
/// use fob_styles::StyleEntrySpec;
/// use serde_json::json;
///
/// let specs: Vec<StyleEntrySpec> = serde_json::from_value(json!([
///     "styles.css",
///     { "input": "theme.scss", "output": "theme" }
/// ]))
/// .unwrap();
/// assert_eq!(specs[0].input().to_str(), Some("styles.css"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleEntrySpec {
    Path(PathBuf),
    Detailed(ExtraEntry),
}

impl StyleEntrySpec {
    /// Stylesheet path as declared, relative to the style root
    pub fn input(&self) -> &Path {
        match self {
            StyleEntrySpec::Path(path) => path,
            StyleEntrySpec::Detailed(entry) => &entry.input,
        }
    }
}

/// Object form of a style declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraEntry {
    /// Stylesheet path, relative to the style root
    pub input: PathBuf,

    /// Entry point name this stylesheet is bundled into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Give the stylesheet its own entry named after the file
    #[serde(default)]
    pub lazy: bool,
}
