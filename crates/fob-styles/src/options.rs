//! Style-related build options.
//!
//! These are the `build` section of the style configuration. Field names are
//! camelCase on disk:
//!
//! ```toml
//! [build]
//! target = "production"
//! deployUrl = "https://cdn.example.com/"
//! extractCss = true
//! outputHashing = "bundles"
//! inlineAssetMaxSize = 4
//! ```
//!
//! Every field is optional. Unset fields take the values of
//! [`BuildOptions::default`].

use serde::{Deserialize, Serialize};

/// Inline threshold used when `inlineAssetMaxSize` is unset or not a whole number (KB)
pub const DEFAULT_INLINE_MAX_SIZE_KB: u64 = 10;

/// Length of the hash placeholders emitted in output file names
const HASH_LENGTH: usize = 20;

fn default_true() -> bool {
    true
}

/// Build options consumed by the style pipeline compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Emit source maps from every stage of the chain
    #[serde(default = "default_true")]
    pub sourcemaps: bool,

    /// Build target; production enables minification
    #[serde(default)]
    pub target: BuildTarget,

    /// Base href the application is served under
    #[serde(default)]
    pub base_href: String,

    /// URL prefix where deployed assets live
    #[serde(default)]
    pub deploy_url: String,

    /// Maximum asset size to inline as a data URI (KB).
    ///
    /// `None` uses the default threshold, a negative value disables inlining.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_asset_max_size: Option<f64>,

    /// Extract global styles into standalone `.css` files
    #[serde(default)]
    pub extract_css: bool,

    /// Which outputs carry a content hash in their file name
    #[serde(default)]
    pub output_hashing: OutputHashing,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            sourcemaps: true,
            target: BuildTarget::Development,
            base_href: String::new(),
            deploy_url: String::new(),
            inline_asset_max_size: None,
            extract_css: false,
            output_hashing: OutputHashing::None,
        }
    }
}

impl BuildOptions {
    /// Production builds minify every stylesheet chain
    pub fn is_production(&self) -> bool {
        self.target == BuildTarget::Production
    }

    /// Whether small assets may be inlined at all
    pub fn inline_assets_enabled(&self) -> bool {
        self.inline_asset_max_size.is_none_or(|size| size >= 0.0)
    }

    /// Inline threshold in KB. Non-integral values fall back to the default.
    pub fn inline_threshold_kb(&self) -> u64 {
        match self.inline_asset_max_size {
            Some(size) if size.is_finite() && size >= 0.0 && size.fract() == 0.0 => size as u64,
            _ => DEFAULT_INLINE_MAX_SIZE_KB,
        }
    }
}

/// Build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTarget {
    #[default]
    Development,
    Production,
}

/// Output hashing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputHashing {
    /// No hashes in any file name
    #[default]
    None,
    /// Hash emitted media files only
    Media,
    /// Hash bundles and extracted stylesheets
    Bundles,
    /// Hash everything
    All,
}

/// File name hash placeholders derived from [`OutputHashing`].
///
/// Only extracted stylesheets are named by this crate, so only their token is
/// carried. Script and media names belong to the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashFormat {
    /// Token spliced before `.bundle.css`; empty when extracted CSS is unhashed
    pub extract: String,
}

impl HashFormat {
    /// Hash tokens for `mode`. Bundles and everything hash extracted CSS.
    ///
    /// # Examples
    ///
    /// ```
    /// use fob_styles::{HashFormat, OutputHashing};
    ///
    /// assert_eq!(HashFormat::resolve(OutputHashing::All).extract, ".[contenthash:20]");
    /// assert_eq!(HashFormat::resolve(OutputHashing::Media).extract, "");
    /// ```
    pub fn resolve(mode: OutputHashing) -> Self {
        let extract = match mode {
            OutputHashing::Bundles | OutputHashing::All => {
                format!(".[contenthash:{HASH_LENGTH}]")
            }
            OutputHashing::None | OutputHashing::Media => String::new(),
        };
        Self { extract }
    }
}
