//! Extraction policy and the output plugins it registers.

use serde::Serialize;

use crate::options::{BuildOptions, HashFormat};

/// Extraction unit global stylesheets are routed into
pub const EXTRACTION_UNIT: &str = "extract-css";

/// How global stylesheets reach the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPolicy {
    /// Injected at runtime by the script bundle
    Inline,
    /// Written to standalone `.css` files
    Extract,
}

impl ExtractionPolicy {
    /// `Extract` when `extractCss` is set, `Inline` otherwise
    pub fn from_options(options: &BuildOptions) -> Self {
        if options.extract_css {
            ExtractionPolicy::Extract
        } else {
            ExtractionPolicy::Inline
        }
    }

    pub fn is_extract(self) -> bool {
        self == ExtractionPolicy::Extract
    }
}

/// Output-emission plugin registered alongside the rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
    /// Emits the extraction unit's CSS, one file per entry
    ExtractCss { unit: String, filename: String },
    /// Drops the empty script chunks left behind by style-only entries
    SuppressExtractedChunks,
}

/// Output file name template for extracted stylesheets
pub fn extracted_filename(hash_format: &HashFormat) -> String {
    format!("[name]{}.bundle.css", hash_format.extract)
}

/// Plugins required by `policy`; none in inline mode
pub fn extraction_plugins(policy: ExtractionPolicy, hash_format: &HashFormat) -> Vec<PluginSpec> {
    match policy {
        ExtractionPolicy::Inline => Vec::new(),
        ExtractionPolicy::Extract => vec![
            PluginSpec::ExtractCss {
                unit: EXTRACTION_UNIT.to_string(),
                filename: extracted_filename(hash_format),
            },
            PluginSpec::SuppressExtractedChunks,
        ],
    }
}
