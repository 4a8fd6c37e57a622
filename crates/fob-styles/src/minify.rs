//! Minifier settings for production builds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Comments that survive minification: `@preserve`, `@license`, source-map and
/// source-url pragmas, and `/*! ... */` banners. Matching is case-sensitive.
pub const IMPORTANT_COMMENT_PATTERN: &str =
    r"@preserve|@license|[@#]\s*source(?:Mapping)?URL|^!";

static IMPORTANT_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(IMPORTANT_COMMENT_PATTERN).expect("valid comment pattern"));

/// Minifier options restricted to transforms that cannot change meaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifyOptions {
    pub safe: bool,
    /// Merging long-hand properties into short-hands is not safe
    pub merge_longhand: bool,
    /// Prefixing runs as its own stage
    pub autoprefixer: bool,
    pub discard_comments: CommentPolicy,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            safe: true,
            merge_longhand: false,
            autoprefixer: false,
            discard_comments: CommentPolicy::default(),
        }
    }
}

/// Which comments the minifier keeps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPolicy {
    pub preserve: &'static str,
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self {
            preserve: IMPORTANT_COMMENT_PATTERN,
        }
    }
}

impl CommentPolicy {
    /// Whether the minifier drops `comment` (text between `/*` and `*/`)
    pub fn removes(&self, comment: &str) -> bool {
        !IMPORTANT_COMMENT.is_match(comment)
    }
}
