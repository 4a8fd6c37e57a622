//! URL rewrite and inlining rules for assets referenced from stylesheets.
//!
//! The rules form a chain: each one is checked against every asset on its
//! own, so an asset may be touched by more than one rule.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::options::BuildOptions;

static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("valid slash pattern"));

/// Extension of assets that always stay external (`.cur` cursors)
const NEVER_INLINE_EXT: &str = ".cur";

/// An asset reference found in a stylesheet
#[derive(Debug, Clone, Copy)]
pub struct AssetRef<'a> {
    /// URL as written in the stylesheet
    pub url: &'a str,
    /// The URL carries a content hash
    pub hash: bool,
    pub absolute_path: &'a Path,
}

/// A single rule of the URL chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum UrlRewriteRule {
    /// Rebase root-relative URLs onto the deployment prefix
    #[serde(rename = "rewrite", rename_all = "camelCase")]
    RootRelative { base_href: String, deploy_url: String },

    /// Inline unhashed assets smaller than `max_size_kb` as data URIs
    #[serde(rename = "inline", rename_all = "camelCase")]
    InlineSmallAsset { max_size_kb: u64 },
}

impl UrlRewriteRule {
    /// Whether this rule applies to `asset` at all
    pub fn filter(&self, asset: &AssetRef<'_>) -> bool {
        match self {
            UrlRewriteRule::RootRelative { .. } => is_root_relative(asset.url),
            UrlRewriteRule::InlineSmallAsset { .. } => {
                !asset.hash
                    && !asset
                        .absolute_path
                        .to_string_lossy()
                        .ends_with(NEVER_INLINE_EXT)
            }
        }
    }

    /// Rewritten URL, for rewrite rules whose filter accepts `url`
    pub fn rewrite(&self, url: &str) -> Option<String> {
        match self {
            UrlRewriteRule::RootRelative {
                base_href,
                deploy_url,
            } if is_root_relative(url) => Some(rewrite_root_relative(url, base_href, deploy_url)),
            _ => None,
        }
    }

    /// Whether an asset of `size_bytes` is inlined by this rule
    pub fn should_inline(&self, asset: &AssetRef<'_>, size_bytes: u64) -> bool {
        match self {
            UrlRewriteRule::InlineSmallAsset { max_size_kb } => {
                self.filter(asset) && size_bytes < max_size_kb.saturating_mul(1024)
            }
            UrlRewriteRule::RootRelative { .. } => false,
        }
    }
}

/// Ordered URL rules handed to the post-processing stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UrlPolicy {
    rules: Vec<UrlRewriteRule>,
}

impl UrlPolicy {
    /// Root-relative rewrite first, then inlining when `inline_max_size_kb` is set
    pub fn new(base_href: &str, deploy_url: &str, inline_max_size_kb: Option<u64>) -> Self {
        let mut rules = vec![UrlRewriteRule::RootRelative {
            base_href: base_href.to_string(),
            deploy_url: deploy_url.to_string(),
        }];
        if let Some(max_size_kb) = inline_max_size_kb {
            rules.push(UrlRewriteRule::InlineSmallAsset { max_size_kb });
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[UrlRewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose filter accepts `asset`, in chain order
    pub fn applicable<'p>(
        &'p self,
        asset: &'p AssetRef<'p>,
    ) -> impl Iterator<Item = &'p UrlRewriteRule> {
        self.rules.iter().filter(move |rule| rule.filter(asset))
    }

    /// The inlining rule, absent when inlining is disabled
    pub fn inline_rule(&self) -> Option<&UrlRewriteRule> {
        self.rules
            .iter()
            .find(|rule| matches!(rule, UrlRewriteRule::InlineSmallAsset { .. }))
    }
}

/// Build the URL rule chain from the build options
pub fn build_url_policy(options: &BuildOptions) -> UrlPolicy {
    let inline_max_size_kb = options
        .inline_assets_enabled()
        .then(|| options.inline_threshold_kb());
    let policy = UrlPolicy::new(&options.base_href, &options.deploy_url, inline_max_size_kb);

    debug!(rules = policy.len(), "built url rewrite policy");
    policy
}

/// Root-relative: starts with `/` but is not protocol-relative (`//`)
pub fn is_root_relative(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// Compose the deployed location of a root-relative `url`.
///
/// An absolute or root-relative `deploy_url` wins outright and `base_href` is
/// ignored. Otherwise a `base_href` with a scheme is kept verbatim and only the
/// part after it is slash-collapsed, so `https://` survives.
pub fn rewrite_root_relative(url: &str, base_href: &str, deploy_url: &str) -> String {
    if deploy_url.contains("://") || deploy_url.starts_with('/') {
        format!("{}{}", strip_trailing_slash(deploy_url), url)
    } else if base_href.contains("://") {
        let suffix = format!("/{deploy_url}/{url}");
        format!(
            "{}{}",
            strip_trailing_slash(base_href),
            collapse_slashes(&suffix)
        )
    } else {
        collapse_slashes(&format!("/{base_href}/{deploy_url}/{url}"))
    }
}

fn strip_trailing_slash(value: &str) -> &str {
    value.strip_suffix('/').unwrap_or(value)
}

fn collapse_slashes(value: &str) -> String {
    REPEATED_SLASHES.replace_all(value, "/").into_owned()
}
