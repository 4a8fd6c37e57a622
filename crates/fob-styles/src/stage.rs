//! Transform stages that make up a compiled rule's chain.
//!
//! Stages built from construction arguments are returned as [`Staged`] pairs so
//! an eject-style caller can regenerate an equivalent standalone config from
//! `reconstruction_args` alone.

use serde::Serialize;
use std::path::PathBuf;

use crate::minify::MinifyOptions;
use crate::options::BuildOptions;
use crate::url_policy::UrlPolicy;

/// Decimal precision handed to the sass compiler
pub const SASS_PRECISION: u8 = 8;

/// A built stage paired with the arguments it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Staged<S, A> {
    pub stage: S,
    pub reconstruction_args: A,
}

/// One loader in a rule chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "loader", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Loader {
    Sass {
        source_map: bool,
        precision: u8,
        include_paths: Vec<PathBuf>,
    },
    Less {
        source_map: bool,
    },
    Stylus {
        source_map: bool,
        paths: Vec<PathBuf>,
    },
    PostCss {
        source_map: bool,
        plugins: Staged<Vec<PostProcessor>, PostProcessArgs>,
    },
    /// Resolves `url()` and `@import` into module references
    Css {
        source_map: bool,
        import_loaders: u8,
    },
    /// Exports the processed CSS as a string
    ExportString,
    /// Injects the processed CSS into the document at runtime
    StyleInject,
    /// Hands the processed CSS to an extraction unit
    Extract {
        unit: String,
        public_path: String,
    },
}

impl Loader {
    /// Plugins of a post-processing stage, `None` for every other loader
    pub fn post_processors(&self) -> Option<&[PostProcessor]> {
        match self {
            Loader::PostCss { plugins, .. } => Some(plugins.stage.as_slice()),
            _ => None,
        }
    }
}

/// Plugins run by the post-processing stage, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PostProcessor {
    UrlRewrite { rules: UrlPolicy },
    Autoprefixer,
    CustomProperties { preserve: bool },
    Minify { options: MinifyOptions },
}

/// Arguments the post-processing plugin list is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProcessArgs {
    pub base_href: String,
    pub deploy_url: String,
    /// `None` when inlining is disabled
    pub inline_max_size_kb: Option<u64>,
    pub minimize: bool,
}

impl PostProcessArgs {
    /// Capture the build options the post-processing plugins depend on
    pub fn new(options: &BuildOptions) -> Self {
        Self {
            base_href: options.base_href.clone(),
            deploy_url: options.deploy_url.clone(),
            inline_max_size_kb: options
                .inline_assets_enabled()
                .then(|| options.inline_threshold_kb()),
            minimize: options.is_production(),
        }
    }

    /// Regenerate the plugin list without the compiler
    pub fn rebuild(&self) -> Vec<PostProcessor> {
        let policy = UrlPolicy::new(&self.base_href, &self.deploy_url, self.inline_max_size_kb);
        post_processors(policy, self.minimize)
    }
}

/// Pair the plugin list for `policy` with its reconstruction arguments
pub fn post_process_stage(
    policy: &UrlPolicy,
    args: PostProcessArgs,
) -> Staged<Vec<PostProcessor>, PostProcessArgs> {
    Staged {
        stage: post_processors(policy.clone(), args.minimize),
        reconstruction_args: args,
    }
}

fn post_processors(policy: UrlPolicy, minimize: bool) -> Vec<PostProcessor> {
    let mut plugins = vec![
        PostProcessor::UrlRewrite { rules: policy },
        PostProcessor::Autoprefixer,
        PostProcessor::CustomProperties { preserve: true },
    ];
    if minimize {
        plugins.push(PostProcessor::Minify {
            options: MinifyOptions::default(),
        });
    }
    plugins
}

/// Arguments an extraction stage is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractArgs {
    pub unit: String,
    /// Chain whose output is extracted, in execution order
    pub loaders: Vec<Loader>,
    /// Empty so extracted CSS keeps asset URLs relative to the stylesheet
    pub public_path: String,
}

impl ExtractArgs {
    /// Regenerate the extracted chain: the wrapped loaders, then the extract stage
    pub fn rebuild(&self) -> Vec<Loader> {
        let mut loaders = self.loaders.clone();
        loaders.push(Loader::Extract {
            unit: self.unit.clone(),
            public_path: self.public_path.clone(),
        });
        loaders
    }

    /// Build the chain and keep these arguments alongside it
    pub fn into_staged(self) -> Staged<Vec<Loader>, ExtractArgs> {
        Staged {
            stage: self.rebuild(),
            reconstruction_args: self,
        }
    }
}
