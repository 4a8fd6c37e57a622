//! Style pipeline configuration for fob builds.
//!
//! Turns a project's style options into the pieces a bundler config needs:
//!
//! - named entry points listing their global stylesheets
//! - one rule pair per stylesheet dialect (component styles become strings,
//!   global styles are injected at runtime or extracted to files)
//! - the plugins extraction requires
//!
//! Compilation is pure: no files are read and identical inputs always produce
//! identical output. Only [`StyleConfig::load`] touches the filesystem.
//!
//! ```
//! use fob_styles::{compile, AppConfig, BuildOptions, BuildTarget};
//! use std::path::Path;
//!
//! let app = AppConfig::default().with_style("styles.scss");
//! let build = BuildOptions {
//!     target: BuildTarget::Production,
//!     ..Default::default()
//! };
//!
//! let config = compile(Path::new("/project"), &app, &build).unwrap();
//! assert!(config.rules().iter().all(|rule| rule.has_minifier()));
//! ```

pub mod app;
pub mod compiler;
pub mod entries;
pub mod error;
pub mod extract;
pub mod loading;
pub mod minify;
pub mod options;
pub mod paths;
pub mod rules;
pub mod stage;
pub mod url_policy;

pub use app::{AppConfig, ExtraEntry, StyleEntrySpec, StylePreprocessorOptions};
pub use compiler::{CompiledConfig, ModuleConfig, compile, compile_with_parser};
pub use entries::{
    EntryParser, EntryPointMap, ExtraEntryParser, GlobalStylePathSet, StyleEntry,
    aggregate_entries,
};
pub use error::{Result, StyleError};
pub use extract::{ExtractionPolicy, PluginSpec};
pub use loading::StyleConfig;
pub use minify::{CommentPolicy, MinifyOptions};
pub use options::{BuildOptions, BuildTarget, HashFormat, OutputHashing};
pub use paths::{StylePaths, resolve_style_paths};
pub use rules::{CompiledRule, Dialect, PathPartition, RuleScope, RuleUse, build_variant};
pub use stage::{ExtractArgs, Loader, PostProcessArgs, PostProcessor, Staged};
pub use url_policy::{AssetRef, UrlPolicy, UrlRewriteRule, build_url_policy};
