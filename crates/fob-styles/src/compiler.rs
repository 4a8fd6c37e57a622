//! Style pipeline compilation.
//!
//! ```text
//! paths ─→ entries ─┐
//! options ─→ url policy ─→ rules ─→ CompiledConfig
//!                   └─→ extraction plugins
//! ```

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info_span};

use crate::app::AppConfig;
use crate::entries::{
    DEFAULT_STYLE_ENTRY, EntryParser, EntryPointMap, ExtraEntryParser, aggregate_entries,
};
use crate::error::Result;
use crate::extract::{ExtractionPolicy, PluginSpec, extraction_plugins};
use crate::options::{BuildOptions, HashFormat};
use crate::paths::resolve_style_paths;
use crate::rules::{CompiledRule, RuleContext, compile_rules};
use crate::stage::PostProcessArgs;
use crate::url_policy::build_url_policy;

/// Style configuration handed to the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledConfig {
    pub entry: EntryPointMap,
    pub module: ModuleConfig,
    pub plugins: Vec<PluginSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// The `module` section of the bundler config
pub struct ModuleConfig {
    pub rules: Vec<CompiledRule>,
}

impl CompiledConfig {
    /// Compiled rules: component variants first, then global variants
    pub fn rules(&self) -> &[CompiledRule] {
        &self.module.rules
    }

    /// Serialize to the JSON layout the bundler config assembler reads
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Compile the style pipeline with the default entry parser
///
/// # Example
///
/// ```
/// use fob_styles::{compile, AppConfig, BuildOptions};
/// use std::path::Path;
///
/// let app = AppConfig::default().with_style("styles.css");
/// let build = BuildOptions {
///     extract_css: true,
///     ..Default::default()
/// };
///
/// let config = compile(Path::new("/project"), &app, &build).unwrap();
/// assert_eq!(config.entry.get("styles").unwrap().len(), 1);
/// assert_eq!(config.plugins.len(), 2);
/// ```
pub fn compile(
    project_root: &Path,
    app: &AppConfig,
    build: &BuildOptions,
) -> Result<CompiledConfig> {
    compile_with_parser(project_root, app, build, &ExtraEntryParser)
}

/// Compile the style pipeline, parsing style declarations with `parser`
pub fn compile_with_parser(
    project_root: &Path,
    app: &AppConfig,
    build: &BuildOptions,
    parser: &dyn EntryParser,
) -> Result<CompiledConfig> {
    let span = info_span!("compile_styles", project_root = %project_root.display());
    let _enter = span.enter();

    let paths = resolve_style_paths(project_root, app)?;
    let parsed = parser.parse(&app.styles, &paths.root, DEFAULT_STYLE_ENTRY)?;
    let (entry, global_paths) = aggregate_entries(parsed);

    let url_policy = build_url_policy(build);
    let post_process = PostProcessArgs::new(build);
    let extraction = ExtractionPolicy::from_options(build);

    let rules = compile_rules(&RuleContext {
        source_map: build.sourcemaps,
        include_paths: &paths.include_paths,
        url_policy: &url_policy,
        post_process: &post_process,
        global_paths: &global_paths,
        extraction,
    });

    // Extraction has nothing to emit without global stylesheets
    let plugins = if global_paths.is_empty() {
        Vec::new()
    } else {
        extraction_plugins(extraction, &HashFormat::resolve(build.output_hashing))
    };

    debug!(
        entries = entry.len(),
        rules = rules.len(),
        plugins = plugins.len(),
        production = build.is_production(),
        "compiled style pipeline"
    );

    Ok(CompiledConfig {
        entry,
        module: ModuleConfig { rules },
        plugins,
    })
}
