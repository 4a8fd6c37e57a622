//! Per-dialect transform rules.
//!
//! Every dialect gets a component rule that excludes the global stylesheets and
//! exports its CSS as a string. When global stylesheets exist it also gets a
//! global rule, restricted to exactly those paths, that either injects the CSS
//! at runtime or routes it into the extraction unit.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::entries::GlobalStylePathSet;
use crate::extract::{EXTRACTION_UNIT, ExtractionPolicy};
use crate::stage::{
    ExtractArgs, Loader, PostProcessArgs, PostProcessor, SASS_PRECISION, Staged,
    post_process_stage,
};
use crate::url_policy::UrlPolicy;

/// Supported stylesheet dialects, in rule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Css,
    /// `.scss` and `.sass`
    Sass,
    Less,
    Stylus,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Dialect::Css, Dialect::Sass, Dialect::Less, Dialect::Stylus];

    /// File name pattern the bundler matches rules against
    pub fn test(self) -> &'static str {
        match self {
            Dialect::Css => r"\.css$",
            Dialect::Sass => r"\.scss$|\.sass$",
            Dialect::Less => r"\.less$",
            Dialect::Stylus => r"\.styl$",
        }
    }

    /// File extensions handled by this dialect, without the dot
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Dialect::Css => &["css"],
            Dialect::Sass => &["scss", "sass"],
            Dialect::Less => &["less"],
            Dialect::Stylus => &["styl"],
        }
    }

    /// Whether `path` has one of this dialect's extensions
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Dialect-specific first stage; plain CSS has none
    pub fn preprocessor(self, source_map: bool, include_paths: &[PathBuf]) -> Option<Loader> {
        match self {
            Dialect::Css => None,
            Dialect::Sass => Some(Loader::Sass {
                source_map,
                precision: SASS_PRECISION,
                include_paths: include_paths.to_vec(),
            }),
            Dialect::Less => Some(Loader::Less { source_map }),
            Dialect::Stylus => Some(Loader::Stylus {
                source_map,
                paths: include_paths.to_vec(),
            }),
        }
    }
}

/// Which stylesheets a rule variant is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    Component,
    Global,
}

/// Path filter splitting component from global stylesheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPartition {
    Exclude(GlobalStylePathSet),
    Include(GlobalStylePathSet),
}

impl PathPartition {
    /// Whether a rule with this partition applies to `path`
    pub fn admits(&self, path: &Path) -> bool {
        match self {
            PathPartition::Exclude(paths) => !paths.contains(path),
            PathPartition::Include(paths) => paths.contains(path),
        }
    }
}

/// Loader chain of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RuleUse {
    Loaders(Vec<Loader>),
    Extract(Staged<Vec<Loader>, ExtractArgs>),
}

impl RuleUse {
    /// Loaders in execution order
    pub fn loaders(&self) -> &[Loader] {
        match self {
            RuleUse::Loaders(loaders) => loaders,
            RuleUse::Extract(staged) => &staged.stage,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, RuleUse::Extract(_))
    }
}

/// One bundler rule for a dialect in a given scope.
///
/// Serializes to the bundler's rule shape:
///
/// ```text
/// { "dialect": "sass", "scope": "global", "test": "\\.scss$|\\.sass$",
///   "include": ["/p/src/styles.scss"], "use": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledRule {
    pub dialect: Dialect,
    pub scope: RuleScope,
    pub test: &'static str,
    #[serde(flatten)]
    pub partition: PathPartition,
    #[serde(rename = "use")]
    pub use_: RuleUse,
}

impl CompiledRule {
    /// Whether the bundler would apply this rule to `path`
    pub fn matches(&self, path: &Path) -> bool {
        self.dialect.matches(path) && self.partition.admits(path)
    }

    pub fn loaders(&self) -> &[Loader] {
        self.use_.loaders()
    }

    /// Whether the post-processing stage of this rule minifies
    pub fn has_minifier(&self) -> bool {
        self.loaders()
            .iter()
            .filter_map(Loader::post_processors)
            .flatten()
            .any(|plugin| matches!(plugin, PostProcessor::Minify { .. }))
    }
}

/// Everything rule compilation depends on
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub source_map: bool,
    pub include_paths: &'a [PathBuf],
    pub url_policy: &'a UrlPolicy,
    pub post_process: &'a PostProcessArgs,
    pub global_paths: &'a GlobalStylePathSet,
    pub extraction: ExtractionPolicy,
}

/// Preprocessor, post-processing and css stages shared by both variants
fn common_chain(dialect: Dialect, ctx: &RuleContext<'_>) -> Vec<Loader> {
    let mut chain: Vec<Loader> = dialect
        .preprocessor(ctx.source_map, ctx.include_paths)
        .into_iter()
        .collect();
    chain.push(Loader::PostCss {
        source_map: ctx.source_map,
        plugins: post_process_stage(ctx.url_policy, ctx.post_process.clone()),
    });
    chain.push(Loader::Css {
        source_map: ctx.source_map,
        import_loaders: 1,
    });
    chain
}

/// Build one rule variant for `dialect`
pub fn build_variant(dialect: Dialect, scope: RuleScope, ctx: &RuleContext<'_>) -> CompiledRule {
    let mut chain = common_chain(dialect, ctx);
    let global_paths = ctx.global_paths.clone();

    let (partition, use_) = match scope {
        RuleScope::Component => {
            chain.push(Loader::ExportString);
            (PathPartition::Exclude(global_paths), RuleUse::Loaders(chain))
        }
        RuleScope::Global => {
            let use_ = match ctx.extraction {
                ExtractionPolicy::Inline => {
                    chain.push(Loader::StyleInject);
                    RuleUse::Loaders(chain)
                }
                ExtractionPolicy::Extract => RuleUse::Extract(
                    ExtractArgs {
                        unit: EXTRACTION_UNIT.to_string(),
                        loaders: chain,
                        public_path: String::new(),
                    }
                    .into_staged(),
                ),
            };
            (PathPartition::Include(global_paths), use_)
        }
    };

    CompiledRule {
        dialect,
        scope,
        test: dialect.test(),
        partition,
        use_,
    }
}

/// Component rules for every dialect, then global rules when there are global paths
pub fn compile_rules(ctx: &RuleContext<'_>) -> Vec<CompiledRule> {
    let mut rules: Vec<CompiledRule> = Dialect::ALL
        .iter()
        .map(|&dialect| build_variant(dialect, RuleScope::Component, ctx))
        .collect();

    if !ctx.global_paths.is_empty() {
        rules.extend(
            Dialect::ALL
                .iter()
                .map(|&dialect| build_variant(dialect, RuleScope::Global, ctx)),
        );
    }

    debug!(
        rules = rules.len(),
        extraction = ?ctx.extraction,
        "compiled style rules"
    );
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BuildOptions;
    use crate::url_policy::build_url_policy;

    struct Fixture {
        include_paths: Vec<PathBuf>,
        policy: UrlPolicy,
        args: PostProcessArgs,
        globals: GlobalStylePathSet,
    }

    impl Fixture {
        fn new(globals: &[&str]) -> Self {
            let options = BuildOptions::default();
            Self {
                include_paths: vec![PathBuf::from("/p/src/partials")],
                policy: build_url_policy(&options),
                args: PostProcessArgs::new(&options),
                globals: globals.iter().map(PathBuf::from).collect(),
            }
        }

        fn ctx(&self, extraction: ExtractionPolicy) -> RuleContext<'_> {
            RuleContext {
                source_map: true,
                include_paths: &self.include_paths,
                url_policy: &self.policy,
                post_process: &self.args,
                global_paths: &self.globals,
                extraction,
            }
        }
    }

    #[test]
    fn dialect_matching() {
        assert!(Dialect::Sass.matches(Path::new("a/b.scss")));
        assert!(Dialect::Sass.matches(Path::new("a/b.sass")));
        assert!(!Dialect::Sass.matches(Path::new("a/b.css")));
        assert!(Dialect::Stylus.matches(Path::new("x.styl")));
        assert!(!Dialect::Css.matches(Path::new("css")));
    }

    #[test]
    fn sass_and_stylus_receive_include_paths() {
        let paths = vec![PathBuf::from("/inc")];
        assert_eq!(
            Dialect::Sass.preprocessor(false, &paths),
            Some(Loader::Sass {
                source_map: false,
                precision: 8,
                include_paths: paths.clone(),
            })
        );
        assert_eq!(
            Dialect::Stylus.preprocessor(true, &paths),
            Some(Loader::Stylus {
                source_map: true,
                paths,
            })
        );
        assert_eq!(Dialect::Css.preprocessor(true, &[]), None);
    }

    #[test]
    fn component_variant_exports_string() {
        let fixture = Fixture::new(&["/p/src/styles.css"]);
        let rule = build_variant(
            Dialect::Less,
            RuleScope::Component,
            &fixture.ctx(ExtractionPolicy::Inline),
        );

        let loaders = rule.loaders();
        assert!(matches!(loaders[0], Loader::Less { .. }));
        assert!(matches!(loaders[1], Loader::PostCss { .. }));
        assert!(matches!(loaders[2], Loader::Css { import_loaders: 1, .. }));
        assert_eq!(loaders.last(), Some(&Loader::ExportString));
        assert!(matches!(rule.partition, PathPartition::Exclude(_)));
    }

    #[test]
    fn global_variant_injects_without_extraction() {
        let fixture = Fixture::new(&["/p/src/styles.css"]);
        let rule = build_variant(
            Dialect::Css,
            RuleScope::Global,
            &fixture.ctx(ExtractionPolicy::Inline),
        );

        assert_eq!(rule.loaders().last(), Some(&Loader::StyleInject));
        assert!(!rule.use_.is_extracted());
        assert!(rule.matches(Path::new("/p/src/styles.css")));
        assert!(!rule.matches(Path::new("/p/src/app/app.component.css")));
    }

    #[test]
    fn global_variant_routes_into_extraction_unit() {
        let fixture = Fixture::new(&["/p/src/styles.css"]);
        let rule = build_variant(
            Dialect::Css,
            RuleScope::Global,
            &fixture.ctx(ExtractionPolicy::Extract),
        );

        let RuleUse::Extract(staged) = &rule.use_ else {
            panic!("expected extracted rule");
        };
        assert_eq!(staged.reconstruction_args.public_path, "");
        assert_eq!(staged.stage, staged.reconstruction_args.rebuild());
        assert_eq!(
            rule.loaders().last(),
            Some(&Loader::Extract {
                unit: EXTRACTION_UNIT.to_string(),
                public_path: String::new(),
            })
        );
        assert!(!rule.loaders().contains(&Loader::StyleInject));
    }

    #[test]
    fn variants_partition_paths() {
        let fixture = Fixture::new(&["/p/src/styles.scss"]);
        let ctx = fixture.ctx(ExtractionPolicy::Inline);
        let component = build_variant(Dialect::Sass, RuleScope::Component, &ctx);
        let global = build_variant(Dialect::Sass, RuleScope::Global, &ctx);

        for path in ["/p/src/styles.scss", "/p/src/app/app.component.scss"] {
            let path = Path::new(path);
            assert!(component.matches(path) != global.matches(path));
        }
    }

    #[test]
    fn no_global_paths_means_component_rules_only() {
        let fixture = Fixture::new(&[]);
        let rules = compile_rules(&fixture.ctx(ExtractionPolicy::Extract));
        assert_eq!(rules.len(), 4);
        assert!(rules.iter().all(|rule| rule.scope == RuleScope::Component));
    }

    #[test]
    fn rule_order_is_components_then_globals() {
        let fixture = Fixture::new(&["/p/src/styles.css"]);
        let rules = compile_rules(&fixture.ctx(ExtractionPolicy::Inline));
        let order: Vec<_> = rules.iter().map(|r| (r.scope, r.dialect)).collect();
        assert_eq!(
            order,
            vec![
                (RuleScope::Component, Dialect::Css),
                (RuleScope::Component, Dialect::Sass),
                (RuleScope::Component, Dialect::Less),
                (RuleScope::Component, Dialect::Stylus),
                (RuleScope::Global, Dialect::Css),
                (RuleScope::Global, Dialect::Sass),
                (RuleScope::Global, Dialect::Less),
                (RuleScope::Global, Dialect::Stylus),
            ]
        );
    }
}
