//! Command-line interface definition.
//!
//! - `fob-styles compile` - print the compiled style configuration as JSON

use clap::{Args, Parser, Subcommand, ValueEnum};
use fob_styles::OutputHashing;
use std::path::PathBuf;

/// fob-styles - compile a project's style pipeline configuration
#[derive(Parser, Debug)]
#[command(
    name = "fob-styles",
    version,
    about = "Compile the style pipeline configuration for a fob build"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile entry points, rules and plugins and print them as JSON
    ///
    /// Options are read from fob-styles.toml or fob-styles.json in the
    /// project root (or --config), then FOB_STYLES_* environment variables,
    /// then the flags below.
    Compile(CompileArgs),
}

/// Arguments of `fob-styles compile`
#[derive(Args, Debug, Clone, Default)]
pub struct CompileArgs {
    /// Config file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root that style paths are resolved against
    #[arg(short = 'C', long, default_value = ".", value_name = "DIR")]
    pub project_root: PathBuf,

    /// Build for production (enables minification)
    #[arg(long)]
    pub production: bool,

    /// Extract global styles into standalone .css files
    #[arg(long)]
    pub extract_css: bool,

    /// Emit source maps
    #[arg(long, value_name = "BOOL")]
    pub sourcemaps: Option<bool>,

    /// Base href the application is served under
    #[arg(long, value_name = "HREF")]
    pub base_href: Option<String>,

    /// URL prefix for deployed assets
    #[arg(long, value_name = "URL")]
    pub deploy_url: Option<String>,

    /// Largest asset inlined as a data URI, in KB (negative disables inlining)
    #[arg(long, value_name = "KB", allow_hyphen_values = true)]
    pub inline_asset_max_size: Option<f64>,

    /// Which outputs get a content hash in their file name
    #[arg(long, value_enum, value_name = "MODE")]
    pub output_hashing: Option<OutputHashingArg>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// `--output-hashing` values
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputHashingArg {
    /// No hashes
    #[value(name = "none")]
    None,
    /// Hash media files only
    #[value(name = "media")]
    Media,
    /// Hash bundles and extracted stylesheets
    #[value(name = "bundles")]
    Bundles,
    /// Hash everything
    #[value(name = "all")]
    All,
}

impl From<OutputHashingArg> for OutputHashing {
    fn from(arg: OutputHashingArg) -> Self {
        match arg {
            OutputHashingArg::None => OutputHashing::None,
            OutputHashingArg::Media => OutputHashing::Media,
            OutputHashingArg::Bundles => OutputHashing::Bundles,
            OutputHashingArg::All => OutputHashing::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_compile_overrides() {
        let cli = Cli::try_parse_from([
            "fob-styles",
            "compile",
            "--production",
            "--extract-css",
            "--deploy-url",
            "https://cdn.example.com/",
            "--inline-asset-max-size",
            "-1",
            "--output-hashing",
            "all",
        ])
        .unwrap();

        let Command::Compile(args) = cli.command;
        assert!(args.production);
        assert!(args.extract_css);
        assert_eq!(args.deploy_url.as_deref(), Some("https://cdn.example.com/"));
        assert_eq!(args.inline_asset_max_size, Some(-1.0));
        assert_eq!(args.output_hashing, Some(OutputHashingArg::All));
        assert_eq!(args.project_root, PathBuf::from("."));
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["fob-styles", "-v", "-q", "compile"]);
        assert!(result.is_err());
    }
}
