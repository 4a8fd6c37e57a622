//! Subcommand implementations.

use fob_styles::{BuildTarget, StyleConfig};
use tracing::{debug, info};

use crate::cli::CompileArgs;
use crate::error::Result;

/// Load the layered config, apply flag overrides, compile and print JSON
pub fn compile_execute(args: CompileArgs) -> Result<()> {
    let output = compile_to_json(&args)?;
    println!("{output}");
    Ok(())
}

/// Compiled configuration as JSON text
pub fn compile_to_json(args: &CompileArgs) -> Result<String> {
    let mut config = StyleConfig::load(&args.project_root, args.config.as_deref())?;
    apply_overrides(&mut config, args);
    debug!(build = ?config.build, "effective build options");

    let compiled = config.compile(&args.project_root)?;
    info!(
        entries = compiled.entry.len(),
        rules = compiled.rules().len(),
        plugins = compiled.plugins.len(),
        "compiled style pipeline"
    );

    let json = if args.compact {
        serde_json::to_string(&compiled)?
    } else {
        serde_json::to_string_pretty(&compiled)?
    };
    Ok(json)
}

/// Flags win over file and environment values
fn apply_overrides(config: &mut StyleConfig, args: &CompileArgs) {
    let build = &mut config.build;
    if args.production {
        build.target = BuildTarget::Production;
    }
    if args.extract_css {
        build.extract_css = true;
    }
    if let Some(sourcemaps) = args.sourcemaps {
        build.sourcemaps = sourcemaps;
    }
    if let Some(base_href) = &args.base_href {
        build.base_href = base_href.clone();
    }
    if let Some(deploy_url) = &args.deploy_url {
        build.deploy_url = deploy_url.clone();
    }
    if let Some(size) = args.inline_asset_max_size {
        build.inline_asset_max_size = Some(size);
    }
    if let Some(hashing) = args.output_hashing {
        build.output_hashing = hashing.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputHashingArg;
    use fob_styles::OutputHashing;

    #[test]
    fn overrides_replace_loaded_values() {
        let mut config = StyleConfig::default();
        let args = CompileArgs {
            production: true,
            base_href: Some("/app/".to_string()),
            inline_asset_max_size: Some(-1.0),
            output_hashing: Some(OutputHashingArg::Bundles),
            sourcemaps: Some(false),
            ..Default::default()
        };

        apply_overrides(&mut config, &args);
        assert!(config.build.is_production());
        assert_eq!(config.build.base_href, "/app/");
        assert!(!config.build.inline_assets_enabled());
        assert_eq!(config.build.output_hashing, OutputHashing::Bundles);
        assert!(!config.build.sourcemaps);
        assert!(!config.build.extract_css);
    }

    #[test]
    fn unset_flags_keep_loaded_values() {
        let mut config = StyleConfig::default();
        config.build.deploy_url = "/static/".to_string();
        config.build.extract_css = true;

        apply_overrides(&mut config, &CompileArgs::default());
        assert_eq!(config.build.deploy_url, "/static/");
        assert!(config.build.extract_css);
    }
}
