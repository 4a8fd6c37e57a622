//! Layered configuration loading.
//!
//! Priority: environment > config file > defaults.

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
    value::{Uncased, UncasedStr},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::AppConfig;
use crate::compiler::{CompiledConfig, compile};
use crate::error::{Result, StyleError};
use crate::options::BuildOptions;

/// Config file names searched in the project root, in order
pub const CONFIG_FILES: [&str; 2] = ["fob-styles.toml", "fob-styles.json"];

/// Prefix of environment overrides (`FOB_STYLES_EXTRACT_CSS=true`)
pub const ENV_PREFIX: &str = "FOB_STYLES_";

/// Everything the compiler needs besides the project root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub build: BuildOptions,
}

impl StyleConfig {
    /// First conventional config file present in `project_root`
    pub fn discover(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    /// Layered providers: defaults, then the config file, then the environment.
    ///
    /// An explicit `config_path` must exist; without one the project root is
    /// searched for [`CONFIG_FILES`].
    pub fn figment(project_root: &Path, config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(StyleConfig::default()));

        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(StyleError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(project_root),
        };

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading style config");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).map(env_key).lowercase(false)))
    }

    /// Load and extract the layered configuration.
    ///
    /// # Arguments
    ///
    /// * `project_root` - Directory searched for [`CONFIG_FILES`]
    /// * `config_path` - Explicit config file, used instead of discovery
    ///
    /// # Errors
    ///
    /// - [`StyleError::ConfigNotFound`] if `config_path` does not exist
    /// - [`StyleError::Config`] if a source cannot be parsed or a value has the
    ///   wrong type
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fob_styles::StyleConfig;
    /// use std::path::Path;
    ///
    /// let config = StyleConfig::load(Path::new("."), None)?;
    /// let compiled = config.compile(Path::new("."))?;
    /// println!("{}", serde_json::to_string_pretty(&compiled)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load(project_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        Ok(Self::figment(project_root, config_path)?.extract()?)
    }

    /// Compile the loaded options with the default entry parser
    pub fn compile(&self, project_root: &Path) -> Result<CompiledConfig> {
        compile(project_root, &self.app, &self.build)
    }
}

/// Map flat environment keys onto nested config fields.
///
/// Keys must keep their case afterwards so the camelCase field names match.
fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let mapped = match key.as_str().to_ascii_lowercase().as_str() {
        "root" => "app.root",
        "sourcemaps" => "build.sourcemaps",
        "target" => "build.target",
        "base_href" => "build.baseHref",
        "deploy_url" => "build.deployUrl",
        "inline_asset_max_size" => "build.inlineAssetMaxSize",
        "extract_css" => "build.extractCss",
        "output_hashing" => "build.outputHashing",
        _ => return key.into(),
    };
    mapped.into()
}
