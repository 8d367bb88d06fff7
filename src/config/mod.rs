use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{builder, docker};


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default registry username when none is given on the command line
    pub default_username: Option<String>,

    /// Repository name; defaults to the build context directory name
    pub repository: Option<String>,

    /// Buildx builder instance name
    #[serde(default = "default_builder")]
    pub builder: String,

    /// Docker binary to invoke
    #[serde(default = "default_docker")]
    pub docker: String,

    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Pass --no-cache to every build
    #[serde(default = "default_no_cache")]
    pub no_cache: bool,

    /// Extra arguments appended to every buildx build invocation
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_builder() -> String {
    builder::DEFAULT_NAME.to_string()
}

fn default_docker() -> String {
    docker::DEFAULT_BINARY.to_string()
}

fn default_no_cache() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            no_cache: default_no_cache(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_username: None,
            repository: None,
            builder: default_builder(),
            docker: default_docker(),
            build: BuildConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("archbake").join("config.toml");
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
